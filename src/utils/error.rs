use thiserror::Error;

#[derive(Error, Debug)]
pub enum DogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    ApiStatusError { status: reqwest::StatusCode },

    #[error("No breed info found")]
    MissingBreed,

    #[error("No unbanned breed found after {attempts} attempts")]
    BanListExhausted { attempts: u32 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, DogError>;

impl DogError {
    /// 給 CLI 顯示的訊息；細節留在 tracing 日誌
    pub fn user_friendly_message(&self) -> String {
        match self {
            DogError::BanListExhausted { .. } => {
                "No more dogs available (ban list too restrictive?)".to_string()
            }
            DogError::ApiError(_)
            | DogError::ApiStatusError { .. }
            | DogError::MissingBreed
            | DogError::SerializationError(_) => "Failed to fetch dog.".to_string(),
            DogError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            DogError::MissingConfigError { field } => {
                format!("Missing configuration: '{}'", field)
            }
            DogError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DogError::BanListExhausted { .. } => {
                "Unban a few values and try again, or widen the API filter"
            }
            DogError::ApiError(_) | DogError::ApiStatusError { .. } => {
                "Check network connectivity and the API key, then retry"
            }
            DogError::MissingBreed | DogError::SerializationError(_) => {
                "The API returned an unexpected shape; retry the discover command"
            }
            DogError::ConfigValidationError { .. }
            | DogError::MissingConfigError { .. }
            | DogError::InvalidConfigValueError { .. } => {
                "Fix the flagged configuration value and restart"
            }
            DogError::CsvError(_) | DogError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
        }
    }
}
