use crate::core::discover::DEFAULT_MAX_ATTEMPTS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DogError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub discover: DiscoverConfig,
    pub export: Option<ExportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_attempts: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: String,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub tsv: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 先做環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOG_API_KEY})；未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("discover.endpoint", &self.discover.endpoint)?;

        if let Some(max_attempts) = self.discover.max_attempts {
            validation::validate_range("discover.max_attempts", max_attempts, 1, 50)?;
        }

        if let Some(export) = &self.export {
            validation::validate_path("export.output_path", &export.output_path)?;

            if let Some(filenames) = &export.filenames {
                if let Some(csv) = &filenames.csv {
                    validation::validate_non_empty_string("export.filenames.csv", csv)?;
                }
                if let Some(tsv) = &filenames.tsv {
                    validation::validate_non_empty_string("export.filenames.tsv", tsv)?;
                }
            }
        }

        Ok(())
    }

    /// 匯出檔名（未設定時用預設值）
    pub fn export_filenames(&self) -> (String, String) {
        let filenames = self.export.as_ref().and_then(|e| e.filenames.as_ref());
        let csv = filenames
            .and_then(|f| f.csv.clone())
            .unwrap_or_else(|| "history.csv".to_string());
        let tsv = filenames
            .and_then(|f| f.tsv.clone())
            .unwrap_or_else(|| "history.tsv".to_string());
        (csv, tsv)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.discover.endpoint
    }

    fn api_key(&self) -> Option<String> {
        // 環境變數沒定義時佔位符會保留，視為未設定
        self.discover
            .api_key
            .clone()
            .filter(|key| !key.contains("${"))
    }

    fn max_attempts(&self) -> u32 {
        self.discover.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.discover.timeout_seconds
    }

    fn output_path(&self) -> &str {
        self.export
            .as_ref()
            .map(|e| e.output_path.as_str())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
