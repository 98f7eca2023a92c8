pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli_config::{CliConfig, API_KEY_ENV};

#[cfg(feature = "cli")]
mod cli_config {
    use crate::adapters::the_dog_api::DEFAULT_ENDPOINT;
    use crate::core::discover::DEFAULT_MAX_ATTEMPTS;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    pub const API_KEY_ENV: &str = "DOG_API_KEY";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "dog-discoverer")]
    #[command(about = "Discover random dogs and ban the breeds you never want to see again")]
    pub struct CliConfig {
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        pub endpoint: String,

        /// TheDogAPI key; falls back to the DOG_API_KEY environment variable
        #[arg(long)]
        pub api_key: Option<String>,

        /// Optional TOML config file; supplies discovery/export settings when present
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        pub max_attempts: u32,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log session stats on exit")]
        pub monitor: bool,
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn api_key(&self) -> Option<String> {
            self.api_key
                .clone()
                .or_else(|| std::env::var(API_KEY_ENV).ok())
        }

        fn max_attempts(&self) -> u32 {
            self.max_attempts
        }

        fn timeout_seconds(&self) -> Option<u64> {
            self.timeout_seconds
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("endpoint", &self.endpoint)?;
            validation::validate_range("max_attempts", self.max_attempts, 1, 50)?;
            validation::validate_path("output_path", &self.output_path)?;
            Ok(())
        }
    }
}
