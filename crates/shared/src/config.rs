//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Reporting configuration.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Fact retrieval configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Reporting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Currency code that all grand totals are normalized into.
    #[serde(default = "default_reporting_currency")]
    pub currency: String,
    /// Preferred ordering for currency column groups; codes not listed
    /// here sort alphabetically after these.
    #[serde(default = "default_preferred_currencies")]
    pub preferred_currencies: Vec<String>,
}

fn default_reporting_currency() -> String {
    "USD".to_string()
}

fn default_preferred_currencies() -> Vec<String> {
    ["USD", "EUR", "MXN", "GBP", "CHF"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            currency: default_reporting_currency(),
            preferred_currencies: default_preferred_currencies(),
        }
    }
}

/// Fact retrieval configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Page size used when draining movement streams.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    500
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TESORO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
