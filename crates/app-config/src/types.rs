// In crates/app-config/src/types.rs

use serde::Deserialize;

use core_types::StrategyConfig;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for candle ingestion.
    #[serde(default)]
    pub data: DataSettings,
    /// Configured strategies, one `[[strategies]]` table each. When empty
    /// the built-in strategies are used with their defaults.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct DataSettings {
    /// Drop candles the provider still marks as forming.
    #[serde(default)]
    pub complete_only: bool,
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".to_string() }
