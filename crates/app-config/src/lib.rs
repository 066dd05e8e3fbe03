// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, DataSettings, Settings};

/// Loads the application settings from the `config/` directory.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to
/// "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from("config", &environment)
}

/// Loads settings from an explicit directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads the required `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`), if present.
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: impl AsRef<Path>, environment: &str) -> Result<Settings> {
    let dir = dir.as_ref();

    let settings = Config::builder()
        .set_default("app.environment", environment)?
        // 1. Load the base configuration file.
        .add_source(File::with_name(&dir.join("base").to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&dir.join(environment).to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP_APP__LOG_LEVEL=debug`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__"))
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}
