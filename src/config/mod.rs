//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SURVEY_BUILDER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use survey_builder::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Surveys read from {}", config.storage.survey_dir.display());
//! ```

mod error;
mod mailer;
mod storage;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use mailer::MailerConfig;
pub use storage::StorageConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the Resend API key has no default.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Result email delivery (Resend)
    #[serde(default)]
    pub email: MailerConfig,

    /// Survey definition storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SURVEY_BUILDER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SURVEY_BUILDER__EMAIL__RESEND_API_KEY=re_...` -> `email.resend_api_key`
    /// - `SURVEY_BUILDER__STORAGE__SURVEY_DIR=/srv/surveys` -> `storage.survey_dir`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SURVEY_BUILDER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.email.validate()?;
        self.storage.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
