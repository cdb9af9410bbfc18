//! Mailer configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Result email delivery configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    /// Resend API key
    #[serde(default = "default_api_key")]
    pub resend_api_key: Secret<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Resend API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MailerConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate mailer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.resend_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            resend_api_key: default_api_key(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_key() -> Secret<String> {
    Secret::new(String::new())
}

fn default_from_email() -> String {
    "results@surveybuilder.app".to_string()
}

fn default_from_name() -> String {
    "Survey Builder".to_string()
}

fn default_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_timeout() -> u64 {
    30
}
