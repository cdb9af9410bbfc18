//! Resend Mailer - Implementation of ResultMailer for the Resend HTTP API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ResendConfig::new(api_key, "Surveys <results@example.com>")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let mailer = ResendMailer::new(config)?;
//! ```
//!
//! A single `POST {base_url}/emails` is made per email. Delivery is not
//! retried; callers decide what a failure means for the response.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::MailerConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::notification::ResultEmail;
use crate::ports::{DeliveryReceipt, ResultMailer};

/// Configuration for the Resend mailer.
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// `From` header, e.g. `"Surveys <results@example.com>"`.
    pub from: String,
    /// Base URL for the API (default: https://api.resend.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ResendConfig {
    /// Creates a new configuration with the given API key and sender.
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            from: from.into(),
            base_url: "https://api.resend.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl From<&MailerConfig> for ResendConfig {
    fn from(config: &MailerConfig) -> Self {
        Self {
            api_key: config.resend_api_key.clone(),
            from: config.from_header(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// Resend API mailer.
pub struct ResendMailer {
    config: ResendConfig,
    client: Client,
}

impl ResendMailer {
    /// Creates a mailer with the given configuration.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the HTTP client cannot be built
    pub fn new(config: ResendConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.base_url.trim_end_matches('/'))
    }

    fn to_resend_request<'a>(&'a self, email: &'a ResultEmail) -> ResendRequest<'a> {
        ResendRequest {
            from: &self.config.from,
            to: vec![&email.to],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

#[async_trait]
impl ResultMailer for ResendMailer {
    async fn send(&self, email: &ResultEmail) -> Result<DeliveryReceipt, DomainError> {
        let response = self
            .client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_resend_request(email))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    delivery_failed(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    delivery_failed(format!("Connection failed: {}", e))
                } else {
                    delivery_failed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let parsed: ResendResponse = response
            .json()
            .await
            .map_err(|e| delivery_failed(format!("Unreadable provider response: {}", e)))?;

        debug!(message_id = %parsed.id, "Result email accepted by provider");
        Ok(DeliveryReceipt {
            message_id: parsed.id,
        })
    }
}

fn delivery_failed(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::EmailDeliveryFailed, message)
}

/// Maps a non-success provider status to a delivery error.
fn status_error(status: u16, body: &str) -> DomainError {
    let reason = serde_json::from_str::<ResendErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string());

    let message = match status {
        401 | 403 => format!("Mail provider rejected credentials: {}", reason),
        422 => format!("Mail provider rejected the message: {}", reason),
        429 => "Mail provider rate limit reached".to_string(),
        500..=599 => format!("Mail provider error {}: {}", status, reason),
        _ => format!("Unexpected status {}: {}", status, reason),
    };
    delivery_failed(message).with_detail("status", status.to_string())
}

// ════════════════════════════════════════════════════════════════════════════════
// Resend API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    message: String,
}
