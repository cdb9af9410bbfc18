//! Result mailer port.
//!
//! Delivers result emails to respondents. One attempt per call; failures are
//! reported, not retried.

use crate::domain::foundation::DomainError;
use crate::domain::notification::ResultEmail;
use async_trait::async_trait;

/// Identifier the mail provider assigned to a sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// Port for sending result emails.
#[async_trait]
pub trait ResultMailer: Send + Sync {
    /// Send an email.
    ///
    /// # Errors
    ///
    /// - `EmailDeliveryFailed` if the provider rejects or cannot be reached
    async fn send(&self, email: &ResultEmail) -> Result<DeliveryReceipt, DomainError>;
}
