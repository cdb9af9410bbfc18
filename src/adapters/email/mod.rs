//! Email Adapters
//!
//! Implementations of the `ResultMailer` port.
//!
//! - **ResendMailer** - Sends through the Resend HTTP API

mod resend_mailer;

pub use resend_mailer::{ResendConfig, ResendMailer};
