//! Notification module - result emails sent after submission.

mod result_email;

pub use result_email::{default_subject, ResultEmail};
