//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Survey Ports
//!
//! - `SurveyReader` - Loads survey definitions for respondents
//! - `SurveyRepository` - Persists committed drafts
//!
//! ## Response Ports
//!
//! - `ResponseRepository` - Sink for finished responses and listings
//! - `ResultMailer` - Delivers result emails

mod response_repository;
mod result_mailer;
mod survey_reader;
mod survey_repository;

pub use response_repository::ResponseRepository;
pub use result_mailer::{DeliveryReceipt, ResultMailer};
pub use survey_reader::SurveyReader;
pub use survey_repository::SurveyRepository;
