//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process survey and response stores
//! - `storage` - YAML file store for survey definitions
//! - `email` - Result email delivery over HTTP

pub mod email;
pub mod memory;
pub mod storage;

pub use email::{ResendConfig, ResendMailer};
pub use memory::{InMemoryResponseStore, InMemorySurveyStore};
pub use storage::FileSurveyStore;
