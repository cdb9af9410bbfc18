//! In-memory adapters.
//!
//! Implementations of the survey and response ports backed by process
//! memory. Used in tests and for single-process development setups.
//!
//! ```ignore
//! use adapters::memory::{InMemoryResponseStore, InMemorySurveyStore};
//!
//! let surveys = InMemorySurveyStore::new();
//! let responses = InMemoryResponseStore::new();
//! ```

mod in_memory_response_store;
mod in_memory_survey_store;

pub use in_memory_response_store::InMemoryResponseStore;
pub use in_memory_survey_store::InMemorySurveyStore;
