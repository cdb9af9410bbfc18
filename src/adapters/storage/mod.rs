//! Storage Adapters
//!
//! Durable implementations of the survey ports.
//!
//! ## Available Adapters
//!
//! - **FileSurveyStore** - Stores survey definitions as YAML files on disk
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::FileSurveyStore;
//!
//! let store = FileSurveyStore::new("./data/surveys");
//! ```

mod file_survey_store;

pub use file_survey_store::FileSurveyStore;
