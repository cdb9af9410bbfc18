//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the survey domain.

mod errors;
mod ids;
mod state_machine;
mod survey_status;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    AuthorId, FieldId, OptionId, QuestionId, RangeId, ResponseId, RuleId, SectionId, SurveyId,
};
pub use state_machine::StateMachine;
pub use survey_status::SurveyStatus;
pub use timestamp::Timestamp;
