//! Survey-definition error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, QuestionId, SectionId, SurveyStatus, ValidationError,
};

/// Errors raised by survey draft operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyError {
    /// Section was not found.
    SectionNotFound(SectionId),
    /// Question was not found.
    QuestionNotFound(QuestionId),
    /// Structural edits are only allowed while the survey is a draft.
    NotEditable(SurveyStatus),
    /// Lifecycle transition is not allowed.
    InvalidTransition { from: SurveyStatus, to: SurveyStatus },
    /// An operation would break a definition invariant.
    Invariant(String),
    /// A value object failed validation.
    Validation(ValidationError),
}

impl SurveyError {
    pub fn invariant(message: impl Into<String>) -> Self {
        SurveyError::Invariant(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SurveyError::SectionNotFound(_) => ErrorCode::SectionNotFound,
            SurveyError::QuestionNotFound(_) => ErrorCode::QuestionNotFound,
            SurveyError::NotEditable(_) => ErrorCode::SurveyNotEditable,
            SurveyError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SurveyError::Invariant(_) => ErrorCode::ValidationFailed,
            SurveyError::Validation(err) => DomainError::from(err.clone()).code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SurveyError::SectionNotFound(id) => format!("Section not found: {}", id),
            SurveyError::QuestionNotFound(id) => format!("Question not found: {}", id),
            SurveyError::NotEditable(status) => {
                format!("Survey cannot be edited while {}", status)
            }
            SurveyError::InvalidTransition { from, to } => {
                format!("Cannot transition survey from {} to {}", from, to)
            }
            SurveyError::Invariant(msg) => msg.clone(),
            SurveyError::Validation(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SurveyError {}

impl From<ValidationError> for SurveyError {
    fn from(err: ValidationError) -> Self {
        SurveyError::Validation(err)
    }
}

impl From<SurveyError> for DomainError {
    fn from(err: SurveyError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
