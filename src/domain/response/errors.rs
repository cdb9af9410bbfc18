//! Errors surfaced by response use cases.

use crate::domain::flow::FlowError;
use crate::domain::foundation::{DomainError, ErrorCode, ResponseId, SurveyId, ValidationError};
use crate::domain::scoring::ClosedReason;

/// Response-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseError {
    /// Survey was not found.
    SurveyNotFound(SurveyId),
    /// Response was not found.
    NotFound(ResponseId),
    /// Survey is closed to respondents.
    Unavailable(ClosedReason),
    /// Respondent session rejected the operation.
    Flow(FlowError),
    /// Response record could not be built.
    Invalid(ValidationError),
    /// Mail provider did not accept the result email.
    Delivery(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ResponseError {
    pub fn survey_not_found(id: SurveyId) -> Self {
        ResponseError::SurveyNotFound(id)
    }
    pub fn not_found(id: ResponseId) -> Self {
        ResponseError::NotFound(id)
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ResponseError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ResponseError::SurveyNotFound(_) => ErrorCode::SurveyNotFound,
            ResponseError::NotFound(_) => ErrorCode::ResponseNotFound,
            ResponseError::Unavailable(_) => ErrorCode::SurveyUnavailable,
            ResponseError::Flow(err) => err.code(),
            ResponseError::Invalid(err) => err.code(),
            ResponseError::Delivery(_) => ErrorCode::EmailDeliveryFailed,
            ResponseError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ResponseError::SurveyNotFound(id) => format!("Survey not found: {}", id),
            ResponseError::NotFound(id) => format!("Response not found: {}", id),
            ResponseError::Unavailable(reason) => {
                format!("Survey is not accepting responses ({})", reason)
            }
            ResponseError::Flow(err) => err.to_string(),
            ResponseError::Invalid(err) => err.to_string(),
            ResponseError::Delivery(msg) => format!("Email not delivered: {}", msg),
            ResponseError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ResponseError {}

impl From<FlowError> for ResponseError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Unavailable(reason) => ResponseError::Unavailable(reason),
            other => ResponseError::Flow(other),
        }
    }
}

impl From<ValidationError> for ResponseError {
    fn from(err: ValidationError) -> Self {
        ResponseError::Invalid(err)
    }
}

impl From<DomainError> for ResponseError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailDeliveryFailed => ResponseError::Delivery(err.message),
            _ => ResponseError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ResponseError> for DomainError {
    fn from(err: ResponseError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
