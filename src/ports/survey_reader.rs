//! Survey reader port.
//!
//! Supplies survey definitions to respondent sessions. A definition is
//! read-only input for the lifetime of a session.

use crate::domain::foundation::{DomainError, SurveyId};
use crate::domain::survey::Survey;
use async_trait::async_trait;

/// Reader port for survey definitions.
#[async_trait]
pub trait SurveyReader: Send + Sync {
    /// Find a survey by its ID.
    ///
    /// Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the definition exists but cannot be read
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, DomainError>;
}
