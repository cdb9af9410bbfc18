//! Survey repository port (write side).
//!
//! Authors persist committed drafts through this port. Reads go through
//! [`SurveyReader`](super::SurveyReader).

use crate::domain::foundation::{DomainError, SurveyId};
use crate::domain::survey::Survey;
use async_trait::async_trait;

/// Repository port for survey definitions.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Insert or replace a survey definition.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, survey: &Survey) -> Result<(), DomainError>;

    /// Delete a survey definition.
    ///
    /// # Errors
    ///
    /// - `SurveyNotFound` if the survey doesn't exist
    async fn delete(&self, id: &SurveyId) -> Result<(), DomainError>;
}
