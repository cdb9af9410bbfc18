//! Response repository port.
//!
//! The sink for finished responses. Implementations own durability; callers
//! do not retry or verify persistence.

use crate::domain::foundation::{DomainError, ResponseId, SurveyId};
use crate::domain::response::{Response, ResponseFilters};
use async_trait::async_trait;

/// Repository port for submitted responses.
#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Save a new response.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, response: &Response) -> Result<(), DomainError>;

    /// Update an existing response.
    ///
    /// # Errors
    ///
    /// - `ResponseNotFound` if the response doesn't exist
    async fn update(&self, response: &Response) -> Result<(), DomainError>;

    /// Find a response of a survey by ID.
    async fn find_by_id(
        &self,
        survey_id: &SurveyId,
        id: &ResponseId,
    ) -> Result<Option<Response>, DomainError>;

    /// List a survey's responses matching `filters`, newest first.
    async fn list(
        &self,
        survey_id: &SurveyId,
        filters: &ResponseFilters,
    ) -> Result<Vec<Response>, DomainError>;
}
