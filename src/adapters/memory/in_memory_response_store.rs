//! In-Memory Response Store
//!
//! Keeps submitted responses grouped by survey.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ResponseId, SurveyId};
use crate::domain::response::{Response, ResponseFilters};
use crate::ports::ResponseRepository;

type ResponsesBySurvey = HashMap<SurveyId, HashMap<ResponseId, Response>>;

/// In-memory storage for responses
#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseStore {
    responses: Arc<RwLock<ResponsesBySurvey>>,
}

impl InMemoryResponseStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored responses across all surveys
    pub async fn count(&self) -> usize {
        self.responses.read().await.values().map(HashMap::len).sum()
    }
}

#[async_trait]
impl ResponseRepository for InMemoryResponseStore {
    async fn save(&self, response: &Response) -> Result<(), DomainError> {
        let mut responses = self.responses.write().await;
        responses
            .entry(response.survey_id().clone())
            .or_default()
            .insert(response.id().clone(), response.clone());
        Ok(())
    }

    async fn update(&self, response: &Response) -> Result<(), DomainError> {
        let mut responses = self.responses.write().await;
        let slot = responses
            .get_mut(response.survey_id())
            .and_then(|by_id| by_id.get_mut(response.id()))
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ResponseNotFound,
                    format!("Response not found: {}", response.id()),
                )
            })?;
        *slot = response.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        survey_id: &SurveyId,
        id: &ResponseId,
    ) -> Result<Option<Response>, DomainError> {
        let responses = self.responses.read().await;
        Ok(responses
            .get(survey_id)
            .and_then(|by_id| by_id.get(id))
            .cloned())
    }

    async fn list(
        &self,
        survey_id: &SurveyId,
        filters: &ResponseFilters,
    ) -> Result<Vec<Response>, DomainError> {
        let responses = self.responses.read().await;
        let all = responses
            .get(survey_id)
            .map(|by_id| by_id.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        Ok(filters.apply(all))
    }
}
