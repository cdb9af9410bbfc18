//! In-Memory Survey Store
//!
//! Keeps survey definitions in a shared map.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SurveyId};
use crate::domain::survey::Survey;
use crate::ports::{SurveyReader, SurveyRepository};

/// In-memory storage for survey definitions
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    surveys: Arc<RwLock<HashMap<SurveyId, Survey>>>,
}

impl InMemorySurveyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `surveys`
    pub fn with_surveys(surveys: impl IntoIterator<Item = Survey>) -> Self {
        let map = surveys
            .into_iter()
            .map(|s| (s.id().clone(), s))
            .collect::<HashMap<_, _>>();
        Self {
            surveys: Arc::new(RwLock::new(map)),
        }
    }

    /// Get the number of stored surveys
    pub async fn count(&self) -> usize {
        self.surveys.read().await.len()
    }
}

#[async_trait]
impl SurveyReader for InMemorySurveyStore {
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, DomainError> {
        Ok(self.surveys.read().await.get(id).cloned())
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyStore {
    async fn save(&self, survey: &Survey) -> Result<(), DomainError> {
        self.surveys
            .write()
            .await
            .insert(survey.id().clone(), survey.clone());
        Ok(())
    }

    async fn delete(&self, id: &SurveyId) -> Result<(), DomainError> {
        match self.surveys.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::SurveyNotFound,
                format!("Survey not found: {}", id),
            )),
        }
    }
}
