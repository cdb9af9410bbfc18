//! ListResponsesHandler - Query handler for a survey's response list.

use std::sync::Arc;

use crate::domain::foundation::SurveyId;
use crate::domain::response::{Response, ResponseError, ResponseFilters};
use crate::ports::ResponseRepository;

/// Query to list responses of a survey.
#[derive(Debug, Clone)]
pub struct ListResponsesQuery {
    pub survey_id: SurveyId,
    pub filters: ResponseFilters,
}

/// Handler for listing responses, newest first.
pub struct ListResponsesHandler {
    repository: Arc<dyn ResponseRepository>,
}

impl ListResponsesHandler {
    pub fn new(repository: Arc<dyn ResponseRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListResponsesQuery) -> Result<Vec<Response>, ResponseError> {
        let responses = self
            .repository
            .list(&query.survey_id, &query.filters)
            .await?;
        // Repositories may ignore filters; applying them again is idempotent.
        Ok(query.filters.apply(responses))
    }
}
