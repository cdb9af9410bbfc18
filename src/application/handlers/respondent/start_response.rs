//! StartResponseHandler - Command handler for entering a survey as a respondent.

use std::sync::Arc;

use tracing::info;

use crate::domain::flow::ResponderSession;
use crate::domain::foundation::{SurveyId, Timestamp};
use crate::domain::response::ResponseError;
use crate::ports::SurveyReader;

/// Command to start a respondent session.
#[derive(Debug, Clone)]
pub struct StartResponseCommand {
    pub survey_id: SurveyId,
    /// Instant the availability gate is evaluated at.
    pub now: Timestamp,
}

/// Handler for starting respondent sessions.
pub struct StartResponseHandler {
    surveys: Arc<dyn SurveyReader>,
}

impl StartResponseHandler {
    pub fn new(surveys: Arc<dyn SurveyReader>) -> Self {
        Self { surveys }
    }

    pub async fn handle(&self, cmd: StartResponseCommand) -> Result<ResponderSession, ResponseError> {
        let survey = self
            .surveys
            .find_by_id(&cmd.survey_id)
            .await?
            .ok_or_else(|| ResponseError::survey_not_found(cmd.survey_id.clone()))?;

        let session = ResponderSession::start(Arc::new(survey), cmd.now)?;
        info!(survey_id = %cmd.survey_id, state = session.state().name(), "Respondent entered survey");
        Ok(session)
    }
}
