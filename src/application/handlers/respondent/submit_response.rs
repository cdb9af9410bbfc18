//! SubmitResponseHandler - Command handler for persisting a finished session.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::flow::{FlowError, FlowState, ResponderSession};
use crate::domain::foundation::{ResponseId, Timestamp};
use crate::domain::response::{Response, ResponseError};
use crate::ports::ResponseRepository;

/// Command to submit a session that reached `submitting`.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    /// Recorded as the response's `respondedAt`.
    pub now: Timestamp,
}

/// Handler for submitting responses.
pub struct SubmitResponseHandler {
    repository: Arc<dyn ResponseRepository>,
}

impl SubmitResponseHandler {
    pub fn new(repository: Arc<dyn ResponseRepository>) -> Self {
        Self { repository }
    }

    /// Persists the session's answers and moves it to `done`.
    ///
    /// A failed save sends the session back to its last section with every
    /// answer kept, so the respondent can retry.
    pub async fn handle(
        &self,
        session: &mut ResponderSession,
        cmd: SubmitResponseCommand,
    ) -> Result<Response, ResponseError> {
        if !matches!(session.state(), FlowState::Submitting) {
            return Err(FlowError::InvalidState {
                action: "submit",
                state: session.state().name(),
            }
            .into());
        }

        let submission = session.submission();
        let response = match Response::new(
            ResponseId::generate(),
            session.survey().id().clone(),
            cmd.now,
            submission.identification,
            submission.answers,
            submission.total_score,
        ) {
            Ok(response) => response,
            Err(err) => {
                session.submission_failed()?;
                return Err(err.into());
            }
        };

        if let Err(err) = self.repository.save(&response).await {
            warn!(survey_id = %response.survey_id(), error = %err, "Response save failed");
            session.submission_failed()?;
            return Err(err.into());
        }

        session.confirm_submitted()?;
        info!(
            survey_id = %response.survey_id(),
            response_id = %response.id(),
            total_score = response.total_score(),
            "Response submitted"
        );
        Ok(response)
    }
}
