//! SendResultEmailHandler - Command handler for the post-submission result email.
//!
//! Runs once per stored response. Delivery is attempted at most once per
//! call; a response already marked `emailSent` is skipped.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{ResponseId, SurveyId};
use crate::domain::notification::ResultEmail;
use crate::domain::response::ResponseError;
use crate::ports::{ResponseRepository, ResultMailer, SurveyReader};

/// Command to email a respondent their result.
#[derive(Debug, Clone)]
pub struct SendResultEmailCommand {
    pub survey_id: SurveyId,
    pub response_id: ResponseId,
}

/// Why no email went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Email results are turned off for the survey.
    Disabled,
    /// The respondent gave no email address.
    NoRecipient,
    /// The response was already emailed.
    AlreadySent,
}

/// Outcome of a result email attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailOutcome {
    Sent { message_id: String },
    Skipped(SkipReason),
}

/// Handler for sending result emails.
pub struct SendResultEmailHandler {
    surveys: Arc<dyn SurveyReader>,
    responses: Arc<dyn ResponseRepository>,
    mailer: Arc<dyn ResultMailer>,
}

impl SendResultEmailHandler {
    pub fn new(
        surveys: Arc<dyn SurveyReader>,
        responses: Arc<dyn ResponseRepository>,
        mailer: Arc<dyn ResultMailer>,
    ) -> Self {
        Self {
            surveys,
            responses,
            mailer,
        }
    }

    pub async fn handle(&self, cmd: SendResultEmailCommand) -> Result<EmailOutcome, ResponseError> {
        let survey = self
            .surveys
            .find_by_id(&cmd.survey_id)
            .await?
            .ok_or_else(|| ResponseError::survey_not_found(cmd.survey_id.clone()))?;

        let mut response = self
            .responses
            .find_by_id(&cmd.survey_id, &cmd.response_id)
            .await?
            .ok_or_else(|| ResponseError::not_found(cmd.response_id.clone()))?;

        if response.email_sent() {
            return Ok(EmailOutcome::Skipped(SkipReason::AlreadySent));
        }

        let Some(email) = ResultEmail::plan(&survey, &response) else {
            let reason = if survey.email_config().enabled {
                SkipReason::NoRecipient
            } else {
                SkipReason::Disabled
            };
            return Ok(EmailOutcome::Skipped(reason));
        };

        let receipt = self.mailer.send(&email).await.map_err(|err| {
            warn!(
                survey_id = %cmd.survey_id,
                response_id = %cmd.response_id,
                error = %err,
                "Result email not delivered"
            );
            ResponseError::from(err)
        })?;

        response.mark_email_sent();
        self.responses.update(&response).await?;

        info!(
            survey_id = %cmd.survey_id,
            response_id = %cmd.response_id,
            message_id = %receipt.message_id,
            "Result email sent"
        );
        Ok(EmailOutcome::Sent {
            message_id: receipt.message_id,
        })
    }
}
