//! Respondent command and query handlers.

mod list_responses;
mod send_result_email;
mod start_response;
mod submit_response;

pub use list_responses::{ListResponsesHandler, ListResponsesQuery};
pub use send_result_email::{
    EmailOutcome, SendResultEmailCommand, SendResultEmailHandler, SkipReason,
};
pub use start_response::{StartResponseCommand, StartResponseHandler};
pub use submit_response::{SubmitResponseCommand, SubmitResponseHandler};
