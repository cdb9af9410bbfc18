//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod respondent;

pub use respondent::{
    EmailOutcome, ListResponsesHandler, ListResponsesQuery, SendResultEmailCommand,
    SendResultEmailHandler, SkipReason, StartResponseCommand, StartResponseHandler,
    SubmitResponseCommand, SubmitResponseHandler,
};
