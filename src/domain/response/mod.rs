//! Response module - answers and finished submissions.

mod answer;
mod errors;
#[allow(clippy::module_inception)]
mod response;

pub use answer::{Answer, AnswerValue};
pub use errors::ResponseError;
pub use response::{Response, ResponseFilters, ResponseSummary};
