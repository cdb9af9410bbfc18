//! Flow module - the respondent traversal state machine.

mod session;
mod validation;

pub use session::{
    Advance, FlowError, FlowState, NextStep, ResponderSession, SectionResult, Submission,
};
pub use validation::{validate_section, FieldError, SectionErrors};
