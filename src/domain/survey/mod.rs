//! Survey module - survey definitions and their edit operations.
//!
//! A `Survey` is what authors build and respondents run through: ordered
//! sections of typed questions, branch rules between sections, result ranges,
//! schedule and lifecycle status.

mod aggregate;
mod draft;
mod email;
mod errors;
mod format;
mod identification;
mod question;
mod result;
mod schedule;
mod section;

pub use aggregate::{Survey, UNTITLED_SURVEY};
pub use draft::SurveyDraft;
pub use email::EmailConfig;
pub use errors::SurveyError;
pub use format::{index_label, FormatConfig, IndexFormat};
pub use identification::{FieldType, IdentificationField, PresetFieldKey};
pub use question::{
    Question, QuestionKind, QuestionOption, ScaleConfig, SelectionMode, TextConfig, TextSize,
};
pub use result::{ResultConfig, ScoreRange};
pub use schedule::Schedule;
pub use section::{BranchCondition, BranchRule, ScoreOperator, Section};
