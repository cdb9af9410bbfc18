//! SurveyStatus enum for tracking the lifecycle of a survey.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a survey.
///
/// `Draft -> Published <-> Locked`; there is no path back to `Draft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Published,
    Locked,
}

impl SurveyStatus {
    /// Returns true if questions and sections may still be restructured.
    pub fn is_editable(&self) -> bool {
        matches!(self, SurveyStatus::Draft)
    }

    /// Returns true if the survey has been published at least once.
    pub fn has_been_published(&self) -> bool {
        matches!(self, SurveyStatus::Published | SurveyStatus::Locked)
    }
}

impl StateMachine for SurveyStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SurveyStatus::*;
        matches!(
            (self, target),
            (Draft, Published) | (Published, Locked) | (Locked, Published)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SurveyStatus::Draft => vec![SurveyStatus::Published],
            SurveyStatus::Published => vec![SurveyStatus::Locked],
            SurveyStatus::Locked => vec![SurveyStatus::Published],
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurveyStatus::Draft => "Draft",
            SurveyStatus::Published => "Published",
            SurveyStatus::Locked => "Locked",
        };
        write!(f, "{}", s)
    }
}
