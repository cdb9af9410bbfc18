//! Answers recorded during a respondent session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, QuestionId};

/// The value a respondent supplied.
///
/// Free text and single-choice answers are strings (the option id for
/// single choice), multi-choice answers are option id lists, and scale
/// answers are numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    List(Vec<OptionId>),
    String(String),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::String(value.into())
    }

    /// A single-choice selection.
    pub fn option(option_id: &OptionId) -> Self {
        AnswerValue::String(option_id.to_string())
    }

    /// A multi-choice selection.
    pub fn options(option_ids: Vec<OptionId>) -> Self {
        AnswerValue::List(option_ids)
    }

    pub fn number(value: f64) -> Self {
        AnswerValue::Number(value)
    }

    /// Returns true if the value counts as an answer for required checks.
    ///
    /// Empty strings, empty lists and non-finite numbers do not.
    pub fn is_usable(&self) -> bool {
        match self {
            AnswerValue::String(s) => !s.is_empty(),
            AnswerValue::List(ids) => !ids.is_empty(),
            AnswerValue::Number(n) => n.is_finite(),
        }
    }

    /// Returns true if the option is among the selected values.
    ///
    /// A string is treated as a one-element selection.
    pub fn contains_option(&self, option_id: &OptionId) -> bool {
        match self {
            AnswerValue::String(s) => s == option_id.as_str(),
            AnswerValue::List(ids) => ids.contains(option_id),
            AnswerValue::Number(_) => false,
        }
    }

    /// Number of selected options.
    pub fn selected_count(&self) -> usize {
        match self {
            AnswerValue::List(ids) => ids.len(),
            AnswerValue::String(s) if !s.is_empty() => 1,
            _ => 0,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionId]> {
        match self {
            AnswerValue::List(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// One answered question with the points it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
    #[serde(default)]
    pub score: f64,
}

impl Answer {
    pub fn new(question_id: QuestionId, value: AnswerValue, score: f64) -> Self {
        Self {
            question_id,
            value,
            score,
        }
    }
}
