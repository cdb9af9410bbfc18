//! Per-section answer validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::foundation::QuestionId;
use crate::domain::response::{Answer, AnswerValue};
use crate::domain::survey::{Question, QuestionKind, Section};

/// Why a question blocks advancing past its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "limit", rename_all = "kebab-case")]
pub enum FieldError {
    Required,
    SelectAtLeast(u32),
    SelectAtMost(u32),
    TooLong(u32),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "required"),
            FieldError::SelectAtLeast(min) => write!(f, "select at least {}", min),
            FieldError::SelectAtMost(max) => write!(f, "select at most {}", max),
            FieldError::TooLong(max) => write!(f, "must be at most {} characters", max),
        }
    }
}

/// Every failing question of a section, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SectionErrors(Vec<(QuestionId, FieldError)>);

impl SectionErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The question the caller should focus.
    pub fn first(&self) -> Option<&QuestionId> {
        self.0.first().map(|(id, _)| id)
    }

    pub fn get(&self, question_id: &QuestionId) -> Option<FieldError> {
        self.0
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, err)| *err)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &FieldError)> {
        self.0.iter().map(|(id, err)| (id, err))
    }
}

/// Validates a section's answers before advancing.
///
/// Required questions need a usable answer. Range-mode choice answers must
/// respect the selection bounds and text answers the character limit,
/// whether or not the question is required. Every error is reported at once.
pub fn validate_section(
    section: &Section,
    questions: &BTreeMap<QuestionId, Question>,
    answers: &BTreeMap<QuestionId, Answer>,
) -> SectionErrors {
    let mut errors = Vec::new();

    for question in section.question_order.iter().filter_map(|id| questions.get(id)) {
        let value = answers
            .get(&question.id)
            .map(|answer| &answer.value)
            .filter(|value| value.is_usable());

        let error = match value {
            None if question.required => Some(FieldError::Required),
            None => None,
            Some(value) => check_value(question, value),
        };
        if let Some(error) = error {
            errors.push((question.id.clone(), error));
        }
    }

    SectionErrors(errors)
}

fn check_value(question: &Question, value: &AnswerValue) -> Option<FieldError> {
    match &question.kind {
        QuestionKind::Choice { options, selection } => {
            let (min, max) = selection.bounds(options.len())?;
            let count = value.selected_count();
            if count < min as usize {
                Some(FieldError::SelectAtLeast(min))
            } else if count > max as usize {
                Some(FieldError::SelectAtMost(max))
            } else {
                None
            }
        }
        QuestionKind::Text { config } => {
            let limit = config.limit()?;
            let length = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
            (length > limit as usize).then_some(FieldError::TooLong(limit))
        }
        QuestionKind::Scale { .. } => None,
    }
}
