//! Points contributed by a single answer.

use crate::domain::response::AnswerValue;
use crate::domain::survey::{Question, QuestionKind, QuestionOption, SelectionMode};

/// Computes the points one answer contributes to the total.
///
/// Lenient by contract: unresolvable option ids, mismatched value shapes and
/// non-finite numbers all contribute zero.
///
/// - Text: always 0.
/// - Choice, single: points of the selected option.
/// - Choice, range: sum over the selected ids, duplicates counted per occurrence.
/// - Scale: the picked value when `use_value_as_points` is set, unclamped.
pub fn score_answer(value: &AnswerValue, question: &Question) -> f64 {
    match &question.kind {
        QuestionKind::Text { .. } => 0.0,
        QuestionKind::Choice { options, selection } => match (selection, value) {
            (SelectionMode::Single, AnswerValue::String(selected)) => options
                .iter()
                .find(|o| o.id.as_str() == selected)
                .map(QuestionOption::effective_points)
                .unwrap_or(0.0),
            (SelectionMode::Range { .. }, AnswerValue::List(selected)) => selected
                .iter()
                .map(|id| {
                    options
                        .iter()
                        .find(|o| &o.id == id)
                        .map(QuestionOption::effective_points)
                        .unwrap_or(0.0)
                })
                .sum(),
            _ => 0.0,
        },
        QuestionKind::Scale { config } => match value {
            AnswerValue::Number(n) if config.use_value_as_points && n.is_finite() => *n,
            _ => 0.0,
        },
    }
}
