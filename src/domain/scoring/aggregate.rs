//! Survey-wide score totals.

use std::collections::BTreeMap;

use super::score_answer;
use crate::domain::foundation::QuestionId;
use crate::domain::response::Answer;
use crate::domain::survey::{Question, QuestionKind};

/// Sums the score of every answer whose question still exists.
///
/// Answers are re-scored against the current definitions, so a stored total
/// is reproducible from its answers. Answers for unknown questions are
/// skipped, and non-finite contributions count as zero.
pub fn total_score(
    answers: &BTreeMap<QuestionId, Answer>,
    questions: &BTreeMap<QuestionId, Question>,
) -> f64 {
    answers
        .values()
        .filter_map(|answer| {
            questions
                .get(&answer.question_id)
                .map(|question| score_answer(&answer.value, question))
        })
        .filter(|score| score.is_finite())
        .sum()
}

/// Sums already-computed answer scores, skipping non-finite values.
pub fn sum_scores<'a>(answers: impl IntoIterator<Item = &'a Answer>) -> f64 {
    answers
        .into_iter()
        .map(|answer| answer.score)
        .filter(|score| score.is_finite())
        .sum()
}

/// Advisory maximum for "out of N" display.
///
/// Choice questions add their single best option (also in range mode, where
/// a respondent can exceed this figure); scale questions scoring by value
/// add their `max`. Never use this to reject a response.
pub fn max_possible_score(questions: &BTreeMap<QuestionId, Question>) -> f64 {
    questions
        .values()
        .map(|question| match &question.kind {
            QuestionKind::Choice { options, .. } => {
                let best = options
                    .iter()
                    .map(|o| o.effective_points())
                    .fold(f64::NEG_INFINITY, f64::max);
                if best > 0.0 {
                    best
                } else {
                    0.0
                }
            }
            QuestionKind::Scale { config } if config.use_value_as_points => config.max as f64,
            _ => 0.0,
        })
        .sum()
}
