//! Sections and their conditional jump rules.

use serde::{Deserialize, Serialize};

use super::ResultConfig;
use crate::domain::foundation::{OptionId, QuestionId, RuleId, SectionId};

/// Comparison applied by a score-based branch rule.
///
/// Stored rules without an operator compare with `Lte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoreOperator {
    Gte,
    #[default]
    Lte,
}

impl ScoreOperator {
    /// Compares a running score against a threshold.
    pub fn compare(&self, score: f64, threshold: f64) -> bool {
        match self {
            ScoreOperator::Gte => score >= threshold,
            ScoreOperator::Lte => score <= threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ScoreOperator::Gte => ">=",
            ScoreOperator::Lte => "<=",
        }
    }
}

/// The condition under which a branch rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BranchCondition {
    /// Fires when the option is among the selected values of the question.
    Answer {
        #[serde(rename = "questionId")]
        question_id: QuestionId,
        #[serde(rename = "optionId")]
        option_id: OptionId,
    },
    /// Fires when the running score compares true against the threshold.
    Score {
        threshold: f64,
        #[serde(default)]
        operator: ScoreOperator,
    },
}

/// A conditional override of the default "go to next section" transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchRule {
    pub id: RuleId,
    #[serde(flatten)]
    pub condition: BranchCondition,
    pub target_section_id: SectionId,
}

impl BranchRule {
    /// Creates an answer-based rule.
    pub fn on_answer(
        id: RuleId,
        question_id: QuestionId,
        option_id: OptionId,
        target_section_id: SectionId,
    ) -> Self {
        Self {
            id,
            condition: BranchCondition::Answer {
                question_id,
                option_id,
            },
            target_section_id,
        }
    }

    /// Creates a score-based rule.
    pub fn on_score(
        id: RuleId,
        operator: ScoreOperator,
        threshold: f64,
        target_section_id: SectionId,
    ) -> Self {
        Self {
            id,
            condition: BranchCondition::Score {
                threshold,
                operator,
            },
            target_section_id,
        }
    }
}

/// An ordered page of questions shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Result screen shown right after leaving this section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_config: Option<ResultConfig>,
    #[serde(default)]
    pub question_order: Vec<QuestionId>,
    #[serde(default)]
    pub branch_rules: Vec<BranchRule>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(id: SectionId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            result_config: None,
            question_order: Vec::new(),
            branch_rules: Vec::new(),
        }
    }

    /// Returns true if leaving this section shows a result screen.
    pub fn has_result_screen(&self) -> bool {
        self.result_config
            .as_ref()
            .is_some_and(|config| !config.is_empty())
    }

    /// Returns true if the question belongs to this section.
    pub fn contains_question(&self, question_id: &QuestionId) -> bool {
        self.question_order.contains(question_id)
    }
}
