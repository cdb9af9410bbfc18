//! Question definitions.
//!
//! A question's configuration depends on its type, so the type tag selects a
//! `QuestionKind` variant carrying only that type's settings.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, QuestionId, SectionId, ValidationError};

/// One selectable answer of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: OptionId,
    #[serde(default)]
    pub label: String,
    /// Points awarded when this option is selected.
    #[serde(default)]
    pub points: f64,
}

impl QuestionOption {
    pub fn new(id: OptionId, label: impl Into<String>, points: f64) -> Self {
        Self {
            id,
            label: label.into(),
            points,
        }
    }

    /// Returns the points this option contributes, or zero for non-finite values.
    pub fn effective_points(&self) -> f64 {
        if self.points.is_finite() {
            self.points
        } else {
            0.0
        }
    }
}

/// Input size shown for a free-text question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Short,
    Long,
}

/// Free-text configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    #[serde(default)]
    pub size: TextSize,
    /// Character limit; zero or absent means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

impl TextConfig {
    /// Returns the effective character limit, if any.
    pub fn limit(&self) -> Option<u32> {
        self.max_length.filter(|max| *max > 0)
    }
}

/// How many options a respondent may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "selectionMode", rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one option (radio).
    #[default]
    Single,
    /// Between `min` and `max` options inclusive (checkbox).
    Range {
        #[serde(default = "default_min_selections")]
        min: u32,
        /// `None` allows selecting every option.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

fn default_min_selections() -> u32 {
    1
}

impl SelectionMode {
    /// Returns the `(min, max)` selection bounds for a question with `option_count` options.
    ///
    /// Returns `None` in single mode.
    pub fn bounds(&self, option_count: usize) -> Option<(u32, u32)> {
        match self {
            SelectionMode::Single => None,
            SelectionMode::Range { min, max } => {
                Some((*min, max.unwrap_or(option_count as u32)))
            }
        }
    }
}

/// Numeric scale configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleConfig {
    #[serde(default = "default_scale_min")]
    pub min: i64,
    #[serde(default = "default_scale_max")]
    pub max: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_label: Option<String>,
    /// When true the picked value is the score contribution.
    #[serde(default)]
    pub use_value_as_points: bool,
}

fn default_scale_min() -> i64 {
    1
}

fn default_scale_max() -> i64 {
    5
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min: default_scale_min(),
            max: default_scale_max(),
            min_label: None,
            max_label: None,
            use_value_as_points: false,
        }
    }
}

/// Type-specific configuration of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Text {
        #[serde(rename = "textConfig", default)]
        config: TextConfig,
    },
    Choice {
        #[serde(default)]
        options: Vec<QuestionOption>,
        #[serde(rename = "choiceConfig", default)]
        selection: SelectionMode,
    },
    Scale {
        #[serde(rename = "scaleConfig", default)]
        config: ScaleConfig,
    },
}

impl QuestionKind {
    /// Checks the per-type invariants the builder must uphold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            QuestionKind::Text { .. } => Ok(()),
            QuestionKind::Choice { options, selection } => {
                for option in options {
                    if !option.points.is_finite() || option.points < 0.0 {
                        return Err(ValidationError::invalid_format(
                            "points",
                            format!("option '{}' must have finite, non-negative points", option.id),
                        ));
                    }
                }
                if let Some((min, max)) = selection.bounds(options.len()) {
                    let count = options.len() as i64;
                    if i64::from(max) > count {
                        return Err(ValidationError::out_of_range("max", 0, count, max.into()));
                    }
                    if min > max {
                        return Err(ValidationError::out_of_range(
                            "min",
                            0,
                            max.into(),
                            min.into(),
                        ));
                    }
                }
                Ok(())
            }
            QuestionKind::Scale { config } => {
                if config.min >= config.max {
                    return Err(ValidationError::invalid_format(
                        "scale",
                        format!("min ({}) must be below max ({})", config.min, config.max),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// One prompt shown to a respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub section_id: SectionId,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    /// Creates an optional free-text question.
    pub fn text(id: QuestionId, section_id: SectionId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            section_id,
            prompt: prompt.into(),
            required: false,
            kind: QuestionKind::Text {
                config: TextConfig::default(),
            },
        }
    }

    /// Creates an optional choice question.
    pub fn choice(
        id: QuestionId,
        section_id: SectionId,
        prompt: impl Into<String>,
        options: Vec<QuestionOption>,
        selection: SelectionMode,
    ) -> Self {
        Self {
            id,
            section_id,
            prompt: prompt.into(),
            required: false,
            kind: QuestionKind::Choice { options, selection },
        }
    }

    /// Creates an optional scale question.
    pub fn scale(
        id: QuestionId,
        section_id: SectionId,
        prompt: impl Into<String>,
        config: ScaleConfig,
    ) -> Self {
        Self {
            id,
            section_id,
            prompt: prompt.into(),
            required: false,
            kind: QuestionKind::Scale { config },
        }
    }

    /// Sets the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the options of a choice question, empty for other types.
    pub fn options(&self) -> &[QuestionOption] {
        match &self.kind {
            QuestionKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// Looks up an option by id.
    pub fn find_option(&self, option_id: &OptionId) -> Option<&QuestionOption> {
        self.options().iter().find(|o| &o.id == option_id)
    }

    /// Returns true for choice questions, the only type answer-based branching can target.
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::Choice { .. })
    }
}
