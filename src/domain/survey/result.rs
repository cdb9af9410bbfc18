//! Score ranges and result-screen configuration.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RangeId;

/// A score-based commentary window with inclusive bounds.
///
/// Ranges may overlap. A range with `max < min` never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRange {
    pub id: RangeId,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ScoreRange {
    pub fn new(id: RangeId, min: f64, max: f64, message: impl Into<String>) -> Self {
        Self {
            id,
            min,
            max,
            message: message.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Returns true if `min <= score <= max`.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// What the respondent sees after a section or at the end of the survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultConfig {
    #[serde(default = "default_show_score")]
    pub show_score: bool,
    #[serde(default)]
    pub ranges: Vec<ScoreRange>,
}

fn default_show_score() -> bool {
    true
}

impl ResultConfig {
    /// Returns true if no commentary ranges are configured.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl Default for ResultConfig {
    fn default() -> Self {
        Self {
            show_score: default_show_score(),
            ranges: Vec::new(),
        }
    }
}
