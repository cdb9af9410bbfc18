//! Result email settings stored on a survey.

use serde::{Deserialize, Serialize};

/// Whether and how a respondent is emailed their result after submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Blank means the default `Your results for "<title>"` subject.
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body_html: String,
    /// Attachment image appended below the result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EmailConfig {
    pub fn enabled_with_subject(subject: impl Into<String>) -> Self {
        Self {
            enabled: true,
            subject: subject.into(),
            ..Self::default()
        }
    }
}
