//! Strongly-typed identifier value objects.
//!
//! Survey records arrive from a document store keyed by short opaque strings,
//! so every identifier is a string newtype. Fresh identifiers are UUID v4.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Creates a new random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for a survey.
    SurveyId,
    "survey_id"
);

string_id!(
    /// Identifier of a section within a survey.
    SectionId,
    "section_id"
);

string_id!(
    /// Identifier of a question within a survey.
    QuestionId,
    "question_id"
);

string_id!(
    /// Identifier of an option within a choice question.
    OptionId,
    "option_id"
);

string_id!(
    /// Identifier of a branch rule within a section.
    RuleId,
    "rule_id"
);

string_id!(
    /// Identifier of a score range within a result configuration.
    RangeId,
    "range_id"
);

string_id!(
    /// Unique identifier for a submitted response.
    ResponseId,
    "response_id"
);

string_id!(
    /// Identifier of an identification field shown before the first section.
    FieldId,
    "field_id"
);

string_id!(
    /// Identifier of the survey author (from the auth provider).
    AuthorId,
    "author_id"
);
