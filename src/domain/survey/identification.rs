//! Respondent identification fields collected before the first section.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::FieldId;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Whether a field comes from the preset catalogue or is author-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Preset,
    Custom,
}

/// Well-known identification keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PresetFieldKey {
    Name,
    Dob,
    Email,
    Phone,
    EmployeeId,
    StudentId,
    #[default]
    Custom,
}

impl PresetFieldKey {
    /// Returns the key under which a collected value is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetFieldKey::Name => "name",
            PresetFieldKey::Dob => "dob",
            PresetFieldKey::Email => "email",
            PresetFieldKey::Phone => "phone",
            PresetFieldKey::EmployeeId => "employeeId",
            PresetFieldKey::StudentId => "studentId",
            PresetFieldKey::Custom => "custom",
        }
    }
}

/// A single identification prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationField {
    pub id: FieldId,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub field_key: PresetFieldKey,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl IdentificationField {
    /// Creates a required preset field.
    pub fn preset(id: FieldId, key: PresetFieldKey, label: impl Into<String>) -> Self {
        Self {
            id,
            field_type: FieldType::Preset,
            field_key: key,
            label: label.into(),
            required: true,
        }
    }

    /// Creates an optional custom field.
    pub fn custom(id: FieldId, label: impl Into<String>) -> Self {
        Self {
            id,
            field_type: FieldType::Custom,
            field_key: PresetFieldKey::Custom,
            label: label.into(),
            required: false,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Key under which the collected value lands in a response.
    ///
    /// Custom fields share the `custom` key, so they are stored under their
    /// label, or their id when the label is blank.
    pub fn storage_key(&self) -> String {
        match self.field_key {
            PresetFieldKey::Custom if self.label.trim().is_empty() => self.id.to_string(),
            PresetFieldKey::Custom => self.label.clone(),
            key => key.as_str().to_string(),
        }
    }

    /// Returns true if `value` has an acceptable format for this field.
    ///
    /// Only email fields constrain the format.
    pub fn accepts(&self, value: &str) -> bool {
        match self.field_key {
            PresetFieldKey::Email => EMAIL_PATTERN.is_match(value.trim()),
            _ => true,
        }
    }
}
