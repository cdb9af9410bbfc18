//! Index prefixes shown before sections, questions and options.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IndexFormat {
    #[default]
    None,
    Numeric,
    Alpha,
    AlphaUpper,
}

impl IndexFormat {
    /// Formats a 0-based index: `""`, `"1."`, `"a."` or `"A."`.
    ///
    /// Letters wrap every 26 positions.
    pub fn label(&self, index: usize) -> String {
        match self {
            IndexFormat::None => String::new(),
            IndexFormat::Numeric => format!("{}.", index + 1),
            IndexFormat::Alpha | IndexFormat::AlphaUpper => {
                let letter = char::from(b'a' + (index % 26) as u8);
                if *self == IndexFormat::AlphaUpper {
                    format!("{}.", letter.to_ascii_uppercase())
                } else {
                    format!("{}.", letter)
                }
            }
        }
    }
}

/// Per-level index formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FormatConfig {
    #[serde(default)]
    pub section_index: IndexFormat,
    #[serde(default)]
    pub question_index: IndexFormat,
    #[serde(default)]
    pub option_index: IndexFormat,
}

/// Formats a 0-based index with the given format.
pub fn index_label(index: usize, format: IndexFormat) -> String {
    format.label(index)
}
