//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where survey definitions are read from
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `<survey_id>.yaml` definitions
    #[serde(default = "default_survey_dir")]
    pub survey_dir: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.survey_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__SURVEY_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            survey_dir: default_survey_dir(),
        }
    }
}

fn default_survey_dir() -> PathBuf {
    PathBuf::from("./data/surveys")
}
