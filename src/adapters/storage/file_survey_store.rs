//! File-based Survey Store
//!
//! Stores survey definitions as YAML files on disk, one file per survey:
//! `<base_path>/<survey_id>.yaml`. Definitions load through the same
//! default-filling deserialization as any other record, so hand-edited
//! files may omit optional sections.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::foundation::{DomainError, ErrorCode, SurveyId};
use crate::domain::survey::Survey;
use crate::ports::{SurveyReader, SurveyRepository};

/// File-based storage for survey definitions
#[derive(Debug, Clone)]
pub struct FileSurveyStore {
    base_path: PathBuf,
}

impl FileSurveyStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSurveyStore::new("./data/surveys");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a survey
    ///
    /// Only ids made of ASCII letters, digits, `-` and `_` map to a file, so
    /// a lookup can never leave `base_path`.
    fn survey_file_path(&self, id: &SurveyId) -> Result<PathBuf, DomainError> {
        let safe = id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!("Survey id {:?} cannot be used as a file name", id.as_str()),
            )
            .with_detail("survey_id", id.as_str()));
        }
        Ok(self.base_path.join(format!("{}.yaml", id)))
    }

    fn storage_error(action: &str, id: &SurveyId, err: impl std::fmt::Display) -> DomainError {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to {} survey {}: {}", action, id, err),
        )
    }
}

#[async_trait]
impl SurveyReader for FileSurveyStore {
    async fn find_by_id(&self, id: &SurveyId) -> Result<Option<Survey>, DomainError> {
        let file_path = self.survey_file_path(id)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&file_path)
            .await
            .map_err(|e| Self::storage_error("read", id, e))?;

        let survey: Survey =
            serde_yaml::from_str(&yaml).map_err(|e| Self::storage_error("parse", id, e))?;

        // The file name is authoritative for lookups.
        if survey.id() != id {
            return Err(Self::storage_error(
                "load",
                id,
                format!("file contains survey {}", survey.id()),
            ));
        }

        debug!(survey_id = %id, path = %file_path.display(), "Loaded survey definition");
        Ok(Some(survey))
    }
}

#[async_trait]
impl SurveyRepository for FileSurveyStore {
    async fn save(&self, survey: &Survey) -> Result<(), DomainError> {
        let id = survey.id();
        let file_path = self.survey_file_path(id)?;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| Self::storage_error("save", id, e))?;

        let yaml = serde_yaml::to_string(survey)
            .map_err(|e| Self::storage_error("serialize", id, e))?;

        fs::write(&file_path, yaml)
            .await
            .map_err(|e| Self::storage_error("save", id, e))?;

        Ok(())
    }

    async fn delete(&self, id: &SurveyId) -> Result<(), DomainError> {
        let file_path = self.survey_file_path(id)?;

        if !file_path.exists() {
            return Err(DomainError::new(
                ErrorCode::SurveyNotFound,
                format!("Survey not found: {}", id),
            ));
        }

        fs::remove_file(&file_path)
            .await
            .map_err(|e| Self::storage_error("delete", id, e))
    }
}
