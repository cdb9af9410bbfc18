//! Survey aggregate.
//!
//! A survey is the read-only definition a respondent session runs against.
//! Stored records may be missing fields or carry an inconsistent section
//! order, so deserialization goes through `SurveyRecord`, which fills defaults
//! and reconciles the ordering once at the persistence boundary.
//!
//! Structural changes go through `SurveyDraft`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    EmailConfig, FormatConfig, IdentificationField, Question, ResultConfig, Schedule, Section,
};
use crate::domain::foundation::{AuthorId, QuestionId, SectionId, SurveyId, SurveyStatus, Timestamp};

/// Title given to freshly created surveys.
pub const UNTITLED_SURVEY: &str = "Untitled Survey";

/// Survey aggregate.
///
/// # Invariants
///
/// - `section_order` lists every key of `sections` exactly once
/// - every id in a section's `question_order` is a key of `questions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SurveyRecord")]
pub struct Survey {
    pub(super) id: SurveyId,
    pub(super) author_id: AuthorId,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) status: SurveyStatus,
    pub(super) schedule: Schedule,
    pub(super) format_config: FormatConfig,
    pub(super) created_at: Timestamp,
    pub(super) updated_at: Timestamp,
    pub(super) published_at: Option<Timestamp>,
    pub(super) section_order: Vec<SectionId>,
    pub(super) identification_fields: Vec<IdentificationField>,
    pub(super) result_config: ResultConfig,
    pub(super) email_config: EmailConfig,
    pub(super) sections: BTreeMap<SectionId, Section>,
    pub(super) questions: BTreeMap<QuestionId, Question>,
}

impl Survey {
    /// Creates an empty draft survey.
    pub fn new(id: SurveyId, author_id: AuthorId, now: Timestamp) -> Self {
        Self {
            id,
            author_id,
            title: UNTITLED_SURVEY.to_string(),
            description: String::new(),
            status: SurveyStatus::Draft,
            schedule: Schedule::unbounded(),
            format_config: FormatConfig::default(),
            created_at: now,
            updated_at: now,
            published_at: None,
            section_order: Vec::new(),
            identification_fields: Vec::new(),
            result_config: ResultConfig::default(),
            email_config: EmailConfig::default(),
            sections: BTreeMap::new(),
            questions: BTreeMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SurveyId {
        &self.id
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> SurveyStatus {
        self.status
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn format_config(&self) -> &FormatConfig {
        &self.format_config
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn published_at(&self) -> Option<&Timestamp> {
        self.published_at.as_ref()
    }

    /// Returns the section ids in display order.
    pub fn section_order(&self) -> &[SectionId] {
        &self.section_order
    }

    pub fn identification_fields(&self) -> &[IdentificationField] {
        &self.identification_fields
    }

    /// Returns the survey-level result configuration.
    pub fn result_config(&self) -> &ResultConfig {
        &self.result_config
    }

    pub fn email_config(&self) -> &EmailConfig {
        &self.email_config
    }

    pub fn sections(&self) -> &BTreeMap<SectionId, Section> {
        &self.sections
    }

    pub fn questions(&self) -> &BTreeMap<QuestionId, Question> {
        &self.questions
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.section_order.len()
    }

    /// Returns the first section in display order.
    pub fn first_section(&self) -> Option<&SectionId> {
        self.section_order.first()
    }

    /// Returns the position of a section in display order.
    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.section_order.iter().position(|s| s == id)
    }

    /// Iterates sections in display order.
    pub fn ordered_sections(&self) -> impl Iterator<Item = &Section> {
        self.section_order.iter().filter_map(|id| self.sections.get(id))
    }

    /// Returns the questions of a section in display order, skipping dangling ids.
    pub fn questions_in(&self, section_id: &SectionId) -> Vec<&Question> {
        self.sections
            .get(section_id)
            .map(|section| {
                section
                    .question_order
                    .iter()
                    .filter_map(|id| self.questions.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns true if respondents identify themselves before the first section.
    pub fn requires_identification(&self) -> bool {
        !self.identification_fields.is_empty()
    }
}

/// Stored shape of a survey, with every collection and config optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurveyRecord {
    id: SurveyId,
    author_id: AuthorId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: SurveyStatus,
    #[serde(default)]
    schedule: Schedule,
    #[serde(default)]
    format_config: FormatConfig,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default)]
    published_at: Option<Timestamp>,
    #[serde(default)]
    section_order: Vec<SectionId>,
    #[serde(default)]
    identification_fields: Vec<IdentificationField>,
    #[serde(default)]
    result_config: ResultConfig,
    #[serde(default)]
    email_config: EmailConfig,
    #[serde(default)]
    sections: BTreeMap<SectionId, Section>,
    #[serde(default)]
    questions: BTreeMap<QuestionId, Question>,
}

impl From<SurveyRecord> for Survey {
    fn from(record: SurveyRecord) -> Self {
        let mut sections = record.sections;
        for (id, section) in sections.iter_mut() {
            section.id = id.clone();
            let mut seen = BTreeSet::new();
            section
                .question_order
                .retain(|q| record.questions.contains_key(q) && seen.insert(q.clone()));
        }

        let mut questions = record.questions;
        for (id, question) in questions.iter_mut() {
            question.id = id.clone();
        }

        let mut seen = BTreeSet::new();
        let mut section_order: Vec<SectionId> = record
            .section_order
            .into_iter()
            .filter(|id| sections.contains_key(id) && seen.insert(id.clone()))
            .collect();
        for id in sections.keys() {
            if !seen.contains(id) {
                section_order.push(id.clone());
            }
        }

        Self {
            id: record.id,
            author_id: record.author_id,
            title: record.title,
            description: record.description,
            status: record.status,
            schedule: record.schedule,
            format_config: record.format_config,
            created_at: record.created_at,
            updated_at: record.updated_at,
            published_at: record.published_at,
            section_order,
            identification_fields: record.identification_fields,
            result_config: record.result_config,
            email_config: record.email_config,
            sections,
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sid(s: &str) -> SectionId {
        SectionId::new(s).unwrap()
    }

    #[test]
    fn new_survey_is_untitled_draft() {
        let now = Timestamp::from_unix_millis(1_000).unwrap();
        let survey = Survey::new(SurveyId::new("s").unwrap(), AuthorId::new("a").unwrap(), now);

        assert_eq!(survey.title(), UNTITLED_SURVEY);
        assert_eq!(survey.status(), SurveyStatus::Draft);
        assert!(survey.section_order().is_empty());
        assert!(survey.result_config().show_score);
        assert_eq!(survey.created_at(), &now);
    }

    #[test]
    fn deserializing_sparse_record_fills_defaults() {
        let survey: Survey = serde_json::from_value(json!({
            "id": "survey-1",
            "authorId": "author-1",
            "createdAt": 1000,
            "updatedAt": 2000
        }))
        .unwrap();

        assert_eq!(survey.status(), SurveyStatus::Draft);
        assert!(survey.sections().is_empty());
        assert!(survey.identification_fields().is_empty());
        assert_eq!(survey.schedule(), &Schedule::unbounded());
        assert!(survey.result_config().show_score);
        assert!(!survey.email_config().enabled);
    }

    #[test]
    fn deserializing_reconciles_section_order_with_sections() {
        let survey: Survey = serde_json::from_value(json!({
            "id": "survey-1",
            "authorId": "author-1",
            "createdAt": 1000,
            "updatedAt": 2000,
            "sectionOrder": ["b", "ghost", "b"],
            "sections": {
                "a": { "id": "a", "title": "A" },
                "b": { "id": "b", "title": "B", "questionOrder": ["q1", "missing"] }
            },
            "questions": {
                "q1": { "id": "q1", "sectionId": "b", "type": "text" }
            }
        }))
        .unwrap();

        assert_eq!(survey.section_order(), &[sid("b"), sid("a")]);
        assert_eq!(survey.questions_in(&sid("b")).len(), 1);
        assert_eq!(
            survey.section(&sid("b")).unwrap().question_order,
            vec![QuestionId::new("q1").unwrap()]
        );
    }

    #[test]
    fn serialization_round_trips() {
        let survey: Survey = serde_json::from_value(json!({
            "id": "survey-1",
            "authorId": "author-1",
            "title": "Colors",
            "status": "published",
            "createdAt": 1000,
            "updatedAt": 2000,
            "publishedAt": 1500,
            "sectionOrder": ["a"],
            "sections": { "a": { "id": "a", "title": "A", "questionOrder": ["q1"] } },
            "questions": {
                "q1": {
                    "id": "q1", "sectionId": "a", "type": "choice",
                    "options": [{ "id": "red", "label": "Red", "points": 10 }]
                }
            }
        }))
        .unwrap();

        let value = serde_json::to_value(&survey).unwrap();
        assert_eq!(value["publishedAt"], 1500);
        let back: Survey = serde_json::from_value(value).unwrap();
        assert_eq!(back, survey);
    }
}
