//! Submitted responses and response listings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Answer;
use crate::domain::foundation::{QuestionId, ResponseId, SurveyId, Timestamp, ValidationError};

/// A finished respondent submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    id: ResponseId,
    survey_id: SurveyId,
    responded_at: Timestamp,
    #[serde(default)]
    identification: BTreeMap<String, String>,
    #[serde(default)]
    answers: BTreeMap<QuestionId, Answer>,
    total_score: f64,
    #[serde(default)]
    email_sent: bool,
}

impl Response {
    /// Creates a response that has not been emailed yet.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if `total_score` is NaN or infinite
    pub fn new(
        id: ResponseId,
        survey_id: SurveyId,
        responded_at: Timestamp,
        identification: BTreeMap<String, String>,
        answers: BTreeMap<QuestionId, Answer>,
        total_score: f64,
    ) -> Result<Self, ValidationError> {
        if !total_score.is_finite() {
            return Err(ValidationError::invalid_format(
                "totalScore",
                "total score is not a valid number",
            ));
        }
        Ok(Self {
            id,
            survey_id,
            responded_at,
            identification,
            answers,
            total_score,
            email_sent: false,
        })
    }

    pub fn id(&self) -> &ResponseId {
        &self.id
    }

    pub fn survey_id(&self) -> &SurveyId {
        &self.survey_id
    }

    pub fn responded_at(&self) -> &Timestamp {
        &self.responded_at
    }

    pub fn identification(&self) -> &BTreeMap<String, String> {
        &self.identification
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, Answer> {
        &self.answers
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn email_sent(&self) -> bool {
        self.email_sent
    }

    /// Returns the respondent's email identification value, if collected.
    pub fn email(&self) -> Option<&str> {
        self.identification
            .get("email")
            .map(String::as_str)
            .filter(|email| !email.trim().is_empty())
    }

    pub fn mark_email_sent(&mut self) {
        self.email_sent = true;
    }

    pub fn summary(&self) -> ResponseSummary {
        ResponseSummary {
            total_score: self.total_score,
            answer_count: self.answers.len(),
        }
    }
}

/// Headline numbers for a response list row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub total_score: f64,
    pub answer_count: usize,
}

/// Filters for listing responses. Every bound is inclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<Timestamp>,
    /// Case-insensitive substring matched against identification values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl ResponseFilters {
    pub fn matches(&self, response: &Response) -> bool {
        if self.score_min.is_some_and(|min| response.total_score < min) {
            return false;
        }
        if self.score_max.is_some_and(|max| response.total_score > max) {
            return false;
        }
        if self
            .date_from
            .is_some_and(|from| response.responded_at.is_before(&from))
        {
            return false;
        }
        if self
            .date_to
            .is_some_and(|to| response.responded_at.is_after(&to))
        {
            return false;
        }
        match self.search_query.as_deref().filter(|q| !q.is_empty()) {
            Some(query) => {
                let query = query.to_lowercase();
                response
                    .identification
                    .values()
                    .any(|value| value.to_lowercase().contains(&query))
            }
            None => true,
        }
    }

    /// Keeps matching responses, newest first.
    pub fn apply(&self, responses: impl IntoIterator<Item = Response>) -> Vec<Response> {
        let mut matched: Vec<Response> = responses.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| b.responded_at.cmp(&a.responded_at));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::AnswerValue;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_unix_millis(millis).unwrap()
    }

    fn response(id: &str, at: i64, score: f64, name: &str) -> Response {
        let mut identification = BTreeMap::new();
        identification.insert("name".to_string(), name.to_string());
        Response::new(
            ResponseId::new(id).unwrap(),
            SurveyId::new("survey-1").unwrap(),
            ts(at),
            identification,
            BTreeMap::new(),
            score,
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_non_finite_total() {
        let result = Response::new(
            ResponseId::new("r").unwrap(),
            SurveyId::new("s").unwrap(),
            ts(0),
            BTreeMap::new(),
            BTreeMap::new(),
            f64::NAN,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_response_has_not_been_emailed() {
        let mut r = response("r1", 1, 5.0, "Ada");
        assert!(!r.email_sent());
        r.mark_email_sent();
        assert!(r.email_sent());
    }

    #[test]
    fn email_ignores_blank_values() {
        let mut identification = BTreeMap::new();
        identification.insert("email".to_string(), "  ".to_string());
        let r = Response::new(
            ResponseId::new("r").unwrap(),
            SurveyId::new("s").unwrap(),
            ts(0),
            identification,
            BTreeMap::new(),
            0.0,
        )
        .unwrap();
        assert_eq!(r.email(), None);
    }

    #[test]
    fn summary_counts_answers() {
        let mut answers = BTreeMap::new();
        let q = QuestionId::new("q1").unwrap();
        answers.insert(q.clone(), Answer::new(q, AnswerValue::text("hi"), 0.0));
        let r = Response::new(
            ResponseId::new("r").unwrap(),
            SurveyId::new("s").unwrap(),
            ts(0),
            BTreeMap::new(),
            answers,
            12.5,
        )
        .unwrap();

        assert_eq!(r.summary(), ResponseSummary { total_score: 12.5, answer_count: 1 });
    }

    #[test]
    fn filters_bounds_are_inclusive() {
        let filters = ResponseFilters {
            score_min: Some(10.0),
            score_max: Some(20.0),
            date_from: Some(ts(100)),
            date_to: Some(ts(200)),
            search_query: None,
        };
        assert!(filters.matches(&response("a", 100, 10.0, "x")));
        assert!(filters.matches(&response("b", 200, 20.0, "x")));
        assert!(!filters.matches(&response("c", 201, 15.0, "x")));
        assert!(!filters.matches(&response("d", 150, 9.9, "x")));
    }

    #[test]
    fn search_is_case_insensitive_over_identification() {
        let filters = ResponseFilters {
            search_query: Some("ADA".into()),
            ..ResponseFilters::default()
        };
        assert!(filters.matches(&response("a", 1, 0.0, "Ada Lovelace")));
        assert!(!filters.matches(&response("b", 1, 0.0, "Grace")));
    }

    #[test]
    fn apply_sorts_newest_first() {
        let listed = ResponseFilters::default().apply(vec![
            response("old", 1, 0.0, "a"),
            response("new", 3, 0.0, "b"),
            response("mid", 2, 0.0, "c"),
        ]);
        let ids: Vec<&str> = listed.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }
}
