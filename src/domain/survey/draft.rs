//! Survey draft: named edit operations over an owned survey.
//!
//! Every operation borrows the draft and returns the next snapshot. A
//! rejected edit returns the error and leaves the current draft as it was.
//! Operations keep `section_order` and question ordering consistent with the
//! maps they index.
//!
//! Structural edits (sections, questions, branch rules) are limited to
//! drafts; meta edits (titles, descriptions, result and email settings,
//! schedule) stay allowed after publishing.

use std::collections::BTreeSet;

use super::{
    BranchCondition, BranchRule, EmailConfig, FormatConfig, IdentificationField, Question,
    ResultConfig, Schedule, Section, Survey, SurveyError,
};
use crate::domain::foundation::{
    QuestionId, RuleId, SectionId, StateMachine, SurveyStatus, Timestamp, ValidationError,
};

/// An in-memory survey being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDraft {
    survey: Survey,
    dirty: bool,
}

impl SurveyDraft {
    /// Starts editing a survey.
    pub fn new(survey: Survey) -> Self {
        Self {
            survey,
            dirty: false,
        }
    }

    /// Returns the current snapshot.
    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Returns true if any edit has been applied since the draft was opened.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Finishes editing, stamping `updated_at` when anything changed.
    pub fn commit(mut self, now: Timestamp) -> Survey {
        if self.dirty {
            self.survey.updated_at = now;
        }
        self.survey
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Meta
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_title(&self, title: impl Into<String>) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            let title = title.into();
            if title.trim().is_empty() {
                return Err(ValidationError::empty_field("title").into());
            }
            draft.survey.title = title;
            Ok(())
        })
    }

    pub fn set_description(&self, description: impl Into<String>) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.survey.description = description.into();
            Ok(())
        })
    }

    /// Replaces the schedule, rejecting `open_at >= close_at`.
    pub fn set_schedule(&self, schedule: Schedule) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.survey.schedule = Schedule::new(schedule.open_at, schedule.close_at)?;
            Ok(())
        })
    }

    pub fn set_result_config(&self, config: ResultConfig) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.survey.result_config = config;
            Ok(())
        })
    }

    pub fn set_email_config(&self, config: EmailConfig) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.survey.email_config = config;
            Ok(())
        })
    }

    /// Replaces the identification fields; ids must be unique.
    pub fn set_identification_fields(
        &self,
        fields: Vec<IdentificationField>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            {
                let mut seen = BTreeSet::new();
                if let Some(dup) = fields.iter().find(|f| !seen.insert(&f.id)) {
                    return Err(SurveyError::invariant(format!(
                        "Duplicate identification field: {}",
                        dup.id
                    )));
                }
            }
            draft.survey.identification_fields = fields;
            Ok(())
        })
    }

    pub fn set_format_config(&self, config: FormatConfig) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.survey.format_config = config;
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an empty section.
    pub fn add_section(
        &self,
        id: SectionId,
        title: impl Into<String>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            if draft.survey.sections.contains_key(&id) {
                return Err(SurveyError::invariant(format!("Section already exists: {}", id)));
            }
            draft.survey.section_order.push(id.clone());
            draft.survey.sections.insert(id.clone(), Section::new(id, title));
            Ok(())
        })
    }

    pub fn rename_section(
        &self,
        id: &SectionId,
        title: impl Into<String>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.section_mut(id)?.title = title.into();
            Ok(())
        })
    }

    pub fn set_section_description(
        &self,
        id: &SectionId,
        description: Option<String>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.section_mut(id)?.description = description;
            Ok(())
        })
    }

    /// Sets or clears the result screen shown after a section.
    pub fn set_section_result_config(
        &self,
        id: &SectionId,
        config: Option<ResultConfig>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.section_mut(id)?.result_config = config;
            Ok(())
        })
    }

    /// Deletes a section, its questions, and every branch rule targeting it.
    pub fn delete_section(&self, id: &SectionId) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            let section = draft
                .survey
                .sections
                .remove(id)
                .ok_or_else(|| SurveyError::SectionNotFound(id.clone()))?;

            draft.survey.section_order.retain(|s| s != id);
            for question_id in &section.question_order {
                draft.survey.questions.remove(question_id);
            }
            for other in draft.survey.sections.values_mut() {
                other.branch_rules.retain(|rule| &rule.target_section_id != id);
            }
            Ok(())
        })
    }

    /// Replaces the section order; `order` must be a permutation of the current one.
    pub fn reorder_sections(&self, order: Vec<SectionId>) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            ensure_permutation("section", &draft.survey.section_order, &order)?;
            draft.survey.section_order = order;
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Branch rules
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a branch rule to a section.
    ///
    /// # Errors
    ///
    /// - `SectionNotFound` if the owning or target section is missing
    /// - `Invariant` if the rule targets its own section, duplicates a rule id,
    ///   or names a question/option that is not a choice in this section
    pub fn add_branch_rule(
        &self,
        section_id: &SectionId,
        rule: BranchRule,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            let section = draft
                .survey
                .sections
                .get(section_id)
                .ok_or_else(|| SurveyError::SectionNotFound(section_id.clone()))?;

            if !draft.survey.sections.contains_key(&rule.target_section_id) {
                return Err(SurveyError::SectionNotFound(rule.target_section_id.clone()));
            }
            if &rule.target_section_id == section_id {
                return Err(SurveyError::invariant("Branch rule cannot target its own section"));
            }
            if section.branch_rules.iter().any(|r| r.id == rule.id) {
                return Err(SurveyError::invariant(format!(
                    "Branch rule already exists: {}",
                    rule.id
                )));
            }
            match &rule.condition {
                BranchCondition::Answer {
                    question_id,
                    option_id,
                } => {
                    if !section.contains_question(question_id) {
                        return Err(SurveyError::invariant(format!(
                            "Question {} is not in section {}",
                            question_id, section_id
                        )));
                    }
                    let question = draft
                        .survey
                        .questions
                        .get(question_id)
                        .ok_or_else(|| SurveyError::QuestionNotFound(question_id.clone()))?;
                    if !question.is_choice() {
                        return Err(SurveyError::invariant(
                            "Answer rules must reference a choice question",
                        ));
                    }
                    if question.find_option(option_id).is_none() {
                        return Err(SurveyError::invariant(format!(
                            "Option {} does not exist on question {}",
                            option_id, question_id
                        )));
                    }
                }
                BranchCondition::Score { threshold, .. } => {
                    if !threshold.is_finite() {
                        return Err(SurveyError::invariant("Score threshold must be finite"));
                    }
                }
            }

            draft.section_mut(section_id)?.branch_rules.push(rule);
            Ok(())
        })
    }

    pub fn remove_branch_rule(
        &self,
        section_id: &SectionId,
        rule_id: &RuleId,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            let rules = &mut draft.section_mut(section_id)?.branch_rules;
            let before = rules.len();
            rules.retain(|r| &r.id != rule_id);
            if rules.len() == before {
                return Err(SurveyError::invariant(format!("Branch rule not found: {}", rule_id)));
            }
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Questions
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends a question to the section it names.
    pub fn add_question(&self, question: Question) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            question.kind.validate()?;
            if draft.survey.questions.contains_key(&question.id) {
                return Err(SurveyError::invariant(format!(
                    "Question already exists: {}",
                    question.id
                )));
            }
            let id = question.id.clone();
            draft.section_mut(&question.section_id)?
                .question_order
                .push(id.clone());
            draft.survey.questions.insert(id, question);
            Ok(())
        })
    }

    /// Replaces a question in place.
    ///
    /// Answer rules that no longer resolve to one of its options are dropped.
    /// Use `move_question` to change sections.
    pub fn replace_question(&self, question: Question) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            question.kind.validate()?;
            let existing = draft
                .survey
                .questions
                .get(&question.id)
                .ok_or_else(|| SurveyError::QuestionNotFound(question.id.clone()))?;
            if existing.section_id != question.section_id {
                return Err(SurveyError::invariant(
                    "replace_question cannot change sections; use move_question",
                ));
            }

            let section_id = question.section_id.clone();
            let question_id = question.id.clone();
            draft.survey.questions.insert(question_id.clone(), question);
            draft.prune_answer_rules(&section_id, &question_id);
            Ok(())
        })
    }

    /// Deletes a question and the answer rules that reference it.
    pub fn delete_question(&self, id: &QuestionId) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            let question = draft
                .survey
                .questions
                .remove(id)
                .ok_or_else(|| SurveyError::QuestionNotFound(id.clone()))?;

            if let Some(section) = draft.survey.sections.get_mut(&question.section_id) {
                section.question_order.retain(|q| q != id);
            }
            draft.prune_answer_rules(&question.section_id, id);
            Ok(())
        })
    }

    /// Replaces a section's question order; `order` must be a permutation.
    pub fn reorder_questions(
        &self,
        section_id: &SectionId,
        order: Vec<QuestionId>,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            let section = draft.section_mut(section_id)?;
            ensure_permutation("question", &section.question_order, &order)?;
            section.question_order = order;
            Ok(())
        })
    }

    /// Moves a question to `position` within another (or the same) section.
    ///
    /// Positions past the end append.
    pub fn move_question(
        &self,
        id: &QuestionId,
        target_section: &SectionId,
        position: usize,
    ) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.ensure_editable()?;
            if !draft.survey.sections.contains_key(target_section) {
                return Err(SurveyError::SectionNotFound(target_section.clone()));
            }
            let question = draft
                .survey
                .questions
                .get_mut(id)
                .ok_or_else(|| SurveyError::QuestionNotFound(id.clone()))?;
            let source_section = std::mem::replace(&mut question.section_id, target_section.clone());

            if let Some(section) = draft.survey.sections.get_mut(&source_section) {
                section.question_order.retain(|q| q != id);
            }
            let target = draft.section_mut(target_section)?;
            let position = position.min(target.question_order.len());
            target.question_order.insert(position, id.clone());

            if &source_section != target_section {
                draft.prune_answer_rules(&source_section, id);
            }
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Publishes the survey and records when.
    pub fn publish(&self, now: Timestamp) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.transition(SurveyStatus::Published)?;
            draft.survey.published_at = Some(now);
            Ok(())
        })
    }

    /// Stops accepting responses.
    pub fn lock(&self) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            draft.transition(SurveyStatus::Locked)?;
            Ok(())
        })
    }

    /// Resumes accepting responses after a lock.
    pub fn unlock(&self) -> Result<Self, SurveyError> {
        self.edit(|draft| {
            if draft.survey.status != SurveyStatus::Locked {
                return Err(SurveyError::InvalidTransition {
                    from: draft.survey.status,
                    to: SurveyStatus::Published,
                });
            }
            draft.transition(SurveyStatus::Published)?;
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies `op` to a copy of the draft; `self` is untouched either way.
    fn edit<F>(&self, op: F) -> Result<Self, SurveyError>
    where
        F: FnOnce(&mut Self) -> Result<(), SurveyError>,
    {
        let mut next = self.clone();
        op(&mut next)?;
        next.dirty = true;
        Ok(next)
    }

    fn ensure_editable(&self) -> Result<(), SurveyError> {
        if self.survey.status.is_editable() {
            Ok(())
        } else {
            Err(SurveyError::NotEditable(self.survey.status))
        }
    }

    fn transition(&mut self, to: SurveyStatus) -> Result<(), SurveyError> {
        let from = self.survey.status;
        self.survey.status = from
            .transition_to(to)
            .map_err(|_| SurveyError::InvalidTransition { from, to })?;
        Ok(())
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut Section, SurveyError> {
        self.survey
            .sections
            .get_mut(id)
            .ok_or_else(|| SurveyError::SectionNotFound(id.clone()))
    }

    /// Drops answer rules in `section_id` about `question_id` that no longer resolve.
    fn prune_answer_rules(&mut self, section_id: &SectionId, question_id: &QuestionId) {
        let question = self
            .survey
            .questions
            .get(question_id)
            .filter(|q| &q.section_id == section_id && q.is_choice());
        if let Some(section) = self.survey.sections.get_mut(section_id) {
            section.branch_rules.retain(|rule| match &rule.condition {
                BranchCondition::Answer {
                    question_id: q,
                    option_id,
                } if q == question_id => {
                    question.is_some_and(|question| question.find_option(option_id).is_some())
                }
                _ => true,
            });
        }
    }
}

impl From<Survey> for SurveyDraft {
    fn from(survey: Survey) -> Self {
        Self::new(survey)
    }
}

fn ensure_permutation<T: Ord>(
    what: &str,
    current: &[T],
    proposed: &[T],
) -> Result<(), SurveyError> {
    let current_set: BTreeSet<&T> = current.iter().collect();
    let proposed_set: BTreeSet<&T> = proposed.iter().collect();
    if current.len() != proposed.len()
        || proposed_set.len() != proposed.len()
        || current_set != proposed_set
    {
        return Err(SurveyError::invariant(format!(
            "New {} order must contain exactly the existing {}s",
            what, what
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthorId, OptionId, SurveyId};
    use crate::domain::survey::{QuestionOption, ScoreOperator, SelectionMode};

    fn sid(s: &str) -> SectionId {
        SectionId::new(s).unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn oid(s: &str) -> OptionId {
        OptionId::new(s).unwrap()
    }

    fn rid(s: &str) -> RuleId {
        RuleId::new(s).unwrap()
    }

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_unix_millis(millis).unwrap()
    }

    fn empty_draft() -> SurveyDraft {
        SurveyDraft::new(Survey::new(
            SurveyId::new("survey-1").unwrap(),
            AuthorId::new("author-1").unwrap(),
            ts(0),
        ))
    }

    fn color_question(section: &str) -> Question {
        Question::choice(
            qid("color"),
            sid(section),
            "Pick a color",
            vec![
                QuestionOption::new(oid("red"), "Red", 10.0),
                QuestionOption::new(oid("blue"), "Blue", 20.0),
            ],
            SelectionMode::Single,
        )
    }

    fn three_sections() -> SurveyDraft {
        empty_draft()
            .add_section(sid("a"), "A")
            .and_then(|d| d.add_section(sid("b"), "B"))
            .and_then(|d| d.add_section(sid("c"), "C"))
            .unwrap()
    }

    #[test]
    fn add_section_appends_to_order() {
        let draft = three_sections();
        assert_eq!(draft.survey().section_order(), &[sid("a"), sid("b"), sid("c")]);
        assert!(draft.is_dirty());
    }

    #[test]
    fn add_section_rejects_duplicate_id() {
        let result = three_sections().add_section(sid("a"), "Again");
        assert!(matches!(result, Err(SurveyError::Invariant(_))));
    }

    #[test]
    fn delete_section_removes_questions_and_rules_targeting_it() {
        let draft = three_sections()
            .add_question(color_question("b"))
            .and_then(|d| {
                d.add_branch_rule(
                    &sid("a"),
                    BranchRule::on_score(rid("r1"), ScoreOperator::Gte, 5.0, sid("b")),
                )
            })
            .and_then(|d| d.delete_section(&sid("b")))
            .unwrap();

        let survey = draft.survey();
        assert_eq!(survey.section_order(), &[sid("a"), sid("c")]);
        assert!(survey.question(&qid("color")).is_none());
        assert!(survey.section(&sid("a")).unwrap().branch_rules.is_empty());
    }

    #[test]
    fn reorder_sections_requires_permutation() {
        let draft = three_sections();
        assert!(draft.reorder_sections(vec![sid("a"), sid("b")]).is_err());
        assert!(draft
            .reorder_sections(vec![sid("a"), sid("a"), sid("b")])
            .is_err());

        let reordered = draft.reorder_sections(vec![sid("c"), sid("a"), sid("b")]).unwrap();
        assert_eq!(reordered.survey().section_order(), &[sid("c"), sid("a"), sid("b")]);
    }

    #[test]
    fn add_question_rejects_invalid_kind() {
        let bad = Question::choice(
            qid("q"),
            sid("a"),
            "Pick",
            vec![QuestionOption::new(oid("x"), "X", 1.0)],
            SelectionMode::Range { min: 1, max: Some(2) },
        );
        let result = three_sections().add_question(bad);
        assert!(matches!(result, Err(SurveyError::Validation(_))));
    }

    #[test]
    fn add_question_requires_existing_section() {
        let result = empty_draft().add_question(color_question("missing"));
        assert!(matches!(result, Err(SurveyError::SectionNotFound(_))));
    }

    #[test]
    fn branch_rule_cannot_target_own_section() {
        let result = three_sections().add_branch_rule(
            &sid("a"),
            BranchRule::on_score(rid("r1"), ScoreOperator::Gte, 5.0, sid("a")),
        );
        assert!(matches!(result, Err(SurveyError::Invariant(_))));
    }

    #[test]
    fn rejected_edit_leaves_draft_and_earlier_edits_intact() {
        let draft = three_sections()
            .set_title("Team health")
            .and_then(|d| d.add_question(color_question("a")))
            .unwrap();
        let before = draft.clone();

        let self_target = draft.add_branch_rule(
            &sid("a"),
            BranchRule::on_score(rid("r1"), ScoreOperator::Gte, 5.0, sid("a")),
        );
        let bad_order = draft.reorder_sections(vec![sid("b"), sid("a")]);

        assert!(self_target.is_err());
        assert!(bad_order.is_err());
        assert_eq!(draft, before);
        assert_eq!(draft.survey().title(), "Team health");
        assert!(draft.survey().question(&qid("color")).is_some());

        let corrected = draft
            .add_branch_rule(
                &sid("a"),
                BranchRule::on_score(rid("r1"), ScoreOperator::Gte, 5.0, sid("c")),
            )
            .unwrap();
        assert_eq!(corrected.survey().section(&sid("a")).unwrap().branch_rules.len(), 1);
        assert!(draft.survey().section(&sid("a")).unwrap().branch_rules.is_empty());
    }

    #[test]
    fn answer_rule_must_reference_existing_option() {
        let draft = three_sections().add_question(color_question("a")).unwrap();

        let bad = draft.add_branch_rule(
            &sid("a"),
            BranchRule::on_answer(rid("r1"), qid("color"), oid("green"), sid("c")),
        );
        assert!(bad.is_err());

        let good = draft
            .add_branch_rule(
                &sid("a"),
                BranchRule::on_answer(rid("r1"), qid("color"), oid("blue"), sid("c")),
            )
            .unwrap();
        assert_eq!(good.survey().section(&sid("a")).unwrap().branch_rules.len(), 1);
    }

    #[test]
    fn deleting_question_drops_its_answer_rules() {
        let draft = three_sections()
            .add_question(color_question("a"))
            .and_then(|d| {
                d.add_branch_rule(
                    &sid("a"),
                    BranchRule::on_answer(rid("r1"), qid("color"), oid("blue"), sid("c")),
                )
            })
            .and_then(|d| d.delete_question(&qid("color")))
            .unwrap();

        let section = draft.survey().section(&sid("a")).unwrap();
        assert!(section.question_order.is_empty());
        assert!(section.branch_rules.is_empty());
    }

    #[test]
    fn replacing_question_drops_rules_for_removed_options() {
        let mut replacement = color_question("a");
        replacement.kind = crate::domain::survey::QuestionKind::Choice {
            options: vec![QuestionOption::new(oid("red"), "Red", 10.0)],
            selection: SelectionMode::Single,
        };

        let draft = three_sections()
            .add_question(color_question("a"))
            .and_then(|d| {
                d.add_branch_rule(
                    &sid("a"),
                    BranchRule::on_answer(rid("r1"), qid("color"), oid("blue"), sid("c")),
                )
            })
            .and_then(|d| d.replace_question(replacement))
            .unwrap();

        assert!(draft.survey().section(&sid("a")).unwrap().branch_rules.is_empty());
    }

    #[test]
    fn move_question_updates_both_sections() {
        let draft = three_sections()
            .add_question(color_question("a"))
            .and_then(|d| d.add_question(Question::text(qid("name"), sid("b"), "Name?")))
            .and_then(|d| d.move_question(&qid("color"), &sid("b"), 0))
            .unwrap();

        let survey = draft.survey();
        assert!(survey.section(&sid("a")).unwrap().question_order.is_empty());
        assert_eq!(
            survey.section(&sid("b")).unwrap().question_order,
            vec![qid("color"), qid("name")]
        );
        assert_eq!(survey.question(&qid("color")).unwrap().section_id, sid("b"));
    }

    #[test]
    fn reorder_questions_requires_permutation() {
        let draft = three_sections()
            .add_question(color_question("a"))
            .and_then(|d| d.add_question(Question::text(qid("name"), sid("a"), "Name?")))
            .unwrap();

        assert!(draft.reorder_questions(&sid("a"), vec![qid("name")]).is_err());
        let reordered = draft
            .reorder_questions(&sid("a"), vec![qid("name"), qid("color")])
            .unwrap();
        assert_eq!(
            reordered.survey().section(&sid("a")).unwrap().question_order,
            vec![qid("name"), qid("color")]
        );
    }

    #[test]
    fn set_schedule_rejects_inverted_window() {
        let result = empty_draft().set_schedule(Schedule {
            open_at: Some(ts(2_000)),
            close_at: Some(ts(1_000)),
        });
        assert!(matches!(result, Err(SurveyError::Validation(_))));
    }

    #[test]
    fn lifecycle_follows_state_machine() {
        let draft = three_sections();
        assert!(draft.lock().is_err());
        assert!(draft.unlock().is_err());

        let published = draft.publish(ts(5_000)).unwrap();
        assert_eq!(published.survey().status(), SurveyStatus::Published);
        assert_eq!(published.survey().published_at(), Some(&ts(5_000)));

        let locked = published.lock().unwrap();
        assert_eq!(locked.survey().status(), SurveyStatus::Locked);
        let reopened = locked.unlock().unwrap();
        assert_eq!(reopened.survey().status(), SurveyStatus::Published);
        assert!(reopened.publish(ts(6_000)).is_err());
    }

    #[test]
    fn structural_edits_rejected_after_publish_but_meta_allowed() {
        let published = three_sections().publish(ts(1)).unwrap();

        let structural = published.add_section(sid("d"), "D");
        assert!(matches!(
            structural,
            Err(SurveyError::NotEditable(SurveyStatus::Published))
        ));

        let meta = published.set_title("Renamed").unwrap();
        assert_eq!(meta.survey().title(), "Renamed");
    }

    #[test]
    fn commit_stamps_updated_at_only_when_dirty() {
        let clean = empty_draft().commit(ts(9_000));
        assert_eq!(clean.updated_at(), &ts(0));

        let edited = empty_draft().set_description("About colors").unwrap().commit(ts(9_000));
        assert_eq!(edited.updated_at(), &ts(9_000));
    }
}
