//! Branch resolution: which section comes next, if not the following one.

use std::collections::BTreeMap;

use crate::domain::foundation::{QuestionId, SectionId};
use crate::domain::response::Answer;
use crate::domain::survey::{BranchCondition, Section};

/// Returns the target of the first rule of `section_id` that fires.
///
/// Rules are checked in stored order and the first one firing wins. `None`
/// means the caller advances sequentially. Targets are returned as stored,
/// even when they name the current section or a section that no longer
/// exists; the flow controller decides what to do with those.
pub fn resolve_branch_target<'a>(
    section_id: &SectionId,
    sections: &'a BTreeMap<SectionId, Section>,
    answers: &BTreeMap<QuestionId, Answer>,
    running_score: f64,
) -> Option<&'a SectionId> {
    let section = sections.get(section_id)?;
    section
        .branch_rules
        .iter()
        .find(|rule| match &rule.condition {
            BranchCondition::Answer {
                question_id,
                option_id,
            } => answers
                .get(question_id)
                .is_some_and(|answer| answer.value.contains_option(option_id)),
            BranchCondition::Score {
                threshold,
                operator,
            } => operator.compare(running_score, *threshold),
        })
        .map(|rule| &rule.target_section_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OptionId, RuleId};
    use crate::domain::response::AnswerValue;
    use crate::domain::survey::{BranchRule, ScoreOperator};

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

    fn sections_with_rules(rules: Vec<BranchRule>) -> BTreeMap<SectionId, Section> {
        let mut a = Section::new(sid("a"), "A");
        a.branch_rules = rules;
        [a, Section::new(sid("b"), "B"), Section::new(sid("c"), "C")]
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect()
    }

    fn answers(entries: Vec<(&str, AnswerValue)>) -> BTreeMap<QuestionId, Answer> {
        entries
            .into_iter()
            .map(|(q, value)| (qid(q), Answer::new(qid(q), value, 0.0)))
            .collect()
    }

    #[test]
    fn score_rule_skips_to_target() {
        let sections = sections_with_rules(vec![BranchRule::on_score(
            rid("r1"),
            ScoreOperator::Gte,
            15.0,
            sid("c"),
        )]);
        let target = resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 20.0);
        assert_eq!(target, Some(&sid("c")));
    }

    #[test]
    fn first_rule_in_definition_order_wins() {
        let sections = sections_with_rules(vec![
            BranchRule::on_score(rid("r1"), ScoreOperator::Gte, 50.0, sid("b")),
            BranchRule::on_answer(rid("r2"), qid("q"), oid("yes"), sid("c")),
        ]);
        let answers = answers(vec![("q", AnswerValue::option(&oid("yes")))]);

        let target = resolve_branch_target(&sid("a"), &sections, &answers, 60.0);
        assert_eq!(target, Some(&sid("b")));
    }

    #[test]
    fn answer_rule_matches_multi_select_membership() {
        let sections = sections_with_rules(vec![BranchRule::on_answer(
            rid("r1"),
            qid("q"),
            oid("yes"),
            sid("c"),
        )]);
        let answers = answers(vec![("q", AnswerValue::options(vec![oid("maybe"), oid("yes")]))]);

        assert_eq!(
            resolve_branch_target(&sid("a"), &sections, &answers, 0.0),
            Some(&sid("c"))
        );
    }

    #[test]
    fn unanswered_question_does_not_fire() {
        let sections = sections_with_rules(vec![BranchRule::on_answer(
            rid("r1"),
            qid("q"),
            oid("yes"),
            sid("c"),
        )]);
        assert_eq!(resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 0.0), None);
    }

    #[test]
    fn lte_rule_compares_inclusively() {
        let sections = sections_with_rules(vec![BranchRule::on_score(
            rid("r1"),
            ScoreOperator::Lte,
            10.0,
            sid("b"),
        )]);
        assert_eq!(
            resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 10.0),
            Some(&sid("b"))
        );
        assert_eq!(resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 10.5), None);
    }

    #[test]
    fn unknown_section_resolves_to_none() {
        let sections = sections_with_rules(vec![]);
        assert_eq!(resolve_branch_target(&sid("zzz"), &sections, &BTreeMap::new(), 0.0), None);
    }

    #[test]
    fn nonexistent_target_is_returned_as_stored() {
        let sections = sections_with_rules(vec![BranchRule::on_score(
            rid("r1"),
            ScoreOperator::Gte,
            0.0,
            sid("ghost"),
        )]);
        assert_eq!(
            resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 0.0),
            Some(&sid("ghost"))
        );
    }

    #[test]
    fn resolving_is_idempotent() {
        let sections = sections_with_rules(vec![BranchRule::on_score(
            rid("r1"),
            ScoreOperator::Gte,
            5.0,
            sid("c"),
        )]);
        let first = resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 7.0);
        let second = resolve_branch_target(&sid("a"), &sections, &BTreeMap::new(), 7.0);
        assert_eq!(first, second);
    }
}
