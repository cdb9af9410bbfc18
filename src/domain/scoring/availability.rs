//! Availability gate: may a respondent enter the survey right now?

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{SurveyStatus, Timestamp};
use crate::domain::survey::Schedule;

/// Why a survey is not accepting responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosedReason {
    /// Locked, or never published.
    Locked,
    NotStarted,
    Ended,
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClosedReason::Locked => "locked",
            ClosedReason::NotStarted => "not-started",
            ClosedReason::Ended => "ended",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of the availability gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Open,
    Closed(ClosedReason),
}

impl Availability {
    pub fn is_open(&self) -> bool {
        matches!(self, Availability::Open)
    }

    pub fn reason(&self) -> Option<ClosedReason> {
        match self {
            Availability::Open => None,
            Availability::Closed(reason) => Some(*reason),
        }
    }
}

/// Decides whether a survey accepts responses at `now`.
///
/// Checked in order, first match wins:
/// 1. locked → `Locked`
/// 2. draft → `Locked` (unpublished surveys look the same as locked ones)
/// 3. `now < open_at` → `NotStarted`
/// 4. `now > close_at` → `Ended`
/// 5. otherwise open
pub fn check_availability(status: SurveyStatus, schedule: &Schedule, now: Timestamp) -> Availability {
    match status {
        SurveyStatus::Locked | SurveyStatus::Draft => Availability::Closed(ClosedReason::Locked),
        SurveyStatus::Published if schedule.not_started_at(now) => {
            Availability::Closed(ClosedReason::NotStarted)
        }
        SurveyStatus::Published if schedule.ended_at(now) => {
            Availability::Closed(ClosedReason::Ended)
        }
        SurveyStatus::Published => Availability::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_unix_millis(millis).unwrap()
    }

    fn window(open: Option<i64>, close: Option<i64>) -> Schedule {
        Schedule {
            open_at: open.map(ts),
            close_at: close.map(ts),
        }
    }

    #[test]
    fn locked_takes_precedence_over_schedule() {
        let result = check_availability(SurveyStatus::Locked, &window(Some(0), None), ts(10));
        assert_eq!(result, Availability::Closed(ClosedReason::Locked));
    }

    #[test]
    fn opens_exactly_at_open_at() {
        let schedule = window(Some(1_000), None);
        assert_eq!(
            check_availability(SurveyStatus::Published, &schedule, ts(999)),
            Availability::Closed(ClosedReason::NotStarted)
        );
        assert_eq!(
            check_availability(SurveyStatus::Published, &schedule, ts(1_000)),
            Availability::Open
        );
    }

    #[test]
    fn closes_after_close_at() {
        let schedule = window(None, Some(2_000));
        assert!(check_availability(SurveyStatus::Published, &schedule, ts(2_000)).is_open());
        assert_eq!(
            check_availability(SurveyStatus::Published, &schedule, ts(2_001)).reason(),
            Some(ClosedReason::Ended)
        );
    }

    #[test]
    fn not_started_checked_before_ended() {
        // Inverted windows are a builder concern; the gate reports not-started first.
        let schedule = window(Some(5_000), Some(1_000));
        assert_eq!(
            check_availability(SurveyStatus::Published, &schedule, ts(3_000)).reason(),
            Some(ClosedReason::NotStarted)
        );
    }

    #[test]
    fn unbounded_published_survey_is_open() {
        assert!(check_availability(SurveyStatus::Published, &Schedule::unbounded(), ts(0)).is_open());
    }

    #[test]
    fn reasons_serialize_kebab_case() {
        assert_eq!(serde_json::to_string(&ClosedReason::NotStarted).unwrap(), "\"not-started\"");
        assert_eq!(ClosedReason::Ended.to_string(), "ended");
    }

    proptest! {
        #[test]
        fn drafts_always_present_as_locked(
            open in proptest::option::of(0i64..10_000),
            close in proptest::option::of(0i64..10_000),
            now in 0i64..10_000,
        ) {
            let result = check_availability(SurveyStatus::Draft, &window(open, close), ts(now));
            prop_assert_eq!(result, Availability::Closed(ClosedReason::Locked));
        }
    }
}
