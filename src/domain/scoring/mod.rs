//! Scoring module - the pure scoring and branching engine.
//!
//! Every function here is a deterministic computation over its arguments:
//! no clock reads (the availability gate takes `now`), no shared state, and
//! no errors. Malformed or stale input degrades to a zero contribution or
//! "no match" instead of failing mid-survey.

mod aggregate;
mod answer_scorer;
mod availability;
mod branch_resolver;
mod range_matcher;

pub use aggregate::{max_possible_score, sum_scores, total_score};
pub use answer_scorer::score_answer;
pub use availability::{check_availability, Availability, ClosedReason};
pub use branch_resolver::resolve_branch_target;
pub use range_matcher::{all_matching_ranges, first_matching_range};
