//! Result-range lookup.

use crate::domain::survey::ScoreRange;

/// Returns the first range, in definition order, containing `score`.
pub fn first_matching_range(score: f64, ranges: &[ScoreRange]) -> Option<&ScoreRange> {
    ranges.iter().find(|range| range.contains(score))
}

/// Returns every range containing `score`, in definition order.
///
/// An empty result means no commentary is configured for this score.
pub fn all_matching_ranges(score: f64, ranges: &[ScoreRange]) -> Vec<&ScoreRange> {
    ranges.iter().filter(|range| range.contains(score)).collect()
}
