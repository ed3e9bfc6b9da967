//! Top-K ranking of match results

use crate::matcher::MatchResult;
use std::cmp::Ordering;

/// Reduces a match list to its top `k` entries by score
///
/// Lists that already fit within `k` pass through untouched, keeping
/// their discovery order. Larger lists are sorted by descending rank
/// value with a stable sort, so ties keep discovery order, then cut to
/// `k`. Token-list scores rank as a full-strength match.
pub fn rank_top_k(mut matches: Vec<MatchResult>, k: usize) -> Vec<MatchResult> {
    if matches.len() <= k {
        return matches;
    }
    matches.sort_by(|a, b| {
        b.score
            .rank_value()
            .partial_cmp(&a.score.rank_value())
            .unwrap_or(Ordering::Equal)
    });
    matches.truncate(k);
    matches
}
