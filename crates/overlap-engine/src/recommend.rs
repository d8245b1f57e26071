//! Pick the windows worth proposing to the host.

use std::cmp::Reverse;

use crate::availability::FreeTimeWindow;
use crate::options::RecommendOptions;

/// Windows where all `total` participants are free.
pub fn full_overlap(windows: &[FreeTimeWindow], total: usize) -> Vec<FreeTimeWindow> {
    windows
        .iter()
        .filter(|w| total > 0 && w.participant_count == total)
        .cloned()
        .collect()
}

/// Rank windows for proposal.
///
/// Windows shorter than `min_duration_minutes` are dropped. The rest are
/// ordered by participant count (most first), then duration (longest first),
/// then start (earliest first), and truncated to `limit` if set.
pub fn recommend(windows: &[FreeTimeWindow], options: &RecommendOptions) -> Vec<FreeTimeWindow> {
    let mut ranked: Vec<FreeTimeWindow> = windows
        .iter()
        .filter(|w| w.duration_minutes() >= options.min_duration_minutes)
        .cloned()
        .collect();

    ranked.sort_by_key(|w| (Reverse(w.participant_count), Reverse(w.end - w.start), w.start));

    if let Some(limit) = options.limit {
        ranked.truncate(limit);
    }
    ranked
}
