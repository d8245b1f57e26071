//! Coverage sweep: who is free at each point of the timeline.
//!
//! Where [`intersect`](crate::intersect) only reports windows everyone shares,
//! the sweep splits the timeline at every slot boundary and reports each
//! segment with the exact set of participants free across it. Useful when no
//! all-hands window exists and the host has to pick the best partial one.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::availability::{FreeTimeWindow, ParticipantAvailability};
use crate::error::Result;
use crate::identity::Identity;
use crate::interval::Interval;
use crate::intersect::{merge_same_set, prepare, reject_invalid, Candidate};
use crate::options::{CoverageOptions, InvalidIntervalPolicy};

/// Report every maximal segment where at least `min_participants` eligible
/// participants are free, tagged with exactly who they are.
///
/// Returned windows are sorted by start and, apart from gaps absorbed by the
/// merge tolerance, do not overlap in time.
///
/// # Errors
/// With [`InvalidIntervalPolicy::Reject`], fails on the first degenerate slot
/// of an eligible participant.
pub fn compute_coverage_windows(
    availabilities: &[ParticipantAvailability],
    eligible: Option<&HashSet<Identity>>,
    options: &CoverageOptions,
) -> Result<Vec<FreeTimeWindow>> {
    if options.intersect.invalid_intervals == InvalidIntervalPolicy::Reject {
        reject_invalid(availabilities, eligible)?;
    }
    let participants = prepare(availabilities, eligible);
    if participants.is_empty() {
        return Ok(Vec::new());
    }

    let min_participants = options.min_participants.max(1);

    // (instant, opens, participant index)
    let mut edges: Vec<(DateTime<Utc>, bool, usize)> = Vec::new();
    for (idx, participant) in participants.iter().enumerate() {
        for slot in union_slots(&participant.slots) {
            edges.push((slot.start, true, idx));
            edges.push((slot.end, false, idx));
        }
    }
    edges.sort();

    let mut free: BTreeSet<usize> = BTreeSet::new();
    let mut segments: Vec<Candidate> = Vec::new();
    let mut i = 0;
    while i < edges.len() {
        let at = edges[i].0;
        while i < edges.len() && edges[i].0 == at {
            let (_, opens, idx) = edges[i];
            if opens {
                free.insert(idx);
            } else {
                free.remove(&idx);
            }
            i += 1;
        }

        let Some(&(next, _, _)) = edges.get(i) else {
            break;
        };
        if free.len() >= min_participants {
            segments.push(Candidate {
                interval: Interval { start: at, end: next },
                participants: free
                    .iter()
                    .map(|&idx| participants[idx].participant.clone())
                    .collect(),
            });
        }
    }

    debug!(
        participants = participants.len(),
        segments = segments.len(),
        "swept coverage segments"
    );

    Ok(merge_same_set(segments, options.intersect.merge_tolerance))
}

/// Merge one participant's overlapping or touching slots into a sorted,
/// disjoint list.
pub fn union_slots(slots: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = slots.iter().copied().filter(Interval::is_valid).collect();
    sorted.sort_by_key(|slot| (slot.start, slot.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for slot in sorted {
        if let Some(last) = merged.last_mut() {
            if slot.start <= last.end {
                last.end = last.end.max(slot.end);
                continue;
            }
        }
        merged.push(slot);
    }
    merged
}
