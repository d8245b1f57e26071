//! Free-time windows shared by every participant who reported availability.
//!
//! The intersection is a fold: seed with the first participant's slots, then
//! narrow the working set against each later participant by taking every
//! pairwise overlap. Windows only ever shrink or disappear, so boundaries in
//! the output are always real slot edges from the input.
//!
//! Participants without any (valid) slots are left out entirely: they never
//! appear in a window and never block one. A participant whose slots miss
//! everyone else's collapses the result to nothing.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Duration;
use tracing::{debug, warn};

use crate::availability::{FreeTimeWindow, ParticipantAvailability};
use crate::error::{OverlapError, Result};
use crate::identity::Identity;
use crate::interval::Interval;
use crate::options::{IntersectOptions, InvalidIntervalPolicy};

/// A window under construction, tagged with its contributors.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) interval: Interval,
    pub(crate) participants: BTreeSet<Identity>,
}

/// Compute free-time windows with default options.
///
/// Degenerate intervals (`start >= end`) are skipped with a warning.
///
/// # Arguments
///
/// * `availabilities` — One entry per participant; repeated identities are
///   combined.
/// * `eligible` — When set, only these participants contribute. An empty set
///   yields no windows.
pub fn compute_free_windows(
    availabilities: &[ParticipantAvailability],
    eligible: Option<&HashSet<Identity>>,
) -> Vec<FreeTimeWindow> {
    let options = IntersectOptions::default();
    let participants = prepare(availabilities, eligible);
    fold_windows(participants, options.merge_tolerance)
}

/// Compute free-time windows with explicit options.
///
/// # Errors
/// With [`InvalidIntervalPolicy::Reject`], returns
/// `OverlapError::RejectedInterval` for the first eligible participant slot
/// that does not end after it starts.
pub fn compute_free_windows_with(
    availabilities: &[ParticipantAvailability],
    eligible: Option<&HashSet<Identity>>,
    options: &IntersectOptions,
) -> Result<Vec<FreeTimeWindow>> {
    if options.invalid_intervals == InvalidIntervalPolicy::Reject {
        reject_invalid(availabilities, eligible)?;
    }
    let participants = prepare(availabilities, eligible);
    Ok(fold_windows(participants, options.merge_tolerance))
}

fn fold_windows(
    participants: Vec<ParticipantAvailability>,
    tolerance: Duration,
) -> Vec<FreeTimeWindow> {
    let mut remaining = participants.into_iter();
    let Some(first) = remaining.next() else {
        return Vec::new();
    };

    let mut working: Vec<Candidate> = first
        .slots
        .iter()
        .map(|slot| Candidate {
            interval: *slot,
            participants: BTreeSet::from([first.participant.clone()]),
        })
        .collect();

    for next in remaining {
        let mut narrowed = Vec::with_capacity(working.len());
        for candidate in &working {
            for slot in &next.slots {
                if let Some(overlap) = candidate.interval.overlap(slot) {
                    let mut participants = candidate.participants.clone();
                    participants.insert(next.participant.clone());
                    narrowed.push(Candidate {
                        interval: overlap,
                        participants,
                    });
                }
            }
        }
        debug!(
            participant = %next.participant,
            before = working.len(),
            after = narrowed.len(),
            "narrowed candidate windows"
        );
        working = narrowed;
        if working.is_empty() {
            break;
        }
    }

    merge_same_set(working, tolerance)
}

/// Apply the eligibility filter, drop degenerate slots, and combine rows that
/// share an identity. Participants left without slots are removed. First-seen
/// order is preserved.
pub(crate) fn prepare(
    availabilities: &[ParticipantAvailability],
    eligible: Option<&HashSet<Identity>>,
) -> Vec<ParticipantAvailability> {
    let mut order: Vec<Identity> = Vec::new();
    let mut grouped: HashMap<Identity, Vec<Interval>> = HashMap::new();

    for availability in availabilities {
        if !is_eligible(&availability.participant, eligible) {
            debug!(participant = %availability.participant, "not eligible, ignoring");
            continue;
        }

        let slots = availability.slots.iter().copied().filter(|slot| {
            if !slot.is_valid() {
                warn!(
                    participant = %availability.participant,
                    start = %slot.start,
                    end = %slot.end,
                    "skipping interval that does not end after it starts"
                );
            }
            slot.is_valid()
        });

        match grouped.entry(availability.participant.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().extend(slots),
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                entry.insert(slots.collect());
            }
        }
    }

    order
        .into_iter()
        .filter_map(|participant| {
            let slots = grouped.remove(&participant)?;
            if slots.is_empty() {
                debug!(participant = %participant, "no usable slots, leaving out");
                return None;
            }
            Some(ParticipantAvailability { participant, slots })
        })
        .collect()
}

pub(crate) fn reject_invalid(
    availabilities: &[ParticipantAvailability],
    eligible: Option<&HashSet<Identity>>,
) -> Result<()> {
    for availability in availabilities {
        if !is_eligible(&availability.participant, eligible) {
            continue;
        }
        if let Some(slot) = availability.slots.iter().find(|slot| !slot.is_valid()) {
            return Err(OverlapError::RejectedInterval {
                participant: availability.participant.key(),
                start: slot.start.to_rfc3339(),
                end: slot.end.to_rfc3339(),
            });
        }
    }
    Ok(())
}

fn is_eligible(participant: &Identity, eligible: Option<&HashSet<Identity>>) -> bool {
    eligible.is_none_or(|set| set.contains(participant))
}

/// Sort candidates by start and merge those with an identical contributor set
/// whose start falls within `tolerance` of the previous same-set window's end.
pub(crate) fn merge_same_set(
    mut candidates: Vec<Candidate>,
    tolerance: Duration,
) -> Vec<FreeTimeWindow> {
    candidates.sort_by(|a, b| {
        (a.interval.start, a.interval.end, &a.participants).cmp(&(
            b.interval.start,
            b.interval.end,
            &b.participants,
        ))
    });

    let mut merged: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut last_by_set: HashMap<BTreeSet<Identity>, usize> = HashMap::new();

    for candidate in candidates {
        if let Some(&idx) = last_by_set.get(&candidate.participants) {
            let last = &mut merged[idx];
            // A limit past the representable range reaches every later start.
            let within = last
                .interval
                .end
                .checked_add_signed(tolerance)
                .is_none_or(|limit| candidate.interval.start <= limit);
            if within {
                last.interval.end = last.interval.end.max(candidate.interval.end);
                continue;
            }
        }
        last_by_set.insert(candidate.participants.clone(), merged.len());
        merged.push(candidate);
    }

    merged
        .into_iter()
        .map(|c| {
            FreeTimeWindow::new(
                c.interval.start,
                c.interval.end,
                c.participants.into_iter().collect(),
            )
        })
        .collect()
}
