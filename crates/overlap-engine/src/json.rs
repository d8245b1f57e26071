//! JSON in, JSON out: the boundary shared by the WASM bindings and the CLI.
//!
//! Inputs are storage-shaped rows (`user_id` / `guest_id` / `available_slots`,
//! `user_id` / `guest_id` / `status`). Output windows serialise as
//! `{start, end, participants, participant_count}` with RFC 3339 instants and
//! participants as `{"kind": "user" | "guest", "id": ...}`.

use std::collections::HashSet;

use crate::availability::{AvailabilityRow, FreeTimeWindow, ParticipantAvailability};
use crate::coverage::compute_coverage_windows;
use crate::error::Result;
use crate::identity::Identity;
use crate::intersect::compute_free_windows_with;
use crate::options::{CoverageOptions, IntersectOptions, RecommendOptions};
use crate::recommend::recommend;
use crate::rsvp::{eligible_participants, Rsvp, RsvpRow};

/// Parse a JSON array of availability rows.
pub fn parse_availabilities(json: &str) -> Result<Vec<ParticipantAvailability>> {
    let rows: Vec<AvailabilityRow> = serde_json::from_str(json)?;
    rows.into_iter().map(AvailabilityRow::into_availability).collect()
}

/// Parse a JSON array of RSVP rows.
pub fn parse_rsvps(json: &str) -> Result<Vec<Rsvp>> {
    let rows: Vec<RsvpRow> = serde_json::from_str(json)?;
    rows.into_iter().map(RsvpRow::into_rsvp).collect()
}

/// Parse a JSON array of previously emitted windows.
pub fn parse_windows(json: &str) -> Result<Vec<FreeTimeWindow>> {
    let windows: Vec<FreeTimeWindow> = serde_json::from_str(json)?;
    Ok(windows
        .into_iter()
        .map(|w| FreeTimeWindow::new(w.start, w.end, w.participants))
        .collect())
}

/// Eligible set from an optional RSVP document. `None` means no filtering.
pub fn eligible_from_json(rsvps_json: Option<&str>) -> Result<Option<HashSet<Identity>>> {
    rsvps_json
        .map(|json| parse_rsvps(json).map(|rsvps| eligible_participants(&rsvps)))
        .transpose()
}

pub fn windows_to_json(windows: &[FreeTimeWindow]) -> Result<String> {
    Ok(serde_json::to_string(windows)?)
}

pub fn free_windows_json(
    availabilities_json: &str,
    rsvps_json: Option<&str>,
    options: &IntersectOptions,
) -> Result<String> {
    let availabilities = parse_availabilities(availabilities_json)?;
    let eligible = eligible_from_json(rsvps_json)?;
    let windows = compute_free_windows_with(&availabilities, eligible.as_ref(), options)?;
    windows_to_json(&windows)
}

pub fn coverage_windows_json(
    availabilities_json: &str,
    rsvps_json: Option<&str>,
    options: &CoverageOptions,
) -> Result<String> {
    let availabilities = parse_availabilities(availabilities_json)?;
    let eligible = eligible_from_json(rsvps_json)?;
    let windows = compute_coverage_windows(&availabilities, eligible.as_ref(), options)?;
    windows_to_json(&windows)
}

/// Rank a JSON array of windows (as produced by the functions above).
pub fn recommend_json(windows_json: &str, options: &RecommendOptions) -> Result<String> {
    let windows = parse_windows(windows_json)?;
    windows_to_json(&recommend(&windows, options))
}

/// Intersect options from JSON; `None` or an empty string gives the defaults.
pub fn intersect_options_from_json(json: Option<&str>) -> Result<IntersectOptions> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(IntersectOptions::default()),
    }
}
