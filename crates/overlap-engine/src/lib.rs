//! # overlap-engine
//!
//! Shared free-time windows for event planning.
//!
//! Participants (signed-in users or anonymous guests) submit the time slots
//! they are free; the engine intersects them and reports the windows during
//! which they can all meet, tagged with exactly who is free. Everything is a
//! pure, synchronous computation over data the caller has already fetched.
//!
//! ## Quick start
//!
//! ```rust
//! use overlap_engine::{compute_free_windows, Identity, Interval, ParticipantAvailability};
//!
//! let alice = ParticipantAvailability::new(
//!     Identity::user("alice"),
//!     vec![Interval::parse("2026-03-16T09:00:00Z", "2026-03-16T11:00:00Z").unwrap()],
//! );
//! let guest = ParticipantAvailability::new(
//!     Identity::guest("g-1"),
//!     vec![Interval::parse("2026-03-16T10:00:00Z", "2026-03-16T12:00:00Z").unwrap()],
//! );
//!
//! let windows = compute_free_windows(&[alice, guest], None);
//! assert_eq!(windows.len(), 1);
//! assert_eq!(windows[0].participant_count, 2);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `[start, end)` ranges and timestamp parsing
//! - [`identity`] — authenticated user vs anonymous guest
//! - [`availability`] — per-participant input rows and output windows
//! - [`rsvp`] — RSVP rows and the eligible-participant set
//! - [`options`] — merge tolerance, invalid-interval policy, ranking knobs
//! - [`intersect`] — windows shared by everyone who submitted slots
//! - [`coverage`] — per-subset sweep across the whole timeline
//! - [`recommend`] — full-overlap filter and ranking
//! - [`json`] — JSON boundary used by the WASM and CLI front ends
//! - [`error`] — Error types

pub mod availability;
pub mod coverage;
pub mod error;
pub mod identity;
pub mod intersect;
pub mod interval;
pub mod json;
pub mod options;
pub mod recommend;
pub mod rsvp;

pub use availability::{AvailabilityRow, FreeTimeWindow, ParticipantAvailability, SlotRow};
pub use coverage::compute_coverage_windows;
pub use error::OverlapError;
pub use identity::Identity;
pub use intersect::{compute_free_windows, compute_free_windows_with};
pub use interval::{parse_timestamp, Interval};
pub use options::{CoverageOptions, IntersectOptions, InvalidIntervalPolicy, RecommendOptions};
pub use recommend::{full_overlap, recommend};
pub use rsvp::{eligible_participants, Rsvp, RsvpRow, RsvpStatus};
