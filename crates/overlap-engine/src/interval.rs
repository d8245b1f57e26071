//! Half-open time intervals and timestamp parsing.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};

/// A `[start, end)` range of absolute instants.
///
/// Fields are public so callers can hold whatever they were given; the
/// intersector screens degenerate values (`start >= end`) according to its
/// [`InvalidIntervalPolicy`](crate::options::InvalidIntervalPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build a validated interval.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidInterval` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let interval = Self { start, end };
        if !interval.is_valid() {
            return Err(OverlapError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(interval)
    }

    /// Parse both ends from text. See [`parse_timestamp`] for accepted formats.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_timestamp(start)?, parse_timestamp(end)?)
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// The common part of two intervals, if it has positive length.
    ///
    /// Intervals that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlap(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Parse a timestamp into a UTC instant.
///
/// Accepts RFC 3339 with any offset (normalised to UTC) and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]`, which is read as UTC.
///
/// # Errors
/// Returns `OverlapError::InvalidTimestamp` for anything else.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| OverlapError::InvalidTimestamp(format!("'{}': {}", s, e)))
}
