//! Tunables for window computation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Gap allowed between two same-set windows that still counts as contiguous.
pub const DEFAULT_MERGE_TOLERANCE_SECS: i64 = 1;

/// What to do with a supplied interval whose start is not before its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidIntervalPolicy {
    /// Drop the interval and log a warning.
    #[default]
    Skip,
    /// Fail the whole call with `OverlapError::RejectedInterval`.
    Reject,
}

/// Options for [`compute_free_windows_with`](crate::intersect::compute_free_windows_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectOptions {
    /// Serialised as whole seconds.
    #[serde(with = "tolerance_secs", rename = "merge_tolerance_secs")]
    pub merge_tolerance: Duration,
    pub invalid_intervals: InvalidIntervalPolicy,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            merge_tolerance: Duration::seconds(DEFAULT_MERGE_TOLERANCE_SECS),
            invalid_intervals: InvalidIntervalPolicy::default(),
        }
    }
}

impl IntersectOptions {
    pub fn strict() -> Self {
        Self {
            invalid_intervals: InvalidIntervalPolicy::Reject,
            ..Self::default()
        }
    }

    pub fn with_tolerance_secs(mut self, secs: i64) -> Self {
        self.merge_tolerance = tolerance_from_secs(secs);
        self
    }
}

/// Options for [`compute_coverage_windows`](crate::coverage::compute_coverage_windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageOptions {
    /// Segments with fewer free participants are not reported. Values below 1
    /// are treated as 1.
    pub min_participants: usize,
    #[serde(flatten)]
    pub intersect: IntersectOptions,
}

impl Default for CoverageOptions {
    fn default() -> Self {
        Self {
            min_participants: 1,
            intersect: IntersectOptions::default(),
        }
    }
}

/// Options for [`recommend`](crate::recommend::recommend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendOptions {
    pub min_duration_minutes: i64,
    pub limit: Option<usize>,
}

/// Negative values clamp to zero, huge values to `u32::MAX` seconds.
fn tolerance_from_secs(secs: i64) -> Duration {
    Duration::seconds(secs.clamp(0, i64::from(u32::MAX)))
}

mod tolerance_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Ok(super::tolerance_from_secs(secs))
    }
}
