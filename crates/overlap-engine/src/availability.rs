//! Participant availability input and free-time window output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::Identity;
use crate::interval::{parse_timestamp, Interval};

/// Every slot one participant reported as free.
///
/// Slots are expected not to overlap each other; this is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantAvailability {
    pub participant: Identity,
    pub slots: Vec<Interval>,
}

impl ParticipantAvailability {
    pub fn new(participant: Identity, slots: Vec<Interval>) -> Self {
        Self { participant, slots }
    }
}

/// A slot as stored: two timestamp strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRow {
    pub start: String,
    pub end: String,
}

/// Storage-shaped availability row (`user_availability` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRow {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub guest_id: Option<String>,
    #[serde(default)]
    pub available_slots: Vec<SlotRow>,
}

impl AvailabilityRow {
    /// Resolve the identity columns and parse every slot.
    ///
    /// Slot ordering is not validated here (`start >= end` survives); the
    /// intersector applies its own policy to those.
    ///
    /// # Errors
    /// Identity column errors and unparseable timestamps.
    pub fn into_availability(self) -> Result<ParticipantAvailability> {
        let participant =
            Identity::from_columns(self.user_id.as_deref(), self.guest_id.as_deref())?;
        let slots = self
            .available_slots
            .iter()
            .map(|slot| {
                Ok(Interval {
                    start: parse_timestamp(&slot.start)?,
                    end: parse_timestamp(&slot.end)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ParticipantAvailability { participant, slots })
    }
}

/// A time range and the participants simultaneously free throughout it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Sorted, without duplicates.
    pub participants: Vec<Identity>,
    /// Always `participants.len()`.
    pub participant_count: usize,
}

impl FreeTimeWindow {
    /// Build a window, sorting and deduplicating `participants`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, mut participants: Vec<Identity>) -> Self {
        participants.sort();
        participants.dedup();
        let participant_count = participants.len();
        Self {
            start,
            end,
            participants,
            participant_count,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn includes(&self, participant: &Identity) -> bool {
        self.participants.binary_search(participant).is_ok()
    }
}
