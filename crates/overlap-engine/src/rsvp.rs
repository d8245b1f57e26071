//! RSVP rows and the eligible-participant set derived from them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Maybe,
    NotGoing,
    Waitlist,
}

impl RsvpStatus {
    /// Only `going` and `maybe` responses count towards scheduling.
    pub fn is_valid(self) -> bool {
        matches!(self, RsvpStatus::Going | RsvpStatus::Maybe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    pub participant: Identity,
    pub status: RsvpStatus,
}

/// Storage-shaped RSVP row (`rsvps` table, scheduling-relevant columns only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsvpRow {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub guest_id: Option<String>,
    pub status: RsvpStatus,
}

impl RsvpRow {
    pub fn into_rsvp(self) -> Result<Rsvp> {
        let participant =
            Identity::from_columns(self.user_id.as_deref(), self.guest_id.as_deref())?;
        Ok(Rsvp {
            participant,
            status: self.status,
        })
    }
}

/// Identities holding a valid (`going` / `maybe`) RSVP.
pub fn eligible_participants(rsvps: &[Rsvp]) -> HashSet<Identity> {
    rsvps
        .iter()
        .filter(|rsvp| rsvp.status.is_valid())
        .map(|rsvp| rsvp.participant.clone())
        .collect()
}
