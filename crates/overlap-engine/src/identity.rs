//! Participant identity: an authenticated account or an anonymous guest.
//!
//! Storage rows carry two nullable columns (`user_id`, `guest_id`) with exactly
//! one of them set. [`Identity`] folds that convention into a sum type so the
//! rest of the engine never has to re-check it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OverlapError, Result};

/// Who a participant is.
///
/// Ordering puts authenticated users before guests, then sorts by id, which
/// keeps participant lists in emitted windows deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum Identity {
    /// A signed-in account (`user_id` column).
    #[serde(rename = "user")]
    Authenticated(String),
    /// A locally generated guest id (`guest_id` column).
    #[serde(rename = "guest")]
    Anonymous(String),
}

impl Identity {
    pub fn user(id: impl Into<String>) -> Self {
        Identity::Authenticated(id.into())
    }

    pub fn guest(id: impl Into<String>) -> Self {
        Identity::Anonymous(id.into())
    }

    /// Generate a fresh guest identity (UUID v4).
    pub fn new_guest() -> Self {
        Identity::Anonymous(Uuid::new_v4().to_string())
    }

    /// Convert the `user_id` / `guest_id` column pair of a storage row.
    ///
    /// Empty strings count as unset.
    ///
    /// # Errors
    /// `MissingIdentity` when neither column is set, `AmbiguousIdentity` when
    /// both are.
    pub fn from_columns(user_id: Option<&str>, guest_id: Option<&str>) -> Result<Self> {
        let user_id = user_id.filter(|s| !s.is_empty());
        let guest_id = guest_id.filter(|s| !s.is_empty());
        match (user_id, guest_id) {
            (Some(user), None) => Ok(Identity::user(user)),
            (None, Some(guest)) => Ok(Identity::guest(guest)),
            (None, None) => Err(OverlapError::MissingIdentity),
            (Some(user), Some(guest)) => Err(OverlapError::AmbiguousIdentity {
                user_id: user.to_string(),
                guest_id: guest.to_string(),
            }),
        }
    }

    /// The raw id without its kind.
    pub fn id(&self) -> &str {
        match self {
            Identity::Authenticated(id) | Identity::Anonymous(id) => id,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Anonymous(_))
    }

    /// Namespaced key, `user:<id>` or `guest:<id>`.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Authenticated(id) => write!(f, "user:{}", id),
            Identity::Anonymous(id) => write!(f, "guest:{}", id),
        }
    }
}
