//! Error types for overlap-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval { start: String, end: String },

    #[error("Rejected interval for {participant}: start {start} is not before end {end}")]
    RejectedInterval {
        participant: String,
        start: String,
        end: String,
    },

    #[error("Row has neither user_id nor guest_id")]
    MissingIdentity,

    #[error("Row has both user_id ({user_id}) and guest_id ({guest_id})")]
    AmbiguousIdentity { user_id: String, guest_id: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
