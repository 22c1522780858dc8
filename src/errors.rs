//! Typed error definitions for veri_move.
//! Batch-level failures abort a run before any file is touched; per-file
//! reasons live in `mover::outcome` and never abort the batch.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("no files")]
    EmptyQueue,

    #[error("no destination")]
    NoDestination,

    #[error("destination {path} is not usable: {reason}")]
    DestinationInvalid { path: PathBuf, reason: String },

    #[error("Not enough free space in destination {dest}: required {required} bytes, available {available} bytes")]
    InsufficientSpace {
        required: u64,
        available: u64,
        dest: PathBuf,
    },
}

impl BatchError {
    /// Stable numeric code for structured logs and exit statuses.
    pub fn code(&self) -> i32 {
        match self {
            BatchError::EmptyQueue => 10,
            BatchError::NoDestination => 11,
            BatchError::DestinationInvalid { .. } => 12,
            BatchError::InsufficientSpace { .. } => 13,
        }
    }

    /// Short machine-friendly kind label.
    pub fn kind(&self) -> &'static str {
        match self {
            BatchError::EmptyQueue => "empty_queue",
            BatchError::NoDestination => "no_destination",
            BatchError::DestinationInvalid { .. } => "destination_invalid",
            BatchError::InsufficientSpace { .. } => "insufficient_space",
        }
    }
}
