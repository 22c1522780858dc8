//! Per-file results.
//! `Display` on the reason enums produces the text shown in the batch report.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::digest::ContentHash;

/// Why a file was deliberately left where it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("user skipped")]
    UserSkipped,

    #[error("renamed destination also exists: {0}")]
    RenameTargetExists(PathBuf),

    #[error("invalid rename target: {0:?}")]
    InvalidRenameTarget(String),

    #[error("interrupted")]
    Interrupted,

    #[error("already at destination")]
    AlreadyAtDestination,
}

/// Why a file could not be moved (or could not be verified after moving).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailReason {
    #[error("missing file")]
    MissingFile,

    #[error("source unreadable: {0}")]
    SourceUnreadable(String),

    #[error("source has no file name")]
    NoFileName,

    #[error("failed to remove existing destination {path}: {detail}")]
    RemoveExisting { path: PathBuf, detail: String },

    #[error("move error: {0}")]
    Move(String),

    #[error("destination unreadable after move: {0}")]
    DestinationUnreadable(String),

    #[error("MD5 mismatch (source {source_hash}, destination {dest_hash}); file may be corrupted")]
    IntegrityMismatch {
        source_hash: ContentHash,
        dest_hash: ContentHash,
    },
}

/// Result of attempting to move one queued entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { destination: PathBuf },
    Skipped(SkipReason),
    Failed(FailReason),
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    /// Human-readable reason for non-moved outcomes.
    pub fn reason(&self) -> Option<String> {
        match self {
            MoveOutcome::Moved { .. } => None,
            MoveOutcome::Skipped(r) => Some(r.to_string()),
            MoveOutcome::Failed(r) => Some(r.to_string()),
        }
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Moved { destination } => write!(f, "moved to {}", destination.display()),
            MoveOutcome::Skipped(r) => write!(f, "skipped: {r}"),
            MoveOutcome::Failed(r) => write!(f, "failed: {r}"),
        }
    }
}

impl From<FailReason> for MoveOutcome {
    fn from(r: FailReason) -> Self {
        MoveOutcome::Failed(r)
    }
}

impl From<SkipReason> for MoveOutcome {
    fn from(r: SkipReason) -> Self {
        MoveOutcome::Skipped(r)
    }
}
