//! Recently used destinations.
//!
//! Up to five directories, most recent first, no duplicates. Stored as a
//! JSON array of path strings. A missing or unreadable file loads as an
//! empty list; the history is a convenience, never a reason to fail a move.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::platform::write_file_atomic;

pub const MAX_RECENT_DESTINATIONS: usize = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecentDestinations {
    entries: Vec<PathBuf>,
}

impl RecentDestinations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`; problems are logged and yield an empty list.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no recent destinations loaded");
                return Self::new();
            }
        };
        match serde_json::from_str::<Vec<PathBuf>>(&content) {
            Ok(list) => {
                let mut recent = Self::new();
                // oldest first so the file's first entry ends up most recent
                for p in list.into_iter().rev() {
                    recent.record(p);
                }
                recent
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed recent destinations file");
                Self::new()
            }
        }
    }

    /// Persist to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).context("encode recent destinations")?;
        write_file_atomic(path, json.as_bytes())
            .with_context(|| format!("save recent destinations to '{}'", path.display()))
    }

    /// Move `dest` to the front, dropping any older copy and the overflow.
    pub fn record(&mut self, dest: impl Into<PathBuf>) {
        let dest = dest.into();
        self.entries.retain(|p| *p != dest);
        self.entries.insert(0, dest);
        self.entries.truncate(MAX_RECENT_DESTINATIONS);
    }

    /// 1-based lookup, matching how the list is shown to users.
    pub fn nth(&self, n: usize) -> Option<&Path> {
        n.checked_sub(1).and_then(|i| self.entries.get(i)).map(PathBuf::as_path)
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
