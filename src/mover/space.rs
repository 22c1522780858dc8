//! Space preflight.
//! Sums the sizes of the queued files that still exist and compares the total
//! to the free space on the destination volume, once, before anything moves.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::BatchError;
use crate::platform::available_space;

/// Bytes needed versus bytes free, as measured by a passing preflight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceCheck {
    pub required: u64,
    pub available: u64,
}

/// Total size of the entries that currently exist as regular files.
/// Vanished entries are left out; they surface later as per-file failures.
pub fn required_bytes(entries: &[PathBuf]) -> u64 {
    entries
        .iter()
        .filter_map(|p| fs::metadata(p).ok())
        .filter(|m| m.is_file())
        .map(|m| m.len())
        .fold(0u64, u64::saturating_add)
}

/// Free bytes on the volume holding `dest`; 0 when the volume cannot be queried.
pub fn available_bytes(dest: &Path) -> u64 {
    match available_space(dest) {
        Ok(n) => n,
        Err(e) => {
            warn!(dest = %dest.display(), error = %e, "cannot query free space; assuming 0 bytes");
            0
        }
    }
}

/// Pure comparison used by `check`.
pub fn check_against(required: u64, available: u64, dest: &Path) -> Result<SpaceCheck, BatchError> {
    if required > available {
        return Err(BatchError::InsufficientSpace {
            required,
            available,
            dest: dest.to_path_buf(),
        });
    }
    Ok(SpaceCheck { required, available })
}

/// Preflight the whole batch against the destination volume.
pub fn check(entries: &[PathBuf], dest: &Path) -> Result<SpaceCheck, BatchError> {
    check_with(entries, dest, available_bytes)
}

/// `check` with the free-space probe supplied by the caller.
pub fn check_with(
    entries: &[PathBuf],
    dest: &Path,
    probe: impl Fn(&Path) -> u64,
) -> Result<SpaceCheck, BatchError> {
    let required = required_bytes(entries);
    let available = probe(dest);
    debug!(required, available, dest = %dest.display(), "space preflight");
    check_against(required, available, dest)
}

/// Render a byte count with binary units, e.g. `10.00 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} PB")
}
