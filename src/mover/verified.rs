//! Verified move of a single file.
//!
//! Hash the source, settle any name collision, move, hash the destination
//! and compare. A move is only reported as `Moved` once the destination's
//! digest matches the digest taken before the move. Every failure is
//! terminal for this file and nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::collision::{CollisionPolicy, Resolution, resolve};
use super::digest::digest;
use super::helpers::{io_error_with_help, same_file};
use super::outcome::{FailReason, MoveOutcome, SkipReason};
use super::rename::move_path;

/// Move `source` into `destination_root`, verifying content by MD5.
pub fn move_one(
    source: &Path,
    destination_root: &Path,
    policy: &mut dyn CollisionPolicy,
) -> MoveOutcome {
    move_one_with(source, destination_root, policy, move_path)
}

/// `move_one` with the filesystem move primitive supplied by the caller.
pub fn move_one_with(
    source: &Path,
    destination_root: &Path,
    policy: &mut dyn CollisionPolicy,
    mover: impl Fn(&Path, &Path) -> anyhow::Result<()>,
) -> MoveOutcome {
    let src_hash = match digest(source) {
        Ok(h) => h,
        Err(e) => {
            warn!(src = %source.display(), error = %e, "source unreadable");
            return FailReason::SourceUnreadable(e.to_string()).into();
        }
    };
    debug!(src = %source.display(), md5 = %src_hash, "source hashed");

    let Some(file_name) = source.file_name() else {
        return FailReason::NoFileName.into();
    };
    let candidate = destination_root.join(file_name);

    // the file already lives at its destination; overwriting would delete it
    if same_file(source, &candidate) {
        info!(src = %source.display(), "already at destination");
        return SkipReason::AlreadyAtDestination.into();
    }

    let dest = match effective_destination(candidate, file_name, policy) {
        Ok(p) => p,
        Err(outcome) => return outcome,
    };

    if let Err(e) = mover(source, &dest) {
        warn!(src = %source.display(), dest = %dest.display(), error = %e, "move failed");
        return FailReason::Move(format!("{e:#}")).into();
    }

    let dst_hash = match digest(&dest) {
        Ok(h) => h,
        Err(e) => {
            warn!(dest = %dest.display(), error = %e, "destination unreadable after move");
            return FailReason::DestinationUnreadable(e.to_string()).into();
        }
    };

    if src_hash != dst_hash {
        warn!(
            src = %source.display(),
            dest = %dest.display(),
            source_md5 = %src_hash,
            dest_md5 = %dst_hash,
            "MD5 mismatch after move"
        );
        return FailReason::IntegrityMismatch {
            source_hash: src_hash,
            dest_hash: dst_hash,
        }
        .into();
    }

    info!(src = %source.display(), dest = %dest.display(), md5 = %dst_hash, "moved and verified");
    MoveOutcome::Moved { destination: dest }
}

/// Apply collision policy to `candidate`; `Err` carries an early outcome.
fn effective_destination(
    candidate: PathBuf,
    file_name: &std::ffi::OsStr,
    policy: &mut dyn CollisionPolicy,
) -> Result<PathBuf, MoveOutcome> {
    // symlink_metadata: a dangling symlink still occupies the name
    if candidate.symlink_metadata().is_err() {
        return Ok(candidate);
    }
    match resolve(&candidate, file_name, policy) {
        Resolution::Overwrite(existing) => {
            fs::remove_file(&existing)
                .map_err(io_error_with_help("remove existing destination", &existing))
                .map_err(|e| {
                    warn!(path = %existing.display(), error = %e, "cannot overwrite");
                    MoveOutcome::Failed(FailReason::RemoveExisting {
                        path: existing.clone(),
                        detail: e.to_string(),
                    })
                })?;
            debug!(path = %existing.display(), "removed existing destination");
            Ok(existing)
        }
        Resolution::Renamed(path) => Ok(path),
        Resolution::Skip(reason) => {
            info!(dest = %candidate.display(), %reason, "skipped");
            Err(MoveOutcome::Skipped(reason))
        }
    }
}
