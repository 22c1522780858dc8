//! Filesystem move primitive.
//! Renames in place when source and destination share a filesystem; across
//! filesystems, copies into the destination directory and then removes the
//! source. Failures are returned as-is; nothing is retried.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::copy::safe_copy_and_rename;
use super::helpers::{io_error_with_help, is_cross_device};

pub fn move_path(src: &Path, dest: &Path) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed");
            #[cfg(unix)]
            if let Some(parent) = dest.parent() {
                // persist the directory entry; a failure here does not undo the rename
                let _ = fs::File::open(parent).and_then(|d| d.sync_all());
            }
            Ok(())
        }
        Err(e) if is_cross_device(&e) => {
            info!(src = %src.display(), dest = %dest.display(), "cross-filesystem move; copying");
            let bytes = safe_copy_and_rename(src, dest)
                .with_context(|| format!("copy '{}' -> '{}'", src.display(), dest.display()))?;
            fs::remove_file(src).map_err(io_error_with_help("remove original after copy", src))?;
            debug!(bytes, "copied and removed source");
            Ok(())
        }
        Err(e) => Err(io_error_with_help("rename", src)(e))
            .with_context(|| format!("move to '{}'", dest.display())),
    }
}
