//! Carry permissions and timestamps over to a copied file so a
//! cross-filesystem move looks like a rename to the user.

use anyhow::{Context, Result};
use filetime::{FileTime, set_file_times};
use std::fs;
use std::path::Path;

pub(super) fn preserve_basic_metadata(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).with_context(|| format!("stat {}", src.display()))?;

    let at = FileTime::from_last_access_time(&meta);
    let mt = FileTime::from_last_modification_time(&meta);
    set_file_times(dest, at, mt).with_context(|| format!("set times on {}", dest.display()))?;

    fs::set_permissions(dest, meta.permissions())
        .with_context(|| format!("set permissions on {}", dest.display()))?;
    Ok(())
}
