//! Cross-filesystem fallback: stream the source into a hidden temp file in
//! the destination directory, fsync it, then rename it into place. The
//! destination path only ever appears complete.

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::helpers::io_error_with_help;
use super::meta::preserve_basic_metadata;

const BUF_SIZE: usize = 1024 * 1024;

static SEQ: AtomicU64 = AtomicU64::new(0);

fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!(".veri_move.{pid}.{nanos}.{seq}.tmp"))
}

/// Copy `src` to a new file at `dst` (never clobbers), fsync, return bytes copied.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;
    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Copy `src` -> temp in `dest`'s directory, carry over mode/mtime, rename temp -> `dest`.
pub(super) fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;
    let tmp = unique_temp_path(dest_dir);

    let bytes = match copy_streaming(src, &tmp) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(io_error_with_help("copy to temporary file", &tmp)(e));
        }
    };

    if let Err(e) = preserve_basic_metadata(src, &tmp) {
        tracing::debug!(error = %e, "could not carry metadata over to copy");
    }

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!("rename temporary file '{}' -> '{}'", tmp.display(), dest.display())
        });
    }
    let _ = fsync_dir(dest_dir);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_content_and_leaves_no_temp() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.bin");
        let out = td.path().join("out");
        fs::create_dir(&out).unwrap();
        let dest = out.join("dest.bin");
        fs::write(&src, vec![7u8; 300_000]).unwrap();

        let n = safe_copy_and_rename(&src, &dest).unwrap();
        assert_eq!(n, 300_000);
        assert_eq!(fs::read(&dest).unwrap(), vec![7u8; 300_000]);
        assert!(src.exists(), "copy must not remove the source");
        let leftovers: Vec<_> = fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_source_cleans_up_temp() {
        let td = tempdir().unwrap();
        let dest = td.path().join("dest.bin");
        let err = safe_copy_and_rename(&td.path().join("nope"), &dest).unwrap_err();
        assert!(err.to_string().contains("copy to temporary file"));
        assert_eq!(fs::read_dir(td.path()).unwrap().count(), 0);
    }

    #[test]
    fn temp_names_are_unique() {
        let td = tempdir().unwrap();
        assert_ne!(unique_temp_path(td.path()), unique_temp_path(td.path()));
    }
}
