//! I/O error enrichment.
//!
//! Adds the operation, the path and a platform-aware hint to an `io::Error`
//! so per-file failure reasons are actionable in the batch report:
//!
//!   fs::remove_file(p).map_err(io_error_with_help("remove existing destination", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint keyed by raw OS error code, if the code is one we recognise.
fn os_hint(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        let hint = match code {
            libc::EACCES | libc::EPERM => "permission denied; check ownership and write permissions",
            libc::EXDEV => "cross-filesystem; atomic rename not possible",
            libc::EBUSY => "resource busy; another process may be using the file",
            libc::ENOENT => "path not found; it may have been moved or deleted",
            libc::EEXIST => "already exists",
            libc::ENOSPC => "insufficient space on device",
            libc::EDQUOT => "disk quota exceeded",
            libc::EROFS => "read-only filesystem",
            libc::ENAMETOOLONG => "filename or path too long",
            libc::EISDIR => "is a directory",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(windows)]
    {
        let hint = match code {
            5 => "access denied; check permissions",
            17 => "not same device; cross-filesystem move",
            32 => "sharing violation; file is in use",
            2 | 3 => "path not found; it may have been moved or deleted",
            80 | 183 => "already exists",
            112 => "insufficient disk space",
            206 => "filename or path too long",
            _ => return None,
        };
        Some(hint)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    match e.raw_os_error() {
        Some(code) => {
            if let Some(h) = os_hint(code) {
                msg.push_str(" (");
                msg.push_str(h);
                msg.push(')');
            }
            msg.push_str(&format!(" [os code: {code}]"));
        }
        None => {
            if let Some(h) = kind_hint(e.kind()) {
                msg.push_str(" (");
                msg.push_str(h);
                msg.push(')');
            }
        }
    }
    msg
}

/// Adapter for `anyhow::Result` code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for `io::Result` code; keeps the original `ErrorKind`.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}

/// True when both paths are the same file: same device and inode on Unix,
/// so hard links match. Symlinks are not followed.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        match (a.symlink_metadata(), b.symlink_metadata()) {
            (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
            _ => false,
        }
    }
    #[cfg(not(unix))]
    {
        match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
            (Ok(ca), Ok(cb)) => ca == cb,
            _ => false,
        }
    }
}

/// True when `e` reports a rename across filesystems (EXDEV / ERROR_NOT_SAME_DEVICE).
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => e.kind() == io::ErrorKind::CrossesDevices,
    }
}
