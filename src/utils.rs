use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Return a free sibling of `candidate` by appending timestamp+pid.
/// - Preserves non-UTF8 names (uses OsString).
/// - Format: "<stem>-<millis>-<pid>[-<n>][.ext]"
pub(crate) fn unique_destination(candidate: &Path) -> PathBuf {
    if candidate.symlink_metadata().is_err() {
        return candidate.to_path_buf();
    }

    let epoch_ms = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let pid = std::process::id();
    let stem = candidate
        .file_stem()
        .map(|s| s.to_owned())
        .unwrap_or_else(|| OsString::from("file"));
    let ext = candidate.extension().map(|e| e.to_owned());

    let build = |suffix: String| {
        let mut name = stem.clone();
        name.push(suffix);
        if let Some(e) = &ext {
            name.push(".");
            name.push(e);
        }
        candidate.with_file_name(name)
    };

    let first = build(format!("-{epoch_ms}-{pid}"));
    if first.symlink_metadata().is_err() {
        return first;
    }
    (2u32..)
        .map(|n| build(format!("-{epoch_ms}-{pid}-{n}")))
        .find(|p| p.symlink_metadata().is_err())
        .unwrap_or(first)
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
pub(crate) fn is_writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".veri_move_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

/// Strip surrounding quotes left in argv by shell integrations
/// (e.g. `"C:\My Files\a.txt"` passed through verbatim).
pub fn strip_quotes(raw: &str) -> &str {
    let t = raw.trim();
    for q in ['"', '\''] {
        if t.len() >= 2 && t.starts_with(q) && t.ends_with(q) {
            return &t[1..t.len() - 1];
        }
    }
    t.trim_matches('"')
}
