//! Platform-specific helpers.
//! Hides OS differences (Unix/Windows) behind a uniform API so the rest of
//! the codebase can stay platform-agnostic.

mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{open_log_file_secure_append, set_dir_mode_0700, write_file_atomic};

#[cfg(not(unix))]
pub use windows::{open_log_file_secure_append, set_dir_mode_0700, write_file_atomic};

use std::io;
use std::path::Path;

/// Bytes available to this process on the volume containing `path`.
pub fn available_space(path: &Path) -> io::Result<u64> {
    fs2::available_space(path)
}
