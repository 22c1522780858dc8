//! Streaming MD5 content digest.
//!
//! The file is read front to back in fixed-size chunks and each chunk is
//! folded into the running hash, so memory use is constant regardless of
//! file size. The result is independent of the chunk size.

use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

use super::helpers::io_error_with_help_io;

const BUF_SIZE: usize = 64 * 1024;

/// Lowercase hex MD5 of a file's full content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the digest of the file at `path`.
pub fn digest(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path).map_err(io_error_with_help_io("open for hashing", path))?;
    let hash = digest_reader(file).map_err(io_error_with_help_io("read for hashing", path))?;
    trace!(path = %path.display(), md5 = %hash, "digest computed");
    Ok(hash)
}

/// Digest any reader to EOF.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<ContentHash> {
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(ContentHash(format!("{:x}", hasher.finalize())))
}
