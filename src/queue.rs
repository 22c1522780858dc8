//! Queue of files waiting to be moved.
//!
//! Files are queued as given; directories are expanded into every regular
//! file beneath them. Entries are stored as absolute paths but are not
//! re-validated here: the batch runner re-checks each one when it runs,
//! since the queue may be built long before the move.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::utils::strip_quotes;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Queue {
    entries: Vec<PathBuf>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from raw command-line arguments (quotes stripped).
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut q = Self::new();
        for raw in args {
            let cleaned = strip_quotes(raw.as_ref());
            if cleaned.is_empty() {
                continue;
            }
            q.add(Path::new(cleaned));
        }
        q
    }

    /// Queue a file, or every regular file under a directory (walk order).
    /// Returns how many entries were added.
    pub fn add(&mut self, path: &Path) -> usize {
        let meta = match path.metadata() {
            Ok(m) => m,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "not queued: cannot stat");
                return 0;
            }
        };

        if meta.is_file() {
            self.entries.push(absolute(path));
            return 1;
        }
        if !meta.is_dir() {
            warn!(path = %path.display(), "not queued: neither file nor directory");
            return 0;
        }

        let before = self.entries.len();
        let files = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|res| match res {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry during expansion");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| absolute(e.path()));
        self.entries.extend(files);
        let added = self.entries.len() - before;
        debug!(dir = %path.display(), added, "expanded directory");
        added
    }

    /// Remove the entry at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Owned copy for a batch run; later queue edits cannot affect it.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Absolute form without resolving symlinks, so a queued link moves as the link.
fn absolute(p: &Path) -> PathBuf {
    std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn file_is_queued_as_absolute() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("a.txt");
        f.write_str("hello").unwrap();

        let mut q = Queue::new();
        assert_eq!(q.add(f.path()), 1);
        assert!(q.entries()[0].is_absolute());
        assert!(q.entries()[0].ends_with("a.txt"));
    }

    #[test]
    fn directory_expands_to_regular_files_in_walk_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("d/b.txt").write_str("b").unwrap();
        temp.child("d/a.txt").write_str("a").unwrap();
        temp.child("d/sub/c.txt").write_str("c").unwrap();
        temp.child("d/empty").create_dir_all().unwrap();

        let mut q = Queue::new();
        assert_eq!(q.add(&temp.path().join("d")), 3);
        let names: Vec<_> = q
            .entries()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn missing_path_is_not_queued() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut q = Queue::new();
        assert_eq!(q.add(&temp.path().join("nope")), 0);
        assert!(q.is_empty());
    }

    #[test]
    fn from_args_strips_quotes() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("with space.txt");
        f.write_str("x").unwrap();
        let quoted = format!("\"{}\"", f.path().display());

        let q = Queue::from_args([quoted.as_str(), "\"\""]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn snapshot_is_independent_and_remove_clear_work() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a").write_str("a").unwrap();
        temp.child("b").write_str("b").unwrap();
        let mut q = Queue::new();
        q.add(&temp.path().join("a"));
        q.add(&temp.path().join("b"));

        let snap = q.snapshot();
        assert!(q.remove(0).is_some());
        assert!(q.remove(5).is_none());
        assert_eq!(q.len(), 1);
        assert_eq!(snap.len(), 2);
        q.clear();
        assert!(q.is_empty());
        assert_eq!(snap.len(), 2);
    }
}
