//! Collision resolution.
//!
//! When the destination name is already taken, an injected `CollisionPolicy`
//! decides what happens. The policy is asked once per occurrence; decisions
//! are never cached across files. A rename that lands on another existing
//! name is skipped rather than asked again, so each collision costs at most
//! one round-trip to the decision source.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::outcome::SkipReason;
use crate::utils::unique_destination;

/// What to do about an occupied destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionDecision {
    Overwrite,
    RenameTo(OsString),
    Skip,
}

/// Source of collision decisions (interactive prompt, fixed rule, test double).
pub trait CollisionPolicy {
    /// `existing` is the occupied path; `proposed_name` is the source's file name.
    fn decide(&mut self, existing: &Path, proposed_name: &OsStr) -> CollisionDecision;
}

impl<F> CollisionPolicy for F
where
    F: FnMut(&Path, &OsStr) -> CollisionDecision,
{
    fn decide(&mut self, existing: &Path, proposed_name: &OsStr) -> CollisionDecision {
        self(existing, proposed_name)
    }
}

/// Non-interactive policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedPolicy {
    Overwrite,
    Skip,
    /// Rename to `<stem>-<millis>-<pid>[.ext]` next to the existing file.
    RenameUnique,
}

impl CollisionPolicy for FixedPolicy {
    fn decide(&mut self, existing: &Path, _proposed_name: &OsStr) -> CollisionDecision {
        match self {
            FixedPolicy::Overwrite => CollisionDecision::Overwrite,
            FixedPolicy::Skip => CollisionDecision::Skip,
            FixedPolicy::RenameUnique => match unique_destination(existing).file_name() {
                Some(name) => CollisionDecision::RenameTo(name.to_owned()),
                None => CollisionDecision::Skip,
            },
        }
    }
}

/// How the mover should proceed after consulting the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Remove the file at this path, then move onto it.
    Overwrite(PathBuf),
    /// Move to this (currently free) path instead.
    Renamed(PathBuf),
    Skip(SkipReason),
}

/// Resolve a collision at `existing` for a source named `source_name`.
pub fn resolve(
    existing: &Path,
    source_name: &OsStr,
    policy: &mut dyn CollisionPolicy,
) -> Resolution {
    let decision = policy.decide(existing, source_name);
    debug!(existing = %existing.display(), ?decision, "collision decision");
    match decision {
        CollisionDecision::Overwrite => Resolution::Overwrite(existing.to_path_buf()),
        CollisionDecision::Skip => Resolution::Skip(SkipReason::UserSkipped),
        CollisionDecision::RenameTo(name) => {
            if !is_plain_file_name(&name) {
                return Resolution::Skip(SkipReason::InvalidRenameTarget(
                    name.to_string_lossy().into_owned(),
                ));
            }
            let parent = existing.parent().unwrap_or_else(|| Path::new(""));
            let renamed = parent.join(&name);
            // symlink_metadata so a dangling link still counts as occupied
            if renamed.symlink_metadata().is_ok() {
                Resolution::Skip(SkipReason::RenameTargetExists(renamed))
            } else {
                Resolution::Renamed(renamed)
            }
        }
    }
}

/// A single normal path component: no separators, not empty, not `.`/`..`.
fn is_plain_file_name(name: &OsStr) -> bool {
    let mut comps = Path::new(name).components();
    matches!(
        (comps.next(), comps.next()),
        (Some(Component::Normal(n)), None) if n == name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn overwrite_keeps_path() {
        let td = tempdir().unwrap();
        let existing = td.path().join("a.txt");
        fs::write(&existing, b"old").unwrap();
        let r = resolve(&existing, OsStr::new("a.txt"), &mut FixedPolicy::Overwrite);
        assert_eq!(r, Resolution::Overwrite(existing.clone()));
        // resolving never touches the file itself
        assert_eq!(fs::read(&existing).unwrap(), b"old");
    }

    #[test]
    fn skip_is_user_skipped() {
        let td = tempdir().unwrap();
        let existing = td.path().join("a.txt");
        fs::write(&existing, b"old").unwrap();
        let r = resolve(&existing, OsStr::new("a.txt"), &mut FixedPolicy::Skip);
        assert_eq!(r, Resolution::Skip(SkipReason::UserSkipped));
    }

    #[test]
    fn rename_to_free_name() {
        let td = tempdir().unwrap();
        let existing = td.path().join("a.txt");
        fs::write(&existing, b"old").unwrap();
        let mut policy = |_: &Path, _: &OsStr| CollisionDecision::RenameTo("a_copy.txt".into());
        let r = resolve(&existing, OsStr::new("a.txt"), &mut policy);
        assert_eq!(r, Resolution::Renamed(td.path().join("a_copy.txt")));
    }

    #[test]
    fn rename_onto_existing_is_skipped_without_reprompt() {
        let td = tempdir().unwrap();
        let existing = td.path().join("a.txt");
        let other = td.path().join("b.txt");
        fs::write(&existing, b"old").unwrap();
        fs::write(&other, b"other").unwrap();
        let mut calls = 0;
        let mut policy = |_: &Path, _: &OsStr| {
            calls += 1;
            CollisionDecision::RenameTo("b.txt".into())
        };
        let r = resolve(&existing, OsStr::new("a.txt"), &mut policy);
        assert_eq!(r, Resolution::Skip(SkipReason::RenameTargetExists(other)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn rename_with_separator_is_rejected() {
        let td = tempdir().unwrap();
        let existing = td.path().join("a.txt");
        fs::write(&existing, b"old").unwrap();
        for bad in ["../escape.txt", "sub/x.txt", "..", ".", ""] {
            let mut policy = |_: &Path, _: &OsStr| CollisionDecision::RenameTo(bad.into());
            let r = resolve(&existing, OsStr::new("a.txt"), &mut policy);
            assert!(
                matches!(r, Resolution::Skip(SkipReason::InvalidRenameTarget(_))),
                "{bad:?} should be rejected, got {r:?}"
            );
        }
    }

    #[test]
    fn rename_unique_picks_free_sibling() {
        let td = tempdir().unwrap();
        let existing = td.path().join("data.bin");
        fs::write(&existing, b"x").unwrap();
        match resolve(&existing, OsStr::new("data.bin"), &mut FixedPolicy::RenameUnique) {
            Resolution::Renamed(p) => {
                assert_eq!(p.parent(), existing.parent());
                assert_eq!(p.extension().and_then(|s| s.to_str()), Some("bin"));
                assert!(!p.exists());
            }
            other => panic!("expected rename, got {other:?}"),
        }
    }
}
