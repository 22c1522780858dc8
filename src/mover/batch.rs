//! Batch runner.
//!
//! Takes an owned snapshot of the queue, checks preconditions and free space
//! once, then moves files strictly one at a time in queue order. Per-file
//! problems are recorded and the batch carries on; only precondition and
//! space failures abort, and they abort before any file is touched.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::collision::CollisionPolicy;
use super::outcome::{FailReason, MoveOutcome, SkipReason};
use super::progress::{ProgressEvent, ProgressSink};
use super::space::{available_bytes, check_with};
use super::verified::move_one;
use crate::errors::BatchError;
use crate::shutdown;
use crate::utils::is_writable_probe;

/// Aggregate result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub destination: PathBuf,
    /// Every queued entry with its outcome, in queue order.
    pub outcomes: Vec<(PathBuf, MoveOutcome)>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn moved(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_moved()).count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|(_, o)| o.is_moved())
    }

    /// `"<path>: <reason>"` for every entry that was not moved.
    pub fn failures(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter_map(|(p, o)| o.reason().map(|r| format!("{}: {}", p.display(), r)))
            .collect()
    }
}

/// Sequential mover for a snapshot of queued files.
pub struct BatchRunner<'a> {
    policy: &'a mut dyn CollisionPolicy,
    progress: &'a dyn ProgressSink,
    interrupted: Box<dyn Fn() -> bool + 'a>,
    free_space: Box<dyn Fn(&Path) -> u64 + 'a>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(policy: &'a mut dyn CollisionPolicy, progress: &'a dyn ProgressSink) -> Self {
        Self {
            policy,
            progress,
            interrupted: Box::new(shutdown::is_requested),
            free_space: Box::new(available_bytes),
        }
    }

    /// Replace the between-files interrupt check (defaults to the Ctrl-C flag).
    pub fn with_interrupt_check(mut self, check: impl Fn() -> bool + 'a) -> Self {
        self.interrupted = Box::new(check);
        self
    }

    /// Replace the free-space probe (defaults to querying the destination volume).
    pub fn with_free_space(mut self, probe: impl Fn(&Path) -> u64 + 'a) -> Self {
        self.free_space = Box::new(probe);
        self
    }

    pub fn run(&mut self, entries: &[PathBuf], destination: &Path) -> Result<BatchReport, BatchError> {
        let snapshot: Vec<PathBuf> = entries.to_vec();

        if let Err(e) = self.preflight(&snapshot, destination) {
            error!(code = e.code(), kind = e.kind(), error = %e, "batch aborted");
            return Err(e);
        }

        let total = snapshot.len();
        info!(total, dest = %destination.display(), "batch started");
        let mut outcomes = Vec::with_capacity(total);
        let mut iter = snapshot.into_iter().enumerate();

        for (i, src) in iter.by_ref() {
            if (self.interrupted)() {
                warn!(remaining = total - i, "interrupted; leaving remaining files in place");
                outcomes.push((src, MoveOutcome::Skipped(SkipReason::Interrupted)));
                break;
            }

            let file_name = src
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| src.display().to_string());
            self.progress.report(&ProgressEvent { index: i + 1, total, file_name });

            let outcome = if fs::metadata(&src).map(|m| m.is_file()).unwrap_or(false) {
                move_one(&src, destination, &mut *self.policy)
            } else {
                warn!(src = %src.display(), "missing file");
                MoveOutcome::Failed(FailReason::MissingFile)
            };
            outcomes.push((src, outcome));
        }
        // only reached after an interrupt: the rest were never attempted
        outcomes.extend(iter.map(|(_, src)| (src, MoveOutcome::Skipped(SkipReason::Interrupted))));
        self.progress.finish();

        let report = BatchReport {
            destination: destination.to_path_buf(),
            outcomes,
        };
        if report.is_success() {
            info!(moved = report.moved(), dest = %destination.display(), "batch complete");
        } else {
            warn!(
                moved = report.moved(),
                problems = report.total() - report.moved(),
                dest = %destination.display(),
                "batch finished with problems"
            );
        }
        Ok(report)
    }

    fn preflight(&self, snapshot: &[PathBuf], destination: &Path) -> Result<(), BatchError> {
        if snapshot.is_empty() {
            return Err(BatchError::EmptyQueue);
        }
        if destination.as_os_str().is_empty() {
            return Err(BatchError::NoDestination);
        }
        ensure_destination(destination)?;
        check_with(snapshot, destination, &*self.free_space)?;
        Ok(())
    }
}

/// Destination must be an existing, writable directory.
fn ensure_destination(dest: &Path) -> Result<(), BatchError> {
    let invalid = |reason: String| BatchError::DestinationInvalid {
        path: dest.to_path_buf(),
        reason,
    };
    match fs::metadata(dest) {
        Ok(m) if m.is_dir() => {}
        Ok(_) => return Err(invalid("not a directory".into())),
        Err(e) => return Err(invalid(e.to_string())),
    }
    is_writable_probe(dest).map_err(|e| invalid(format!("not writable: {e}")))
}

/// Run a batch with the default interrupt check and free-space probe.
pub fn run(
    entries: &[PathBuf],
    destination: &Path,
    policy: &mut dyn CollisionPolicy,
    progress: &dyn ProgressSink,
) -> Result<BatchReport, BatchError> {
    BatchRunner::new(policy, progress).run(entries, destination)
}
