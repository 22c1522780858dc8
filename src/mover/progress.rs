//! Progress reporting.
//! The runner calls the sink once per file, right before the attempt. Sinks
//! are best-effort and must not block; the runner never waits on them.

/// One file about to be attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based position in the batch.
    pub index: usize,
    pub total: usize,
    pub file_name: String,
}

pub trait ProgressSink {
    fn report(&self, event: &ProgressEvent);

    /// Called once after the last file.
    fn finish(&self) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent),
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: &ProgressEvent) {}
}
