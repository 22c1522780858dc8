//! Interactive collision prompt.
//! Asks overwrite-or-rename; on rename, asks for a new name pre-filled with
//! the original. An empty name, or a terminal that cannot be prompted, skips
//! the file.

use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;

use crate::mover::{CollisionDecision, CollisionPolicy};

#[derive(Default, Clone)]
pub struct PromptPolicy {
    bar: Option<ProgressBar>,
}

impl PromptPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide `bar` while a prompt is on screen.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.bar = Some(bar);
        self
    }

    fn ask(existing: &Path, proposed_name: &OsStr) -> dialoguer::Result<CollisionDecision> {
        let overwrite = Confirm::new()
            .with_prompt(format!(
                "{} already exists in the destination. Overwrite it? (no = rename)",
                existing.display()
            ))
            .default(false)
            .interact()?;
        if overwrite {
            return Ok(CollisionDecision::Overwrite);
        }
        let name: String = Input::new()
            .with_prompt("New filename (no path, empty to skip)")
            .with_initial_text(proposed_name.to_string_lossy())
            .allow_empty(true)
            .interact_text()?;
        Ok(decision_from_answers(false, Some(name)))
    }
}

/// Map raw prompt answers to a decision.
pub fn decision_from_answers(overwrite: bool, new_name: Option<String>) -> CollisionDecision {
    if overwrite {
        return CollisionDecision::Overwrite;
    }
    match new_name.map(|n| n.trim().to_string()) {
        Some(n) if !n.is_empty() => CollisionDecision::RenameTo(n.into()),
        _ => CollisionDecision::Skip,
    }
}

impl CollisionPolicy for PromptPolicy {
    fn decide(&mut self, existing: &Path, proposed_name: &OsStr) -> CollisionDecision {
        let answer = match &self.bar {
            Some(bar) => bar.suspend(|| Self::ask(existing, proposed_name)),
            None => Self::ask(existing, proposed_name),
        };
        answer.unwrap_or_else(|e| {
            warn!(path = %existing.display(), error = %e, "cannot prompt; skipping file");
            CollisionDecision::Skip
        })
    }
}
