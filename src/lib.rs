//! Core library for `veri_move`.
//!
//! Moves files into a destination folder one at a time and proves each move
//! by comparing MD5 digests taken before and after. The library exposes the
//! queue, the verified-move engine, config loading and the small pieces the
//! binary wires together (prompt, output, recent destinations).

pub mod cli;
pub mod config;
pub mod errors;
pub mod mover;
pub mod output;
pub mod platform;
pub mod prompt;
pub mod queue;
pub mod recent;
pub mod shutdown;
mod utils;

pub use config::{CollisionMode, Config, LogLevel};
pub use errors::BatchError;
pub use mover::{
    BatchReport, BatchRunner, CollisionDecision, CollisionPolicy, FailReason, FixedPolicy, MoveOutcome,
    ProgressEvent, ProgressSink, SkipReason, digest, move_one, move_one_with,
};
pub use queue::Queue;
pub use recent::RecentDestinations;
pub use utils::strip_quotes;
