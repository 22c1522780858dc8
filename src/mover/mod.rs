//! Verified-move engine: digest, space preflight, collision resolution,
//! single-file verified move and the sequential batch runner.

mod batch;
pub mod collision;
mod copy;
pub mod digest;
mod helpers;
mod meta;
mod outcome;
mod progress;
mod rename;
pub mod space;
mod verified;

pub use batch::{BatchReport, BatchRunner, run};
pub use collision::{CollisionDecision, CollisionPolicy, FixedPolicy, Resolution, resolve};
pub use digest::{ContentHash, digest};
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use outcome::{FailReason, MoveOutcome, SkipReason};
pub use progress::{NoProgress, ProgressEvent, ProgressSink};
pub use rename::move_path;
pub use space::{SpaceCheck, check_with, format_size};
pub use verified::{move_one, move_one_with};
