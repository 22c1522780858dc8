//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel and CollisionMode parse from config/CLI strings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Per-file results and batch summary (default)
    #[default]
    Normal,
    /// Decisions and digests
    Info,
    /// Everything
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// How name collisions at the destination are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionMode {
    /// Prompt on the terminal for each collision.
    #[default]
    Ask,
    Overwrite,
    /// Rename automatically to a unique sibling name.
    Rename,
    Skip,
}

impl fmt::Display for CollisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollisionMode::Ask => "ask",
            CollisionMode::Overwrite => "overwrite",
            CollisionMode::Rename => "rename",
            CollisionMode::Skip => "skip",
        })
    }
}

impl FromStr for CollisionMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ask" | "prompt" => Ok(CollisionMode::Ask),
            "overwrite" | "replace" => Ok(CollisionMode::Overwrite),
            "rename" => Ok(CollisionMode::Rename),
            "skip" => Ok(CollisionMode::Skip),
            _ => Err(format!("invalid collision mode: '{s}' (expected ask, overwrite, rename or skip)")),
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Destination used when none is given on the command line
    pub destination: Option<PathBuf>,
    pub on_collision: CollisionMode,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Where the recent-destinations list is kept
    pub recent_file: Option<PathBuf>,
    /// Show a progress bar while moving
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination: None,
            on_collision: CollisionMode::Ask,
            log_level: LogLevel::Normal,
            log_file: None,
            recent_file: paths::default_recent_path(),
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_parse_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" verbose "), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn collision_mode_round_trips_through_display() {
        for m in [
            CollisionMode::Ask,
            CollisionMode::Overwrite,
            CollisionMode::Rename,
            CollisionMode::Skip,
        ] {
            assert_eq!(m.to_string().parse::<CollisionMode>(), Ok(m));
        }
        assert!("sometimes".parse::<CollisionMode>().is_err());
    }
}
