//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Positional PATHS are queued in order; surrounding quotes are stripped.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{CollisionMode, Config, LogLevel};

/// Move files into a destination folder and verify each one by MD5.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "veri_move",
    author,
    version,
    about = "Move files and verify every move with an MD5 check"
)]
pub struct Args {
    /// Files or directories to move. Directories are expanded to the files they contain.
    #[arg(value_name = "PATHS", value_hint = ValueHint::AnyPath)]
    pub paths: Vec<String>,

    /// Destination directory (overrides config).
    #[arg(short = 't', long = "dest", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dest: Option<PathBuf>,

    /// Use the N-th most recent destination (1 = most recent).
    #[arg(short = 'r', long = "recent", value_name = "N", conflicts_with = "dest")]
    pub recent: Option<usize>,

    /// Print the remembered destinations, most recent first, then exit.
    #[arg(long)]
    pub list_recent: bool,

    /// What to do when a file with the same name already exists.
    #[arg(long, value_name = "MODE", help = "Collision policy: ask, overwrite, rename, skip")]
    pub on_collision: Option<CollisionMode>,

    /// Do not draw a progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where veri_move will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by veri_move and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    /// `--recent` is resolved later against the recent list.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dest) = &self.dest {
            cfg.destination = Some(dest.clone());
        }
        if let Some(mode) = self.on_collision {
            cfg.on_collision = mode;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.no_progress {
            cfg.progress = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(list: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("veri_move").chain(list.iter().copied())).unwrap()
    }

    #[test]
    fn debug_wins_over_log_level() {
        let a = args(&["-d", "--log-level", "quiet"]);
        assert_eq!(a.effective_log_level(), Some(LogLevel::Debug));
        assert_eq!(args(&["--log-level", "info"]).effective_log_level(), Some(LogLevel::Info));
        assert_eq!(args(&[]).effective_log_level(), None);
    }

    #[test]
    fn overrides_replace_config_values() {
        let a = args(&["-t", "/out", "--on-collision", "skip", "--no-progress", "a.txt", "b.txt"]);
        let mut cfg = Config::default();
        a.apply_overrides(&mut cfg);
        assert_eq!(cfg.destination.as_deref(), Some(Path::new("/out")));
        assert_eq!(cfg.on_collision, CollisionMode::Skip);
        assert!(!cfg.progress);
        assert_eq!(a.paths, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn unset_flags_keep_config() {
        let mut cfg = Config::default();
        cfg.destination = Some(PathBuf::from("/from/config"));
        args(&["x"]).apply_overrides(&mut cfg);
        assert_eq!(cfg.destination.as_deref(), Some(Path::new("/from/config")));
        assert_eq!(cfg.on_collision, CollisionMode::Ask);
        assert!(cfg.progress);
    }

    #[test]
    fn dest_and_recent_conflict() {
        let res = Args::try_parse_from(["veri_move", "-t", "/out", "-r", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn bad_collision_mode_is_rejected() {
        assert!(Args::try_parse_from(["veri_move", "--on-collision", "maybe"]).is_err());
    }
}
