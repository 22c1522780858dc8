//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! picks the destination, builds the queue and runs one verified batch.

use anyhow::{Result, anyhow, bail};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use veri_move::cli::Args;
use veri_move::config::{CONFIG_ENV, Config, LoadResult, default_config_path, load_or_init};
use veri_move::mover::{BatchRunner, CollisionPolicy, FixedPolicy, NoProgress, ProgressSink};
use veri_move::output::{self as out, BarProgress};
use veri_move::prompt::PromptPolicy;
use veri_move::recent::RecentDestinations;
use veri_move::{CollisionMode, Queue, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before anything touches the filesystem
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    let mut cfg = match load_or_init()? {
        LoadResult::Loaded { config, .. } => config,
        LoadResult::CreatedTemplate(path) => {
            out::print_info(&format!("A template veri_move config was written to: {}", path.display()));
            out::print_info("Set <destination> there to skip --dest on future runs.");
            Config::default()
        }
        LoadResult::Defaults => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // The batch still logs after Ctrl-C, so the guard lives until it returns.
    ctrlc::set_handler(on_interrupt).map_err(|e| anyhow!("failed to install signal handler: {e}"))?;

    debug!("Starting veri_move: {:?}", args);
    let result = run_batch(&args, &cfg);
    drop(guard_opt);
    result
}

/// Ctrl-C: ask the batch to stop after the file in flight.
fn on_interrupt() {
    shutdown::request();
    out::print_warn("Received interrupt; finishing the current file, then stopping...");
}

fn print_config_location() {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            PathBuf::from(explicit).display()
        ));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default veri_move config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run once without --print-config to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}

fn run_batch(args: &Args, cfg: &Config) -> Result<()> {
    let recent_path = cfg.recent_file.as_deref();
    let mut recent = recent_path.map(RecentDestinations::load).unwrap_or_default();

    if args.list_recent {
        if recent.is_empty() {
            out::print_info("No recent destinations.");
        }
        for (i, dest) in recent.entries().iter().enumerate() {
            out::print_user(&format!("{}: {}", i + 1, dest.display()));
        }
        return Ok(());
    }

    let destination = pick_destination(args, cfg, &recent)?;
    let queue = Queue::from_args(&args.paths);
    debug!(queued = queue.len(), "queue built");

    let bar = (cfg.progress && !queue.is_empty()).then(|| BarProgress::new(queue.len()));
    let mut policy: Box<dyn CollisionPolicy> = match cfg.on_collision {
        CollisionMode::Ask => {
            let prompt = PromptPolicy::new();
            Box::new(match &bar {
                Some(b) => prompt.with_progress(b.bar()),
                None => prompt,
            })
        }
        CollisionMode::Overwrite => Box::new(FixedPolicy::Overwrite),
        CollisionMode::Rename => Box::new(FixedPolicy::RenameUnique),
        CollisionMode::Skip => Box::new(FixedPolicy::Skip),
    };
    let progress: &dyn ProgressSink = match &bar {
        Some(b) => b,
        None => &NoProgress,
    };

    let report = match BatchRunner::new(policy.as_mut(), progress).run(&queue.snapshot(), &destination) {
        Ok(report) => report,
        Err(e) => {
            error!(code = e.code(), kind = e.kind(), "batch not started");
            bail!(e);
        }
    };

    out::print_report(&report);
    if !report.is_success() {
        bail!(
            "{} of {} file(s) were not moved",
            report.total() - report.moved(),
            report.total()
        );
    }

    if let Some(path) = recent_path {
        recent.record(destination);
        if let Err(e) = recent.save(path) {
            warn!(error = %format!("{e:#}"), "could not save recent destinations");
        }
    }
    Ok(())
}

/// `--dest`, then `--recent N`, then the config's destination. An empty
/// path means none was chosen; the batch runner reports that.
fn pick_destination(args: &Args, cfg: &Config, recent: &RecentDestinations) -> Result<PathBuf> {
    if let Some(n) = args.recent {
        let Some(dest) = recent.nth(n) else {
            bail!("no recent destination #{n} ({} remembered)", recent.entries().len());
        };
        return Ok(absolute(dest));
    }
    Ok(cfg.destination.as_deref().map(absolute).unwrap_or_default())
}

fn absolute(p: &Path) -> PathBuf {
    std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
}
