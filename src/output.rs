//! User-facing output: colored status lines, the batch report and the
//! progress bar. Colors are enabled only when stdout is a TTY.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use crate::mover::{BatchReport, ProgressEvent, ProgressSink};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain line (no prefix) that scripts may parse.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Plain-text rendering of a batch report.
pub fn render_report(report: &BatchReport) -> String {
    let dest = report.destination.display();
    if report.is_success() {
        return format!(
            "All {} file(s) moved and passed MD5 checks.\nDestination: {}",
            report.moved(),
            dest
        );
    }
    let mut out = format!(
        "Some files could not be moved or had errors ({} of {} moved):\nDestination: {}\n",
        report.moved(),
        report.total(),
        dest
    );
    for line in report.failures() {
        out.push_str("\n  ");
        out.push_str(&line);
    }
    out
}

/// Print the aggregate report: success on stdout, problems on stderr.
pub fn print_report(report: &BatchReport) {
    let text = render_report(report);
    if report.is_success() {
        print_success(&text);
    } else {
        print_error(&text);
    }
}

/// Progress bar sink drawn on stderr.
#[derive(Clone)]
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }

    /// Handle for suspending the bar around prompts.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl ProgressSink for BarProgress {
    fn report(&self, event: &ProgressEvent) {
        self.bar.set_position(event.index.saturating_sub(1) as u64);
        self.bar.set_message(format!("Moving: {}", event.file_name));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
