//! Terminal reporting for the CLI
//!
//! All output goes to stderr so stdout stays free for echoed log lines and
//! JSON.

use std::path::Path;

use colored::Colorize;

/// Tell the user where the log file is
pub fn report_log_path(path: &Path) {
    eprintln!("{} {}", "Log:".dimmed(), path.display());
}

/// Summarize a timed command
pub fn report_timing(label: &str, elapsed_secs: f64, success: bool) {
    let status = if success {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    eprintln!(
        "  {} {} {}",
        status,
        label.bold(),
        format_elapsed(elapsed_secs).dimmed()
    );
}

/// Render seconds as `12.345s` or `3m 05.250s`
#[must_use]
pub fn format_elapsed(elapsed_secs: f64) -> String {
    let elapsed_secs = elapsed_secs.max(0.0);
    if elapsed_secs < 60.0 {
        return format!("{elapsed_secs:.3}s");
    }
    let mins = (elapsed_secs / 60.0).floor();
    let secs = elapsed_secs - mins * 60.0;
    format!("{mins:.0}m {secs:06.3}s")
}
