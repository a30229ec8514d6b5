//! Command-line interface
//!
//! Argument definitions for the `steplog` binary and the code that runs each
//! command against a [`TimedLogger`](crate::log::TimedLogger).

pub mod display;
pub mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::log::LoggerOptions;

pub use display::{format_elapsed, report_log_path, report_timing};
pub use run::run;

/// Timestamped logging and phase timing from the shell
///
/// Writes lines to `logs/<name>.log`, times child commands and pretty prints
/// JSON files.
#[derive(Parser, Debug)]
#[command(name = "steplog", version, about)]
pub struct Cli {
    /// Logger options shared by every command
    #[command(flatten)]
    pub logger: LoggerArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Flags mapping onto [`LoggerOptions`]
#[derive(Args, Debug, Default, Clone)]
pub struct LoggerArgs {
    /// TOML options file, applied before the flags below
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file name (default: MMDD-HHMMSS.log)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Message template using {message}, {level} and {time}
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Show level names on each line
    #[arg(long, global = true)]
    pub levels: bool,

    /// Leave out the HH:MM:SS prefix
    #[arg(long, global = true)]
    pub no_time: bool,

    /// Append to the log file instead of overwriting it
    #[arg(long, global = true)]
    pub append: bool,

    /// Echo log lines to stdout
    #[arg(long, global = true)]
    pub terminal: bool,

    /// Directory for log files
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

impl LoggerArgs {
    /// Build logger options: config file first, then flags on top
    pub fn resolve(&self) -> Result<LoggerOptions> {
        let mut options = match &self.config {
            Some(path) => LoggerOptions::from_path(path)?,
            None => LoggerOptions::default(),
        };

        if let Some(file) = &self.file {
            options.filename.clone_from(file);
        }
        if let Some(format) = &self.format {
            options.line_format.clone_from(format);
        }
        if let Some(dir) = &self.log_dir {
            options.log_dir.clone_from(dir);
        }
        options.show_levels |= self.levels;
        options.include_time &= !self.no_time;
        options.append_mode |= self.append;
        options.show_terminal |= self.terminal;

        Ok(options)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write an INFO line
    Write {
        /// Words of the message, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Write a WARNING line
    Warn {
        /// Words of the message, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Write an ERROR line
    Error {
        /// Words of the message, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Write a blank line
    Blank,
    /// Run a command and log how long it took
    Time {
        /// Label for the timer line (default: the program name)
        #[arg(long)]
        label: Option<String>,
        /// Program and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Pretty print a JSON file (a missing file prints `{}`)
    Json {
        /// Title line printed before the JSON
        #[arg(long, default_value = "")]
        title: String,
        /// Indent width
        #[arg(long, default_value_t = 2)]
        indent: usize,
        /// Path of the JSON file
        path: PathBuf,
    },
}
