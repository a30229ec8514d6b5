//! Logger construction options
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! filename = "sort.log"
//! show_levels = true
//! include_time = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use super::sink::WriteMode;

/// Directory the log files are placed in unless configured otherwise
pub const DEFAULT_LOG_DIR: &str = "logs";

/// `strftime` pattern for generated file names: `MMDD-HHMMSS`
pub const GENERATED_NAME_FORMAT: &str = "%m%d-%H%M%S";

/// Options for [`TimedLogger`](super::TimedLogger)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggerOptions {
    /// File name inside `log_dir`. Empty means a name generated from the
    /// construction time.
    #[serde(default)]
    pub filename: String,
    /// Template for the message segment (`{message}`, `{level}`, `{time}`).
    /// Empty means the bare message.
    #[serde(default)]
    pub line_format: String,
    /// Add a `LEVEL - ` segment before the message
    #[serde(default)]
    pub show_levels: bool,
    /// Add a `HH:MM:SS| ` segment at the start of each line
    #[serde(default = "default_include_time")]
    pub include_time: bool,
    /// Append to an existing file instead of truncating it
    #[serde(default)]
    pub append_mode: bool,
    /// Echo every line to standard output
    #[serde(default)]
    pub show_terminal: bool,
    /// Directory holding the log file, created on construction
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

const fn default_include_time() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            filename: String::new(),
            line_format: String::new(),
            show_levels: false,
            include_time: default_include_time(),
            append_mode: false,
            show_terminal: false,
            log_dir: default_log_dir(),
        }
    }
}

impl LoggerOptions {
    /// Default options writing to `name` inside the default log directory
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            filename: name.to_string(),
            ..Self::default()
        }
    }

    /// Parse an options file from a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse options from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse logger options")
    }

    /// Mode the sink is opened with
    #[must_use]
    pub const fn write_mode(&self) -> WriteMode {
        WriteMode::from_append(self.append_mode)
    }

    /// File name to use, generating one from `now` when none was given
    #[must_use]
    pub fn resolve_filename<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if self.filename.is_empty() {
            format!("{}.log", now.format(GENERATED_NAME_FORMAT))
        } else {
            self.filename.clone()
        }
    }

    /// Full path of the log file for a logger constructed at `now`
    #[must_use]
    pub fn log_path<Tz>(&self, now: &DateTime<Tz>) -> PathBuf
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.log_dir.join(self.resolve_filename(now))
    }
}
