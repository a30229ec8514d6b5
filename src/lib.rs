//! Steplog - timestamped file logging with a step timer
//!
//! [`TimedLogger`] writes lines such as `14:03:27| INFO - sorted = 0.01234567`
//! to `logs/<name>.log` and measures elapsed time between phases of a run.
//! The [`util`] module carries a few JSON and filesystem helpers.
//!
//! ```no_run
//! use steplog::{LoggerOptions, TimedLogger};
//!
//! let mut log = TimedLogger::new(&LoggerOptions::named("sort.log"))?;
//! log.start_timer("Sorting")?;
//! // ... work ...
//! let secs = log.step_timer("sorted")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod log;
pub mod util;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use log::{Level, LineFormat, LogSink, LoggerOptions, TimedLogger, WriteMode};
pub use util::{change_directory, load_json_file, read_json, set_working_directory};
