//! Timed file logging
//!
//! This module provides [`TimedLogger`], a line logger writing to
//! `logs/<name>.log` with a built-in step timer, together with the pieces it
//! is composed of: line formatting, the file sink, options and clocks.

pub mod clock;
pub mod format;
pub mod options;
pub mod sink;
pub mod timed;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use format::{Level, LineFormat, MessageTemplate, Segment};
pub use options::LoggerOptions;
pub use sink::{LogSink, WriteMode};
pub use timed::TimedLogger;
