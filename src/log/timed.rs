//! Timed line logger
//!
//! [`TimedLogger`] writes formatted lines to a file under `logs/` and keeps a
//! monotonic start point so phases of a run can be measured with
//! [`start_timer`](TimedLogger::start_timer) and
//! [`step_timer`](TimedLogger::step_timer).

use anyhow::{Context, Result};
use chrono::Local;
use std::io::{self, Write as IoWrite};
use std::path::Path;
use std::time::{Duration, Instant};

use super::clock::{Clock, MonotonicClock};
use super::format::{Level, LineFormat};
use super::options::LoggerOptions;
use super::sink::{LogSink, WriteMode};

/// Logger with an elapsed-time counter
///
/// The timer starts when the logger is constructed. Only
/// [`start_timer`](Self::start_timer) resets it.
pub struct TimedLogger<C: Clock = MonotonicClock> {
    sink: LogSink,
    format: LineFormat,
    write_mode: WriteMode,
    echo: Option<Box<dyn IoWrite>>,
    clock: C,
    start_instant: Instant,
}

impl TimedLogger {
    /// Create a logger using the process monotonic clock
    ///
    /// Creates the log directory if needed and opens the log file, truncating
    /// it unless `append_mode` is set.
    ///
    /// # Errors
    /// Returns an error if the log directory or file cannot be created
    pub fn new(options: &LoggerOptions) -> Result<Self> {
        Self::with_clock(options, MonotonicClock)
    }
}

impl<C: Clock> TimedLogger<C> {
    /// Create a logger reading elapsed time from `clock`
    pub fn with_clock(options: &LoggerOptions, clock: C) -> Result<Self> {
        let path = options.log_path(&Local::now());
        let write_mode = options.write_mode();
        let sink = LogSink::open(&path, write_mode)?;

        let echo = options
            .show_terminal
            .then(|| Box::new(io::stdout()) as Box<dyn IoWrite>);

        let start_instant = clock.now();

        Ok(Self {
            sink,
            format: LineFormat::new(
                &options.line_format,
                options.show_levels,
                options.include_time,
            ),
            write_mode,
            echo,
            clock,
            start_instant,
        })
    }

    /// Send every line to `writer` as well, replacing any previous echo target
    #[must_use]
    pub fn with_echo<W: IoWrite + 'static>(mut self, writer: W) -> Self {
        self.echo = Some(Box::new(writer));
        self
    }

    /// Restart the timer, writing `message` first if it is not empty
    pub fn start_timer(&mut self, message: &str) -> Result<()> {
        if !message.is_empty() {
            self.write(message)?;
        }
        self.start_instant = self.clock.now();
        Ok(())
    }

    /// Write and return the seconds elapsed since the last restart
    ///
    /// The line is `{t:.8}` or `{message} = {t:.8}`. The timer keeps running.
    pub fn step_timer(&mut self, message: &str) -> Result<f64> {
        self.report_elapsed(message)
    }

    /// Same as [`step_timer`](Self::step_timer). The start point is left
    /// untouched; call [`start_timer`](Self::start_timer) to restart.
    pub fn stop_timer(&mut self, message: &str) -> Result<f64> {
        self.report_elapsed(message)
    }

    /// Raw reading of the logger's clock, for callers timing their own intervals
    #[must_use]
    pub fn get_time(&self) -> Instant {
        self.clock.now()
    }

    /// Time since the last restart, without writing anything
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start_instant)
    }

    /// Write an INFO line
    pub fn write(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Info, message)
    }

    /// Write an INFO line holding a single space
    pub fn write_blank_line(&mut self) -> Result<()> {
        self.emit(Level::Info, " ")
    }

    /// Write a WARNING line, prefixing the message with `WARNING: `
    pub fn write_warning(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Warning, &format!("WARNING: {message}"))
    }

    /// Write an ERROR line, prefixing the message with `ERROR: `
    pub fn write_error(&mut self, message: &str) -> Result<()> {
        self.emit(Level::Error, &format!("ERROR: {message}"))
    }

    /// Path of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        self.sink.path()
    }

    /// Whether the file was truncated or appended to on open
    #[must_use]
    pub const fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    fn report_elapsed(&mut self, message: &str) -> Result<f64> {
        let t = self.elapsed().as_secs_f64();
        let text = if message.is_empty() {
            format!("{t:.8}")
        } else {
            format!("{message} = {t:.8}")
        };
        self.write(&text)?;
        Ok(t)
    }

    fn emit(&mut self, level: Level, message: &str) -> Result<()> {
        let line = self.format.render(level, message, Local::now().time());
        self.sink.write_line(&line)?;

        if let Some(echo) = self.echo.as_mut() {
            writeln!(echo, "{line}")
                .and_then(|()| echo.flush())
                .context("Failed to echo log line to terminal")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::clock::ManualClock;
    use crate::testutil::{read_lines, temp_options, SharedBuffer};
    use chrono::NaiveTime;
    use tempfile::TempDir;

    fn assert_time_prefix(line: &str) {
        let (time, _) = line.split_once("| ").expect("missing time segment");
        assert!(
            NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok(),
            "invalid time prefix in {line:?}"
        );
        assert_eq!(time.len(), 8);
    }

    #[test]
    fn test_new_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let options = temp_options(temp_dir.path(), "run.log");

        let logger = TimedLogger::new(&options).unwrap();

        assert!(temp_dir.path().join("logs").is_dir());
        assert_eq!(logger.path(), temp_dir.path().join("logs").join("run.log"));
        assert!(logger.path().exists());
        assert_eq!(logger.write_mode(), WriteMode::Overwrite);
    }

    #[test]
    fn test_new_generates_name_when_empty() {
        let temp_dir = TempDir::new().unwrap();
        let options = temp_options(temp_dir.path(), "");

        let logger = TimedLogger::new(&options).unwrap();

        let name = logger.path().file_name().unwrap().to_str().unwrap();
        let stem = name.strip_suffix(".log").expect("missing .log extension");
        let (date, time) = stem.split_once('-').expect("missing separator");
        assert_eq!(date.len(), 4);
        assert_eq!(time.len(), 6);
        assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_write_default_format_has_time_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = TimedLogger::new(&temp_options(temp_dir.path(), "t.log")).unwrap();

        logger.write("hello").unwrap();

        let lines = read_lines(logger.path());
        assert_eq!(lines.len(), 1);
        assert_time_prefix(&lines[0]);
        assert!(lines[0].ends_with("| hello"));
    }

    #[test]
    fn test_warning_and_error_prefixes() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            show_levels: true,
            include_time: false,
            ..temp_options(temp_dir.path(), "levels.log")
        };
        let mut logger = TimedLogger::new(&options).unwrap();

        logger.write("ok").unwrap();
        logger.write_warning("disk full").unwrap();
        logger.write_error("out of memory").unwrap();

        assert_eq!(
            read_lines(logger.path()),
            vec![
                "INFO - ok",
                "WARNING - WARNING: disk full",
                "ERROR - ERROR: out of memory",
            ]
        );
    }

    #[test]
    fn test_warning_prefix_without_levels() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            include_time: false,
            ..temp_options(temp_dir.path(), "plain.log")
        };
        let mut logger = TimedLogger::new(&options).unwrap();

        logger.write_warning("careful").unwrap();

        assert_eq!(read_lines(logger.path()), vec!["WARNING: careful"]);
    }

    #[test]
    fn test_blank_line_is_single_space() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            include_time: false,
            ..temp_options(temp_dir.path(), "blank.log")
        };
        let mut logger = TimedLogger::new(&options).unwrap();

        logger.write_blank_line().unwrap();

        let content = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(content, " \n");
    }

    #[test]
    fn test_step_timer_formats_eight_decimals() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            include_time: false,
            ..temp_options(temp_dir.path(), "timer.log")
        };
        let clock = ManualClock::new();
        let mut logger = TimedLogger::with_clock(&options, &clock).unwrap();

        clock.advance(Duration::from_millis(1500));
        let t = logger.step_timer("phase1").unwrap();
        let bare = logger.step_timer("").unwrap();

        assert!((t - 1.5).abs() < f64::EPSILON);
        assert!((bare - 1.5).abs() < f64::EPSILON);
        assert_eq!(
            read_lines(logger.path()),
            vec!["phase1 = 1.50000000", "1.50000000"]
        );
    }

    #[test]
    fn test_step_timer_does_not_reset() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let mut logger =
            TimedLogger::with_clock(&temp_options(temp_dir.path(), "t.log"), &clock).unwrap();

        clock.advance(Duration::from_secs(1));
        let first = logger.step_timer("").unwrap();
        clock.advance(Duration::from_secs(2));
        let second = logger.step_timer("").unwrap();

        assert!((first - 1.0).abs() < f64::EPSILON);
        assert!((second - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stop_timer_does_not_reset() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let mut logger =
            TimedLogger::with_clock(&temp_options(temp_dir.path(), "t.log"), &clock).unwrap();

        clock.advance(Duration::from_secs(4));
        let stopped = logger.stop_timer("done").unwrap();
        clock.advance(Duration::from_secs(1));
        let after = logger.step_timer("").unwrap();

        assert!((stopped - 4.0).abs() < f64::EPSILON);
        assert!((after - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_start_timer_resets_and_writes_message() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            include_time: false,
            ..temp_options(temp_dir.path(), "reset.log")
        };
        let clock = ManualClock::new();
        let mut logger = TimedLogger::with_clock(&options, &clock).unwrap();

        clock.advance(Duration::from_secs(10));
        logger.start_timer("begin").unwrap();
        logger.start_timer("").unwrap();
        clock.advance(Duration::from_millis(20));
        let t = logger.step_timer("phase").unwrap();

        assert!((t - 0.02).abs() < 1e-9);
        assert_eq!(read_lines(logger.path()), vec!["begin", "phase = 0.02000000"]);
    }

    #[test]
    fn test_elapsed_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let logger =
            TimedLogger::with_clock(&temp_options(temp_dir.path(), "t.log"), &clock).unwrap();

        clock.advance(Duration::from_secs(3));

        assert_eq!(logger.elapsed(), Duration::from_secs(3));
        assert!(read_lines(logger.path()).is_empty());
    }

    #[test]
    fn test_get_time_reads_clock() {
        let temp_dir = TempDir::new().unwrap();
        let clock = ManualClock::new();
        let logger =
            TimedLogger::with_clock(&temp_options(temp_dir.path(), "t.log"), &clock).unwrap();

        let before = logger.get_time();
        clock.advance(Duration::from_millis(5));
        assert_eq!(logger.get_time() - before, Duration::from_millis(5));
    }

    #[test]
    fn test_echo_receives_same_lines() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            show_levels: true,
            ..temp_options(temp_dir.path(), "echo.log")
        };
        let buffer = SharedBuffer::default();
        let mut logger = TimedLogger::new(&options)
            .unwrap()
            .with_echo(buffer.clone());

        logger.write("one").unwrap();
        logger.write_error("two").unwrap();

        let echoed: Vec<String> = buffer.contents().lines().map(str::to_string).collect();
        assert_eq!(echoed, read_lines(logger.path()));
        assert_eq!(echoed.len(), 2);
    }

    #[test]
    fn test_show_terminal_writes_to_file_too() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            show_terminal: true,
            ..temp_options(temp_dir.path(), "terminal.log")
        };
        let mut logger = TimedLogger::new(&options).unwrap();

        logger.write("visible").unwrap();

        assert_eq!(read_lines(logger.path()).len(), 1);
    }

    #[test]
    fn test_line_format_template_applies_to_timer_lines() {
        let temp_dir = TempDir::new().unwrap();
        let options = LoggerOptions {
            include_time: false,
            line_format: "[{level}] {message}".to_string(),
            ..temp_options(temp_dir.path(), "tpl.log")
        };
        let clock = ManualClock::new();
        let mut logger = TimedLogger::with_clock(&options, &clock).unwrap();

        clock.advance(Duration::from_millis(125));
        logger.step_timer("load").unwrap();

        assert_eq!(read_lines(logger.path()), vec!["[INFO] load = 0.12500000"]);
    }
}
