//! Command execution

use std::path::Path;
use std::process::Command as ProcessCommand;

use anyhow::{Context, Result};

use super::display::{report_log_path, report_timing};
use super::{Cli, Command};
use crate::log::{LoggerOptions, TimedLogger};
use crate::util::{print_json, read_json};

/// Run a parsed command line, returning the process exit code
pub fn run(cli: &Cli) -> Result<i32> {
    if let Command::Json {
        title,
        indent,
        path,
    } = &cli.command
    {
        return show_json(path, title, *indent);
    }

    let options = cli.logger.resolve()?;
    let mut logger = open_logger(&options)?;
    report_log_path(logger.path());

    execute(&mut logger, &cli.command)
}

/// Open the logger described by `options`
pub fn open_logger(options: &LoggerOptions) -> Result<TimedLogger> {
    TimedLogger::new(options).context("Failed to initialize logger")
}

/// Run a logging command against an open logger
pub fn execute(logger: &mut TimedLogger, command: &Command) -> Result<i32> {
    match command {
        Command::Write { message } => logger.write(&message.join(" "))?,
        Command::Warn { message } => logger.write_warning(&message.join(" "))?,
        Command::Error { message } => logger.write_error(&message.join(" "))?,
        Command::Blank => logger.write_blank_line()?,
        Command::Time { label, command } => {
            return time_command(logger, label.as_deref(), command);
        }
        Command::Json {
            title,
            indent,
            path,
        } => return show_json(path, title, *indent),
    }
    Ok(0)
}

/// Print a JSON file; no log file is involved
fn show_json(path: &Path, title: &str, indent: usize) -> Result<i32> {
    let map = read_json(path)?;
    print_json(&map, title, indent)?;
    Ok(0)
}

/// Run `argv` to completion between `start_timer` and `stop_timer`
fn time_command(logger: &mut TimedLogger, label: Option<&str>, argv: &[String]) -> Result<i32> {
    let (program, args) = argv.split_first().context("No command given to time")?;
    let label = label.unwrap_or(program.as_str());

    logger.start_timer(&format!("Running {}", argv.join(" ")))?;

    let status = ProcessCommand::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run '{program}'"));

    let status = match status {
        Ok(status) => status,
        Err(err) => {
            logger.write_error(&format!("{err:#}"))?;
            return Err(err);
        }
    };

    let elapsed = logger.stop_timer(label)?;
    if !status.success() {
        logger.write_error(&format!("{label} exited with {status}"))?;
    }
    report_timing(label, elapsed, status.success());

    Ok(status.code().unwrap_or(1))
}
