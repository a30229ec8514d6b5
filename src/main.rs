//! Steplog - timestamped logging and phase timing
//!
//! CLI entry point.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;

use steplog::cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let code = run(&cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
