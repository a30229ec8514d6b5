//! File-backed line sink
//!
//! The sink is opened once and owned by a single logger. Every line is
//! flushed as soon as it is written.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// How an existing log file is treated when the sink is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate the file
    #[default]
    Overwrite,
    /// Keep previous contents and add lines at the end
    Append,
}

impl WriteMode {
    /// Map the `append_mode` option to a mode
    #[must_use]
    pub const fn from_append(append: bool) -> Self {
        if append {
            Self::Append
        } else {
            Self::Overwrite
        }
    }
}

/// Line-oriented destination backed by a file
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    /// Open the sink, creating the parent directory if it is missing
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot
    /// be opened for writing
    pub fn open<P: AsRef<Path>>(path: P, mode: WriteMode) -> Result<Self> {
        let path = path.as_ref();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        let file = options
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Write one line and flush it to disk
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.file, "{line}")
            .and_then(|()| self.file.flush())
            .with_context(|| format!("Failed to write to log file: {}", self.path.display()))
    }

    /// Path of the underlying file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
