//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;

use crate::log::LoggerOptions;

/// Default options writing `name` into `<dir>/logs`.
#[must_use]
pub fn temp_options(dir: &Path, name: &str) -> LoggerOptions {
    LoggerOptions {
        log_dir: dir.join("logs"),
        ..LoggerOptions::named(name)
    }
}

/// Read a log file into lines.
#[must_use]
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// In-memory writer that can be inspected after being handed to a logger.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    /// Everything written so far, as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
