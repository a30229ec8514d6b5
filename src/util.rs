//! Filesystem and JSON helpers
//!
//! Small conveniences for programs that log their runs: loading a JSON
//! settings file, moving to the program's own directory and dumping
//! mappings in a readable form.

use std::io::{self, Write as IoWrite};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Escape sequence that resets most terminals
pub const CLEAR_SEQUENCE: &str = "\x1bc";

/// Load a JSON object from `path`
///
/// A missing file yields an empty map.
///
/// # Errors
/// Returns an error if the file exists but cannot be read, is not valid JSON,
/// or holds something other than an object at the top level
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Map::new());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file: {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "Expected a JSON object in {}, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
}

/// Alias of [`read_json`]
pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<Map<String, Value>> {
    read_json(path)
}

/// Change the process working directory
pub fn change_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    std::env::set_current_dir(path)
        .with_context(|| format!("Failed to change directory to {}", path.display()))
}

/// Change the working directory to the folder containing `file_path`
///
/// Typically called with the path of the running program's source or binary
/// so relative paths such as `logs/` resolve next to it.
pub fn set_working_directory<P: AsRef<Path>>(file_path: P) -> Result<()> {
    let file_path = file_path.as_ref();
    let resolved = std::fs::canonicalize(file_path)
        .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
    let dir = resolved
        .parent()
        .with_context(|| format!("{} has no parent directory", resolved.display()))?;
    change_directory(dir)
}

/// Render `value` as indented JSON, preceded by `Dictionary: {title}` when a
/// title is given
pub fn format_json<T: Serialize + ?Sized>(
    value: &T,
    title: &str,
    indent: usize,
) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize value to JSON")?;
    let json = String::from_utf8(buf).context("Serialized JSON is not valid UTF-8")?;

    if title.is_empty() {
        Ok(json)
    } else {
        Ok(format!("Dictionary: {title}\n{json}"))
    }
}

/// Print [`format_json`] output to stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T, title: &str, indent: usize) -> Result<()> {
    println!("{}", format_json(value, title, indent)?);
    Ok(())
}

/// Reset the terminal
pub fn clear_output() -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{CLEAR_SEQUENCE}")
        .and_then(|()| stdout.flush())
        .context("Failed to clear terminal")
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
