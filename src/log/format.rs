//! Line composition for log entries
//!
//! A line is built from up to three segments in fixed order:
//!
//! ```text
//! [HH:MM:SS| ][LEVELNAME - ]<message>
//! ```
//!
//! The segment list is decided once, when the logger is constructed.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Format used for the timestamp segment and the `{time}` placeholder
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Regular output, timer results and blank lines
    Info,
    /// Something looks off but the run continues
    Warning,
    /// Something failed
    Error,
}

impl Level {
    /// Name written in the level segment
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One optional component of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// `HH:MM:SS| `
    Timestamp,
    /// `LEVELNAME - `
    Level,
    /// The message, rendered through the [`MessageTemplate`]
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplatePart {
    Literal(String),
    Message,
    Level,
    Time,
}

/// Template for the message segment
///
/// Recognized placeholders are `{message}`, `{level}` and `{time}`; `{{` and
/// `}}` produce literal braces. Anything else, including unknown placeholders
/// and unbalanced braces, is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    parts: Vec<TemplatePart>,
}

impl MessageTemplate {
    /// Parse a template string. An empty string means the bare message.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        if source.is_empty() {
            return Self::default();
        }

        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(idx) = rest.find(['{', '}']) {
            literal.push_str(&rest[..idx]);
            let tail = &rest[idx..];

            if let Some(after) = tail.strip_prefix("{{") {
                literal.push('{');
                rest = after;
                continue;
            }
            if let Some(after) = tail.strip_prefix("}}") {
                literal.push('}');
                rest = after;
                continue;
            }
            if let Some(part) = placeholder_at(tail) {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let end = tail.find('}').map_or(tail.len(), |e| e + 1);
                parts.push(part);
                rest = &tail[end..];
                continue;
            }

            literal.push_str(&tail[..1]);
            rest = &tail[1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Self { parts }
    }

    /// Apply the template to a message
    #[must_use]
    pub fn apply(&self, level: Level, message: &str, time: &str) -> String {
        let mut out = String::with_capacity(message.len());
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Message => out.push_str(message),
                TemplatePart::Level => out.push_str(level.as_str()),
                TemplatePart::Time => out.push_str(time),
            }
        }
        out
    }

    /// True if this template renders the message unchanged
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.parts == [TemplatePart::Message]
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            parts: vec![TemplatePart::Message],
        }
    }
}

/// Recognize a known `{name}` placeholder at the start of `tail`
fn placeholder_at(tail: &str) -> Option<TemplatePart> {
    let body = tail.strip_prefix('{')?;
    let end = body.find('}')?;
    match &body[..end] {
        "message" => Some(TemplatePart::Message),
        "level" => Some(TemplatePart::Level),
        "time" => Some(TemplatePart::Time),
        _ => None,
    }
}

/// Ordered set of enabled segments plus the message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    segments: Vec<Segment>,
    template: MessageTemplate,
}

impl LineFormat {
    /// Build the segment list from the logger options
    #[must_use]
    pub fn new(template: &str, show_levels: bool, include_time: bool) -> Self {
        let mut segments = Vec::with_capacity(3);
        if include_time {
            segments.push(Segment::Timestamp);
        }
        if show_levels {
            segments.push(Segment::Level);
        }
        segments.push(Segment::Message);

        Self {
            segments,
            template: MessageTemplate::parse(template),
        }
    }

    /// Enabled segments, in render order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render one line (without the trailing newline)
    #[must_use]
    pub fn render(&self, level: Level, message: &str, now: NaiveTime) -> String {
        let time = now.format(TIME_FORMAT).to_string();
        let mut line = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Timestamp => {
                    line.push_str(&time);
                    line.push_str("| ");
                }
                Segment::Level => {
                    line.push_str(level.as_str());
                    line.push_str(" - ");
                }
                Segment::Message => {
                    line.push_str(&self.template.apply(level, message, &time));
                }
            }
        }

        line
    }
}

impl Default for LineFormat {
    fn default() -> Self {
        Self::new("", false, true)
    }
}
