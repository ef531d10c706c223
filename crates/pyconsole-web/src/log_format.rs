#![forbid(unsafe_code)]

//! Plain-text rendering of log records for the browser console.

use std::fmt::Write as _;

use tracing::Level;

/// Fields of one log record, in emission order. The `message` field is kept
/// apart from the structured ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub message: Option<String>,
    pub fields: Vec<(&'static str, String)>,
}

impl RecordFields {
    pub fn push(&mut self, name: &'static str, value: String) {
        if name == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((name, value));
        }
    }
}

/// Which browser console method a level maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Debug,
    Info,
    Warn,
    Error,
}

impl ConsoleMethod {
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// `LEVEL target: message key=value ...`
#[must_use]
pub fn format_record(level: Level, target: &str, record: &RecordFields) -> String {
    let mut out = format!("{level:>5} {target}:");
    if let Some(message) = &record.message {
        out.push(' ');
        out.push_str(message);
    }
    for (name, value) in &record.fields {
        let _ = write!(out, " {name}={value}");
    }
    out
}
