#![forbid(unsafe_code)]

//! Transcript lines and the sink renderers implement.
//!
//! A [`TranscriptSink`] is the only way output reaches the page. The
//! controller, the runtime's stdout/stderr callbacks and the host log all get
//! a sink handed to them; nothing writes to the transcript through globals.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::StyleConfig;

/// What produced a transcript line. Decides how the line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    UserInput,
    RuntimeStdout,
    ExpressionResult,
    Error,
    Info,
}

impl LineKind {
    pub const ALL: [Self; 5] = [
        Self::UserInput,
        Self::RuntimeStdout,
        Self::ExpressionResult,
        Self::Error,
        Self::Info,
    ];

    /// Stable label, also used as the line's CSS class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserInput => "user",
            Self::RuntimeStdout => "stdout",
            Self::ExpressionResult => "result",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Resolved presentation of one line kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle<'a> {
    /// CSS color applied to the whole line, if any.
    pub color: Option<&'a str>,
    /// Highlighted marker rendered before the text.
    pub prompt: Option<&'a str>,
}

impl<'a> LineStyle<'a> {
    #[must_use]
    pub fn for_kind(kind: LineKind, style: &'a StyleConfig) -> Self {
        match kind {
            LineKind::UserInput => Self {
                color: None,
                prompt: Some(style.prompt_marker.as_str()),
            },
            LineKind::RuntimeStdout | LineKind::ExpressionResult => Self {
                color: Some(style.result_color.as_str()),
                prompt: None,
            },
            LineKind::Error => Self {
                color: Some(style.error_color.as_str()),
                prompt: None,
            },
            LineKind::Info => Self {
                color: None,
                prompt: None,
            },
        }
    }
}

/// One immutable transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

impl TranscriptLine {
    /// Build a line, dropping one trailing newline from runtime stdout.
    #[must_use]
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        let mut text = text.into();
        if kind == LineKind::RuntimeStdout && text.ends_with('\n') {
            text.pop();
        }
        Self { kind, text }
    }
}

/// Append target for transcript lines.
///
/// Implementations must accept any text, including the empty string and text
/// that looks like markup, and must never interpret it.
pub trait TranscriptSink {
    fn append(&self, line: TranscriptLine);

    fn render(&self, kind: LineKind, text: impl Into<String>)
    where
        Self: Sized,
    {
        self.append(TranscriptLine::new(kind, text));
    }
}

impl<T: TranscriptSink + ?Sized> TranscriptSink for Rc<T> {
    fn append(&self, line: TranscriptLine) {
        (**self).append(line);
    }
}

impl<T: TranscriptSink + ?Sized> TranscriptSink for &T {
    fn append(&self, line: TranscriptLine) {
        (**self).append(line);
    }
}

/// In-memory transcript. Clones share the same line list.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<TranscriptLine>>>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<TranscriptLine> {
        self.lines.borrow().clone()
    }

    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|l| l.text.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<TranscriptLine> {
        self.lines.borrow().last().cloned()
    }

    #[must_use]
    pub fn count_kind(&self, kind: LineKind) -> usize {
        self.lines.borrow().iter().filter(|l| l.kind == kind).count()
    }
}

impl TranscriptSink for Transcript {
    fn append(&self, line: TranscriptLine) {
        self.lines.borrow_mut().push(line);
    }
}
