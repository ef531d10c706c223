#![forbid(unsafe_code)]

//! `pyconsole-core` is the platform-independent half of the pyconsole browser
//! REPL.
//!
//! Design goals:
//! - **Host-driven**: the page pushes key presses in; output leaves only
//!   through an injected [`TranscriptSink`].
//! - **No JS types**: everything here builds and tests natively. The
//!   `pyconsole-web` crate binds these seams to the DOM and to Pyodide.
//! - **Explicit state**: the runtime handle lives inside [`ConsoleState`];
//!   evaluation branches on that state instead of on a maybe-set variable.

pub mod config;
pub mod controller;
pub mod error;
pub mod host_log;
pub mod runtime;
pub mod transcript;

pub use config::{ConsoleConfig, Messages, Placeholders, RuntimeConfig, StyleConfig};
pub use controller::{ConsolePhase, ConsoleState, Controller, CycleOutcome};
pub use error::{ConsoleError, Result};
pub use host_log::{HOST_LOG_TARGET, HostLog};
pub use runtime::{InputField, Interpreter, RuntimeLoader, RuntimeOutput};
pub use transcript::{LineKind, LineStyle, Transcript, TranscriptLine, TranscriptSink};
