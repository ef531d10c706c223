#![forbid(unsafe_code)]

//! Seams towards the embedded interpreter and the page's input field.
//!
//! The interpreter is an external collaborator. The console only needs two
//! things from it: a one-shot asynchronous load that accepts output callbacks,
//! and an asynchronous "run this program text" call.

use std::future::Future;

use tracing::trace;

use crate::error::ConsoleError;
use crate::transcript::{LineKind, TranscriptSink};

/// Push channel from the runtime's output streams into the transcript.
///
/// Handed to [`RuntimeLoader::load`]; the loader wires `stdout`/`stderr` into
/// the runtime's callback options.
#[derive(Debug, Clone)]
pub struct RuntimeOutput<S> {
    sink: S,
}

impl<S: TranscriptSink> RuntimeOutput<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn stdout(&self, text: &str) {
        trace!(len = text.len(), "runtime stdout");
        self.sink.render(LineKind::RuntimeStdout, text);
    }

    pub fn stderr(&self, text: &str) {
        trace!(len = text.len(), "runtime stderr");
        self.sink.render(LineKind::Error, text);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// A loaded interpreter.
pub trait Interpreter {
    /// Run `source` as a program.
    ///
    /// `Ok(None)` means the program produced no value (a statement, or an
    /// expression evaluating to nothing). `Ok(Some(text))` carries the value's
    /// string form.
    fn run(&self, source: &str) -> impl Future<Output = Result<Option<String>, ConsoleError>>;
}

/// One-shot constructor for an [`Interpreter`].
pub trait RuntimeLoader {
    type Interpreter: Interpreter;

    fn load<S>(
        self,
        output: RuntimeOutput<S>,
    ) -> impl Future<Output = Result<Self::Interpreter, ConsoleError>>
    where
        S: TranscriptSink + Clone + 'static;
}

/// The page's single-line command input.
pub trait InputField {
    fn value(&self) -> String;
    fn clear(&self);
    fn set_disabled(&self, disabled: bool);
    fn set_placeholder(&self, text: &str);
    fn focus(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Transcript, TranscriptLine};
    use pretty_assertions::assert_eq;

    #[test]
    fn output_streams_map_to_line_kinds() {
        let transcript = Transcript::new();
        let output = RuntimeOutput::new(transcript.clone());
        output.stdout("hello\n");
        output.stderr("Traceback (most recent call last):");

        assert_eq!(
            transcript.lines(),
            vec![
                TranscriptLine {
                    kind: LineKind::RuntimeStdout,
                    text: "hello".to_owned(),
                },
                TranscriptLine {
                    kind: LineKind::Error,
                    text: "Traceback (most recent call last):".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn cloned_output_feeds_the_same_sink() {
        let transcript = Transcript::new();
        let output = RuntimeOutput::new(transcript.clone());
        let stderr_side = output.clone();
        output.stdout("a");
        stderr_side.stderr("b");
        assert_eq!(output.sink().texts(), vec!["a", "b"]);
    }
}
