#![forbid(unsafe_code)]

//! Host log messages surfaced in the transcript.
//!
//! Page code that wants a message both in the transcript and in the regular
//! log output goes through a [`HostLog`] built from the transcript sink.
//! Plain `tracing` records never reach the transcript: the global subscriber
//! has to be `Send + Sync`, and DOM sinks are neither.

use std::fmt::Display;

use tracing::info;

use crate::transcript::{LineKind, TranscriptSink};

/// `tracing` target used for host log records.
pub const HOST_LOG_TARGET: &str = "console";

#[derive(Debug, Clone)]
pub struct HostLog<S> {
    sink: S,
}

impl<S: TranscriptSink> HostLog<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Emit `message` to the log and append it as an info line.
    pub fn log(&self, message: &str) {
        info!(target: HOST_LOG_TARGET, "{message}");
        self.sink.render(LineKind::Info, message);
    }

    /// Space-join `args` into one message, the way variadic console logging does.
    pub fn log_args<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let message = args
            .into_iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.log(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Transcript, TranscriptLine};
    use pretty_assertions::assert_eq;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::Registry;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Record {
        level: Level,
        target: String,
        message: String,
    }

    #[derive(Default)]
    struct MessageField(String);

    impl Visit for MessageField {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<Record>>>);

    impl<S: Subscriber> Layer<S> for Capture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut message = MessageField::default();
            event.record(&mut message);
            let meta = event.metadata();
            if let Ok(mut records) = self.0.lock() {
                records.push(Record {
                    level: *meta.level(),
                    target: meta.target().to_owned(),
                    message: message.0,
                });
            }
        }
    }

    #[test]
    fn log_emits_console_record_and_info_line() {
        let capture = Capture::default();
        let transcript = Transcript::new();
        let log = HostLog::new(transcript.clone());

        tracing::subscriber::with_default(Registry::default().with(capture.clone()), || {
            log.log("packages loaded");
        });

        let records = capture.0.lock().expect("capture lock").clone();
        assert_eq!(
            records,
            vec![Record {
                level: Level::INFO,
                target: HOST_LOG_TARGET.to_owned(),
                message: "packages loaded".to_owned(),
            }]
        );
        assert_eq!(transcript.lines(), vec![TranscriptLine::new(LineKind::Info, "packages loaded")]);
    }

    #[test]
    fn log_appends_info_line() {
        let transcript = Transcript::new();
        let log = HostLog::new(transcript.clone());
        log.log("booted");
        assert_eq!(transcript.count_kind(LineKind::Info), 1);
        assert_eq!(transcript.texts(), vec!["booted"]);
    }

    #[test]
    fn log_args_joins_with_spaces() {
        let transcript = Transcript::new();
        let log = HostLog::new(transcript.clone());
        log.log_args(["packages", "loaded:"]);
        log.log_args([1, 2, 3]);
        log.log_args(Vec::<String>::new());
        assert_eq!(transcript.texts(), vec!["packages loaded:", "1 2 3", ""]);
    }
}
