#![forbid(unsafe_code)]

//! Command loop controller.
//!
//! Owns the runtime lifecycle and the evaluation cycle:
//!
//! ```text
//!   Loading ──load ok──▶ Ready ──Enter──▶ (one cycle at a time)
//!      │
//!      └──load err──▶ Faulted   (terminal, input stays disabled)
//! ```
//!
//! Cycles are serialized: while one evaluation is pending the input field is
//! disabled and any submission that still gets through is rejected with
//! [`CycleOutcome::Busy`] without touching the transcript or the field.
//!
//! All methods take `&self`; state lives in `Cell`/`RefCell` so the controller
//! can be shared through an `Rc` with event callbacks. No borrow is held
//! across an `.await`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::config::ConsoleConfig;
use crate::runtime::{InputField, Interpreter, RuntimeLoader, RuntimeOutput};
use crate::transcript::{LineKind, TranscriptSink};

/// Runtime lifecycle state. The handle only exists in `Ready`.
#[derive(Debug)]
pub enum ConsoleState<I> {
    Loading,
    Ready(Rc<I>),
    Faulted(String),
}

impl<I> ConsoleState<I> {
    #[must_use]
    pub fn phase(&self) -> ConsolePhase {
        match self {
            Self::Loading => ConsolePhase::Loading,
            Self::Ready(_) => ConsolePhase::Ready,
            Self::Faulted(_) => ConsolePhase::Faulted,
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<Rc<I>> {
        match self {
            Self::Ready(handle) => Some(Rc::clone(handle)),
            Self::Loading | Self::Faulted(_) => None,
        }
    }
}

/// Data-free view of [`ConsoleState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsolePhase {
    Loading,
    Ready,
    Faulted,
}

impl ConsolePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Faulted => "faulted",
        }
    }
}

/// How one key press or submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    /// Not the submit key, or an IME composition key press.
    IgnoredKey,
    /// Input was empty after trimming; nothing rendered, field untouched.
    Empty,
    /// Another cycle is still pending.
    Busy,
    /// Runtime handle absent; an error line was rendered.
    NotReady,
    /// A result line was rendered.
    Value,
    /// Evaluation produced no value; only the echo was rendered.
    NoValue,
    /// Evaluation failed; an error line was rendered.
    Failed,
}

pub struct Controller<I, S, F> {
    config: Rc<ConsoleConfig>,
    sink: S,
    input: F,
    state: RefCell<ConsoleState<I>>,
    init_requested: Cell<bool>,
    busy: Cell<bool>,
}

impl<I, S, F> Controller<I, S, F>
where
    S: TranscriptSink,
    F: InputField,
{
    /// Create a controller in the `Loading` phase and present it: input
    /// disabled with the waiting placeholder, loading line in the transcript.
    pub fn new(config: Rc<ConsoleConfig>, sink: S, input: F) -> Self {
        input.set_disabled(true);
        input.set_placeholder(&config.placeholders.loading);
        sink.render(LineKind::Info, config.messages.loading.as_str());
        Self {
            config,
            sink,
            input,
            state: RefCell::new(ConsoleState::Loading),
            init_requested: Cell::new(false),
            busy: Cell::new(false),
        }
    }

    #[must_use]
    pub fn phase(&self) -> ConsolePhase {
        self.state.borrow().phase()
    }

    /// Load failure text, once faulted.
    #[must_use]
    pub fn fault(&self) -> Option<String> {
        match &*self.state.borrow() {
            ConsoleState::Faulted(reason) => Some(reason.clone()),
            ConsoleState::Loading | ConsoleState::Ready(_) => None,
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    #[must_use]
    pub fn is_submit_key(&self, key: &str) -> bool {
        key == self.config.submit_key
    }

    /// Load the runtime, registering the transcript as its output sink.
    ///
    /// Runs at most once; later calls log a warning and return the current
    /// phase without touching the loader.
    pub async fn initialize<L>(&self, loader: L) -> ConsolePhase
    where
        L: RuntimeLoader<Interpreter = I>,
        S: Clone + 'static,
    {
        if self.init_requested.replace(true) {
            warn!(phase = self.phase().as_str(), "runtime initialization already requested");
            return self.phase();
        }

        debug!("loading runtime");
        match loader.load(RuntimeOutput::new(self.sink.clone())).await {
            Ok(interpreter) => {
                *self.state.borrow_mut() = ConsoleState::Ready(Rc::new(interpreter));
                info!("runtime ready");
                self.sink
                    .render(LineKind::Info, self.config.messages.ready.as_str());
                self.input.set_disabled(false);
                self.input.set_placeholder(&self.config.placeholders.ready);
                self.input.focus();
            }
            Err(err) => {
                error!(error = %err, "runtime failed to load");
                let line = format!("{}: {err}", self.config.messages.critical_error);
                *self.state.borrow_mut() = ConsoleState::Faulted(err.to_string());
                self.sink.render(LineKind::Error, line);
            }
        }
        self.phase()
    }
}

impl<I, S, F> Controller<I, S, F>
where
    I: Interpreter,
    S: TranscriptSink,
    F: InputField,
{
    /// Keydown entry point. Only the configured submit key outside of IME
    /// composition starts a cycle.
    pub async fn handle_key(&self, key: &str, composing: bool) -> CycleOutcome {
        if composing || !self.is_submit_key(key) {
            return CycleOutcome::IgnoredKey;
        }
        self.submit().await
    }

    /// Run one evaluation cycle on the current input value.
    pub async fn submit(&self) -> CycleOutcome {
        let raw = self.input.value();
        let command = raw.trim();
        if command.is_empty() {
            return CycleOutcome::Empty;
        }
        if self.busy.get() {
            warn!("submission rejected while an evaluation is pending");
            return CycleOutcome::Busy;
        }

        self.sink.render(LineKind::UserInput, command);
        let outcome = self.evaluate(command).await;
        self.input.clear();
        debug!(?outcome, "evaluation cycle finished");
        outcome
    }

    async fn evaluate(&self, command: &str) -> CycleOutcome {
        let Some(interpreter) = self.state.borrow().handle() else {
            self.sink
                .render(LineKind::Error, self.config.messages.not_ready.as_str());
            return CycleOutcome::NotReady;
        };

        self.busy.set(true);
        self.input.set_disabled(true);
        let result = interpreter.run(command).await;
        self.busy.set(false);
        self.input.set_disabled(false);
        self.input.focus();

        match result {
            Ok(Some(value)) => {
                self.sink.render(LineKind::ExpressionResult, value);
                CycleOutcome::Value
            }
            Ok(None) => CycleOutcome::NoValue,
            Err(err) => {
                debug!(error = %err, "evaluation failed");
                self.sink.render(LineKind::Error, err.to_string());
                CycleOutcome::Failed
            }
        }
    }
}
