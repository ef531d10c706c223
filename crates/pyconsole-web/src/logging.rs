#![forbid(unsafe_code)]

//! `tracing` subscriber that writes to the browser console.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};
use wasm_bindgen::JsValue;

use crate::log_format::{ConsoleMethod, RecordFields, format_record};

impl Visit for RecordFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field.name(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field.name(), format!("{value:?}"));
    }
}

/// Forwards events at or above `max_level` to `console.{debug,info,warn,error}`.
#[derive(Debug, Clone, Copy)]
pub struct BrowserConsoleLayer {
    max_level: Level,
}

impl BrowserConsoleLayer {
    #[must_use]
    pub const fn new(max_level: Level) -> Self {
        Self { max_level }
    }
}

impl<S: Subscriber> Layer<S> for BrowserConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }
        let mut record = RecordFields::default();
        event.record(&mut record);
        let line = JsValue::from_str(&format_record(*meta.level(), meta.target(), &record));
        match ConsoleMethod::for_level(*meta.level()) {
            ConsoleMethod::Error => web_sys::console::error_1(&line),
            ConsoleMethod::Warn => web_sys::console::warn_1(&line),
            ConsoleMethod::Info => web_sys::console::info_1(&line),
            ConsoleMethod::Debug => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the global subscriber. Returns `false` if one was already set.
pub fn install(max_level: Level) -> bool {
    let subscriber = Registry::default().with(BrowserConsoleLayer::new(max_level));
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
