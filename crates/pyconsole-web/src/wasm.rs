#![forbid(unsafe_code)]

//! `wasm-bindgen` exports.
//!
//! ```js
//! import init, { start } from "./pkg/pyconsole_web.js";
//! await init();
//! const consoleApp = start();
//! consoleApp.log("hello from the page");
//! consoleApp.logArgs(["loaded", 3, "packages"]);
//! ```

use std::rc::Rc;

use js_sys::Reflect;
use pyconsole_core::{ConsoleConfig, ConsoleError, Controller, CycleOutcome, HostLog};
use tracing::{debug, error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::dom::{DomInput, DomTranscript, element_by_id};
use crate::logging;
use crate::pyodide::{Pyodide, PyodideLoader, js_string};

type WebController = Controller<Pyodide, DomTranscript, DomInput>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Handle to a running console, returned by [`start`].
#[wasm_bindgen]
pub struct PyConsole {
    controller: Rc<WebController>,
    host_log: HostLog<DomTranscript>,
}

#[wasm_bindgen]
impl PyConsole {
    /// Current lifecycle phase: `"loading"`, `"ready"` or `"faulted"`.
    pub fn phase(&self) -> String {
        self.controller.phase().as_str().to_owned()
    }

    /// Whether an evaluation is pending.
    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Log a message to the browser console and the transcript.
    pub fn log(&self, message: &str) {
        self.host_log.log(message);
    }

    /// `console.log`-style logging: each value goes through `String(value)`
    /// and the results are joined with spaces.
    #[wasm_bindgen(js_name = logArgs)]
    pub fn log_args(&self, args: Vec<JsValue>) {
        self.host_log.log_args(args.iter().map(js_string));
    }
}

/// Boot the console with the default configuration.
#[wasm_bindgen]
pub fn start() -> Result<PyConsole, JsValue> {
    boot(ConsoleConfig::default()).map_err(to_js_error)
}

/// Boot the console from a JSON config. Missing fields take their defaults.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config_json: &str) -> Result<PyConsole, JsValue> {
    ConsoleConfig::from_json(config_json)
        .and_then(boot)
        .map_err(to_js_error)
}

fn to_js_error(err: ConsoleError) -> JsValue {
    console_error(&format!("pyconsole failed to start: {err}"));
    JsValue::from_str(&err.to_string())
}

fn boot(config: ConsoleConfig) -> Result<PyConsole, ConsoleError> {
    install_panic_hook();
    if !logging::install(config.log_level()?) {
        warn!("tracing subscriber already installed; keeping the existing one");
    }

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(ConsoleError::NoDocument)?;
    let container: HtmlElement = element_by_id(&document, &config.output_element_id)?;
    let input: HtmlInputElement = element_by_id(&document, &config.input_element_id)?;

    let config = Rc::new(config);
    let transcript = DomTranscript::new(document, container, Rc::clone(&config));
    let controller: Rc<WebController> = Rc::new(Controller::new(
        Rc::clone(&config),
        transcript.clone(),
        DomInput::new(input.clone()),
    ));

    attach_keydown(&input, Rc::clone(&controller)).map_err(|err| {
        error!(error = ?err, "failed to attach keydown listener");
        ConsoleError::Host(format!("{err:?}"))
    })?;

    let loader = PyodideLoader::new(config.runtime.index_url.clone());
    let init = Rc::clone(&controller);
    spawn_local(async move {
        let phase = init.initialize(loader).await;
        debug!(phase = phase.as_str(), "runtime initialization finished");
    });

    Ok(PyConsole {
        controller,
        host_log: HostLog::new(transcript),
    })
}

fn attach_keydown(input: &HtmlInputElement, controller: Rc<WebController>) -> Result<(), JsValue> {
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let key = event.key();
        let composing = event.is_composing();
        let controller = Rc::clone(&controller);
        spawn_local(async move {
            let outcome = controller.handle_key(&key, composing).await;
            if outcome != CycleOutcome::IgnoredKey {
                debug!(?outcome, "keydown handled");
            }
        });
    });
    input.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    // The input lives as long as the page.
    on_keydown.forget();
    Ok(())
}
