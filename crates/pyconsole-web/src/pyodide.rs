#![forbid(unsafe_code)]

//! Pyodide binding.
//!
//! The page loads `pyodide.js`, which defines the global `loadPyodide`. This
//! module only talks to that global and to the API object it resolves to.

use js_sys::{Function, Object, Promise, Reflect};
use pyconsole_core::{ConsoleError, Interpreter, RuntimeLoader, RuntimeOutput, TranscriptSink};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = loadPyodide, catch)]
    fn load_pyodide(options: &Object) -> Result<Promise, JsValue>;

    /// The object `loadPyodide` resolves to.
    #[derive(Debug, Clone)]
    pub type PyodideApi;

    #[wasm_bindgen(method, js_name = runPythonAsync, catch)]
    fn run_python_async(this: &PyodideApi, code: &str) -> Result<Promise, JsValue>;
}

/// JS `String(value)`, falling back to the debug form if even that throws.
pub fn js_string(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    Reflect::get(&js_sys::global(), &JsValue::from_str("String"))
        .ok()
        .and_then(|ctor| ctor.dyn_into::<Function>().ok())
        .and_then(|ctor| ctor.call1(&JsValue::UNDEFINED, value).ok())
        .and_then(|text| text.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Text of an evaluation result. `undefined`, which is what Python `None`
/// converts to, has none; everything else, `null` included, goes through
/// `String(value)`.
#[must_use]
pub fn result_text(value: &JsValue) -> Option<String> {
    if value.is_undefined() {
        None
    } else {
        Some(js_string(value))
    }
}

/// Release a PyProxy result once its text has been taken.
fn destroy_proxy(value: &JsValue) {
    if !value.is_object() {
        return;
    }
    let Ok(destroy) = Reflect::get(value, &JsValue::from_str("destroy")) else {
        return;
    };
    if let Ok(destroy) = destroy.dyn_into::<Function>() {
        let _ = destroy.call0(value);
    }
}

fn set_js(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

/// Loads Pyodide with the transcript wired to its stdout/stderr.
#[derive(Debug, Clone, Default)]
pub struct PyodideLoader {
    index_url: Option<String>,
}

impl PyodideLoader {
    #[must_use]
    pub fn new(index_url: Option<String>) -> Self {
        Self { index_url }
    }
}

impl RuntimeLoader for PyodideLoader {
    type Interpreter = Pyodide;

    async fn load<S>(self, output: RuntimeOutput<S>) -> Result<Pyodide, ConsoleError>
    where
        S: TranscriptSink + Clone + 'static,
    {
        let stdout_output = output.clone();
        let stdout = Closure::<dyn FnMut(String)>::new(move |text: String| {
            stdout_output.stdout(&text);
        });
        let stderr = Closure::<dyn FnMut(String)>::new(move |text: String| {
            output.stderr(&text);
        });

        let options = Object::new();
        set_js(&options, "stdout", stdout.as_ref());
        set_js(&options, "stderr", stderr.as_ref());
        if let Some(url) = &self.index_url {
            set_js(&options, "indexURL", &JsValue::from_str(url));
        }

        debug!(index_url = ?self.index_url, "calling loadPyodide");
        let loaded = match load_pyodide(&options) {
            Ok(promise) => JsFuture::from(promise).await,
            Err(err) => Err(err),
        };
        let api = match loaded {
            Ok(api) => api,
            Err(err) => {
                // A half-initialized runtime may still call back into these.
                stdout.forget();
                stderr.forget();
                return Err(ConsoleError::load(js_string(&err)));
            }
        };

        Ok(Pyodide {
            api: api.unchecked_into(),
            _stdout: stdout,
            _stderr: stderr,
        })
    }
}

/// A loaded Pyodide instance. Keeps the output callbacks alive for as long as
/// the runtime may call them.
pub struct Pyodide {
    api: PyodideApi,
    _stdout: Closure<dyn FnMut(String)>,
    _stderr: Closure<dyn FnMut(String)>,
}

impl Interpreter for Pyodide {
    async fn run(&self, source: &str) -> Result<Option<String>, ConsoleError> {
        trace!(len = source.len(), "runPythonAsync");
        let promise = self
            .api
            .run_python_async(source)
            .map_err(|err| ConsoleError::evaluation(js_string(&err)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|err| ConsoleError::evaluation(js_string(&err)))?;

        let text = result_text(&value);
        destroy_proxy(&value);
        Ok(text)
    }
}
