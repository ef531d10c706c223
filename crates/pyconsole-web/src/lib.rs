#![forbid(unsafe_code)]

//! Browser frontend for pyconsole.
//!
//! This crate binds the seams of `pyconsole-core` to the page:
//! - `dom`: transcript container and command input via `web-sys`,
//! - `pyodide`: `loadPyodide` / `runPythonAsync` via `wasm-bindgen`,
//! - `wasm`: the exported `start` / `startWithConfig` entry points.
//!
//! Everything JS-facing is compiled only on `wasm32`; the log formatting it
//! relies on builds and tests natively.

pub mod log_format;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
pub mod pyodide;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{PyConsole, start, start_with_config};
