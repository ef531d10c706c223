#![forbid(unsafe_code)]

//! Host-supplied console configuration.
//!
//! The page may pass a JSON object at startup. Every field is optional; missing
//! fields fall back to [`ConsoleConfig::default`], so `{}` is a valid config.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::error::{ConsoleError, Result};

const DEFAULT_OUTPUT_ID: &str = "output-area";
const DEFAULT_INPUT_ID: &str = "command-input";
const DEFAULT_SUBMIT_KEY: &str = "Enter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Id of the transcript container element.
    pub output_element_id: String,
    /// Id of the single-line command input.
    pub input_element_id: String,
    /// DOM `KeyboardEvent.key` value that submits the current input.
    pub submit_key: String,
    pub placeholders: Placeholders,
    pub messages: Messages,
    pub style: StyleConfig,
    pub runtime: RuntimeConfig,
    /// Minimum level mirrored to the browser console.
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            output_element_id: DEFAULT_OUTPUT_ID.to_owned(),
            input_element_id: DEFAULT_INPUT_ID.to_owned(),
            submit_key: DEFAULT_SUBMIT_KEY.to_owned(),
            placeholders: Placeholders::default(),
            messages: Messages::default(),
            style: StyleConfig::default(),
            runtime: RuntimeConfig::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl ConsoleConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<Level> {
        Level::from_str(self.log_level.trim()).map_err(|_| ConsoleError::InvalidLogLevel {
            value: self.log_level.clone(),
        })
    }
}

/// Input placeholder text per controller phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub loading: String,
    pub ready: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            loading: "Waiting for Python to load...".to_owned(),
            ready: "Type a Python command and press Enter".to_owned(),
        }
    }
}

/// Status lines the controller writes into the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub loading: String,
    pub ready: String,
    /// Prefix of the line shown when the runtime fails to load.
    pub critical_error: String,
    pub not_ready: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            loading: "Loading Pyodide (this may take a few seconds)...".to_owned(),
            ready: "Pyodide loaded. Python 3 is ready.".to_owned(),
            critical_error: "Critical error while loading Pyodide".to_owned(),
            not_ready: "Pyodide is not ready yet.".to_owned(),
        }
    }
}

/// Presentation knobs for transcript lines. Colors are CSS values, so page
/// themes can hand in custom properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub prompt_marker: String,
    pub prompt_class: String,
    pub result_color: String,
    pub error_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            prompt_marker: ">".to_owned(),
            prompt_class: "prompt".to_owned(),
            result_color: "var(--result-color)".to_owned(),
            error_color: "var(--error-color)".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Overrides where the runtime fetches its packages from.
    pub index_url: Option<String>,
}
