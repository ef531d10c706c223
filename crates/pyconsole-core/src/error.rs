#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Everything that can go wrong between the page, the console and the runtime.
///
/// Runtime failures carry the runtime's own text verbatim: the transcript shows
/// exactly what the interpreter reported.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{0}")]
    RuntimeLoad(String),

    #[error("{0}")]
    Evaluation(String),

    #[error("runtime is not ready")]
    NotReady,

    #[error("required element not found: #{id}")]
    MissingElement { id: String },

    #[error("no document available in this host")]
    NoDocument,

    #[error("host call failed: {0}")]
    Host(String),

    #[error("invalid console config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
}

impl ConsoleError {
    #[must_use]
    pub fn load(message: impl Into<String>) -> Self {
        Self::RuntimeLoad(message.into())
    }

    #[must_use]
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }

    #[must_use]
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::ConsoleError;

    #[test]
    fn runtime_errors_display_verbatim() {
        let err = ConsoleError::evaluation("NameError: name 'x' is not defined");
        assert_eq!(err.to_string(), "NameError: name 'x' is not defined");
        let err = ConsoleError::load("network down");
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn missing_element_names_the_id() {
        let err = ConsoleError::missing_element("command-input");
        assert_eq!(err.to_string(), "required element not found: #command-input");
    }
}
