#![forbid(unsafe_code)]

//! DOM bindings for the transcript panel and the command input.
//!
//! Every piece of text goes in through `create_text_node`; nothing is ever
//! assigned to `innerHTML`, so runtime output cannot inject markup.

use std::rc::Rc;

use pyconsole_core::{
    ConsoleConfig, ConsoleError, InputField, LineStyle, TranscriptLine, TranscriptSink,
};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlInputElement};

/// Look up `id` and cast it to the expected element type.
pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, ConsoleError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| ConsoleError::missing_element(id))
}

/// Transcript rendered as one `<p>` per line inside the output container.
#[derive(Debug, Clone)]
pub struct DomTranscript {
    document: Document,
    container: HtmlElement,
    config: Rc<ConsoleConfig>,
}

impl DomTranscript {
    #[must_use]
    pub fn new(document: Document, container: HtmlElement, config: Rc<ConsoleConfig>) -> Self {
        Self {
            document,
            container,
            config,
        }
    }

    fn try_append(&self, line: &TranscriptLine) -> Result<(), JsValue> {
        let row: HtmlElement = self.document.create_element("p")?.dyn_into()?;
        row.class_list().add_1(line.kind.as_str())?;

        let style = LineStyle::for_kind(line.kind, &self.config.style);
        if let Some(color) = style.color {
            row.style().set_property("color", color)?;
        }
        if let Some(marker) = style.prompt {
            let prompt = self.document.create_element("span")?;
            prompt.set_class_name(&self.config.style.prompt_class);
            prompt.set_text_content(Some(marker));
            row.append_child(&prompt)?;
            row.append_child(&self.document.create_text_node(" "))?;
        }
        row.append_child(&self.document.create_text_node(&line.text))?;

        self.container.append_child(&row)?;
        self.container.set_scroll_top(self.container.scroll_height());
        Ok(())
    }
}

impl TranscriptSink for DomTranscript {
    fn append(&self, line: TranscriptLine) {
        if let Err(err) = self.try_append(&line) {
            warn!(kind = line.kind.as_str(), error = ?err, "failed to append transcript line");
        }
    }
}

/// The `<input>` the user types commands into.
#[derive(Debug, Clone)]
pub struct DomInput {
    element: HtmlInputElement,
}

impl DomInput {
    #[must_use]
    pub fn new(element: HtmlInputElement) -> Self {
        Self { element }
    }
}

impl InputField for DomInput {
    fn value(&self) -> String {
        self.element.value()
    }

    fn clear(&self) {
        self.element.set_value("");
    }

    fn set_disabled(&self, disabled: bool) {
        self.element.set_disabled(disabled);
    }

    fn set_placeholder(&self, text: &str) {
        self.element.set_placeholder(text);
    }

    fn focus(&self) {
        if let Err(err) = self.element.focus() {
            warn!(error = ?err, "failed to focus command input");
        }
    }
}
