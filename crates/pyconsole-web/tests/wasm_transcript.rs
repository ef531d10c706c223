#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use std::rc::Rc;

use pyconsole_core::{ConsoleConfig, InputField, LineKind, TranscriptSink};
use pyconsole_web::dom::{DomInput, DomTranscript};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("browser document")
}

fn transcript() -> (DomTranscript, HtmlElement) {
    let document = document();
    let container: HtmlElement = document
        .create_element("div")
        .expect("create div")
        .dyn_into()
        .expect("div is an HtmlElement");
    document
        .body()
        .expect("body")
        .append_child(&container)
        .expect("attach container");
    let sink = DomTranscript::new(
        document,
        container.clone(),
        Rc::new(ConsoleConfig::default()),
    );
    (sink, container)
}

#[wasm_bindgen_test]
fn lines_append_in_order_with_kind_classes() {
    let (sink, container) = transcript();
    sink.render(LineKind::UserInput, "1 + 1");
    sink.render(LineKind::ExpressionResult, "2");
    sink.render(LineKind::Error, "boom");

    let rows = container.children();
    assert_eq!(rows.length(), 3);
    let classes: Vec<String> = (0..rows.length())
        .map(|i| rows.item(i).expect("row").class_name())
        .collect();
    assert_eq!(classes, vec!["user", "result", "error"]);
}

#[wasm_bindgen_test]
fn user_input_gets_prompt_marker() {
    let (sink, container) = transcript();
    sink.render(LineKind::UserInput, "x = 1");
    let row = container.first_element_child().expect("row");
    let prompt = row.first_element_child().expect("prompt span");
    assert_eq!(prompt.class_name(), "prompt");
    assert_eq!(prompt.text_content().as_deref(), Some(">"));
    assert_eq!(row.text_content().as_deref(), Some("> x = 1"));
}

#[wasm_bindgen_test]
fn markup_is_inserted_as_text() {
    let (sink, container) = transcript();
    let payload = "<b>bold</b><img src=x onerror=alert(1)>";
    sink.render(LineKind::ExpressionResult, payload);
    sink.render(LineKind::UserInput, payload);

    for i in 0..2 {
        let row = container.children().item(i).expect("row");
        assert_eq!(row.get_elements_by_tag_name("b").length(), 0);
        assert_eq!(row.get_elements_by_tag_name("img").length(), 0);
    }
    let first = container.first_element_child().expect("row");
    assert_eq!(first.text_content().as_deref(), Some(payload));
}

#[wasm_bindgen_test]
fn stdout_line_drops_trailing_newline_and_is_colored() {
    let (sink, container) = transcript();
    sink.render(LineKind::RuntimeStdout, "hello\n");
    let row: HtmlElement = container
        .first_element_child()
        .expect("row")
        .dyn_into()
        .expect("HtmlElement");
    assert_eq!(row.text_content().as_deref(), Some("hello"));
    assert_eq!(
        row.style().get_property_value("color").expect("color"),
        "var(--result-color)"
    );
}

#[wasm_bindgen_test]
fn input_field_toggles_and_clears() {
    let document = document();
    let element: HtmlInputElement = document
        .create_element("input")
        .expect("create input")
        .dyn_into()
        .expect("HtmlInputElement");
    let input = DomInput::new(element.clone());

    input.set_disabled(true);
    input.set_placeholder("wait");
    assert!(element.disabled());
    assert_eq!(element.placeholder(), "wait");

    element.set_value("print(1)");
    assert_eq!(input.value(), "print(1)");
    input.clear();
    assert_eq!(element.value(), "");
}

#[wasm_bindgen_test]
fn newest_line_is_scrolled_into_view() {
    let (sink, container) = transcript();
    let style = container.style();
    style.set_property("height", "40px").expect("height");
    style.set_property("overflow-y", "auto").expect("overflow");

    for i in 0..50 {
        sink.render(LineKind::RuntimeStdout, format!("line {i}"));
    }
    assert!(container.scroll_height() > container.client_height());
    assert!(container.scroll_top() + container.client_height() >= container.scroll_height());
}
