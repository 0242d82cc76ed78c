#![cfg(target_arch = "wasm32")]

//! Bề mặt vẽ trên DOM thật của trình duyệt.

use timeline_core::{Size, StyleProp, Surface, TimelineError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, Document, HtmlElement};

pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::error_1(&err);
    }
}

impl Surface for DomSurface {
    type Node = HtmlElement;

    fn create_node(&mut self) -> Result<HtmlElement, TimelineError> {
        self.document
            .create_element("div")
            .map_err(|err| TimelineError::Surface(format!("{err:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| TimelineError::Surface("Phần tử div không phải HtmlElement".to_string()))
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        report(parent.append_child(child).map(|_| ()));
    }

    fn detach(&mut self, node: &HtmlElement) {
        node.remove();
    }

    fn is_attached(&self, node: &HtmlElement) -> bool {
        node.parent_node().is_some()
    }

    fn set_class(&mut self, node: &HtmlElement, class_name: &str) {
        node.set_class_name(class_name);
    }

    fn set_markup(&mut self, node: &HtmlElement, markup: &str) {
        node.set_inner_html(markup);
    }

    fn replace_children(&mut self, node: &HtmlElement, child: &HtmlElement) {
        node.set_inner_html("");
        report(node.append_child(child).map(|_| ()));
    }

    fn set_style(&mut self, node: &HtmlElement, prop: StyleProp, value: Option<f64>) {
        let style = node.style();
        let result = match value {
            Some(px) => style.set_property(prop.css_name(), &format!("{px}px")),
            None => style.remove_property(prop.css_name()).map(|_| ()),
        };
        report(result);
    }

    fn measure(&mut self, node: &HtmlElement) -> Size {
        Size::new(node.offset_width() as f64, node.offset_height() as f64)
    }
}
