//! Document access helpers

use gloo_utils::document;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use taskhero_ui_core::{ElementKey, UiError, UiResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Attribute carrying the key an element was registered under
pub const KEY_ATTR: &str = "data-th-key";

pub fn js_error(value: JsValue) -> UiError {
    UiError::javascript(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// All elements matching `selector`, in document order
pub fn query_all(selector: &str) -> UiResult<Vec<Element>> {
    let nodes = document().query_selector_all(selector).map_err(js_error)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok().flatten()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// Set an inline style property. Elements without a style object are skipped.
pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Current value of an input, textarea or select
pub fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

/// Give a date input today's `min` unless the page already set one.
///
/// Returns `true` when the attribute was written.
pub fn apply_min_date(input: &HtmlInputElement, min_date: &str) -> bool {
    if input.has_attribute("min") {
        return false;
    }
    input.set_min(min_date);
    true
}

/// Maps elements to stable [`ElementKey`]s
#[derive(Debug, Default)]
pub struct ElementRegistry {
    next: Cell<u32>,
    elements: RefCell<HashMap<ElementKey, Element>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for `element`, registering it on first sight
    pub fn key_for(&self, element: &Element) -> ElementKey {
        if let Some(key) = element
            .get_attribute(KEY_ATTR)
            .and_then(|raw| raw.parse::<u32>().ok())
            .map(ElementKey)
        {
            if self.elements.borrow().contains_key(&key) {
                return key;
            }
        }

        let key = ElementKey(self.next.get());
        self.next.set(key.0 + 1);
        let _ = element.set_attribute(KEY_ATTR, &key.0.to_string());
        self.elements.borrow_mut().insert(key, element.clone());
        key
    }

    pub fn get(&self, key: ElementKey) -> Option<Element> {
        self.elements.borrow().get(&key).cloned()
    }

    /// Drop a registered element, returning the key it held
    pub fn release(&self, element: &Element) -> Option<ElementKey> {
        let key = element
            .get_attribute(KEY_ATTR)
            .and_then(|raw| raw.parse::<u32>().ok())
            .map(ElementKey)?;
        self.elements.borrow_mut().remove(&key)?;
        let _ = element.remove_attribute(KEY_ATTR);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}
