// ============================================================================
// ELEMENT BUILDER - Builder pattern for element creation
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, create_element, set_attribute, set_class_name, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    /// Start a builder for a new `<tag>` element
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Set the class name (replaces every class)
    pub fn class(self, class: &str) -> Self {
        set_class_name(&self.element, class);
        self
    }

    /// Set the element id
    pub fn id(self, id: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, "id", id)?;
        Ok(self)
    }

    /// Set the text content
    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    /// Append a child element
    pub fn child(self, child: Element) -> Result<Self, JsValue> {
        append_child(&self.element, &child)?;
        Ok(self)
    }

    /// Set an attribute
    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        set_attribute(&self.element, name, value)?;
        Ok(self)
    }

    /// Finish and return the element
    pub fn build(self) -> Element {
        self.element
    }
}

/// `<input>` with id, type and placeholder; `name` mirrors the id
pub fn text_input(id: &str, kind: &str, placeholder: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("input")?
        .class("form-input")
        .id(id)?
        .attr("type", kind)?
        .attr("placeholder", placeholder)?
        .attr("name", id)?
        .build())
}
