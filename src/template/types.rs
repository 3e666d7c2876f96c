//! Serde types for coordinate-based print templates.
//!
//! These mirror the JSON shape the host renderer consumes:
//!
//! ```text
//! { "panels": [ { "paperFooter": 220, "printElements": [
//!     { "options": { "left": 4.5, "top": 60, ... }, "printElementType": { "type": "text" } }
//! ] } ] }
//! ```
//!
//! Keys the crate does not model are kept in `extra` maps so a skeleton
//! survives a load/save cycle untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::style::TextStyle;

/// A complete template document: one or more panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    pub panels: Vec<Panel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateDocument {
    /// The first panel, which is where receipts are laid out.
    pub fn first_panel(&self) -> Option<&Panel> {
        self.panels.first()
    }

    /// Mutable access to the first panel.
    pub fn first_panel_mut(&mut self) -> Option<&mut Panel> {
        self.panels.first_mut()
    }
}

/// A page-like container holding print elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    #[serde(default)]
    pub print_elements: Vec<PrintElement>,
    /// Total page height in layout units.
    #[serde(default)]
    pub paper_footer: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One positioned visual primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintElement {
    pub options: ElementOptions,
    pub print_element_type: PrintElementType,
}

impl PrintElement {
    /// The element's type tag.
    pub fn kind(&self) -> &ElementKind {
        &self.print_element_type.kind
    }

    /// Bottom edge of the element box.
    pub fn bottom(&self) -> f64 {
        self.options.top + self.options.height
    }
}

/// Position, size, binding and style of a print element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementOptions {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Literal text drawn when the element has no bound value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Name of the field binding resolved at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Sample value shown by the renderer's designer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
    /// Line style for hlines: "solid" or "dashed".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    /// Line thickness for hlines. The renderer expects a string ("0.75").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_sync: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_height_sync: Option<bool>,
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Line style of an hline element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
}

/// `printElementType` block: the renderer dispatches on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintElementType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: ElementKind,
}

impl PrintElementType {
    pub fn new(kind: ElementKind) -> Self {
        Self { title: None, kind }
    }
}

/// Element type tag. Tags this crate never emits are carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Text,
    Hline,
    Image,
    Other(String),
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => ElementKind::Text,
            "hline" => ElementKind::Hline,
            "image" => ElementKind::Image,
            _ => ElementKind::Other(tag),
        }
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => "text".to_string(),
            ElementKind::Hline => "hline".to_string(),
            ElementKind::Image => "image".to_string(),
            ElementKind::Other(tag) => tag,
        }
    }
}
