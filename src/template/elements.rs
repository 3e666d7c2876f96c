//! Constructors for the print elements the layout places.

use super::style::{merge_styles, StyleSheet, TextAlign, TextStyle};
use super::types::{
    BorderStyle, ElementKind, ElementOptions, PrintElement, PrintElementType,
};

/// Horizontal extent of the printable content area, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    pub content_left: f64,
    pub content_width: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            content_left: 4.5,
            content_width: 216.0,
        }
    }
}

/// Height given to every hline box.
const HLINE_HEIGHT: f64 = 9.0;

/// Default hline thickness.
const HLINE_WIDTH: &str = "0.75";

/// A text element. `title` is the literal drawn when nothing is bound.
pub fn text(
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    title: impl Into<String>,
    style: TextStyle,
) -> PrintElement {
    PrintElement {
        options: ElementOptions {
            left,
            top,
            width,
            height,
            title: Some(title.into()),
            coordinate_sync: Some(false),
            width_height_sync: Some(false),
            style,
            ..Default::default()
        },
        print_element_type: PrintElementType::new(ElementKind::Text),
    }
}

/// A horizontal rule.
pub fn hline(left: f64, top: f64, width: f64, border_style: BorderStyle) -> PrintElement {
    PrintElement {
        options: ElementOptions {
            left,
            top,
            width,
            height: HLINE_HEIGHT,
            border_style: Some(border_style),
            border_width: Some(HLINE_WIDTH.to_string()),
            coordinate_sync: Some(false),
            width_height_sync: Some(false),
            ..Default::default()
        },
        print_element_type: PrintElementType::new(ElementKind::Hline),
    }
}

impl PrintElement {
    /// Bind this element to a named field.
    pub fn bound(mut self, field: impl Into<String>) -> Self {
        self.options.field = Some(field.into());
        self
    }

    /// Attach designer sample data.
    pub fn with_test_data(mut self, test_data: impl Into<String>) -> Self {
        self.options.test_data = Some(test_data.into());
        self
    }
}

/// Which row style [`row4`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Bold `h6` column titles.
    Header,
    /// Plain `body` cells.
    Body,
}

/// A four-column table row (name, quantity, unit price, subtotal).
///
/// Columns sit edge to edge starting at `left`; gaps, if wanted, go into
/// `widths`. The first column is left aligned, the rest right aligned.
/// A zero width still emits the cell, it just occupies no space.
pub fn row4(
    sheet: &StyleSheet,
    top: f64,
    widths: [f64; 4],
    left: f64,
    height: f64,
    titles: [&str; 4],
    kind: RowKind,
) -> Vec<PrintElement> {
    let aligns = [
        TextAlign::Left,
        TextAlign::Right,
        TextAlign::Right,
        TextAlign::Right,
    ];

    let mut x = left;
    let mut cells = Vec::with_capacity(4);
    for ((width, title), align) in widths.into_iter().zip(titles).zip(aligns) {
        let align = TextStyle::align(align);
        let style = match kind {
            RowKind::Header => merge_styles(&[&sheet.h6, &sheet.bold, &align]),
            RowKind::Body => merge_styles(&[&sheet.body, &align]),
        };
        cells.push(text(x, top, width, height, title, style));
        x += width;
    }
    cells
}
