//! # Print Templates
//!
//! The data model of a coordinate-based print template and the small set
//! of helpers used to populate one.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Template document, panel and element types |
//! | [`style`] | Text style tokens and [`merge_styles`](style::merge_styles) |
//! | [`elements`] | `text`, `hline` and `row4` constructors |
//! | [`skeleton`] | Head/tail skeleton sources |

pub mod elements;
pub mod skeleton;
pub mod style;
pub mod types;

pub use elements::{hline, row4, text, PanelGeometry, RowKind};
pub use skeleton::Skeleton;
pub use style::{merge_styles, FontWeight, StyleSheet, TextAlign, TextStyle};
pub use types::{
    BorderStyle, ElementKind, ElementOptions, Panel, PrintElement, PrintElementType,
    TemplateDocument,
};
