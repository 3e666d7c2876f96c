//! # Style Tokens
//!
//! Text styles are small records of optional attributes. Composition is
//! explicit: [`merge_styles`] overlays styles left to right, so a later
//! style's set attributes win and unset ones fall through.
//!
//! ```
//! use canteen_receipt::template::style::{merge_styles, StyleSheet, TextAlign};
//!
//! let sheet = StyleSheet::default();
//! let style = merge_styles(&[&sheet.h6, &sheet.bold, &sheet.right]);
//! assert_eq!(style.font_size, Some(12.0));
//! assert_eq!(style.text_align, Some(TextAlign::Right));
//! ```

use serde::{Deserialize, Serialize};

/// Font weight accepted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
    Bolder,
}

/// Horizontal text alignment inside an element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Text style attributes. `None` means "not set by this style".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
}

impl TextStyle {
    /// A style that only sets the font size.
    pub fn size(font_size: f64) -> Self {
        Self {
            font_size: Some(font_size),
            ..Default::default()
        }
    }

    /// A style that only sets the alignment.
    pub fn align(text_align: TextAlign) -> Self {
        Self {
            text_align: Some(text_align),
            ..Default::default()
        }
    }

    /// A style that only sets the font weight.
    pub fn weight(font_weight: FontWeight) -> Self {
        Self {
            font_weight: Some(font_weight),
            ..Default::default()
        }
    }

    /// A style that only sets the line height.
    pub fn line_height(line_height: f64) -> Self {
        Self {
            line_height: Some(line_height),
            ..Default::default()
        }
    }

    /// Overlay `other` on top of `self`.
    pub fn merged(&self, other: &TextStyle) -> TextStyle {
        TextStyle {
            font_size: other.font_size.or(self.font_size),
            font_family: other.font_family.clone().or_else(|| self.font_family.clone()),
            font_weight: other.font_weight.or(self.font_weight),
            text_align: other.text_align.or(self.text_align),
            line_height: other.line_height.or(self.line_height),
        }
    }
}

/// Merge styles left to right; later set attributes override earlier ones.
pub fn merge_styles(styles: &[&TextStyle]) -> TextStyle {
    styles
        .iter()
        .fold(TextStyle::default(), |acc, style| acc.merged(style))
}

/// The shared style token table.
///
/// Immutable once built; the layout builder takes it by value so tests and
/// deployments can swap in their own sheet. Every token is optional in JSON
/// and falls back to the default sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub title: TextStyle,
    pub h6: TextStyle,
    pub body: TextStyle,
    pub bold: TextStyle,
    pub right: TextStyle,
    pub center: TextStyle,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: TextStyle {
                font_size: Some(20.25),
                font_family: Some("STKaiti".to_string()),
                font_weight: Some(FontWeight::Bolder),
                text_align: Some(TextAlign::Center),
                line_height: None,
            },
            h6: TextStyle::size(12.0),
            body: TextStyle::size(9.0),
            bold: TextStyle::weight(FontWeight::Bold),
            right: TextStyle::align(TextAlign::Right),
            center: TextStyle::align(TextAlign::Center),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let merged = merge_styles(&[
            &TextStyle::align(TextAlign::Left),
            &TextStyle::size(9.0),
            &TextStyle::align(TextAlign::Right),
        ]);
        assert_eq!(merged.text_align, Some(TextAlign::Right));
        assert_eq!(merged.font_size, Some(9.0));
        assert_eq!(merged.font_weight, None);
    }

    #[test]
    fn test_merge_empty_is_default() {
        assert_eq!(merge_styles(&[]), TextStyle::default());
    }

    #[test]
    fn test_merge_does_not_touch_inputs() {
        let sheet = StyleSheet::default();
        let _ = merge_styles(&[&sheet.h6, &sheet.bold]);
        assert_eq!(sheet, StyleSheet::default());
    }

    #[test]
    fn test_partial_sheet_from_json() {
        let sheet: StyleSheet = serde_json::from_str(r#"{"h6": {"fontSize": 14}}"#).unwrap();
        assert_eq!(sheet.h6.font_size, Some(14.0));
        assert_eq!(sheet.body, StyleSheet::default().body);
    }
}
