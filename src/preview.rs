//! # Text Preview
//!
//! A terminal sketch of a built receipt. Field-bound elements are filled
//! the way the print renderer fills them, then every element is mapped
//! onto a fixed grid of monospace columns:
//!
//! | Element | Drawn as |
//! |---------|----------|
//! | `text` | its resolved text, clipped and aligned inside its box |
//! | `hline` solid | `─` across its width |
//! | `hline` dashed/dotted | `-` across its width |
//! | anything else | nothing |
//!
//! Elements whose tops are within a few units of each other share a line.
//! CJK characters take two columns.

use crate::layout::FieldBindings;
use crate::template::{BorderStyle, ElementKind, PrintElement, TemplateDocument, TextAlign};

/// Width of the preview in columns.
pub const COLUMNS: usize = 48;

/// Panel width in layout units that maps onto [`COLUMNS`].
const PAPER_WIDTH: f64 = 226.77;

/// Tops closer than this land on the same line.
const LINE_TOLERANCE: f64 = 4.0;

/// The text a renderer would draw for `element`.
///
/// A bound field's value wins, then the designer sample, then the literal
/// title. Non-text elements have no text.
pub fn resolve_text(element: &PrintElement, bindings: &FieldBindings) -> Option<String> {
    if element.kind() != &ElementKind::Text {
        return None;
    }
    let options = &element.options;
    let bound = options.field.as_deref().and_then(|field| bindings.get(field));
    bound
        .or(options.test_data.as_deref())
        .or(options.title.as_deref())
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cell {
    Blank,
    Char(char),
    /// Right half of a wide character.
    Cont,
}

struct Line {
    cells: Vec<Cell>,
}

impl Line {
    fn new() -> Self {
        Self {
            cells: vec![Cell::Blank; COLUMNS],
        }
    }

    /// Write `ch` at column `col`, clearing any wide character it splits.
    fn put(&mut self, col: usize, ch: char) {
        let width = char_width(ch);
        if col + width > COLUMNS {
            return;
        }
        for c in col..col + width {
            match self.cells[c] {
                Cell::Cont if c > 0 => self.cells[c - 1] = Cell::Blank,
                Cell::Char(old) if char_width(old) == 2 && c + 1 < COLUMNS => {
                    self.cells[c + 1] = Cell::Blank
                }
                _ => {}
            }
        }
        self.cells[col] = Cell::Char(ch);
        if width == 2 {
            self.cells[col + 1] = Cell::Cont;
        }
    }

    fn render(&self) -> String {
        let mut out = String::with_capacity(COLUMNS);
        for cell in &self.cells {
            match cell {
                Cell::Blank => out.push(' '),
                Cell::Char(ch) => out.push(*ch),
                Cell::Cont => {}
            }
        }
        out.trim_end().to_string()
    }
}

/// Render every panel of `template` as plain text.
pub fn render_text(template: &TemplateDocument, bindings: &FieldBindings) -> String {
    let mut out = Vec::new();
    for panel in &template.panels {
        let mut elements: Vec<&PrintElement> = panel.print_elements.iter().collect();
        elements.sort_by(|a, b| a.options.top.total_cmp(&b.options.top));

        let mut line_top: Option<f64> = None;
        let mut line = Line::new();
        for element in elements {
            let top = element.options.top;
            if !line_top.is_none_or(|t| top - t < LINE_TOLERANCE) {
                out.push(line.render());
                line = Line::new();
                line_top = None;
            }
            line_top.get_or_insert(top);
            draw(&mut line, element, bindings);
        }
        if line_top.is_some() {
            out.push(line.render());
        }
        out.push(String::new());
    }
    out.join("\n")
}

fn draw(line: &mut Line, element: &PrintElement, bindings: &FieldBindings) {
    let options = &element.options;
    let start = to_column(options.left);
    let end = to_column(options.left + options.width);
    if end <= start {
        return;
    }

    match element.kind() {
        ElementKind::Hline => {
            let ch = match options.border_style {
                Some(BorderStyle::Dashed) | Some(BorderStyle::Dotted) => '-',
                _ => '─',
            };
            for col in start..end {
                line.put(col, ch);
            }
        }
        ElementKind::Text => {
            let Some(text) = resolve_text(element, bindings) else {
                return;
            };
            let span = end - start;
            let (text, width) = fit(&text, span);
            let mut col = match options.style.text_align {
                Some(TextAlign::Right) => end - width,
                Some(TextAlign::Center) => start + (span - width) / 2,
                _ => start,
            };
            for ch in text.chars() {
                line.put(col, ch);
                col += char_width(ch);
            }
        }
        _ => {}
    }
}

fn to_column(x: f64) -> usize {
    let col = (x / PAPER_WIDTH * COLUMNS as f64).round();
    (col.max(0.0) as usize).min(COLUMNS)
}

/// Longest prefix of `text` (single-line) that fits `columns`, and its width.
fn fit(text: &str, columns: usize) -> (String, usize) {
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars().filter(|c| !c.is_control()) {
        let w = char_width(ch);
        if width + w > columns {
            break;
        }
        out.push(ch);
        width += w;
    }
    (out, width)
}

fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3040..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6 => 2,
        _ => 1,
    }
}
