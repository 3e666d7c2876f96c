//! # Receipt Layout
//!
//! Turns an order into a populated print template plus the field values
//! the renderer substitutes into bound elements.
//!
//! ## Page Structure
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ head skeleton (title, time)  │
//! │            45                │  order number, bound to `orderNum`
//! ├──────────────────────────────┤  86
//! │ 项目名称               数量  │  90.5
//! ├ - - - - - - - - - - - - - - -┤  105.5
//! │ item rows, 15 apart          │  113, 128, ...
//! ├ - - - - - - - - - - - - - - -┤  sectionTop - 6
//! │ delivery block / remark line │  y(i) = sectionTop + 15 i
//! │ ...                          │
//! │ ************************     │  paperFooter - 15.75
//! └──────────────────────────────┘  paperFooter (>= 220)
//! ```
//!
//! The numbers encode a specific 80mm paper layout and were tuned against
//! printed output.
//!
//! ## Example
//!
//! ```
//! use canteen_receipt::layout::ReceiptLayout;
//! use canteen_receipt::order::Order;
//! use canteen_receipt::template::Skeleton;
//!
//! let layout = ReceiptLayout::new(Skeleton::embedded()?);
//! let order = Order {
//!     order_num: Some(45),
//!     scene: Some("堂食".to_string()),
//!     ..Default::default()
//! };
//!
//! let receipt = layout.build_for_order(&order)?;
//! assert_eq!(receipt.field_bindings.get("orderNum"), Some("45"));
//! assert!(receipt.paper_footer() >= 220.0);
//! # Ok::<(), canteen_receipt::ReceiptError>(())
//! ```

pub mod bindings;
pub mod format;

pub use bindings::{fields, FieldBindings};

use serde::Serialize;

use crate::error::ReceiptError;
use crate::order::{LineItem, Order, OrderSummary, Totals};
use crate::template::{
    hline, merge_styles, row4, text, BorderStyle, FontWeight, PanelGeometry, PrintElement,
    RowKind, Skeleton, StyleSheet, TemplateDocument, TextAlign, TextStyle,
};

/// Vertical step between table and section rows.
pub const ROW_STEP: f64 = 15.0;
/// Height of a single-line cell.
pub const CELL_HEIGHT: f64 = 9.75;
/// Top of the first item row.
pub const BODY_TOP: f64 = 113.0;
/// Gap between the last item row and the section below it.
pub const SECTION_GAP: f64 = 6.0;
/// Space reserved for the remark block.
pub const REMARK_BLOCK: f64 = 40.0;
/// Extra space below the delivery block.
pub const DELIVERY_PADDING: f64 = 40.0;
/// Extra space below the pickup remark line.
pub const PICKUP_PADDING: f64 = 10.0;
/// Shortest page the receipt is ever given.
pub const MIN_PAPER_FOOTER: f64 = 220.0;
/// Reference top the tail skeleton was drawn against.
pub const TAIL_ANCHOR: f64 = 163.5;
/// Gap between the bottom separator and the page end.
pub const SEPARATOR_PADDING: f64 = 6.0;

/// Item table column widths: name, quantity, unit price, subtotal.
/// Price and subtotal are zero width, so they are laid out but never shown.
pub const COLUMN_WIDTHS: [f64; 4] = [163.5, 50.0, 0.0, 0.0];
/// Left edge of the item table.
pub const TABLE_LEFT: f64 = 6.0;

const ORDER_NUM_TOP: f64 = 60.0;
const ORDER_NUM_HEIGHT: f64 = 28.0;
const ORDER_NUM_FONT_SIZE: f64 = 56.0;
const ORDER_NUM_SAMPLE: &str = "45";
const HEADER_RULE_TOP: f64 = 86.0;
const TABLE_HEADER_TOP: f64 = 90.5;
const TABLE_RULE_TOP: f64 = 105.5;
const TABLE_HEADERS: [&str; 4] = ["项目名称", "数量", "", ""];

const LABEL_LEFT: f64 = 4.5;
const LABEL_WIDTH: f64 = 69.0;
const VALUE_LEFT: f64 = 109.5;
const VALUE_WIDTH: f64 = 108.0;
const ADDR_VALUE_LEFT: f64 = 75.0;
const ADDR_VALUE_WIDTH: f64 = 145.5;
const REMARK_HEIGHT: f64 = 20.0;
const REMARK_LINE_HEIGHT: f64 = 18.0;

const SEPARATOR_LEFT: f64 = 3.0;
const SEPARATOR_WIDTH: f64 = 219.0;
const SEPARATOR_STARS: usize = 36;

/// A finished receipt: the template and its field values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltReceipt {
    pub template: TemplateDocument,
    #[serde(rename = "printData")]
    pub field_bindings: FieldBindings,
    #[serde(skip)]
    pub metrics: LayoutMetrics,
}

impl BuiltReceipt {
    /// Page height of the receipt panel.
    pub fn paper_footer(&self) -> f64 {
        self.metrics.paper_footer
    }

    /// Elements of the receipt panel in render order.
    pub fn elements(&self) -> &[PrintElement] {
        self.template
            .first_panel()
            .map(|p| p.print_elements.as_slice())
            .unwrap_or(&[])
    }
}

/// Geometry computed while laying out a receipt.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutMetrics {
    /// Number of item rows placed.
    pub body_rows: usize,
    /// Top of the section following the item table.
    pub section_top: f64,
    /// Vertical shift applied to the tail skeleton.
    pub tail_shift: f64,
    /// Final page height.
    pub paper_footer: f64,
}

/// The receipt layout builder.
///
/// Holds the skeleton, style tokens and panel geometry. All three are
/// read-only during a build; every build clones what it needs, so one
/// builder can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ReceiptLayout {
    skeleton: Skeleton,
    styles: StyleSheet,
    geometry: PanelGeometry,
}

impl ReceiptLayout {
    /// Builder with the default style sheet and geometry.
    pub fn new(skeleton: Skeleton) -> Self {
        Self {
            skeleton,
            styles: StyleSheet::default(),
            geometry: PanelGeometry::default(),
        }
    }

    /// Replace the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.styles = styles;
        self
    }

    /// Replace the content-area geometry.
    pub fn with_geometry(mut self, geometry: PanelGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Summarize `order` and build its receipt.
    pub fn build_for_order(&self, order: &Order) -> Result<BuiltReceipt, ReceiptError> {
        let summary = OrderSummary::from_order(order);
        self.build_order_template(
            &summary.line_items,
            &summary.totals,
            summary.discount_amount,
            &summary.order_time,
            order,
        )
    }

    /// Lay out a receipt for `order`.
    ///
    /// `totals` and `discount_amount` are accepted but not printed by the
    /// current layout. Fails only when the order has no number or the head
    /// skeleton has no panel.
    pub fn build_order_template(
        &self,
        line_items: &[LineItem],
        _totals: &Totals,
        _discount_amount: f64,
        order_time: &str,
        order: &Order,
    ) -> Result<BuiltReceipt, ReceiptError> {
        let order_num = order
            .order_num
            .ok_or_else(|| ReceiptError::InvalidOrderData("order number is missing".to_string()))?;

        let sheet = &self.styles;
        let geo = self.geometry;
        let mut placed: Vec<PrintElement> = Vec::new();

        // Order number, large and centered
        let order_num_style = TextStyle {
            font_size: Some(ORDER_NUM_FONT_SIZE),
            font_weight: Some(FontWeight::Bolder),
            text_align: Some(TextAlign::Center),
            ..Default::default()
        };
        placed.push(
            text(
                geo.content_left,
                ORDER_NUM_TOP,
                geo.content_width,
                ORDER_NUM_HEIGHT,
                "",
                order_num_style,
            )
            .bound(fields::ORDER_NUM)
            .with_test_data(ORDER_NUM_SAMPLE),
        );

        // Item table header
        placed.push(hline(TABLE_LEFT, HEADER_RULE_TOP, geo.content_width, BorderStyle::Solid));
        placed.extend(row4(
            sheet,
            TABLE_HEADER_TOP,
            COLUMN_WIDTHS,
            TABLE_LEFT,
            CELL_HEIGHT,
            TABLE_HEADERS,
            RowKind::Header,
        ));
        placed.push(hline(
            geo.content_left,
            TABLE_RULE_TOP,
            geo.content_width,
            BorderStyle::Dashed,
        ));

        // Item rows
        let mut top = BODY_TOP;
        for item in line_items {
            let quantity = item.quantity.to_string();
            placed.extend(row4(
                sheet,
                top,
                COLUMN_WIDTHS,
                TABLE_LEFT,
                CELL_HEIGHT,
                [item.project_name.as_str(), quantity.as_str(), "", ""],
                RowKind::Body,
            ));
            top += ROW_STEP;
        }

        let section_top = top + SECTION_GAP;
        let y = |row: usize| section_top + row as f64 * ROW_STEP;

        placed.push(hline(
            geo.content_left,
            section_top - SECTION_GAP,
            geo.content_width,
            BorderStyle::Dashed,
        ));

        let mut bindings = FieldBindings::new();
        bindings.insert(fields::ORDER_NUM, order_num.to_string());
        bindings.insert(fields::TIME, order_time);

        let label_style = merge_styles(&[&sheet.h6, &sheet.bold]);
        let value_style = merge_styles(&[&sheet.h6, &sheet.bold, &sheet.right]);

        let footer_bottom = match &order.delivery_info {
            Some(delivery) => {
                let rows = [
                    ("订单号", fields::ORDER_NUM, VALUE_LEFT, VALUE_WIDTH),
                    ("手机尾号", fields::USER_NUM, VALUE_LEFT, VALUE_WIDTH),
                    ("配送时间", fields::SEND_TIME, VALUE_LEFT, VALUE_WIDTH),
                    ("配送地址", fields::ADDR, ADDR_VALUE_LEFT, ADDR_VALUE_WIDTH),
                ];
                for (row, (label, field, value_left, value_width)) in rows.into_iter().enumerate() {
                    placed.push(text(
                        LABEL_LEFT,
                        y(row),
                        LABEL_WIDTH,
                        CELL_HEIGHT,
                        label,
                        label_style.clone(),
                    ));
                    placed.push(
                        text(value_left, y(row), value_width, CELL_HEIGHT, "", value_style.clone())
                            .bound(field),
                    );
                }

                let remark = order.remark.as_deref().unwrap_or("");
                let remark_style = merge_styles(&[
                    &sheet.h6,
                    &sheet.bold,
                    &TextStyle::line_height(REMARK_LINE_HEIGHT),
                ]);
                placed.push(text(
                    LABEL_LEFT,
                    y(4),
                    geo.content_width,
                    REMARK_HEIGHT,
                    remark,
                    remark_style,
                ));

                bindings.insert(fields::USER_NUM, format::contact_tail(delivery));
                bindings.insert(fields::ADDR, format::compose_address(Some(delivery)));
                bindings.insert(
                    fields::SEND_TIME,
                    format::format_send_time(delivery.time.as_deref()),
                );

                y(4) + REMARK_BLOCK + DELIVERY_PADDING
            }
            None => {
                let line =
                    format::pickup_remark_line(order.scene.as_deref(), order.remark.as_deref());
                placed.push(text(
                    LABEL_LEFT,
                    y(0),
                    geo.content_width,
                    CELL_HEIGHT,
                    line,
                    label_style,
                ));

                y(0) + REMARK_BLOCK + PICKUP_PADDING
            }
        };

        // Tail skeleton, anchored to the body above it
        let tail_shift = section_top - (TAIL_ANCHOR + line_items.len() as f64 * ROW_STEP);
        placed.extend(self.skeleton.tail().iter().cloned().map(|mut el| {
            el.options.top += tail_shift;
            el
        }));

        let paper_footer = footer_bottom.max(MIN_PAPER_FOOTER);
        placed.push(text(
            SEPARATOR_LEFT,
            paper_footer - CELL_HEIGHT - SEPARATOR_PADDING,
            SEPARATOR_WIDTH,
            CELL_HEIGHT,
            "*".repeat(SEPARATOR_STARS),
            merge_styles(&[&sheet.h6, &sheet.center]),
        ));

        let mut template = self.skeleton.head().clone();
        let panel = template
            .first_panel_mut()
            .ok_or_else(|| ReceiptError::Skeleton("head skeleton has no panels".to_string()))?;
        panel.print_elements.extend(placed);
        panel.paper_footer = paper_footer;

        tracing::debug!(
            order_num,
            rows = line_items.len(),
            delivery = order.delivery_info.is_some(),
            paper_footer,
            "laid out order receipt"
        );

        Ok(BuiltReceipt {
            template,
            field_bindings: bindings,
            metrics: LayoutMetrics {
                body_rows: line_items.len(),
                section_top,
                tail_shift,
                paper_footer,
            },
        })
    }
}

/// Build a receipt against the embedded skeletons and default styles.
pub fn build_order_template(
    line_items: &[LineItem],
    totals: &Totals,
    discount_amount: f64,
    order_time: &str,
    order: &Order,
) -> Result<BuiltReceipt, ReceiptError> {
    ReceiptLayout::new(Skeleton::embedded()?).build_order_template(
        line_items,
        totals,
        discount_amount,
        order_time,
        order,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::DeliveryInfo;
    use crate::template::ElementKind;

    fn layout() -> ReceiptLayout {
        ReceiptLayout::new(Skeleton::embedded().unwrap())
    }

    fn pickup_order() -> Order {
        Order {
            order_num: Some(45),
            scene: Some("堂食".to_string()),
            ..Default::default()
        }
    }

    fn items(n: usize) -> Vec<LineItem> {
        (0..n)
            .map(|i| LineItem::new(format!("Item {}", i), 1, 100.0))
            .collect()
    }

    fn build(items: &[LineItem], order: &Order) -> BuiltReceipt {
        layout()
            .build_order_template(items, &Totals::from_line_items(items), 0.0, "2024-10-26 13:32", order)
            .unwrap()
    }

    fn find<'a>(receipt: &'a BuiltReceipt, title: &str) -> &'a PrintElement {
        receipt
            .elements()
            .iter()
            .find(|el| el.options.title.as_deref() == Some(title))
            .unwrap()
    }

    #[test]
    fn test_section_top_follows_rows() {
        for n in [0, 1, 7] {
            let receipt = build(&items(n), &pickup_order());
            assert_eq!(receipt.metrics.body_rows, n);
            assert_eq!(receipt.metrics.section_top, 113.0 + n as f64 * 15.0 + 6.0);
        }
    }

    #[test]
    fn test_tail_shift_is_constant() {
        assert_eq!(build(&items(0), &pickup_order()).metrics.tail_shift, -44.5);
        assert_eq!(build(&items(5), &pickup_order()).metrics.tail_shift, -44.5);
    }

    #[test]
    fn test_item_rows() {
        let rows = vec![LineItem::new("拿铁(大杯)", 2, 1500.0), LineItem::new("美式", 1, 1200.0)];
        let receipt = build(&rows, &pickup_order());

        let name = find(&receipt, "拿铁(大杯)");
        assert_eq!(name.options.top, 113.0);
        assert_eq!(name.options.left, 6.0);
        assert_eq!(name.options.style.text_align, Some(TextAlign::Left));

        let second = find(&receipt, "美式");
        assert_eq!(second.options.top, 128.0);

        let quantity = receipt
            .elements()
            .iter()
            .find(|el| el.options.top == 113.0 && el.options.title.as_deref() == Some("2"))
            .unwrap();
        assert_eq!(quantity.options.style.text_align, Some(TextAlign::Right));
        assert_eq!(quantity.options.width, 50.0);
    }

    #[test]
    fn test_pickup_footer_floor() {
        let receipt = build(&[], &pickup_order());
        // 119 + 40 + 10 = 169, floored
        assert_eq!(receipt.paper_footer(), 220.0);
        assert_eq!(receipt.template.panels[0].paper_footer, 220.0);
    }

    #[test]
    fn test_pickup_footer_grows() {
        let receipt = build(&items(10), &pickup_order());
        // 113 + 150 + 6 + 40 + 10
        assert_eq!(receipt.paper_footer(), 319.0);
    }

    #[test]
    fn test_delivery_footer() {
        let order = Order {
            delivery_info: Some(DeliveryInfo::default()),
            ..pickup_order()
        };
        let receipt = build(&[], &order);
        // y(4) = 179, + 40 + 40
        assert_eq!(receipt.paper_footer(), 259.0);
    }

    #[test]
    fn test_single_bottom_separator() {
        let stars = "*".repeat(36);
        for order in [
            pickup_order(),
            Order {
                delivery_info: Some(DeliveryInfo::default()),
                ..pickup_order()
            },
        ] {
            let receipt = build(&items(3), &order);
            let separators: Vec<&PrintElement> = receipt
                .elements()
                .iter()
                .filter(|el| el.options.title.as_deref() == Some(stars.as_str()))
                .collect();
            assert_eq!(separators.len(), 1);
            assert_eq!(
                separators[0].options.top,
                receipt.paper_footer() - 9.75 - 6.0
            );
            assert!(separators[0].bottom() <= receipt.paper_footer());
            // Separator is the last thing placed
            assert_eq!(receipt.elements().last(), Some(separators[0]));
        }
    }

    #[test]
    fn test_pickup_remark() {
        let receipt = build(&items(1), &pickup_order());
        let line = find(&receipt, "【堂食】 ");
        assert_eq!(line.options.top, 113.0 + 15.0 + 6.0);
        assert_eq!(line.options.width, 216.0);
    }

    #[test]
    fn test_order_num_placeholder() {
        let receipt = build(&[], &pickup_order());
        let el = receipt
            .elements()
            .iter()
            .find(|el| el.options.field.as_deref() == Some(fields::ORDER_NUM))
            .unwrap();
        assert_eq!(el.kind(), &ElementKind::Text);
        assert_eq!(el.options.top, 60.0);
        assert_eq!(el.options.style.font_size, Some(56.0));
        assert_eq!(el.options.test_data.as_deref(), Some("45"));
    }

    #[test]
    fn test_missing_order_num() {
        let order = Order {
            order_num: None,
            ..pickup_order()
        };
        let err = layout()
            .build_order_template(&[], &Totals::default(), 0.0, "", &order)
            .unwrap_err();
        assert!(matches!(err, ReceiptError::InvalidOrderData(_)));
    }

    #[test]
    fn test_custom_styles_are_used() {
        let mut styles = StyleSheet::default();
        styles.h6.font_size = Some(14.0);
        let receipt = layout()
            .with_styles(styles)
            .build_order_template(&[], &Totals::default(), 0.0, "", &pickup_order())
            .unwrap();
        assert_eq!(find(&receipt, "项目名称").options.style.font_size, Some(14.0));
        assert_eq!(find(&receipt, "【堂食】 ").options.style.font_size, Some(14.0));
    }

    #[test]
    fn test_custom_geometry_moves_content() {
        let narrow = layout().with_geometry(PanelGeometry {
            content_left: 12.0,
            content_width: 200.0,
        });

        let pickup = narrow
            .build_order_template(&items(2), &Totals::default(), 0.0, "", &pickup_order())
            .unwrap();
        let order_num = pickup
            .elements()
            .iter()
            .find(|el| el.options.field.as_deref() == Some(fields::ORDER_NUM))
            .unwrap();
        assert_eq!((order_num.options.left, order_num.options.width), (12.0, 200.0));

        let rules: Vec<&PrintElement> = pickup
            .elements()
            .iter()
            .filter(|el| el.options.border_style == Some(BorderStyle::Dashed))
            .collect();
        assert_eq!(rules.len(), 2);
        for rule in rules {
            assert_eq!((rule.options.left, rule.options.width), (12.0, 200.0));
        }
        assert_eq!(find(&pickup, "【堂食】 ").options.width, 200.0);

        let delivery = Order {
            remark: Some("不要吸管".to_string()),
            delivery_info: Some(DeliveryInfo::default()),
            ..pickup_order()
        };
        let delivery = narrow
            .build_order_template(&[], &Totals::default(), 0.0, "", &delivery)
            .unwrap();
        assert_eq!(find(&delivery, "不要吸管").options.width, 200.0);
    }
}
