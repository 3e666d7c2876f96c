//! # Order Model
//!
//! The slice of the ordering platform's data the receipt needs, in the
//! same camelCase JSON shape the platform API returns.
//!
//! Prices are in cents, as the platform stores them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::layout::format::format_send_time;

/// An order as returned by the ordering API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    /// "堂食", "外带" or "定时达".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_info: Option<DeliveryInfo>,
    pub items: Vec<OrderItem>,
    /// Pickup number shown large on the receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_num: Option<i64>,
    /// Customer remark.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_note: Option<String>,
    /// Amount charged after coupons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Delivery details attached to a scheduled-delivery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Selected delivery time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Customer contact number, any formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

/// One product in an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Selected option values, keyed by product option id.
    pub option_values: BTreeMap<String, OptionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit price including option adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A selected value of a product option (e.g. "中杯" for "规格").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_adjustment: Option<f64>,
}

/// One row of the receipt's detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub project_name: String,
    pub quantity: u32,
    pub price: f64,
    pub item_total: f64,
}

impl LineItem {
    pub fn new(project_name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            project_name: project_name.into(),
            quantity,
            price,
            item_total: price * quantity as f64,
        }
    }
}

/// Aggregate quantity and amount over all line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_quantity: u32,
    pub total_item_total: f64,
}

impl Totals {
    pub fn from_line_items(items: &[LineItem]) -> Self {
        items.iter().fold(Totals::default(), |acc, item| Totals {
            total_quantity: acc.total_quantity + item.quantity,
            total_item_total: acc.total_item_total + item.item_total,
        })
    }
}

/// Everything the layout builder needs besides the order itself.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
    /// `totalItemTotal - totalPrice`, never negative.
    pub discount_amount: f64,
    /// Display text for the order creation time.
    pub order_time: String,
}

impl OrderSummary {
    /// Collapse identical items into counted rows and compute totals.
    ///
    /// Items are identical when they share display name and unit price.
    /// Rows keep the order in which each item first appears.
    pub fn from_order(order: &Order) -> Self {
        let mut line_items: Vec<LineItem> = Vec::new();
        let mut index: HashMap<(String, u64), usize> = HashMap::new();

        for item in &order.items {
            let name = item_display_name(item);
            let price = item.price.unwrap_or(0.0);
            let key = (name.clone(), price.to_bits());
            match index.get(&key).copied() {
                Some(row) => {
                    let line = &mut line_items[row];
                    line.quantity += 1;
                    line.item_total = line.price * line.quantity as f64;
                }
                None => {
                    index.insert(key, line_items.len());
                    line_items.push(LineItem::new(name, 1, price));
                }
            }
        }

        let totals = Totals::from_line_items(&line_items);
        let discount_amount = order
            .total_price
            .map(|paid| (totals.total_item_total - paid).max(0.0))
            .unwrap_or(0.0);

        Self {
            line_items,
            totals,
            discount_amount,
            order_time: format_send_time(order.created_at.as_deref()),
        }
    }
}

/// "name(opt1/opt2)", options in option-id order; bare name without options.
fn item_display_name(item: &OrderItem) -> String {
    let name = item.name.clone().unwrap_or_default();
    let options: Vec<&str> = item
        .option_values
        .values()
        .filter_map(|v| v.value.as_deref())
        .filter(|v| !v.is_empty())
        .collect();

    if options.is_empty() {
        name
    } else {
        format!("{}({})", name, options.join("/"))
    }
}
