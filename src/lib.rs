//! # Canteen Receipt - Order Receipt Layout Library
//!
//! Builds order receipts for a campus canteen's thermal printers. The
//! output is a coordinate-based print template (panels of positioned text
//! and line elements) plus the field values its renderer substitutes into
//! bound placeholders. It provides:
//!
//! - **Layout**: places the order number, item table, delivery block and
//!   footer, sizing the page to its content
//! - **Templates**: serde types for template documents and skeleton loading
//! - **Order model**: the ordering API's order shape and item summarizing
//! - **Preview**: a plain-text rendering for terminals and tests
//!
//! ## Quick Start
//!
//! ```
//! use canteen_receipt::{
//!     layout::ReceiptLayout,
//!     order::{DeliveryInfo, Order},
//!     template::Skeleton,
//! };
//!
//! let layout = ReceiptLayout::new(Skeleton::embedded()?);
//!
//! let order = Order {
//!     order_num: Some(45),
//!     scene: Some("定时达".to_string()),
//!     delivery_info: Some(DeliveryInfo {
//!         school: Some("北京大学".to_string()),
//!         address: Some("36楼".to_string()),
//!         number: Some("138-0013-8000".to_string()),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let receipt = layout.build_for_order(&order)?;
//! assert_eq!(receipt.field_bindings.get("userNum"), Some("8000"));
//! assert_eq!(receipt.field_bindings.get("addr"), Some("北京大学 36楼"));
//!
//! // Hand this JSON to the print renderer
//! let json = serde_json::to_string(&receipt)?;
//! assert!(json.contains("\"printData\""));
//!
//! # Ok::<(), canteen_receipt::error::ReceiptError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Receipt layout builder and field formatting |
//! | [`template`] | Template document model, styles, skeletons |
//! | [`order`] | Order data and line-item summaries |
//! | [`preview`] | Plain-text preview rendering |
//! | [`config`] | Skeleton and style sources |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod config;
pub mod error;
pub mod layout;
pub mod order;
pub mod preview;
pub mod server;
pub mod template;

// Re-exports for convenience
pub use error::ReceiptError;
pub use layout::{BuiltReceipt, ReceiptLayout, build_order_template};
pub use order::{LineItem, Order, Totals};
