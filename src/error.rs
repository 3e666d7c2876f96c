//! # Error Types
//!
//! This module defines error types used throughout the canteen-receipt library.

use thiserror::Error;

/// Main error type for receipt layout operations
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The order is missing data the layout cannot do without
    #[error("Invalid order data: {0}")]
    InvalidOrderData(String),

    /// Skeleton document has an unexpected shape
    #[error("Malformed skeleton: {0}")]
    Skeleton(String),

    /// Style sheet or skeleton could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
