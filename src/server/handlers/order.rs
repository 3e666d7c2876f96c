//! Order receipt handlers.
//!
//! Both routes take the same body:
//!
//! ```json
//! { "order": { "orderNum": 45, ... }, "orderTime": "2024-10-26 11:32" }
//! ```
//!
//! `orderTime` is optional and defaults to the order's `createdAt`.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::ReceiptError;
use crate::layout::BuiltReceipt;
use crate::order::{Order, OrderSummary};
use crate::preview::render_text;

use super::super::state::AppState;

/// Request body for the order routes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order: Order,
    #[serde(default)]
    pub order_time: Option<String>,
}

/// Handle POST /api/order/template - template and field values as JSON.
pub async fn template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderRequest>,
) -> Response {
    match build(&state, &request) {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e) => error_response(e),
    }
}

/// Handle POST /api/order/preview - plain-text sketch of the receipt.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderRequest>,
) -> Response {
    match build(&state, &request) {
        Ok(receipt) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&receipt.template, &receipt.field_bindings),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

fn build(state: &AppState, request: &OrderRequest) -> Result<BuiltReceipt, ReceiptError> {
    let summary = OrderSummary::from_order(&request.order);
    let order_time = request
        .order_time
        .as_deref()
        .unwrap_or(&summary.order_time);

    state.layout.build_order_template(
        &summary.line_items,
        &summary.totals,
        summary.discount_amount,
        order_time,
        &request.order,
    )
}

fn error_response(error: ReceiptError) -> Response {
    let status = match &error {
        ReceiptError::InvalidOrderData(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    tracing::warn!(%status, error = %error, "order receipt request failed");
    (
        status,
        Json(json!({ "success": false, "error": error.to_string() })),
    )
        .into_response()
}
