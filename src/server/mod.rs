//! # HTTP Server for Order Receipts
//!
//! Builds receipt templates for the admin print view over HTTP.
//!
//! ## Usage
//!
//! ```bash
//! canteen-receipt serve --listen 0.0.0.0:8080
//! ```
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | `ok (listening on <addr>, up since <unix time>)` |
//! | `POST /api/order/template` | `{ "template": ..., "printData": ... }` |
//! | `POST /api/order/preview` | plain-text preview |

mod handlers;
mod state;

pub use handlers::order::OrderRequest;
pub use state::{AppState, ServerConfig};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::ReceiptError;
use crate::layout::ReceiptLayout;

/// The application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/order/template", post(handlers::order::template))
        .route("/api/order/preview", post(handlers::order::preview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use canteen_receipt::config::LayoutConfig;
/// use canteen_receipt::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), canteen_receipt::ReceiptError> {
/// let layout = LayoutConfig::default().load()?;
/// serve(ServerConfig::default(), layout).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig, layout: ReceiptLayout) -> Result<(), ReceiptError> {
    let app = router(Arc::new(AppState::new(config.clone(), layout)));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            ReceiptError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;
    tracing::info!(addr = %config.listen_addr, "receipt server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| ReceiptError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
