//! Server state and configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::layout::ReceiptLayout;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// Layout builder, read-only for the life of the server.
    pub layout: ReceiptLayout,
    /// Unix timestamp of server boot.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig, layout: ReceiptLayout) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            config,
            layout,
            boot_time,
        }
    }
}
