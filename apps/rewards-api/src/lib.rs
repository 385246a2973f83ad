//! # Receipt Rewards API
//!
//! HTTP surface over [`rewards_store::ReceiptStore`].
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rewards API                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  log_requests (middleware)                                       │  │
//! │  │  ┌────────────────────────┐  ┌────────────────────────────────┐ │  │
//! │  │  │ POST /receipts/process │  │ GET /receipts/{id}/points      │ │  │
//! │  │  │  process_receipt       │  │  get_points                    │ │  │
//! │  │  └───────────┬────────────┘  └───────────────┬────────────────┘ │  │
//! │  │              │        fallback: 404 Not found │                  │  │
//! │  └──────────────┼──────────────────────────────────┼────────────────┘  │
//! │                 ▼                                  ▼                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              AppState { store: Arc<ReceiptStore> }               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (default: 3000)
//! - `REWARDS_BIND_ADDR` - listen address (default: 0.0.0.0)
//! - `REWARDS_CONFIG` - optional TOML config file
//! - `RUST_LOG` - tracing filter

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use rewards_store::ReceiptStore;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<ReceiptStore>,
}

impl AppState {
    /// Wraps a store for sharing across handlers.
    pub fn new(store: ReceiptStore) -> Self {
        AppState {
            store: Arc::new(store),
        }
    }
}

/// Builds the router with all routes, fallbacks and middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(handlers::process_receipt))
        .route("/receipts/{id}/points", get(handlers::get_points))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
