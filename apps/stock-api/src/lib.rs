//! # Stockroom API
//!
//! HTTP surface of the inventory ledger.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stock API Server                                 │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► routes::* ───► Ledger ───► SQLite         │
//! │                   │                             │                       │
//! │              TraceLayer                  TracingNotifier                │
//! │            (request spans)              (low-stock warnings)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router is built without binding a socket so tests can drive it
//! in-process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use stock_db::Ledger;
use tower_http::trace::TraceLayer;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Builds the application router over a ledger.
pub fn build_router(ledger: Ledger) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        // Items
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route("/items/{id}", get(routes::items::get_item))
        .route("/items/{id}/stock", post(routes::items::set_stock))
        .route("/items/{id}/orders", get(routes::items::list_item_orders))
        // Orders
        .route(
            "/orders",
            get(routes::orders::list_orders).post(routes::orders::place_order),
        )
        // Alerts
        .route("/alerts", get(routes::alerts::list_alerts))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(ledger))
}
