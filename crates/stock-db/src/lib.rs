//! # stock-db: Database Layer and Ledger
//!
//! This crate provides database access for the inventory ledger.
//! It uses SQLite for storage with sqlx for async operations, and hosts the
//! [`Ledger`] service that applies orders as atomic, all-or-nothing debits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /orders)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     stock-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (ledger.rs)  │───►│  (item.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │  (order.rs)   │    │              │  │   │
//! │  │   │ place_order   │    │  (alert.rs)   │    │ 001_init.sql │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           └────────┬───────────┘                               │   │
//! │  │                    ▼                                            │   │
//! │  │            Database (pool.rs)                                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (WAL mode)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, order, alert)
//! - [`ledger`] - The order-application protocol
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stock_db::{Database, DbConfig, Ledger};
//!
//! let db = Database::new(DbConfig::new("path/to/stock.db")).await?;
//! let ledger = Ledger::new(db);
//!
//! let widget = ledger.create_item("Widget", 20, None).await?;
//! let order = ledger.place_order(&widget.id, 5).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use ledger::{Ledger, LedgerError, LedgerResult, LowStockNotifier, TracingNotifier};
pub use pool::{Database, DbConfig, DbLocation};

// Repository re-exports for convenience
pub use repository::alert::AlertRepository;
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
