//! # stock-core: Pure Domain Rules for the Inventory Ledger
//!
//! This crate holds the domain types and rules of the ledger as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/stock-api)                    │   │
//! │  │    POST /items ──► POST /orders ──► GET /orders                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stock-db (Ledger + repositories)                │   │
//! │  │              SQLite queries, migrations, transactions           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stock-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   error   │  │ validation│                  │   │
//! │  │   │   Item    │  │ CoreError │  │   rules   │                  │   │
//! │  │   │   Order   │  │ Validation│  │   checks  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Order, LowStockAlert)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for ledger operations
//!
//! ## Example Usage
//!
//! ```rust
//! use stock_core::validation::{validate_item_name, validate_order_quantity};
//! use stock_core::is_low_stock;
//!
//! assert!(validate_item_name("Widget").is_ok());
//! assert!(validate_order_quantity(0).is_err());
//!
//! // 15 is not below the threshold, 14 is
//! assert!(!is_low_stock(15));
//! assert!(is_low_stock(14));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which an item counts as "low stock".
///
/// ## Business Reason
/// Fixed policy: an item with fewer than 15 units left needs restocking.
/// `quantity == 15` is NOT low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 15;

/// Maximum length of an item name, in characters.
pub const MAX_ITEM_NAME_LEN: usize = 255;

/// Maximum length of an item description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Returns true when `quantity` is strictly below [`LOW_STOCK_THRESHOLD`].
#[inline]
pub const fn is_low_stock(quantity: i64) -> bool {
    quantity < LOW_STOCK_THRESHOLD
}
