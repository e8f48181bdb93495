//! # Domain Types
//!
//! Core domain types used throughout the ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │      Order      │   │  LowStockAlert  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  item_id (FK)   │   │  item_id (FK)   │       │
//! │  │  name (unique)  │   │  item_name      │   │  remaining      │       │
//! │  │  description?   │   │                 │   │                 │       │
//! │  │  quantity >= 0  │   │  quantity > 0   │   │  message        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Item 1 ──< N Order          Item 1 ──< N LowStockAlert                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Items have:
//! - `id`: UUID v4 - immutable, used for database relations and URLs
//! - `name`: the business identity, unique across the ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Item
// =============================================================================

/// A named stock-keeping unit with its current quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identity shown to staff and users.
    pub name: String,

    /// Free-form notes. `None` when blank.
    pub description: Option<String>,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// When the item was registered.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the quantity last changed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Checks whether the item is below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        crate::is_low_stock(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// An immutable record of stock debited from an item.
///
/// Uses the snapshot pattern for `item_name` so the order log keeps reading
/// correctly even if the item is later renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub item_id: String,
    /// Item name at time of order (frozen).
    pub item_name: String,
    /// Units debited. Always positive.
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Low Stock Alert
// =============================================================================

/// A persisted low-stock signal, raised by an order that left its item
/// below [`LOW_STOCK_THRESHOLD`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct LowStockAlert {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    /// Quantity left after the order that raised the alert.
    pub remaining_quantity: i64,
    /// Human-readable alert text.
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl LowStockAlert {
    /// Builds the alert text for an item left with `remaining` units.
    ///
    /// ## Example
    /// ```rust
    /// use stock_core::LowStockAlert;
    ///
    /// assert_eq!(
    ///     LowStockAlert::describe("Widget", 14),
    ///     "Widget is low on stock: 14 left (threshold 15)"
    /// );
    /// ```
    pub fn describe(item_name: &str, remaining: i64) -> String {
        format!(
            "{} is low on stock: {} left (threshold {})",
            item_name, remaining, LOW_STOCK_THRESHOLD
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
