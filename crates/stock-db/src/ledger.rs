//! # Inventory Ledger
//!
//! The authoritative owner of stock quantities and order history.
//!
//! ## Order Application Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  place_order(item_id, q)                                │
//! │                                                                         │
//! │  q <= 0? ──────────────────────────────► ValidationError (no I/O)      │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  BEGIN                                                                  │
//! │  UPDATE items SET quantity = quantity - q                              │
//! │         WHERE id = :id AND quantity >= q  RETURNING *                  │
//! │     │                                                                   │
//! │     ├── no row ──► SELECT quantity ──► ItemNotFound | InsufficientStock │
//! │     │              ROLLBACK                                             │
//! │     ▼                                                                   │
//! │  INSERT INTO orders                                                     │
//! │  INSERT INTO low_stock_alerts   (only if remaining < 15)               │
//! │  COMMIT                                                                 │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  notifier.notify(alert)         (only after commit)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement of the transaction is the write, so SQLite takes its
//! writer lock before anything is read. A competing `place_order` on the
//! same item waits on the busy timeout and then evaluates its guard against
//! the already-debited quantity. No caller ever waits for stock.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::DbError;
use crate::pool::Database;
use crate::repository::{alert, item, order};
use stock_core::validation::{
    validate_description, validate_item_name, validate_order_quantity, validate_stock_level,
};
use stock_core::{CoreError, Item, LowStockAlert, Order, ValidationError, LOW_STOCK_THRESHOLD};

// =============================================================================
// Errors
// =============================================================================

/// Error returned by every ledger operation.
///
/// `Core` is a recoverable rejection the caller should surface to the user.
/// `Storage` is fatal for the current request. Neither leaves a partial
/// mutation behind.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Storage(#[from] DbError),
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::Core(CoreError::Validation(err))
    }
}

impl LedgerError {
    /// True for input validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Core(CoreError::Validation(_)))
    }

    /// True when an order was refused for lack of stock.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, LedgerError::Core(CoreError::InsufficientStock { .. }))
    }

    /// True when the referenced item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::Core(CoreError::ItemNotFound(_)))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Notification Sink
// =============================================================================

/// Receives low-stock signals emitted by [`Ledger::place_order`].
///
/// The ledger only emits; delivery is the sink's concern. `notify` is called
/// after the order has committed and must not block.
pub trait LowStockNotifier: Send + Sync {
    fn notify(&self, alert: &LowStockAlert);
}

/// Default sink: one structured `warn` event per alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl LowStockNotifier for TracingNotifier {
    fn notify(&self, alert: &LowStockAlert) {
        warn!(
            item_id = %alert.item_id,
            item = %alert.item_name,
            remaining = alert.remaining_quantity,
            threshold = LOW_STOCK_THRESHOLD,
            "{}",
            alert.message
        );
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Inventory ledger service.
///
/// Cheap to clone; clones share the pool and the notifier.
///
/// ## Usage
/// ```rust,ignore
/// let ledger = Ledger::new(db);
/// let widget = ledger.create_item("Widget", 20, None).await?;
///
/// match ledger.place_order(&widget.id, 25).await {
///     Err(e) if e.is_insufficient_stock() => { /* tell the user */ }
///     other => { other?; }
/// }
/// ```
#[derive(Clone)]
pub struct Ledger {
    db: Database,
    notifier: Arc<dyn LowStockNotifier>,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Creates a ledger that reports low stock through [`TracingNotifier`].
    pub fn new(db: Database) -> Self {
        Ledger {
            db,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Replaces the low-stock sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn LowStockNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Registers a new item.
    ///
    /// ## Errors
    /// * `ValidationError::Required` / `TooLong` - bad name
    /// * `ValidationError::TooLong` - description over the limit
    /// * `ValidationError::MustNotBeNegative` - negative quantity
    /// * `ValidationError::Duplicate` - name already registered
    pub async fn create_item(
        &self,
        name: &str,
        initial_quantity: i64,
        description: Option<&str>,
    ) -> LedgerResult<Item> {
        let name = validate_item_name(name)?;
        let description = validate_description(description)?;
        validate_stock_level(initial_quantity)?;

        let now = Utc::now();
        let candidate = Item {
            id: item::generate_item_id(),
            name,
            description,
            quantity: initial_quantity,
            created_at: now,
            updated_at: now,
        };

        let created = match self.db.items().insert(&candidate).await {
            Ok(created) => created,
            Err(DbError::UniqueViolation { .. }) => {
                return Err(ValidationError::Duplicate {
                    field: "name".to_string(),
                    value: candidate.name,
                }
                .into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            item_id = %created.id,
            item = %created.name,
            quantity = created.quantity,
            "Item created"
        );
        Ok(created)
    }

    /// Overwrites an item's stock level.
    ///
    /// An administrative correction: creates no order and raises no alert.
    pub async fn set_stock(&self, item_id: &str, new_quantity: i64) -> LedgerResult<Item> {
        validate_stock_level(new_quantity)?;

        let updated = match self.db.items().set_quantity(item_id, new_quantity).await {
            Ok(updated) => updated,
            Err(DbError::NotFound { .. }) => {
                return Err(CoreError::ItemNotFound(item_id.to_string()).into())
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            item_id = %updated.id,
            item = %updated.name,
            quantity = updated.quantity,
            "Stock set"
        );
        Ok(updated)
    }

    /// Places an order, debiting the item atomically.
    ///
    /// ## Errors
    /// * `ValidationError::MustBePositive` - `requested_quantity <= 0`
    /// * `CoreError::ItemNotFound` - unknown item
    /// * `CoreError::InsufficientStock` - not enough units; nothing changed
    /// * `LedgerError::Storage` - database failure; nothing changed
    pub async fn place_order(&self, item_id: &str, requested_quantity: i64) -> LedgerResult<Order> {
        validate_order_quantity(requested_quantity)?;

        let now = Utc::now();
        let mut tx = self.db.pool().begin().await.map_err(DbError::transaction)?;

        let Some(debited) = item::debit(&mut tx, item_id, requested_quantity, now).await? else {
            let level = item::stock_level(&mut tx, item_id).await?;
            tx.rollback().await.map_err(DbError::transaction)?;

            return Err(match level {
                None => CoreError::ItemNotFound(item_id.to_string()),
                Some((name, available)) => CoreError::InsufficientStock {
                    item: name,
                    available,
                    requested: requested_quantity,
                },
            }
            .into());
        };

        let placed = Order {
            id: order::generate_order_id(),
            item_id: debited.id.clone(),
            item_name: debited.name.clone(),
            quantity: requested_quantity,
            created_at: now,
        };
        order::insert(&mut tx, &placed).await?;

        let raised = if debited.is_low_stock() {
            let low = LowStockAlert {
                id: alert::generate_alert_id(),
                item_id: debited.id.clone(),
                item_name: debited.name.clone(),
                remaining_quantity: debited.quantity,
                message: LowStockAlert::describe(&debited.name, debited.quantity),
                created_at: now,
            };
            alert::insert(&mut tx, &low).await?;
            Some(low)
        } else {
            None
        };

        tx.commit().await.map_err(DbError::transaction)?;

        info!(
            order_id = %placed.id,
            item_id = %placed.item_id,
            quantity = placed.quantity,
            remaining = debited.quantity,
            "Order placed"
        );

        if let Some(low) = raised {
            self.notifier.notify(&low);
        }

        Ok(placed)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Gets one item.
    pub async fn get_item(&self, item_id: &str) -> LedgerResult<Item> {
        self.db
            .items()
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| CoreError::ItemNotFound(item_id.to_string()).into())
    }

    /// Looks an item up by name, trimmed the same way `create_item` trims.
    pub async fn find_item_by_name(&self, name: &str) -> LedgerResult<Option<Item>> {
        let name = validate_item_name(name)?;
        Ok(self.db.items().get_by_name(&name).await?)
    }

    /// Lists every item, sorted by name.
    pub async fn list_items(&self) -> LedgerResult<Vec<Item>> {
        Ok(self.db.items().list_all().await?)
    }

    /// Lists items below the low-stock threshold.
    pub async fn low_stock_items(&self) -> LedgerResult<Vec<Item>> {
        Ok(self.db.items().list_below(LOW_STOCK_THRESHOLD).await?)
    }

    /// Lists every order, most recent first.
    pub async fn order_history(&self) -> LedgerResult<Vec<Order>> {
        Ok(self.db.orders().list_recent().await?)
    }

    /// Lists the orders of one item, most recent first.
    pub async fn orders_for_item(&self, item_id: &str) -> LedgerResult<Vec<Order>> {
        self.get_item(item_id).await?;
        Ok(self.db.orders().list_for_item(item_id).await?)
    }

    /// Lists persisted low-stock alerts, most recent first.
    pub async fn low_stock_alerts(&self) -> LedgerResult<Vec<LowStockAlert>> {
        Ok(self.db.alerts().list_recent().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
