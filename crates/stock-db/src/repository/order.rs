//! # Order Repository
//!
//! Read access to the order log, plus the insert the ledger runs inside
//! its debit transaction.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. DEBIT      items.quantity -= q   (guarded)   ┐                     │
//! │  2. APPEND     INSERT INTO orders               ├─ one transaction     │
//! │  3. (ALERT)    INSERT INTO low_stock_alerts     ┘                     │
//! │                                                                         │
//! │  No update, no delete: the log is append-only.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stock_core::Order;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, item_id, item_name, quantity, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Lists every order, most recent first.
    ///
    /// Orders created within the same timestamp fall back to insertion order.
    pub async fn list_recent(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, item_id, item_name, quantity, created_at
            FROM orders
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Lists the orders placed against one item, most recent first.
    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, item_id, item_name, quantity, created_at
            FROM orders
            WHERE item_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}

/// Appends an order on the given connection.
pub(crate) async fn insert(conn: &mut SqliteConnection, order: &Order) -> DbResult<()> {
    debug!(item_id = %order.item_id, quantity = order.quantity, "Appending order");

    sqlx::query(
        r#"
        INSERT INTO orders (id, item_id, item_name, quantity, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&order.id)
    .bind(&order.item_id)
    .bind(&order.item_name)
    .bind(order.quantity)
    .bind(order.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Generates a new order ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}
