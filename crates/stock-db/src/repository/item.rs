//! # Item Repository
//!
//! Database operations for items.
//!
//! ## Key Operations
//! - Registration and lookup
//! - Administrative stock correction (absolute `set_quantity`)
//! - Conditional debit used by the ledger
//!
//! ## Stock Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Debit Strategy                                   │
//! │                                                                     │
//! │  ❌ WRONG: read, compare in Rust, write back                        │
//! │     SELECT quantity ...   (two callers both read 10)               │
//! │     UPDATE items SET quantity = 4                                  │
//! │     UPDATE items SET quantity = 4   ← 12 units sold from 10        │
//! │                                                                     │
//! │  ✅ CORRECT: relative, guarded update                               │
//! │     UPDATE items SET quantity = quantity - 6                       │
//! │     WHERE id = ? AND quantity >= 6                                 │
//! │                                                                     │
//! │  The second caller's guard sees 4 and matches no row.              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stock_core::Item;

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Ok(Item)` - Inserted item
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, item: &Item) -> DbResult<Item> {
        debug!(name = %item.name, quantity = item.quantity, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its name. The match is exact and case-sensitive.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            WHERE name = ?1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists every item, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists items whose quantity is strictly below `threshold`.
    pub async fn list_below(&self, threshold: i64) -> DbResult<Vec<Item>> {
        debug!(threshold, "Listing items below threshold");

        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, description, quantity, created_at, updated_at
            FROM items
            WHERE quantity < ?1
            ORDER BY quantity, name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Overwrites an item's quantity.
    ///
    /// Absolute, not relative: this is the administrative correction path.
    ///
    /// ## Returns
    /// * `Ok(Item)` - The item after the update
    /// * `Err(DbError::NotFound)` - Item doesn't exist
    pub async fn set_quantity(&self, id: &str, quantity: i64) -> DbResult<Item> {
        debug!(id = %id, quantity, "Setting stock");

        let now = Utc::now();

        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET
                quantity = ?2,
                updated_at = ?3
            WHERE id = ?1
            RETURNING id, name, description, quantity, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Counts items (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Debits `quantity` units from an item if and only if it has that many.
///
/// The sufficiency check and the decrement are one SQL statement, so SQLite
/// evaluates them under the writer lock.
///
/// ## Returns
/// * `Ok(Some(Item))` - Debit applied, item as it is now
/// * `Ok(None)` - No row matched: unknown item or not enough stock
pub(crate) async fn debit(
    conn: &mut SqliteConnection,
    id: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> DbResult<Option<Item>> {
    debug!(id = %id, quantity, "Conditional debit");

    let item = sqlx::query_as::<_, Item>(
        r#"
        UPDATE items
        SET
            quantity = quantity - ?2,
            updated_at = ?3
        WHERE id = ?1 AND quantity >= ?2
        RETURNING id, name, description, quantity, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(quantity)
    .bind(now)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(item)
}

/// Reads an item's name and quantity on the given connection.
///
/// Used after a failed debit to tell "unknown item" from "not enough stock".
pub(crate) async fn stock_level(
    conn: &mut SqliteConnection,
    id: &str,
) -> DbResult<Option<(String, i64)>> {
    let row: Option<(String, i64)> =
        sqlx::query_as("SELECT name, quantity FROM items WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(row)
}

/// Helper to generate a new item ID.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_item(name: &str, quantity: i64) -> Item {
        let now = Utc::now();
        Item {
            id: generate_item_id(),
            name: name.to_string(),
            description: None,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    async fn repo() -> (Database, ItemRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.items();
        (db, repo)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (_db, repo) = repo().await;
        let mut candidate = new_item("Widget", 20);
        candidate.description = Some("Blue, 4mm".to_string());
        let widget = repo.insert(&candidate).await.unwrap();

        let by_id = repo.get_by_id(&widget.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Widget");
        assert_eq!(by_id.quantity, 20);
        assert_eq!(by_id.description.as_deref(), Some("Blue, 4mm"));

        let by_name = repo.get_by_name("Widget").await.unwrap().unwrap();
        assert_eq!(by_name.id, widget.id);
        assert!(repo.get_by_name("widget").await.unwrap().is_none());

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let (_db, repo) = repo().await;
        repo.insert(&new_item("Widget", 1)).await.unwrap();

        let err = repo.insert(&new_item("Widget", 2)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_quantity_rejected_by_schema() {
        let (_db, repo) = repo().await;
        let err = repo.insert(&new_item("Broken", -1)).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }

    #[tokio::test]
    async fn test_set_quantity() {
        let (_db, repo) = repo().await;
        let widget = repo.insert(&new_item("Widget", 3)).await.unwrap();

        let updated = repo.set_quantity(&widget.id, 30).await.unwrap();
        assert_eq!(updated.quantity, 30);
        assert_eq!(updated.description, None);

        let err = repo.set_quantity("missing", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_below_and_all() {
        let (_db, repo) = repo().await;
        repo.insert(&new_item("Bolt", 14)).await.unwrap();
        repo.insert(&new_item("Anchor", 15)).await.unwrap();
        repo.insert(&new_item("Cog", 0)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Anchor", "Bolt", "Cog"]);

        let low = repo.list_below(15).await.unwrap();
        let names: Vec<_> = low.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cog", "Bolt"]);

        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_debit_guard() {
        let (db, repo) = repo().await;
        let widget = repo.insert(&new_item("Widget", 10)).await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();

        let after = debit(&mut conn, &widget.id, 6, Utc::now()).await.unwrap();
        assert_eq!(after.unwrap().quantity, 4);

        let refused = debit(&mut conn, &widget.id, 6, Utc::now()).await.unwrap();
        assert!(refused.is_none());

        let level = stock_level(&mut conn, &widget.id).await.unwrap();
        assert_eq!(level, Some(("Widget".to_string(), 4)));
        assert!(stock_level(&mut conn, "missing").await.unwrap().is_none());
    }
}
