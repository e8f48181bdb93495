//! # Low-Stock Alert Repository
//!
//! Persisted low-stock signals. Rows are written by the ledger in the same
//! transaction as the order that crossed the threshold, so an alert exists
//! if and only if its debit committed.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use stock_core::LowStockAlert;

/// Repository for low-stock alerts.
#[derive(Debug, Clone)]
pub struct AlertRepository {
    pool: SqlitePool,
}

impl AlertRepository {
    /// Creates a new AlertRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AlertRepository { pool }
    }

    /// Lists alerts, most recent first.
    pub async fn list_recent(&self) -> DbResult<Vec<LowStockAlert>> {
        let alerts = sqlx::query_as::<_, LowStockAlert>(
            r#"
            SELECT id, item_id, item_name, remaining_quantity, message, created_at
            FROM low_stock_alerts
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }
}

/// Appends an alert on the given connection.
pub(crate) async fn insert(conn: &mut SqliteConnection, alert: &LowStockAlert) -> DbResult<()> {
    debug!(
        item_id = %alert.item_id,
        remaining = alert.remaining_quantity,
        "Recording low-stock alert"
    );

    sqlx::query(
        r#"
        INSERT INTO low_stock_alerts (
            id, item_id, item_name, remaining_quantity, message, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6
        )
        "#,
    )
    .bind(&alert.id)
    .bind(&alert.item_id)
    .bind(&alert.item_name)
    .bind(alert.remaining_quantity)
    .bind(&alert.message)
    .bind(alert.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Generates a new alert ID.
pub fn generate_alert_id() -> String {
    Uuid::new_v4().to_string()
}
