//! Liveness and schema status.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub migrations_applied: usize,
    pub migrations_total: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let db = state.ledger.database();
    if !db.health_check().await {
        return Err(ApiError::new(
            ErrorCode::DatabaseError,
            "Database unavailable",
        ));
    }

    let (total, applied) = db.migration_status().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        migrations_applied: applied,
        migrations_total: total,
    }))
}
