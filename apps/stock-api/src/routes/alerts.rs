use axum::extract::State;
use axum::Json;
use stock_core::LowStockAlert;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /alerts
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<LowStockAlert>>> {
    Ok(Json(state.ledger.low_stock_alerts().await?))
}
