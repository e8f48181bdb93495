//! Order routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stock_core::Order;
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::AppState;

/// Body of `POST /orders`.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct PlaceOrderRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// POST /orders
///
/// 201 with the order on success. Insufficient stock is a 400 with code
/// `INSUFFICIENT_STOCK`; the item is left untouched.
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let Json(body) = payload?;
    let order = state.ledger.place_order(&body.item_id, body.quantity).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.ledger.order_history().await?))
}
