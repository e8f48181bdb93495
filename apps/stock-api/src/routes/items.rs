//! Item routes: registration, lookup, stock correction.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stock_core::{Item, Order};
use ts_rs::TS;

use crate::error::ApiResult;
use crate::state::AppState;

/// Body of `POST /items`.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CreateItemRequest {
    pub name: String,

    /// Starting quantity; 0 when omitted.
    #[serde(default)]
    pub quantity: i64,

    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /items/{id}/stock`.
#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct SetStockRequest {
    pub quantity: i64,
}

/// Query string of `GET /items`.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub low_stock: bool,

    /// Exact item name; narrows the listing to at most one item.
    pub name: Option<String>,
}

/// POST /items
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(body) = payload?;
    let item = state
        .ledger
        .create_item(&body.name, body.quantity, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /items, GET /items?low_stock=true, GET /items?name=Widget
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Item>>> {
    let Query(query) = query?;
    let items = match query.name.as_deref() {
        Some(name) => state
            .ledger
            .find_item_by_name(name)
            .await?
            .into_iter()
            .filter(|item| !query.low_stock || item.is_low_stock())
            .collect(),
        None if query.low_stock => state.ledger.low_stock_items().await?,
        None => state.ledger.list_items().await?,
    };
    Ok(Json(items))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.ledger.get_item(&id).await?))
}

/// POST /items/{id}/stock
pub async fn set_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetStockRequest>, JsonRejection>,
) -> ApiResult<Json<Item>> {
    let Json(body) = payload?;
    Ok(Json(state.ledger.set_stock(&id, body.quantity).await?))
}

/// GET /items/{id}/orders
pub async fn list_item_orders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.ledger.orders_for_item(&id).await?))
}
