//! In-process tests for the stock API.
//!
//! The router is driven with `tower::ServiceExt::oneshot`; no socket is bound.

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use stock_api::build_router;
use stock_db::{Database, DbConfig, Ledger};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn app() -> axum::Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(Ledger::new(db))
}

/// Router over a database file, with a pool wide enough for real contention.
async fn file_app(dir: &tempfile::TempDir) -> axum::Router {
    let config = DbConfig::new(dir.path().join("stock.db")).max_connections(8);
    let db = Database::new(config).await.unwrap();
    build_router(Ledger::new(db))
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    send(app, req).await
}

/// Send a POST request with a JSON body via `oneshot` and return (status, parsed JSON body).
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, req).await
}

async fn send(app: &axum::Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &axum::Router, name: &str, quantity: i64) -> String {
    let (status, body) = post_json(app, "/items", json!({ "name": name, "quantity": quantity })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_migrations() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["migrations_applied"], body["migrations_total"]);
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_item() {
    let app = app().await;
    let id = create(&app, "Widget", 20).await;

    let (status, body) = get(&app, &format!("/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Widget");
    assert_eq!(body["quantity"], 20);
}

#[tokio::test]
async fn create_item_defaults_quantity_to_zero() {
    let app = app().await;
    let (status, body) = post_json(&app, "/items", json!({ "name": "Gizmo" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn create_item_keeps_description() {
    let app = app().await;
    let (status, body) = post_json(
        &app,
        "/items",
        json!({ "name": "Bolt", "quantity": 9, "description": " M4, zinc plated " }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], "M4, zinc plated");

    let (_, fetched) = get(&app, &format!("/items/{}", body["id"].as_str().unwrap())).await;
    assert_eq!(fetched["description"], "M4, zinc plated");

    let id = create(&app, "Nut", 3).await;
    let (_, plain) = get(&app, &format!("/items/{id}")).await;
    assert_eq!(plain["description"], Value::Null);
}

#[tokio::test]
async fn create_item_rejects_bad_input() {
    let app = app().await;
    create(&app, "Widget", 1).await;

    let (status, body) = post_json(&app, "/items", json!({ "name": "", "quantity": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = post_json(&app, "/items", json!({ "name": "Bolt", "quantity": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post_json(&app, "/items", json!({ "name": "Widget", "quantity": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = post_json(&app, "/items", json!({ "quantity": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_item_is_404() {
    let app = app().await;

    let (status, body) = get(&app, "/items/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = post_json(&app, "/items/missing/stock", json!({ "quantity": 3 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/items/missing/orders").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn set_stock_overwrites_without_ordering() {
    let app = app().await;
    let id = create(&app, "Widget", 3).await;

    let (status, body) = post_json(&app, &format!("/items/{id}/stock"), json!({ "quantity": 30 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 30);

    let (status, _) = post_json(&app, &format!("/items/{id}/stock"), json!({ "quantity": -5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn low_stock_filter() {
    let app = app().await;
    create(&app, "Plenty", 40).await;
    create(&app, "Edge", 15).await;
    create(&app, "Scarce", 2).await;

    let (status, all) = get(&app, "/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, low) = get(&app, "/items?low_stock=true").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = low
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Scarce"]);

    let (status, _) = get(&app, "/items?low_stock=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_by_name() {
    let app = app().await;
    let id = create(&app, "Widget", 20).await;
    create(&app, "Gadget", 3).await;

    let (status, found) = get(&app, "/items?name=Widget").await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], id.as_str());

    let (status, none) = get(&app, "/items?name=Sprocket").await;
    assert_eq!(status, StatusCode::OK);
    assert!(none.as_array().unwrap().is_empty());

    // Widget has 20 units, so it is not low stock
    let (_, filtered) = get(&app, "/items?name=Widget&low_stock=true").await;
    assert!(filtered.as_array().unwrap().is_empty());
    let (_, scarce) = get(&app, "/items?name=Gadget&low_stock=true").await;
    assert_eq!(scarce.as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/items?name=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn place_order_debits_stock() {
    let app = app().await;
    let id = create(&app, "Widget", 20).await;

    let (status, order) = post_json(&app, "/orders", json!({ "item_id": id, "quantity": 5 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["item_id"], id.as_str());
    assert_eq!(order["item_name"], "Widget");
    assert_eq!(order["quantity"], 5);

    let (_, item) = get(&app, &format!("/items/{id}")).await;
    assert_eq!(item["quantity"], 15);

    let (_, alerts) = get(&app, "/alerts").await;
    assert_eq!(alerts.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn insufficient_stock_is_400_and_changes_nothing() {
    let app = app().await;
    let id = create(&app, "Widget", 15).await;

    let (status, body) = post_json(&app, "/orders", json!({ "item_id": id, "quantity": 25 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    let (_, item) = get(&app, &format!("/items/{id}")).await;
    assert_eq!(item["quantity"], 15);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn order_validation_and_unknown_item() {
    let app = app().await;
    let id = create(&app, "Widget", 15).await;

    let (status, body) = post_json(&app, "/orders", json!({ "item_id": id, "quantity": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = post_json(&app, "/orders", json!({ "item_id": "missing", "quantity": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_history_is_newest_first_and_alerts_recorded() {
    let app = app().await;
    let id = create(&app, "Widget", 20).await;

    post_json(&app, "/orders", json!({ "item_id": id, "quantity": 2 })).await;
    post_json(&app, "/orders", json!({ "item_id": id, "quantity": 4 })).await;

    let (status, orders) = get(&app, "/orders").await;
    assert_eq!(status, StatusCode::OK);
    let quantities: Vec<i64> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["quantity"].as_i64().unwrap())
        .collect();
    assert_eq!(quantities, vec![4, 2]);

    let (status, per_item) = get(&app, &format!("/items/{id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(per_item, orders);

    // 20 - 2 - 4 = 14
    let (_, alerts) = get(&app, "/alerts").await;
    let alerts = alerts.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["remaining_quantity"], 14);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_over_a_file_database_never_oversell() {
    let dir = tempfile::tempdir().unwrap();
    let app = file_app(&dir).await;
    let id = create(&app, "Widget", 10).await;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            let id = id.clone();
            tokio::spawn(async move {
                post_json(&app, "/orders", json!({ "item_id": id, "quantity": 3 })).await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        if status == StatusCode::CREATED {
            created += 1;
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(body["code"], "INSUFFICIENT_STOCK");
        }
    }

    // 10 units fill three orders of 3
    assert_eq!(created, 3);
    let (_, item) = get(&app, &format!("/items/{id}")).await;
    assert_eq!(item["quantity"], 1);

    let (_, orders) = get(&app, "/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 3);

    // Every order that left the item below 15 raised an alert
    let (_, alerts) = get(&app, "/alerts").await;
    assert_eq!(alerts.as_array().unwrap().len(), 3);
}
