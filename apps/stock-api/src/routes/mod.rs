//! # HTTP Routes
//!
//! ```text
//! GET  /health                 liveness + migration status
//! POST /items                  register an item
//! GET  /items[?low_stock=true] list items (optionally only low stock)
//! GET  /items?name=Widget      the item with that exact name, if any
//! GET  /items/{id}             one item
//! POST /items/{id}/stock       overwrite the stock level
//! GET  /items/{id}/orders      orders of one item, newest first
//! POST /orders                 place an order
//! GET  /orders                 order history, newest first
//! GET  /alerts                 low-stock alerts, newest first
//! ```

pub mod alerts;
pub mod items;
pub mod orders;
pub mod system;
