//! # Repository Module
//!
//! Database repository implementations for the ledger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Ledger / HTTP handler                                                 │
//! │       │                                                                 │
//! │       │  db.items().list_below(15)                                     │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── insert(&self, item)                                               │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── set_quantity(&self, id, quantity)                                 │
//! │  └── debit(conn, id, quantity)   ← runs inside a ledger transaction    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Methods on `&self` run against the pool. Free functions that take a
//! `&mut SqliteConnection` are the building blocks the ledger composes into
//! one transaction.
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Item CRUD and the conditional debit
//! - [`OrderRepository`](order::OrderRepository) - Append-only order log
//! - [`AlertRepository`](alert::AlertRepository) - Append-only low-stock alerts

pub mod alert;
pub mod item;
pub mod order;
