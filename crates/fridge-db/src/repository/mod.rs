//! # Repository Module
//!
//! Database repository implementations for Fridge Manager.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  store.decrement(3, 2)      (via InventoryStore)               │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list_all(&self)                                                   │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, product)                                            │
//! │  ├── set_quantity(&self, id, quantity)                                 │
//! │  └── increment / decrement(&self, id, amount)                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  PostgreSQL (or SQLite in tests)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product listing and quantity updates

pub mod product;
