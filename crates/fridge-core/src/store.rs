//! # Inventory Store Trait
//!
//! The interface every inventory source exposes to its callers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     One Interface, Two Sources                          │
//! │                                                                         │
//! │                       CLI commands                                      │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                  ┌───────────────────┐                                  │
//! │                  │  InventoryStore   │                                  │
//! │                  └─────────┬─────────┘                                  │
//! │              ┌─────────────┴─────────────┐                              │
//! │              ▼                           ▼                              │
//! │   ProductRepository (fridge-db)   LocalInventory (this crate)          │
//! │   live PostgreSQL handle          seed data, process lifetime          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - `list_all` returns products ascending by id.
//! - `set_quantity` rejects `quantity < 0` with `InvalidArgument`.
//! - `increment`/`decrement` reject `amount <= 0` with `InvalidArgument`.
//! - `decrement` never produces a negative quantity; it fails with
//!   `InsufficientQuantity` and leaves the row unchanged.
//! - Unknown ids fail with `ProductNotFound`.
//! - Every failure leaves the store unchanged.

use std::future::Future;

use crate::error::CoreResult;
use crate::types::Product;

/// Product records and quantity mutations over a single product table.
pub trait InventoryStore: Send + Sync {
    /// All products, ascending by id.
    fn list_all(&self) -> impl Future<Output = CoreResult<Vec<Product>>> + Send;

    /// Overwrites the current quantity of one product.
    fn set_quantity(&self, id: i64, quantity: i64) -> impl Future<Output = CoreResult<()>> + Send;

    /// Adds `amount` packs to one product.
    fn increment(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send;

    /// Removes `amount` packs from one product, refusing to go below zero.
    fn decrement(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send;
}
