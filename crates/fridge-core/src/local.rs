//! # Local Inventory
//!
//! In-memory [`InventoryStore`] used when no database is reachable.
//!
//! Owned by the caller for the process lifetime and discarded on exit:
//! nothing is persisted in local mode.

use std::future::{ready, Future};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{CoreError, CoreResult};
use crate::seed;
use crate::store::InventoryStore;
use crate::types::Product;
use crate::validation::{validate_amount, validate_quantity};

/// Product list held in memory, kept sorted by id.
#[derive(Debug, Default)]
pub struct LocalInventory {
    products: Mutex<Vec<Product>>,
}

impl LocalInventory {
    /// Creates a store over the given products.
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.id);
        LocalInventory {
            products: Mutex::new(products),
        }
    }

    /// Creates a store holding the five default products.
    pub fn seeded() -> Self {
        LocalInventory::new(seed::default_products())
    }

    /// Replaces every product (used after an import).
    pub fn replace_all(&self, mut products: Vec<Product>) {
        products.sort_by_key(|p| p.id);
        *self.lock() = products;
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        // A panic while holding the lock cannot leave a half-written row
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_product<T>(&self, id: i64, f: impl FnOnce(&mut Product) -> CoreResult<T>) -> CoreResult<T> {
        let mut products = self.lock();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        f(product)
    }

    fn list_now(&self) -> CoreResult<Vec<Product>> {
        Ok(self.lock().clone())
    }

    fn set_now(&self, id: i64, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.with_product(id, |p| {
            p.current_quantity = quantity;
            Ok(())
        })
    }

    fn increment_now(&self, id: i64, amount: i64) -> CoreResult<()> {
        validate_amount(amount)?;
        self.with_product(id, |p| {
            p.current_quantity = p
                .current_quantity
                .checked_add(amount)
                .ok_or_else(|| CoreError::Backend("quantity overflow".to_string()))?;
            Ok(())
        })
    }

    fn decrement_now(&self, id: i64, amount: i64) -> CoreResult<()> {
        validate_amount(amount)?;
        self.with_product(id, |p| {
            if p.current_quantity < amount {
                return Err(CoreError::InsufficientQuantity {
                    id,
                    available: p.current_quantity,
                    requested: amount,
                });
            }
            p.current_quantity -= amount;
            Ok(())
        })
    }
}

impl InventoryStore for LocalInventory {
    fn list_all(&self) -> impl Future<Output = CoreResult<Vec<Product>>> + Send {
        ready(self.list_now())
    }

    fn set_quantity(&self, id: i64, quantity: i64) -> impl Future<Output = CoreResult<()>> + Send {
        ready(self.set_now(id, quantity))
    }

    fn increment(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        ready(self.increment_now(id, amount))
    }

    fn decrement(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        ready(self.decrement_now(id, amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
