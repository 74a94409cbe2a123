//! # Domain Types
//!
//! Core domain types used throughout Fridge Manager.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │      Product         │          │     NewProduct       │            │
//! │  │  ──────────────────  │          │  ──────────────────  │            │
//! │  │  id (store-assigned) │          │  name                │            │
//! │  │  name                │          │  current_quantity    │            │
//! │  │  current_quantity    │ ◄─insert─│  norm_quantity       │            │
//! │  │  norm_quantity       │          └──────────────────────┘            │
//! │  │                      │                                               │
//! │  │  needs_order()   ─── derived: current < norm                        │
//! │  │  order_quantity() ── derived: max(0, norm - current)                │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A product kept in the restaurant fridge.
///
/// Maps 1:1 onto a row of the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Identifier assigned by the backing store (1..=5 for seed data).
    pub id: i64,

    /// Display label.
    pub name: String,

    /// Packs currently in stock. Never negative.
    pub current_quantity: i64,

    /// Target stock level.
    pub norm_quantity: i64,
}

impl Product {
    /// Creates a product value.
    pub fn new(id: i64, name: impl Into<String>, current_quantity: i64, norm_quantity: i64) -> Self {
        Product {
            id,
            name: name.into(),
            current_quantity,
            norm_quantity,
        }
    }

    /// True when stock is below the norm.
    #[inline]
    pub fn needs_order(&self) -> bool {
        self.current_quantity < self.norm_quantity
    }

    /// Packs to order to get back to the norm (the shortfall).
    #[inline]
    pub fn order_quantity(&self) -> i64 {
        (self.norm_quantity - self.current_quantity).max(0)
    }
}

// =============================================================================
// New Product
// =============================================================================

/// A product that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub current_quantity: i64,
    pub norm_quantity: i64,
}

impl From<&Product> for NewProduct {
    fn from(p: &Product) -> Self {
        NewProduct {
            name: p.name.clone(),
            current_quantity: p.current_quantity,
            norm_quantity: p.norm_quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_order() {
        assert!(Product::new(1, "Milk", 18, 20).needs_order());
        assert!(!Product::new(2, "Eggs", 30, 30).needs_order());
        assert!(!Product::new(3, "Cheese", 40, 15).needs_order());
    }

    #[test]
    fn test_order_quantity_never_negative() {
        assert_eq!(Product::new(1, "Milk", 18, 20).order_quantity(), 2);
        assert_eq!(Product::new(2, "Eggs", 30, 30).order_quantity(), 0);
        assert_eq!(Product::new(3, "Cheese", 40, 15).order_quantity(), 0);
    }

    #[test]
    fn test_new_product_from_product() {
        let product = Product::new(7, "Olives", 3, 8);
        let new: NewProduct = (&product).into();
        assert_eq!(new.name, "Olives");
        assert_eq!(new.current_quantity, 3);
        assert_eq!(new.norm_quantity, 8);
    }
}
