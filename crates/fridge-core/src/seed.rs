//! # Seed Data
//!
//! The fixed product list used whenever no database is reachable, and the
//! rows the `seed` binary writes into a fresh database.
//!
//! This is configuration, not logic: five products with fixed quantities.

use crate::types::{NewProduct, Product};

/// `(name, current_quantity, norm_quantity)` of the default products, in id order.
pub const DEFAULT_PRODUCTS: [(&str, i64, i64); 5] = [
    ("Cottage cheese", 5, 10),
    ("Cheese", 12, 15),
    ("Milk", 18, 20),
    ("Eggs", 25, 30),
    ("Olives", 3, 8),
];

/// Default products with sequential ids starting at 1.
pub fn default_products() -> Vec<Product> {
    DEFAULT_PRODUCTS
        .iter()
        .zip(1..)
        .map(|(&(name, current, norm), id)| Product::new(id, name, current, norm))
        .collect()
}

/// Default products without ids, for inserting into a store.
pub fn default_new_products() -> Vec<NewProduct> {
    DEFAULT_PRODUCTS
        .iter()
        .map(|&(name, current, norm)| NewProduct {
            name: name.to_string(),
            current_quantity: current,
            norm_quantity: norm,
        })
        .collect()
}
