//! # Product Commands
//!
//! Listing and stock changes.
//!
//! ## Stock Change Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    remove 5 2                                           │
//! │                                                                         │
//! │  args.rs ──► Command::Remove { id: 5, amount: 2 }                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remove_stock(store, 5, 2)                                             │
//! │       │                                                                 │
//! │       ├── store.decrement(5, 2)     (one guarded UPDATE when live)     │
//! │       │        └── Err ──► ApiError (nothing changed)                  │
//! │       ▼                                                                 │
//! │  re-read product 5 ──► ProductDto ──► "Olives: 1 / 8 (order 7)"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use fridge_core::{InventoryStore, Product};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, ErrorCode};

/// Product as printed by `list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub current_quantity: i64,
    pub norm_quantity: i64,
    pub needs_order: bool,
    /// Packs missing to reach the norm.
    pub order_quantity: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            needs_order: p.needs_order(),
            order_quantity: p.order_quantity(),
            id: p.id,
            name: p.name,
            current_quantity: p.current_quantity,
            norm_quantity: p.norm_quantity,
        }
    }
}

impl std::fmt::Display for ProductDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} / {}",
            self.name, self.current_quantity, self.norm_quantity
        )?;
        if self.needs_order {
            write!(f, " (order {})", self.order_quantity)?;
        }
        Ok(())
    }
}

/// All products, ascending by id.
pub async fn list_products(store: &impl InventoryStore) -> Result<Vec<ProductDto>, ApiError> {
    let products = store.list_all().await?;
    debug!(count = products.len(), "list_products");
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Adds packs and returns the updated product.
pub async fn add_stock(
    store: &impl InventoryStore,
    id: i64,
    amount: i64,
) -> Result<ProductDto, ApiError> {
    store.increment(id, amount).await?;
    info!(id, amount, "Added stock");
    reload(store, id).await
}

/// Removes packs and returns the updated product.
///
/// Fails with `InsufficientQuantity` instead of going below zero.
pub async fn remove_stock(
    store: &impl InventoryStore,
    id: i64,
    amount: i64,
) -> Result<ProductDto, ApiError> {
    store.decrement(id, amount).await?;
    info!(id, amount, "Removed stock");
    reload(store, id).await
}

/// Overwrites the current quantity and returns the updated product.
pub async fn set_stock(
    store: &impl InventoryStore,
    id: i64,
    quantity: i64,
) -> Result<ProductDto, ApiError> {
    store.set_quantity(id, quantity).await?;
    info!(id, quantity, "Set stock");
    reload(store, id).await
}

async fn reload(store: &impl InventoryStore, id: i64) -> Result<ProductDto, ApiError> {
    store
        .list_all()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .map(ProductDto::from)
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, format!("Product not found: {}", id)))
}

/// Fixed-width table for the terminal.
pub fn render_table(products: &[ProductDto]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<20} {:>7} {:>5} {:>6}",
        "ID", "PRODUCT", "CURRENT", "NORM", "ORDER"
    );
    for p in products {
        let order = if p.needs_order {
            p.order_quantity.to_string()
        } else {
            "-".to_string()
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<20} {:>7} {:>5} {:>6}",
            p.id, p.name, p.current_quantity, p.norm_quantity, order
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fridge_core::LocalInventory;

    #[tokio::test]
    async fn test_list_marks_products_to_order() {
        let store = LocalInventory::seeded();
        let products = list_products(&store).await.unwrap();

        assert_eq!(products.len(), 5);
        assert_eq!(products[4].name, "Olives");
        assert!(products[4].needs_order);
        assert_eq!(products[4].order_quantity, 5);
    }

    #[tokio::test]
    async fn test_remove_returns_updated_product() {
        let store = LocalInventory::seeded();
        let olives = remove_stock(&store, 5, 2).await.unwrap();

        assert_eq!(olives.current_quantity, 1);
        assert_eq!(olives.to_string(), "Olives: 1 / 8 (order 7)");
    }

    #[tokio::test]
    async fn test_remove_too_much_is_rejected() {
        let store = LocalInventory::seeded();
        let err = remove_stock(&store, 5, 4).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientQuantity);
        assert_eq!(list_products(&store).await.unwrap()[4].current_quantity, 3);
    }

    #[tokio::test]
    async fn test_add_and_set() {
        let store = LocalInventory::seeded();

        let milk = add_stock(&store, 3, 2).await.unwrap();
        assert!(!milk.needs_order);
        assert_eq!(milk.to_string(), "Milk: 20 / 20");

        let milk = set_stock(&store, 3, 0).await.unwrap();
        assert_eq!(milk.order_quantity, 20);
    }

    #[tokio::test]
    async fn test_invalid_amount_is_validation_error() {
        let store = LocalInventory::seeded();
        let err = add_stock(&store, 1, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let store = LocalInventory::seeded();
        let err = set_stock(&store, 42, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_table_layout() {
        let table = render_table(&[
            ProductDto::from(Product::new(3, "Milk", 18, 20)),
            ProductDto::from(Product::new(4, "Eggs", 30, 30)),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("PRODUCT"));
        assert!(lines[1].starts_with("   3  Milk"));
        assert!(lines[1].ends_with("     2"));
        assert!(lines[2].ends_with("     -"));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(ProductDto::from(Product::new(1, "Cheese", 12, 15))).unwrap();
        assert_eq!(json["currentQuantity"], 12);
        assert_eq!(json["needsOrder"], true);
        assert_eq!(json["orderQuantity"], 3);
    }
}
