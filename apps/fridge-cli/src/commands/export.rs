//! # Export Commands
//!
//! Binary (protobuf) export of products and orders, and import of a
//! product export.
//!
//! ## Import Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.pb ──► decode + validate                                      │
//! │                       │                                                 │
//! │           ┌───────────┴────────────┐                                    │
//! │           ▼                        ▼                                    │
//! │   Local: replace the whole   Live: set_quantity per id                 │
//! │          in-memory list            unknown ids are skipped             │
//! │                                    ids whose name differs are skipped  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::Path;

use fridge_core::{CoreError, InventoryStore};
use fridge_export::ProtobufCodec;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::InventoryState;

/// What an import changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Products whose quantity was written.
    pub updated: usize,
    /// Ids present in the file but not in the database.
    pub skipped: Vec<i64>,
    /// Ids whose name in the file differs from the database row.
    pub mismatched: Vec<i64>,
    /// The in-memory list was swapped out wholesale.
    pub replaced: bool,
}

/// Writes every product to `path`. Returns the product count.
pub async fn export_products(store: &impl InventoryStore, path: &Path) -> Result<usize, ApiError> {
    let products = store.list_all().await?;
    ProtobufCodec::new().export_products(&products, path)?;
    Ok(products.len())
}

/// Writes the current supplier order to `path`. Returns the total packs.
pub async fn export_order(
    store: &impl InventoryStore,
    restaurant: &str,
    path: &Path,
) -> Result<i64, ApiError> {
    let products = store.list_all().await?;
    let codec = ProtobufCodec::new();
    codec.export_order(&products, restaurant, path)?;

    let total = products
        .iter()
        .filter(|p| p.needs_order())
        .map(|p| p.order_quantity())
        .sum();
    Ok(total)
}

/// Loads a product export into the current inventory.
pub async fn import_products(
    inventory: &InventoryState,
    path: &Path,
) -> Result<ImportSummary, ApiError> {
    let products = ProtobufCodec::new().import_products(path)?;
    let count = products.len();

    if !inventory.is_live() {
        inventory.replace_local(products);
        info!(count, "Replaced local products from import");
        return Ok(ImportSummary {
            updated: count,
            skipped: Vec::new(),
            mismatched: Vec::new(),
            replaced: true,
        });
    }

    let names: HashMap<i64, String> = inventory
        .list_all()
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let mut summary = ImportSummary {
        updated: 0,
        skipped: Vec::new(),
        mismatched: Vec::new(),
        replaced: false,
    };
    for product in products {
        if let Some(current) = names.get(&product.id) {
            if *current != product.name {
                warn!(
                    id = product.id,
                    file = %product.name,
                    database = %current,
                    "Skipping product whose name differs"
                );
                summary.mismatched.push(product.id);
                continue;
            }
        }
        match inventory.set_quantity(product.id, product.current_quantity).await {
            Ok(()) => summary.updated += 1,
            Err(CoreError::ProductNotFound(id)) => {
                warn!(id, name = %product.name, "Skipping unknown product from import");
                summary.skipped.push(id);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        updated = summary.updated,
        skipped = summary.skipped.len(),
        mismatched = summary.mismatched.len(),
        "Imported product quantities"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use fridge_core::{LocalInventory, Product};
    use fridge_db::schema;
    use fridge_db::Database;

    #[tokio::test]
    async fn test_export_then_import_local() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.pb");

        let source = LocalInventory::seeded();
        source.set_quantity(5, 8).await.unwrap();
        assert_eq!(export_products(&source, &path).await.unwrap(), 5);

        let target = InventoryState::local();
        let summary = import_products(&target, &path).await.unwrap();

        assert!(summary.replaced);
        assert_eq!(summary.updated, 5);
        assert_eq!(target.list_all().await.unwrap()[4].current_quantity, 8);
    }

    #[tokio::test]
    async fn test_export_order_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.pb");

        let total = export_order(&LocalInventory::seeded(), "Gourmet", &path).await.unwrap();

        assert_eq!(total, 20);
        let bytes = std::fs::read(&path).unwrap();
        let order = ProtobufCodec::new().decode_order(&bytes).unwrap();
        assert_eq!(order.total_packs, 20);
        assert_eq!(order.restaurant_name, "Gourmet");
    }

    #[tokio::test]
    async fn test_import_into_live_skips_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.pb");
        let exported = LocalInventory::new(vec![
            Product::new(1, "Cottage cheese", 9, 10),
            Product::new(77, "Truffles", 1, 2),
        ]);
        export_products(&exported, &path).await.unwrap();

        let db = Database::in_memory().await.unwrap();
        schema::bootstrap(&db).await.unwrap();
        let inventory = InventoryState::Live {
            repo: db.products(),
            database: db,
            profile: "test".into(),
        };

        let summary = import_products(&inventory, &path).await.unwrap();

        assert!(!summary.replaced);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.skipped, vec![77]);
        assert!(summary.mismatched.is_empty());
        assert_eq!(inventory.list_all().await.unwrap()[0].current_quantity, 9);
    }

    #[tokio::test]
    async fn test_import_into_live_skips_renamed_products() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.pb");
        let exported = LocalInventory::new(vec![
            Product::new(2, "Cheese", 1, 15),
            Product::new(3, "Oat milk", 0, 20),
        ]);
        export_products(&exported, &path).await.unwrap();

        let db = Database::in_memory().await.unwrap();
        schema::bootstrap(&db).await.unwrap();
        let inventory = InventoryState::Live {
            repo: db.products(),
            database: db,
            profile: "test".into(),
        };

        let summary = import_products(&inventory, &path).await.unwrap();

        assert_eq!(summary.updated, 1);
        assert_eq!(summary.mismatched, vec![3]);
        let products = inventory.list_all().await.unwrap();
        assert_eq!(products[1].current_quantity, 1);
        assert_eq!(products[2].name, "Milk");
        assert_eq!(products[2].current_quantity, 18);
    }

    #[tokio::test]
    async fn test_import_with_repeated_id_leaves_local_list_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.pb");
        let bytes = ProtobufCodec::new().encode_products(
            &[Product::new(1, "Milk", 5, 10), Product::new(1, "Eggs", 7, 10)],
            chrono::Local::now().naive_local(),
        );
        std::fs::write(&path, bytes).unwrap();

        let inventory = InventoryState::local();
        let err = import_products(&inventory, &path).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            inventory.list_all().await.unwrap(),
            fridge_core::seed::default_products()
        );
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_products(&InventoryState::local(), &dir.path().join("nope.pb"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
    }
}
