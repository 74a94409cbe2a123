//! # Order Commands
//!
//! Builds the supplier order from the current snapshot and saves it.
//!
//! The report is always returned to the caller, even when saving fails, so
//! the operator can still read or copy it.

use std::path::{Path, PathBuf};

use chrono::Local;
use fridge_core::{InventoryStore, OrderReport};
use fridge_export::write_report;
use tracing::{info, warn};

use crate::error::ApiError;

/// A generated order plus what happened when saving it.
#[derive(Debug)]
pub struct OrderOutcome {
    pub report: OrderReport,
    /// Path of the written file, when saving succeeded.
    pub saved_to: Option<PathBuf>,
    /// Why saving failed, when it did.
    pub save_error: Option<ApiError>,
}

/// Generates the order for the current snapshot, stamped with local time.
pub async fn generate_order(
    store: &impl InventoryStore,
    restaurant: &str,
) -> Result<OrderReport, ApiError> {
    let products = store.list_all().await?;
    let report = OrderReport::generate(&products, restaurant, Local::now().naive_local());
    info!(
        restaurant,
        lines = report.lines.len(),
        total_packs = report.total_packs,
        "Generated supplier order"
    );
    Ok(report)
}

/// Generates the order and, if `save_dir` is given, writes it there.
pub async fn create_order(
    store: &impl InventoryStore,
    restaurant: &str,
    save_dir: Option<&Path>,
    prefix: &str,
) -> Result<OrderOutcome, ApiError> {
    let report = generate_order(store, restaurant).await?;

    let (saved_to, save_error) = match save_dir {
        None => (None, None),
        Some(dir) => match write_report(dir, prefix, &report) {
            Ok(path) => (Some(path), None),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Could not save supplier order");
                (None, Some(ApiError::from(e)))
            }
        },
    };

    Ok(OrderOutcome {
        report,
        saved_to,
        save_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use fridge_core::LocalInventory;

    #[tokio::test]
    async fn test_order_from_seed_data() {
        let store = LocalInventory::seeded();
        let report = generate_order(&store, "Gourmet").await.unwrap();

        // 5 + 3 + 2 + 5 + 5
        assert_eq!(report.total_packs, 20);
        assert_eq!(report.lines.len(), 5);
        assert_eq!(report.lines[0].to_string(), "Cottage cheese: 5 packs");
    }

    #[tokio::test]
    async fn test_order_is_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalInventory::seeded();

        let outcome = create_order(&store, "Gourmet", Some(dir.path()), "supplier_order")
            .await
            .unwrap();

        let path = outcome.saved_to.unwrap();
        assert!(outcome.save_error.is_none());
        assert_eq!(std::fs::read_to_string(path).unwrap(), outcome.report.render());
    }

    #[tokio::test]
    async fn test_save_failure_keeps_report() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let store = LocalInventory::seeded();

        let outcome = create_order(&store, "Gourmet", Some(&blocker), "supplier_order")
            .await
            .unwrap();

        assert!(outcome.saved_to.is_none());
        assert_eq!(outcome.save_error.unwrap().code, ErrorCode::WriteFailed);
        assert!(outcome.report.render().starts_with("SUPPLIER ORDER"));
    }

    #[tokio::test]
    async fn test_print_only() {
        let store = LocalInventory::seeded();
        let outcome = create_order(&store, "Bistro", None, "supplier_order").await.unwrap();

        assert!(outcome.saved_to.is_none());
        assert!(outcome.save_error.is_none());
        assert_eq!(outcome.report.restaurant, "Bistro");
    }
}
