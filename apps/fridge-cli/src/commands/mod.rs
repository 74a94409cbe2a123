//! # Commands Module
//!
//! Everything the `fridge` binary and the interactive shell can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch + terminal output)
//! ├── product.rs  ◄─── list, add, remove, set
//! ├── order.rs    ◄─── supplier order generation and saving
//! └── export.rs   ◄─── protobuf export / import
//! ```
//!
//! ## How Commands Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  `fridge remove 5 2`            shell: `remove 5 2`                     │
//! │         │                               │                               │
//! │         └──────────────┬────────────────┘                               │
//! │                        ▼                                                │
//! │  execute(Command::Remove { id: 5, amount: 2 }, &inventory, &config, out)│
//! │                        │                                                │
//! │                        ▼                                                │
//! │  product::remove_stock(&inventory, 5, 2) -> Result<ProductDto, ApiError>│
//! │                        │                                                │
//! │                        ▼                                                │
//! │  "Removed 2 packs. Olives: 1 / 8 (order 7)"  written to `out`          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command function receives only what it needs: stock commands take
//! any [`InventoryStore`](fridge_core::InventoryStore), import takes the
//! [`InventoryState`] because it may swap the local list.

pub mod export;
pub mod order;
pub mod product;

use std::io::Write;

use crate::args::{Command, ExportTarget};
use crate::error::ApiError;
use crate::state::{AppConfig, InventoryState};

/// Runs one command and writes its output.
pub async fn execute<W: Write>(
    command: Command,
    inventory: &InventoryState,
    config: &AppConfig,
    out: &mut W,
) -> Result<(), ApiError> {
    match command {
        Command::Status => {
            let products = product::list_products(inventory).await?;
            let to_order = products.iter().filter(|p| p.needs_order).count();
            writeln!(out, "{}", inventory.status())?;
            writeln!(out, "Restaurant: '{}'", config.restaurant)?;
            writeln!(
                out,
                "{} products, {} below their norm",
                products.len(),
                to_order
            )?;
        }

        Command::List { json } => {
            let products = product::list_products(inventory).await?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&products)?)?;
            } else {
                write!(out, "{}", product::render_table(&products))?;
            }
        }

        Command::Add { id, amount } => {
            let updated = product::add_stock(inventory, id, amount).await?;
            writeln!(out, "Added {} packs. {}", amount, updated)?;
        }

        Command::Remove { id, amount } => {
            let updated = product::remove_stock(inventory, id, amount).await?;
            writeln!(out, "Removed {} packs. {}", amount, updated)?;
        }

        Command::Set { id, quantity } => {
            let updated = product::set_stock(inventory, id, quantity).await?;
            writeln!(out, "Updated. {}", updated)?;
        }

        Command::Order {
            output_dir,
            restaurant,
            no_save,
        } => {
            let restaurant = restaurant.unwrap_or_else(|| config.restaurant.clone());
            let save_dir = (!no_save).then(|| output_dir.unwrap_or_else(|| config.report_dir()));

            let outcome = order::create_order(
                inventory,
                &restaurant,
                save_dir.as_deref(),
                &config.reports.file_prefix,
            )
            .await?;

            write!(out, "{}", outcome.report)?;
            if let Some(path) = &outcome.saved_to {
                writeln!(out)?;
                writeln!(out, "Order saved to {}", path.display())?;
            }
            if let Some(e) = outcome.save_error {
                return Err(e);
            }
        }

        Command::Export { target } => match target {
            ExportTarget::Products { path } => {
                let count = export::export_products(inventory, &path).await?;
                writeln!(out, "Exported {} products to {}", count, path.display())?;
            }
            ExportTarget::Order { path, restaurant } => {
                let restaurant = restaurant.unwrap_or_else(|| config.restaurant.clone());
                let total = export::export_order(inventory, &restaurant, &path).await?;
                writeln!(
                    out,
                    "Exported order ({} packs) to {}",
                    total,
                    path.display()
                )?;
            }
        },

        Command::Import { path } => {
            let summary = export::import_products(inventory, &path).await?;
            if summary.replaced {
                writeln!(out, "Loaded {} products into local mode", summary.updated)?;
            } else {
                writeln!(out, "Updated {} products", summary.updated)?;
                if !summary.skipped.is_empty() {
                    writeln!(out, "Skipped unknown ids: {:?}", summary.skipped)?;
                }
                if !summary.mismatched.is_empty() {
                    writeln!(out, "Skipped ids with a different name: {:?}", summary.mismatched)?;
                }
            }
        }

        Command::Shell => {
            writeln!(out, "Already in the shell")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use fridge_core::InventoryStore;

    async fn run(command: Command, inventory: &InventoryState, config: &AppConfig) -> (String, Result<(), ApiError>) {
        let mut out = Vec::new();
        let result = execute(command, inventory, config, &mut out).await;
        (String::from_utf8(out).unwrap(), result)
    }

    #[tokio::test]
    async fn test_status_in_local_mode() {
        let (out, result) = run(Command::Status, &InventoryState::local(), &AppConfig::default()).await;

        result.unwrap();
        assert!(out.starts_with("Local mode (PostgreSQL unavailable)\n"));
        assert!(out.contains("Restaurant: 'Gourmet'"));
        assert!(out.contains("5 products, 5 below their norm"));
    }

    #[tokio::test]
    async fn test_remove_reports_new_level() {
        let inventory = InventoryState::local();
        let (out, result) = run(Command::Remove { id: 5, amount: 2 }, &inventory, &AppConfig::default()).await;

        result.unwrap();
        assert_eq!(out, "Removed 2 packs. Olives: 1 / 8 (order 7)\n");
    }

    #[tokio::test]
    async fn test_failed_command_prints_nothing() {
        let inventory = InventoryState::local();
        let (out, result) = run(Command::Remove { id: 5, amount: 9 }, &inventory, &AppConfig::default()).await;

        assert!(out.is_empty());
        assert_eq!(result.unwrap_err().code, ErrorCode::InsufficientQuantity);
        assert_eq!(inventory.list_all().await.unwrap()[4].current_quantity, 3);
    }

    #[tokio::test]
    async fn test_list_json() {
        let (out, result) = run(Command::List { json: true }, &InventoryState::local(), &AppConfig::default()).await;

        result.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 5);
        assert_eq!(parsed[2]["name"], "Milk");
    }

    #[tokio::test]
    async fn test_order_saves_to_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.reports.output_dir = Some(dir.path().to_path_buf());

        let command = Command::Order {
            output_dir: None,
            restaurant: Some("Bistro".into()),
            no_save: false,
        };
        let (out, result) = run(command, &InventoryState::local(), &config).await;

        result.unwrap();
        assert!(out.contains("Restaurant: 'Bistro'"));
        assert!(out.contains("TOTAL: 20 packs"));
        assert!(out.contains("Order saved to"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_order_save_failure_still_prints_report() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let command = Command::Order {
            output_dir: Some(blocker),
            restaurant: None,
            no_save: false,
        };
        let (out, result) = run(command, &InventoryState::local(), &AppConfig::default()).await;

        assert!(out.starts_with("SUPPLIER ORDER"));
        assert_eq!(result.unwrap_err().code, ErrorCode::WriteFailed);
    }

    #[tokio::test]
    async fn test_order_no_save() {
        let command = Command::Order {
            output_dir: None,
            restaurant: None,
            no_save: true,
        };
        let (out, result) = run(command, &InventoryState::local(), &AppConfig::default()).await;

        result.unwrap();
        assert!(!out.contains("Order saved to"));
    }
}
