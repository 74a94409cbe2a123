//! # fridge-core: Pure Inventory Logic for Fridge Manager
//!
//! This crate holds the inventory domain with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Fridge Manager Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fridge CLI (apps/fridge-cli)                 │   │
//! │  │     list ──► add/remove ──► order ──► export                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ InventoryStore trait                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fridge-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │  report   │  │ validation│  │   │
//! │  │   │  Product  │  │ Inventory │  │OrderReport│  │  quantity │  │   │
//! │  │   │ NewProduct│  │  Store    │  │ OrderLine │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                  │   │
//! │  │   │   seed    │  │   local   │  NO I/O • NO DATABASE            │   │
//! │  │   │ 5 defaults│  │ in-memory │                                  │   │
//! │  │   └───────────┘  └───────────┘                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 fridge-db (Database Layer)                      │   │
//! │  │        ConnectionResolver, ProductRepository (PostgreSQL)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct)
//! - [`store`] - The `InventoryStore` trait shared by the live and local stores
//! - [`local`] - In-memory store used when no database is reachable
//! - [`seed`] - The fixed default product list
//! - [`report`] - Supplier order generation
//! - [`validation`] - Quantity and name checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fridge_core::{OrderReport, Product};
//!
//! let products = vec![
//!     Product::new(1, "Milk", 18, 20),
//!     Product::new(2, "Eggs", 30, 30),
//! ];
//! let at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//!
//! let report = OrderReport::generate(&products, "Gourmet", at);
//! assert_eq!(report.total_packs, 2);
//! assert_eq!(report.lines[0].to_string(), "Milk: 2 packs");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod local;
pub mod report;
pub mod seed;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use local::LocalInventory;
pub use report::{OrderLine, OrderReport, StockLine};
pub use store::InventoryStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Restaurant label printed on supplier orders when none is configured.
pub const DEFAULT_RESTAURANT: &str = "Gourmet";
