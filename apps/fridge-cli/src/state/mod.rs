//! # State Module
//!
//! Application state for the CLI.
//!
//! Two separate state types, each passed only to the commands that need it:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │   InventoryState         │      │   AppConfig                  │    │
//! │  │                          │      │                              │    │
//! │  │  Live { repo, database } │      │  restaurant                  │    │
//! │  │  Local(LocalInventory)   │      │  database profiles + policy  │    │
//! │  │                          │      │  report directory / prefix   │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! │                                                                         │
//! │  • InventoryState: replaced on `refresh` in the shell                  │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;

pub use config::{
    default_report_dir, AppConfig, ConfigError, DatabaseSettings, MissingSchemaPolicy,
    ReportSettings,
};
pub use inventory::{InventoryState, LOCAL_STATUS};
