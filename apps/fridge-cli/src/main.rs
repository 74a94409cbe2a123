//! # Fridge Manager Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        fridge (this binary)                             │
//! │                                                                         │
//! │  main.rs ────► starts the tokio runtime                                │
//! │  lib.rs ─────► logging, config, connection resolution, dispatch        │
//! │  commands/ ──► list, add, remove, set, order, export, import           │
//! │  shell.rs ───► the same commands in a prompt loop                      │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │        PostgreSQL (first reachable profile)  or  local seed data       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    fridge_cli::run().await
}
