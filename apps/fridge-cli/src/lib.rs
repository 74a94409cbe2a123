//! # Fridge CLI Library
//!
//! Core library for the `fridge` binary: startup, state, and commands.
//!
//! ## Module Organization
//! ```text
//! fridge_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── args.rs         ◄─── clap definitions
//! ├── shell.rs        ◄─── interactive loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + FRIDGE_* env)
//! │   └── inventory.rs◄─── Live database or local seed data
//! ├── commands/
//! │   ├── mod.rs      ◄─── execute(): dispatch + output
//! │   ├── product.rs  ◄─── list / add / remove / set
//! │   ├── order.rs    ◄─── supplier order
//! │   └── export.rs   ◄─── protobuf export / import
//! └── error.rs        ◄─── ApiError shown to the operator
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{Cli, Command};
use error::ApiError;
use state::{AppConfig, InventoryState};

/// Runs the `fridge` binary.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, stderr                        │
/// │     • Default: warn,fridge=info,sqlx=warn (override with RUST_LOG)      │
/// │                                                                         │
/// │  2. Parse Arguments & Load Config ────────────────────────────────────► │
/// │     • --config or the platform config dir, then FRIDGE_* env vars      │
/// │                                                                         │
/// │  3. Resolve Inventory ────────────────────────────────────────────────► │
/// │     • try each connection profile once, in order                        │
/// │     • nothing reachable: local mode on seed data                        │
/// │                                                                         │
/// │  4. Run Command (or the shell when none given) ───────────────────────► │
/// │                                                                         │
/// │  5. Close the database handle ────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::FAILURE
        }
    }
}

/// Runs parsed arguments to completion.
pub async fn run_cli(cli: Cli) -> Result<(), ApiError> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.offline {
        config.offline = true;
    }

    let mut inventory = InventoryState::connect(&config).await;
    info!(status = %inventory.status(), "Inventory ready");

    let result = match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            shell::run_shell(&mut inventory, &config, stdin.lock(), &mut stdout).await
        }
        command => {
            if !inventory.is_live() {
                warn!("{}", inventory.status());
            }
            let mut stdout = io::stdout().lock();
            commands::execute(command, &inventory, &config, &mut stdout).await
        }
    };

    inventory.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fridge_db=trace` - Trace the connection resolver only
/// - Default: warnings, plus info from the fridge crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,fridge=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
