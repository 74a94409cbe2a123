//! # Interactive Shell
//!
//! A line-oriented loop over the same commands as the binary, plus
//! `refresh` (retry the database) and `quit`.
//!
//! ```text
//! fridge> list
//! fridge> remove 5 2
//! Removed 2 packs. Olives: 1 / 8 (order 7)
//! fridge> remove 5 9
//! error: Only 1 packs of product 5 left, cannot remove 9
//! fridge> quit
//! ```
//!
//! A failing command never ends the loop; only `quit` or end of input does.

use std::io::{BufRead, Write};

use clap::Parser;
use tracing::{debug, info};

use crate::args::{Command, ShellCommand, ShellLine};
use crate::commands;
use crate::error::ApiError;
use crate::state::{AppConfig, InventoryState};

const PROMPT: &str = "fridge> ";

/// Runs the shell until `quit` or end of input.
pub async fn run_shell<R: BufRead, W: Write>(
    inventory: &mut InventoryState,
    config: &AppConfig,
    input: R,
    out: &mut W,
) -> Result<(), ApiError> {
    writeln!(out, "{}", inventory.status())?;
    writeln!(out, "Type 'help' for commands, 'quit' to leave.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words.iter().copied()) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Also covers `help` and `--help`
                write!(out, "{}", e)?;
                continue;
            }
        };

        match parsed.command {
            ShellCommand::Quit => break,
            ShellCommand::Refresh => {
                inventory.close().await;
                *inventory = InventoryState::connect(config).await;
                info!(live = inventory.is_live(), "Shell reconnected");
                writeln!(out, "{}", inventory.status())?;
            }
            ShellCommand::Inventory(Command::Shell) => {
                writeln!(out, "Already in the shell")?;
            }
            ShellCommand::Inventory(command) => {
                debug!(?command, "Shell command");
                if let Err(e) = commands::execute(command, inventory, config, &mut *out).await {
                    writeln!(out, "error: {}", e.message)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fridge_core::InventoryStore;
    use std::io::Cursor;

    fn offline() -> AppConfig {
        AppConfig {
            offline: true,
            ..AppConfig::default()
        }
    }

    async fn session(script: &str) -> (InventoryState, String) {
        let config = offline();
        let mut inventory = InventoryState::local();
        let mut out = Vec::new();
        run_shell(&mut inventory, &config, Cursor::new(script.to_string()), &mut out)
            .await
            .unwrap();
        (inventory, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_commands_share_state() {
        let (inventory, out) = session("remove 5 2\nadd 3 2\nquit\n").await;

        assert!(out.contains("Removed 2 packs. Olives: 1 / 8 (order 7)"));
        assert!(out.contains("Added 2 packs. Milk: 20 / 20"));
        let products = inventory.list_all().await.unwrap();
        assert_eq!(products[4].current_quantity, 1);
        assert_eq!(products[2].current_quantity, 20);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_loop() {
        let (_, out) = session("remove 5 9\nfrobnicate\nstatus\n").await;

        assert!(out.contains("error: Only 3 packs of product 5 left, cannot remove 9"));
        assert!(out.contains("unrecognized subcommand"));
        assert!(out.contains("5 products, 5 below their norm"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let (inventory, _) = session("exit\nremove 1 1\n").await;
        assert_eq!(inventory.list_all().await.unwrap()[0].current_quantity, 5);
    }

    #[tokio::test]
    async fn test_help_lists_shell_commands() {
        let (_, out) = session("help\n").await;
        assert!(out.contains("refresh"));
        assert!(out.contains("quit"));
        assert!(out.contains("order"));
    }

    #[tokio::test]
    async fn test_refresh_offline_stays_local() {
        let (inventory, out) = session("refresh\n").await;

        assert!(!inventory.is_live());
        assert_eq!(out.matches("Local mode (PostgreSQL unavailable)").count(), 2);
    }

    #[tokio::test]
    async fn test_blank_lines_and_eof() {
        let (_, out) = session("\n   \n").await;
        assert_eq!(out.matches(PROMPT).count(), 3);
    }
}
