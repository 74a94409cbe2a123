use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fridge", version)]
#[command(about = "Restaurant inventory tracker and supplier order generator", long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not try the database, work on seed data
    #[arg(long, global = true)]
    pub offline: bool,

    /// Without a subcommand the interactive shell starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show where products come from
    Status,

    /// List products with current and required quantities
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add packs to a product
    Add {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Remove packs from a product
    #[command(alias = "rm")]
    Remove {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Set the current quantity of a product
    Set {
        id: i64,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Generate the supplier order and save it as a text file
    Order {
        /// Directory for the order file (default: Documents)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Restaurant name on the order
        #[arg(short, long)]
        restaurant: Option<String>,

        /// Print only, do not write a file
        #[arg(long)]
        no_save: bool,
    },

    /// Write a binary (protobuf) export
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },

    /// Load quantities from a binary product export
    Import { path: PathBuf },

    /// Interactive shell
    Shell,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ExportTarget {
    /// All products
    Products { path: PathBuf },

    /// The current supplier order
    Order {
        path: PathBuf,

        /// Restaurant name on the order
        #[arg(short, long)]
        restaurant: Option<String>,
    },
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "fridge", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    #[command(flatten)]
    Inventory(Command),

    /// Reconnect to the database
    Refresh,

    /// Leave the shell
    #[command(alias = "exit", alias = "q")]
    Quit,
}
