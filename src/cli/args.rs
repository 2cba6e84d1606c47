//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Interactive client registration with tax id validation and duplicate detection
#[derive(Parser, Debug)]
#[command(name = "clientreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// SQLite database file (overrides config and CLIENTREG_DB_PATH)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// Config file (default: ~/.config/clientreg/clientreg.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register clients interactively (default)
    Register,

    /// Register one client non-interactively
    Add {
        /// Client name
        #[arg(short, long)]
        name: String,
        /// Tax id, 123.456.789-09 or 12345678909
        #[arg(short, long)]
        tax_id: String,
    },

    /// Show the client registered under a tax id
    Show {
        /// Tax id, punctuation optional
        tax_id: String,
    },

    /// List all registered clients
    List,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file and database locations
    Path,
    /// Print a commented config template
    Template,
}
