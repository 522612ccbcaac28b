//! CLI argument definitions using clap
//!
//! Commands:
//! - tablegate init
//! - tablegate serve
//! - tablegate tables
//! - tablegate scan <table>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tablegate - create SQLite tables and insert rows over HTTP
#[derive(Parser, Debug)]
#[command(name = "tablegate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level when not verbose (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Where configuration and the store file come from
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file if it does not exist
    Init {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List tables in the database
    Tables {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Print every row of a table
    Scan {
        /// Table to scan
        table: String,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
