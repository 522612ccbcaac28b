//! CLI module for tablegate
//!
//! Provides command-line interface for:
//! - init: Create the database file
//! - serve: Run the HTTP server
//! - tables: List tables in the catalog
//! - scan: Dump every row of one table

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ConfigArgs};
pub use commands::{init, init_logging, resolve_config, run, run_command, scan, serve, tables};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
