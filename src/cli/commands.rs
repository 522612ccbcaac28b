//! CLI command implementations
//!
//! `serve` is the only long-running command. The rest open the store,
//! do one thing, print one JSON line and exit.

use serde_json::{json, Value};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::store::StoreGateway;

use super::args::{Command, ConfigArgs};
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    init_logging(cli.verbose, &cli.log_level);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, host, port } => serve(&config, host, port),
        Command::Tables { config } => tables(&config),
        Command::Scan { table, config } => scan(&config, &table),
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug and
/// `level` is used as given. Logs go to stderr so stdout stays JSON.
pub fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("tablegate={level},tower_http={level}")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the config file (if any) and apply the `--database` override
pub fn resolve_config(args: &ConfigArgs) -> CliResult<HttpServerConfig> {
    let mut config = HttpServerConfig::load_or_default(args.config.as_deref())?;

    if let Some(database) = &args.database {
        config.database_path = database.clone();
    }

    config.validate()?;
    Ok(config)
}

fn runtime() -> CliResult<Runtime> {
    Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Gateway for an existing database file
fn open_existing(config: &HttpServerConfig) -> CliResult<StoreGateway> {
    let gateway = StoreGateway::new(config.database_path.clone());
    if !gateway.path().exists() {
        return Err(CliError::not_initialized());
    }
    Ok(gateway)
}

/// Create the database file if absent
///
/// Running it against an existing file is not an error.
pub fn init(args: &ConfigArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let gateway = StoreGateway::new(config.database_path.clone());

    let created = gateway.ensure_exists()?;
    info!(database = %gateway.path().display(), created, "store initialized");

    write_response(json!({
        "initialized": true,
        "created": created,
        "database": gateway.path().display().to_string(),
    }))
}

/// Create the database file if absent, then serve HTTP until ctrl-c
pub fn serve(args: &ConfigArgs, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = resolve_config(args)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config.validate()?;

    let gateway = StoreGateway::new(config.database_path.clone());
    if gateway.ensure_exists()? {
        info!(database = %gateway.path().display(), "created empty store");
    }

    let server = HttpServer::with_config(config);

    runtime()?.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the names of all tables in the catalog
pub fn tables(args: &ConfigArgs) -> CliResult<()> {
    let config = resolve_config(args)?;
    let gateway = open_existing(&config)?;

    let names = runtime()?.block_on(gateway.list_tables())?;
    write_response(json!({ "tables": names }))
}

/// Print every row of `table` as a JSON array of objects
pub fn scan(args: &ConfigArgs, table: &str) -> CliResult<()> {
    let rows = scan_rows(args, table)?;
    write_response(json!({ "table": table, "rows": rows }))
}

fn scan_rows(args: &ConfigArgs, table: &str) -> CliResult<Vec<Value>> {
    let config = resolve_config(args)?;
    let gateway = open_existing(&config)?;

    let rows = runtime()?.block_on(gateway.fetch_all(table))?;
    Ok(rows.iter().map(|row| row.to_json()).collect())
}
