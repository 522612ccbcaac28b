//! # HTTP Server Module
//!
//! JSON-over-HTTP front end for the store gateway.
//!
//! # Endpoints
//!
//! - `POST /create_table` - Create a table from column names and types
//! - `POST /write_query` - Insert one row

pub mod config;
pub mod errors;
pub mod server;
pub mod table_routes;

pub use config::{ErrorStatusPolicy, HttpServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use table_routes::{table_routes, TableState};
