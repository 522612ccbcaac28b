//! tablegate - create SQLite tables and insert rows over HTTP
//!
//! A request handler turns JSON payloads into statements and hands them to
//! a store gateway that owns the SQLite file. Table and column names are
//! interpolated into SQL text as given; see [`store::statement`].

pub mod cli;
pub mod http_server;
pub mod store;
