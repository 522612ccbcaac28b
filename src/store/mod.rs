//! # Store
//!
//! Gateway to the embedded SQLite file: catalog lookups, table creation,
//! row insertion and full scans, plus the statement text they run.

pub mod errors;
pub mod gateway;
pub mod row;
pub mod statement;

pub use errors::{StoreError, StoreResult};
pub use gateway::StoreGateway;
pub use row::Row;
pub use statement::CellValue;
