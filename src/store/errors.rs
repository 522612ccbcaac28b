//! Store gateway error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the store gateway
#[derive(Debug, Error)]
pub enum StoreError {
    /// Create target is already present in the catalog
    #[error("Table already exists")]
    AlreadyExists(String),

    /// The backing store rejected a statement
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error while preparing the store file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking task running the statement did not complete
    #[error("Task join error: {0}")]
    TaskJoin(String),
}

impl StoreError {
    /// Whether this is the create-table conflict
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists(_))
    }
}
