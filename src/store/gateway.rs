//! # Store Gateway
//!
//! Owns access to the SQLite file backing the service. There is no
//! long-lived connection: each operation opens its own connection on a
//! blocking thread and drops it before returning, on success or failure.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::row::Row;
use super::statement::{self, CellValue};

const TABLE_EXISTS_SQL: &str = "SELECT name FROM sqlite_master WHERE type='table' AND name=?1";
const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name";

/// Gateway to a single SQLite database file
#[derive(Debug, Clone)]
pub struct StoreGateway {
    path: PathBuf,
}

impl StoreGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty database file if none exists.
    ///
    /// Returns `true` when the file was created by this call.
    pub fn ensure_exists(&self) -> StoreResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.path)?;
        drop(conn);
        debug!(path = %self.path.display(), "created store file");
        Ok(true)
    }

    /// Run `f` against a freshly opened connection on a blocking thread.
    ///
    /// The connection is dropped when `f` returns.
    async fn with_connection<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::TaskJoin(e.to_string()))?
    }

    /// Whether the catalog lists a table called `name`
    pub async fn table_exists(&self, name: &str) -> StoreResult<bool> {
        let name = name.to_string();
        self.with_connection(move |conn| {
            let found = conn
                .query_row(TABLE_EXISTS_SQL, params![name], |_| Ok(()))
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }

    /// Names of all tables in the catalog, ordered by name
    pub async fn list_tables(&self) -> StoreResult<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(LIST_TABLES_SQL)?;
            let names = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names)
        })
        .await
    }

    /// Create `name` with the literal column definition text `column_defs`.
    ///
    /// Existence is checked first on its own connection, so two concurrent
    /// creates of the same table can both pass the check; the loser then
    /// fails with the store's own error.
    pub async fn create_table(&self, name: &str, column_defs: &str) -> StoreResult<()> {
        if self.table_exists(name).await? {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        let sql = statement::create_table_sql(name, column_defs);
        debug!(%sql, "create table");
        self.with_connection(move |conn| {
            conn.execute(&sql, [])?;
            Ok(())
        })
        .await
    }

    /// Insert one row into `name`.
    ///
    /// `column_names` is the literal column list text. Values are bound
    /// positionally; a count mismatch is left for SQLite to reject.
    pub async fn insert_row(
        &self,
        name: &str,
        column_names: &str,
        values: Vec<CellValue>,
    ) -> StoreResult<()> {
        debug!(
            sql = %statement::insert_literal_sql(name, column_names, &values),
            "insert row"
        );
        let sql = statement::insert_sql(name, column_names, values.len());
        self.with_connection(move |conn| {
            conn.execute(&sql, params_from_iter(values.iter()))?;
            Ok(())
        })
        .await
    }

    /// Every row of `name`, in the store's scan order
    pub async fn fetch_all(&self, name: &str) -> StoreResult<Vec<Row>> {
        let table = name.to_string();
        let sql = statement::select_all_sql(name);
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();

            let rows = stmt
                .query_map([], |row| {
                    let mut fields = Vec::with_capacity(columns.len());
                    for (i, column) in columns.iter().enumerate() {
                        fields.push((column.clone(), row.get::<_, SqlValue>(i)?));
                    }
                    Ok(Row::new(table.clone(), fields))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }
}
