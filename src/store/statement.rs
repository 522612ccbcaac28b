//! # Statement Construction
//!
//! Every place where a caller-supplied identifier is spliced into SQL text
//! lives in this file. Table and column names cannot be bound as parameters,
//! so they are interpolated verbatim: a caller controls the identifier text
//! completely, including anything that would change the statement's meaning.
//! Values never take that path; they are bound with `?N` placeholders.

use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};
use serde_json::{Number, Value};

/// A scalar cell value supplied by a caller for insertion
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl CellValue {
    /// Convert a JSON scalar into a cell value.
    ///
    /// Returns `None` for `null`, arrays and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(CellValue::Text(s.clone())),
            Value::Bool(b) => Some(CellValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(CellValue::Integer(i)),
                None => n.as_f64().map(CellValue::Real),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Render this value as a SQL literal.
    ///
    /// Text is single-quoted without escaping, booleans become `1`/`0`
    /// before any numeric handling, numbers keep their JSON spelling.
    pub fn literal(&self) -> String {
        match self {
            CellValue::Text(s) => format!("'{}'", s),
            CellValue::Bool(b) => i64::from(*b).to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Real(f) => Number::from_f64(*f)
                .map(|n| n.to_string())
                .unwrap_or_else(|| f.to_string()),
        }
    }
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            CellValue::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            CellValue::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            CellValue::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
        })
    }
}

/// Zip column names and types positionally into `"name type, name type"`
pub fn column_definitions<N, T>(names: &[N], types: &[T]) -> String
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    names
        .iter()
        .zip(types.iter())
        .map(|(name, ty)| format!("{} {}", name.as_ref(), ty.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join column names into `"a, b, c"`
pub fn column_list<N: AsRef<str>>(names: &[N]) -> String {
    names
        .iter()
        .map(|n| n.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join the literal rendering of each value with `, `
pub fn values_literal(values: &[CellValue]) -> String {
    values
        .iter()
        .map(CellValue::literal)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE TABLE {table} ({column_defs})`
pub fn create_table_sql(table: &str, column_defs: &str) -> String {
    format!("CREATE TABLE {} ({})", table, column_defs)
}

/// `INSERT INTO {table} ({columns}) VALUES (?1, ..., ?n)` for `value_count` values
pub fn insert_sql(table: &str, columns: &str, value_count: usize) -> String {
    let placeholders = (1..=value_count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders)
}

/// The insert statement with values rendered as literals instead of bound.
///
/// Used for logging what a row insert amounts to; never executed.
pub fn insert_literal_sql(table: &str, columns: &str, values: &[CellValue]) -> String {
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns,
        values_literal(values)
    )
}

/// `SELECT * FROM {table}`
pub fn select_all_sql(table: &str) -> String {
    format!("SELECT * FROM {}", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_definitions_zip() {
        let defs = column_definitions(&["id", "name"], &["INTEGER", "TEXT"]);
        assert_eq!(defs, "id INTEGER, name TEXT");
    }

    #[test]
    fn test_column_definitions_truncates_to_shorter() {
        let defs = column_definitions(&["id", "name", "extra"], &["INTEGER"]);
        assert_eq!(defs, "id INTEGER");
    }

    #[test]
    fn test_column_list() {
        assert_eq!(column_list(&["id", "name"]), "id, name");
        assert_eq!(column_list::<&str>(&[]), "");
    }

    #[test]
    fn test_bool_literal_is_integer() {
        assert_eq!(CellValue::Bool(true).literal(), "1");
        assert_eq!(CellValue::Bool(false).literal(), "0");
    }

    #[test]
    fn test_bool_from_json_takes_precedence_over_number() {
        let v = CellValue::from_json(&json!(true)).unwrap();
        assert_eq!(v, CellValue::Bool(true));
        assert_eq!(v.literal(), "1");
    }

    #[test]
    fn test_text_and_number_literals() {
        assert_eq!(CellValue::Text("x".into()).literal(), "'x'");
        assert_eq!(CellValue::from_json(&json!(42)).unwrap().literal(), "42");
        assert_eq!(CellValue::from_json(&json!(-7)).unwrap().literal(), "-7");
        assert_eq!(CellValue::from_json(&json!(1.5)).unwrap().literal(), "1.5");
    }

    #[test]
    fn test_non_scalars_rejected() {
        assert!(CellValue::from_json(&json!(null)).is_none());
        assert!(CellValue::from_json(&json!([1])).is_none());
        assert!(CellValue::from_json(&json!({"a": 1})).is_none());
    }

    #[test]
    fn test_values_literal() {
        let values = vec![
            CellValue::Integer(1),
            CellValue::Text("test_name".into()),
            CellValue::Bool(true),
        ];
        assert_eq!(values_literal(&values), "1, 'test_name', 1");
    }

    #[test]
    fn test_statement_text() {
        assert_eq!(
            create_table_sql("t", "id INTEGER, name TEXT"),
            "CREATE TABLE t (id INTEGER, name TEXT)"
        );
        assert_eq!(
            insert_sql("t", "id, name", 2),
            "INSERT INTO t (id, name) VALUES (?1, ?2)"
        );
        assert_eq!(
            insert_literal_sql("t", "id, flag", &[CellValue::Integer(1), CellValue::Bool(true)]),
            "INSERT INTO t (id, flag) VALUES (1, 1)"
        );
        assert_eq!(select_all_sql("t"), "SELECT * FROM t");
    }
}
