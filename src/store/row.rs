//! Rows returned by a full-table scan

use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Value};

/// One stored record, with fields in column declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub table: String,
    pub fields: Vec<(String, SqlValue)>,
}

impl Row {
    pub fn new(table: impl Into<String>, fields: Vec<(String, SqlValue)>) -> Self {
        Self {
            table: table.into(),
            fields,
        }
    }

    /// Look up a field by column name
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Text value of a column, if it holds text
    pub fn get_text(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            SqlValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer value of a column, if it holds an integer
    pub fn get_integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            SqlValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Column names in declaration order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Render as a JSON object keyed by column name.
    ///
    /// Blobs are rendered as arrays of bytes.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), sql_value_to_json(value));
        }
        Value::Object(map)
    }
}

fn sql_value_to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(*i),
        SqlValue::Real(f) => Value::from(*f),
        SqlValue::Text(s) => Value::String(s.clone()),
        SqlValue::Blob(b) => Value::from(b.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Row {
        Row::new(
            "t",
            vec![
                ("id".to_string(), SqlValue::Integer(1)),
                ("name".to_string(), SqlValue::Text("x".to_string())),
                ("score".to_string(), SqlValue::Null),
            ],
        )
    }

    #[test]
    fn test_typed_getters() {
        let row = sample();
        assert_eq!(row.get_integer("id"), Some(1));
        assert_eq!(row.get_text("name"), Some("x"));
        assert_eq!(row.get_text("id"), None);
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_columns_keep_order() {
        let row = sample();
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["id", "name", "score"]);
    }

    #[test]
    fn test_to_json() {
        let row = sample();
        assert_eq!(row.to_json(), json!({"id": 1, "name": "x", "score": null}));
    }
}
