//! Rows returned by SQL queries.

use serde_json::{Map, Value};

/// One row, column name to value, in select-list order
pub type SqlRow = Map<String, Value>;

/// Turns fetched rows into the JSON array checkers extract from.
pub fn rows_to_value(rows: &[SqlRow]) -> Value {
	Value::Array(rows.iter().cloned().map(Value::Object).collect())
}
