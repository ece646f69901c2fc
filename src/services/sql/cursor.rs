//! Cursors executing the query of a SQL wait.

use async_trait::async_trait;
use rusqlite::{types::ValueRef, Connection};
use serde_json::{Number, Value};
use std::collections::HashMap;

use super::SqlError;
use crate::models::SqlRow;

/// Executes a query and fetches every row as a column-name keyed map
#[async_trait]
pub trait SqlCursor: Send {
	async fn fetch_all(&mut self, query: &str) -> Result<Vec<SqlRow>, SqlError>;
}

/// Runs on the calling task; SQLite queries of a wait are expected to be short.
#[async_trait]
impl SqlCursor for Connection {
	async fn fetch_all(&mut self, query: &str) -> Result<Vec<SqlRow>, SqlError> {
		query_rows(self, query)
	}
}

fn query_rows(connection: &Connection, query: &str) -> Result<Vec<SqlRow>, SqlError> {
	let metadata = || Some(HashMap::from([("query".to_string(), query.to_string())]));

	let mut statement = connection.prepare(query).map_err(|e| {
		SqlError::query_failed(
			format!("Failed to prepare query: {}", e),
			Some(Box::new(e)),
			metadata(),
		)
	})?;
	let columns: Vec<String> = statement
		.column_names()
		.into_iter()
		.map(String::from)
		.collect();

	let mut rows = statement.query([]).map_err(|e| {
		SqlError::query_failed(
			format!("Failed to execute query: {}", e),
			Some(Box::new(e)),
			metadata(),
		)
	})?;

	let mut fetched = Vec::new();
	while let Some(row) = rows.next().map_err(|e| {
		SqlError::query_failed(
			format!("Failed to fetch row: {}", e),
			Some(Box::new(e)),
			metadata(),
		)
	})? {
		let mut record = SqlRow::new();
		for (index, column) in columns.iter().enumerate() {
			let value = row.get_ref(index).map_err(|e| {
				SqlError::conversion_error(
					format!("Failed to read column '{}': {}", column, e),
					Some(Box::new(e)),
					metadata(),
				)
			})?;
			record.insert(column.clone(), to_json(value, column)?);
		}
		fetched.push(record);
	}

	Ok(fetched)
}

fn to_json(value: ValueRef<'_>, column: &str) -> Result<Value, SqlError> {
	Ok(match value {
		ValueRef::Null => Value::Null,
		ValueRef::Integer(i) => Value::from(i),
		ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).ok_or_else(|| {
			SqlError::conversion_error(
				format!("Column '{}' holds a non-finite number: {}", column, f),
				None,
				None,
			)
		})?,
		ValueRef::Text(text) => Value::String(String::from_utf8_lossy(text).into_owned()),
		ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
	})
}
