//! Path and search extraction from JSON payloads.
//!
//! `path` descends through objects by key and through arrays by numeric index,
//! one dot-separated segment at a time. `search_query` collects every value stored
//! under a key anywhere below the current value, in document order, including
//! matches nested inside other matches. When both are set the path narrows the
//! payload before the search runs.
//!
//! A key whose value is `null` cannot be told apart from a missing key: both
//! produce the fallback. An empty search result produces the fallback too.

use serde_json::Value;
use std::fmt;

/// Where to find the value a checker compares
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extraction {
	/// Dot-separated keys and indices
	pub path: Option<String>,
	/// Key collected recursively
	pub search_query: Option<String>,
	/// Returned when nothing is found
	pub fallback: Option<Value>,
}

impl Extraction {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn search_query(mut self, search_query: impl Into<String>) -> Self {
		self.search_query = Some(search_query.into());
		self
	}

	pub fn fallback(mut self, fallback: impl Into<Value>) -> Self {
		self.fallback = Some(fallback.into());
		self
	}

	/// Same extraction with path and search key lowercased, for lowercase-keyed payloads
	pub fn lowercased(&self) -> Self {
		Self {
			path: self.path.as_ref().map(|p| p.to_lowercase()),
			search_query: self.search_query.as_ref().map(|q| q.to_lowercase()),
			fallback: self.fallback.clone(),
		}
	}

	/// Extracts the configured value from `data`
	///
	/// A key holding `null` cannot be told apart from a missing key: both yield
	/// the fallback.
	pub fn extract(&self, data: &Value) -> Value {
		let narrowed = match self.path.as_deref().filter(|p| !p.is_empty()) {
			Some(path) => match resolve_path(data, path) {
				Some(value) => value,
				None => return self.fallback_value(),
			},
			None => data,
		};

		let value = match self.search_query.as_deref().filter(|q| !q.is_empty()) {
			Some(key) => {
				let mut found = Vec::new();
				search(narrowed, key, &mut found);
				if found.is_empty() {
					return self.fallback_value();
				}
				Value::Array(found)
			}
			None => narrowed.clone(),
		};

		if value.is_null() {
			self.fallback_value()
		} else {
			value
		}
	}

	fn fallback_value(&self) -> Value {
		self.fallback.clone().unwrap_or(Value::Null)
	}
}

/// Renders the extraction fields as `Fallback: .. | Path: .. | Search_query: ..`
impl fmt::Display for Extraction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Fallback: {} | Path: {} | Search_query: {}",
			render_option(self.fallback.as_ref().map(Value::to_string)),
			render_option(self.path.clone()),
			render_option(self.search_query.clone()),
		)
	}
}

pub(crate) fn render_option(value: Option<String>) -> String {
	value.unwrap_or_else(|| "None".to_string())
}

/// Follows a dot-separated path; `None` when a segment does not resolve
pub fn resolve_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
	path.split('.').try_fold(data, |current, segment| match current {
		Value::Object(map) => map.get(segment),
		Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
		_ => None,
	})
}

/// Collects every value stored under `key`, depth first, in document order
pub fn search(data: &Value, key: &str, found: &mut Vec<Value>) {
	match data {
		Value::Object(map) => {
			for (name, value) in map {
				if name == key {
					found.push(value.clone());
				}
				search(value, key, found);
			}
		}
		Value::Array(items) => {
			for item in items {
				search(item, key, found);
			}
		}
		_ => {}
	}
}
