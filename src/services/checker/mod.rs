//! Checkers: extract a value from fetched data and compare it to an expectation.
//!
//! A checker runs in two steps. [`Checker::prepare_data`] pulls the value to
//! compare out of the raw payload (status code, JSON body, headers or SQL rows),
//! then [`Checker::check`] applies its comparer against the expected value.
//! Preparation failures fail the check; they are logged and never propagated, so
//! a malformed intermediate payload does not end a wait.
//!
//! Checkers keep the value prepared by their most recent check for their
//! `Display` rendering, which is what failure messages list. A checker instance
//! is owned by one executor and must not be shared between concurrent waits.

use serde_json::Value;
use std::fmt;
use uuid::Uuid;

mod error;
mod extraction;
mod response;
mod sql;

pub use error::CheckerError;
pub use extraction::{resolve_path, search, Extraction};
pub use response::ResponseChecker;
pub use sql::SqlChecker;

use crate::services::comparator::Comparer;
use extraction::render_option;

/// Correlation id of a single check, only used to tie log lines together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckId(Uuid);

impl CheckId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for CheckId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for CheckId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Extract-and-compare unit evaluated against payloads of type `D`
pub trait Checker<D: ?Sized>: fmt::Display + Send + Sync {
	/// Extracts the value to compare from `data`.
	fn prepare_data(&self, data: &D, check_id: &CheckId) -> Result<Value, CheckerError>;

	/// Runs one check against `data`.
	///
	/// Implementations must return `false` instead of failing when the payload
	/// cannot be prepared.
	fn check(&mut self, data: &D) -> bool;

	/// Value prepared by the most recent check, kept for the rendering
	fn prepared_data(&self) -> Option<&Value>;
}

/// Built-in checker kinds, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckerKind {
	#[default]
	Json,
	Headers,
	StatusCode,
	Sql,
}

crate::impl_registry_name_enum!(CheckerKind, "checker", {
	"json_checker" => Json,
	"headers_checker" => Headers,
	"status_code_checker" => StatusCode,
	"sql_checker" => Sql,
});

impl CheckerKind {
	/// Kinds that evaluate HTTP responses
	pub const RESPONSE_KINDS: &'static [CheckerKind] =
		&[Self::Json, Self::Headers, Self::StatusCode];

	/// Kinds that evaluate SQL rows
	pub const SQL_KINDS: &'static [CheckerKind] = &[Self::Sql];

	/// Name shown in checker renderings
	pub fn label(&self) -> &'static str {
		match self {
			Self::Json => "JsonChecker",
			Self::Headers => "HeadersChecker",
			Self::StatusCode => "StatusCodeChecker",
			Self::Sql => "SQLChecker",
		}
	}
}

/// Comparer, expected value and the value prepared by the last check
#[derive(Debug, Clone)]
pub(crate) struct Assertion {
	pub comparer: Comparer,
	pub expected: Value,
	pub prepared: Option<Value>,
}

impl Assertion {
	pub fn new(comparer: Comparer, expected: Value) -> Self {
		Self {
			comparer,
			expected,
			prepared: None,
		}
	}

	/// Compares the prepared value, caching it for rendering
	pub fn evaluate(&mut self, check_id: &CheckId, prepared: Result<Value, CheckerError>) -> bool {
		match prepared {
			Ok(value) => {
				let met = self.comparer.compare(&value, &self.expected);
				if !met {
					tracing::debug!(
						"Check uuid: {} | Condition not met | Expected: {} | Data: {}",
						check_id,
						self.expected,
						value
					);
				}
				self.prepared = Some(value);
				met
			}
			Err(error) => {
				tracing::warn!(
					"Check uuid: {} | Expected: {} | {}",
					check_id,
					self.expected,
					error
				);
				self.prepared = None;
				false
			}
		}
	}

	/// `Comparer: .. | Expected_value: ..`
	pub fn describe_head(&self) -> String {
		format!(
			"Comparer: {} | Expected_value: {}",
			self.comparer, self.expected
		)
	}

	/// `Data: ..`
	pub fn describe_data(&self) -> String {
		format!(
			"Data: {}",
			render_option(self.prepared.as_ref().map(Value::to_string))
		)
	}
}
