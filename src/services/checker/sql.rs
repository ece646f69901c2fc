//! Checker evaluating rows returned by a SQL query.

use serde_json::Value;
use std::fmt;

use super::{Assertion, CheckId, Checker, CheckerError, CheckerKind, Extraction};
use crate::{
	models::{rows_to_value, CheckerConfig, ConfigError, SqlRow},
	services::comparator::Comparer,
};

/// Compares a value extracted from the fetched rows.
///
/// Rows are seen as a JSON array of objects, so `path: "0.name"` reads the
/// `name` column of the first row and `search_query: "name"` collects that
/// column across every row.
#[derive(Debug, Clone)]
pub struct SqlChecker {
	assertion: Assertion,
	extraction: Extraction,
}

impl SqlChecker {
	pub fn new(
		comparer: impl Into<Comparer>,
		expected: impl Into<Value>,
		extraction: Extraction,
	) -> Self {
		Self {
			assertion: Assertion::new(comparer.into(), expected.into()),
			extraction,
		}
	}

	/// Builds a checker from a configuration entry naming `sql_checker`
	pub fn from_config(config: &CheckerConfig) -> Result<Self, ConfigError> {
		config.validate_for(CheckerKind::SQL_KINDS)?;

		Ok(Self::new(
			config.comparer,
			config.expected_value.clone(),
			Extraction {
				path: config.path.clone(),
				search_query: config.search_query.clone(),
				fallback: config.fallback.clone(),
			},
		))
	}
}

impl Checker<[SqlRow]> for SqlChecker {
	fn prepare_data(&self, data: &[SqlRow], check_id: &CheckId) -> Result<Value, CheckerError> {
		let rows = rows_to_value(data);
		tracing::info!("Check uuid: {} | Query result: {}", check_id, rows);
		Ok(self.extraction.extract(&rows))
	}

	fn check(&mut self, data: &[SqlRow]) -> bool {
		let check_id = CheckId::new();
		tracing::info!("Check uuid: {} | {}", check_id, self);

		let prepared = self.prepare_data(data, &check_id);
		self.assertion.evaluate(&check_id, prepared)
	}

	fn prepared_data(&self) -> Option<&Value> {
		self.assertion.prepared.as_ref()
	}
}

impl fmt::Display for SqlChecker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Checker: {} | {} | {} | {}",
			CheckerKind::Sql.label(),
			self.assertion.describe_head(),
			self.extraction,
			self.assertion.describe_data()
		)
	}
}
