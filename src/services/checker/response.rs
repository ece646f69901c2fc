//! Checkers evaluating HTTP responses.

use serde_json::Value;
use std::{collections::HashMap, fmt};

use super::{Assertion, CheckId, Checker, CheckerError, CheckerKind, Extraction};
use crate::{
	models::{CheckerConfig, ConfigError, HttpResponse},
	services::comparator::{Comparator, Comparer},
};

/// Checks the status code, JSON body or headers of a response
#[derive(Debug, Clone)]
pub struct ResponseChecker {
	kind: CheckerKind,
	assertion: Assertion,
	extraction: Extraction,
}

impl ResponseChecker {
	/// Compares a value extracted from the JSON body
	pub fn json(
		comparer: impl Into<Comparer>,
		expected: impl Into<Value>,
		extraction: Extraction,
	) -> Self {
		Self::with_kind(CheckerKind::Json, comparer.into(), expected.into(), extraction)
	}

	/// Compares a value extracted from the headers, keyed by lowercase name
	pub fn headers(
		comparer: impl Into<Comparer>,
		expected: impl Into<Value>,
		extraction: Extraction,
	) -> Self {
		Self::with_kind(CheckerKind::Headers, comparer.into(), expected.into(), extraction)
	}

	/// Requires an exact status code
	pub fn status_code(expected: u16) -> Self {
		Self::with_kind(
			CheckerKind::StatusCode,
			Comparator::IsEqual.into(),
			Value::from(expected),
			Extraction::default(),
		)
	}

	/// Builds a checker from a configuration entry.
	///
	/// Fails when the entry names a checker kind that does not evaluate responses.
	pub fn from_config(config: &CheckerConfig) -> Result<Self, ConfigError> {
		config.validate_for(CheckerKind::RESPONSE_KINDS)?;

		let extraction = Extraction {
			path: config.path.clone(),
			search_query: config.search_query.clone(),
			fallback: config.fallback.clone(),
		};

		Ok(Self::with_kind(
			config.checker,
			config.comparer.into(),
			config.expected_value.clone(),
			extraction,
		))
	}

	fn with_kind(
		kind: CheckerKind,
		comparer: Comparer,
		expected: Value,
		extraction: Extraction,
	) -> Self {
		Self {
			kind,
			assertion: Assertion::new(comparer, expected),
			extraction,
		}
	}

	pub fn kind(&self) -> CheckerKind {
		self.kind
	}

	pub fn expected_value(&self) -> &Value {
		&self.assertion.expected
	}
}

impl Checker<HttpResponse> for ResponseChecker {
	fn prepare_data(
		&self,
		data: &HttpResponse,
		check_id: &CheckId,
	) -> Result<Value, CheckerError> {
		match self.kind {
			CheckerKind::StatusCode => {
				tracing::info!(
					"Check uuid: {} | Response status code: {}",
					check_id,
					data.status_code
				);
				Ok(Value::from(data.status_code))
			}
			CheckerKind::Headers => {
				let headers = data.headers_object();
				tracing::info!("Check uuid: {} | Response headers: {}", check_id, headers);
				Ok(self.extraction.lowercased().extract(&headers))
			}
			CheckerKind::Json => {
				tracing::info!("Check uuid: {} | Response content: {}", check_id, data.text());
				let body = data.json().map_err(|e| {
					CheckerError::parse_error(
						format!("Response body is not valid JSON: {}", e),
						Some(Box::new(e)),
						Some(HashMap::from([
							("check_id".to_string(), check_id.to_string()),
							("status_code".to_string(), data.status_code.to_string()),
						])),
					)
				})?;
				Ok(self.extraction.extract(&body))
			}
			CheckerKind::Sql => Err(CheckerError::type_mismatch(
				"sql_checker cannot evaluate an HTTP response",
				None,
				None,
			)),
		}
	}

	fn check(&mut self, data: &HttpResponse) -> bool {
		let check_id = CheckId::new();
		tracing::info!("Check uuid: {} | {}", check_id, self);

		let prepared = self.prepare_data(data, &check_id);
		self.assertion.evaluate(&check_id, prepared)
	}

	fn prepared_data(&self) -> Option<&Value> {
		self.assertion.prepared.as_ref()
	}
}

impl fmt::Display for ResponseChecker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Checker: {} | {}", self.kind.label(), self.assertion.describe_head())?;
		if self.kind != CheckerKind::StatusCode {
			write!(f, " | {}", self.extraction)?;
		}
		write!(f, " | {}", self.assertion.describe_data())
	}
}
