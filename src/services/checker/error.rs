//! Error types raised while preparing checker data.
//!
//! These never leave [`Checker::check`](super::Checker::check): a payload that
//! cannot be prepared only fails the check for the current attempt.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
	/// The payload could not be decoded, e.g. an HTML error page where JSON was expected.
	#[error("Failed to parse payload: {0}")]
	ParseError(Box<ErrorContext>),

	/// The payload has a shape the checker cannot work with.
	#[error("Type mismatch: {0}")]
	TypeMismatch(Box<ErrorContext>),
}

impl CheckerError {
	pub fn parse_error(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	pub fn type_mismatch(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::TypeMismatch(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}
}

impl TraceableError for CheckerError {
	fn trace_id(&self) -> String {
		match self {
			Self::ParseError(ctx) | Self::TypeMismatch(ctx) => ctx.trace_id.clone(),
		}
	}
}
