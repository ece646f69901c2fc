//! SQL error types.
//!
//! Raised by [`SqlCursor::fetch_all`](super::SqlCursor::fetch_all) and absorbed
//! by the SQL executor like any other failed fetch.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SqlError {
	/// The query could not be prepared or executed
	#[error("Query failed: {0}")]
	QueryFailed(Box<ErrorContext>),

	/// A column value could not be converted
	#[error("Conversion error: {0}")]
	ConversionError(Box<ErrorContext>),
}

impl SqlError {
	pub fn query_failed(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::QueryFailed(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn conversion_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ConversionError(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}
}

impl TraceableError for SqlError {
	fn trace_id(&self) -> String {
		match self {
			Self::QueryFailed(ctx) | Self::ConversionError(ctx) => ctx.trace_id.clone(),
		}
	}
}
