//! Transport error types.
//!
//! Raised by [`HttpSession::send`](super::HttpSession::send). Executors absorb
//! them: a failed send only fails the current attempt.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Represents errors that can occur while sending a request
#[derive(ThisError, Debug)]
pub enum TransportError {
	/// Connection, TLS or protocol failures
	#[error("Network error: {0}")]
	NetworkError(Box<ErrorContext>),

	/// No response within the per-request timeout
	#[error("Request timed out: {0}")]
	Timeout(Box<ErrorContext>),

	/// The request cannot be expressed on the wire (bad method, header name or value)
	#[error("Invalid request: {0}")]
	InvalidRequest(Box<ErrorContext>),

	/// The response arrived but its body could not be read
	#[error("Response error: {0}")]
	ResponseError(Box<ErrorContext>),
}

impl TransportError {
	pub fn network_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NetworkError(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn timeout(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Timeout(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn invalid_request(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidRequest(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn response_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ResponseError(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	/// Classifies a send failure of the middleware client
	pub fn from_send_error(err: reqwest_middleware::Error, url: &str) -> Self {
		let metadata = Some(HashMap::from([("url".to_string(), url.to_string())]));
		let is_timeout = matches!(&err, reqwest_middleware::Error::Reqwest(e) if e.is_timeout());
		let msg = format!("Failed to send request: {}", err);

		if is_timeout {
			Self::timeout(msg, Some(err.into()), metadata)
		} else {
			Self::network_error(msg, Some(err.into()), metadata)
		}
	}
}

impl TraceableError for TransportError {
	fn trace_id(&self) -> String {
		match self {
			Self::NetworkError(ctx)
			| Self::Timeout(ctx)
			| Self::InvalidRequest(ctx)
			| Self::ResponseError(ctx) => ctx.trace_id.clone(),
		}
	}
}
