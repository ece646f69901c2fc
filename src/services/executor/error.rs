//! Executor error types.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Represents errors raised by executors
#[derive(ThisError, Debug)]
pub enum ExecutorError {
	/// Results were requested before the first probe
	#[error("Executor not ready: {0}")]
	NotReady(Box<ErrorContext>),

	/// Probes ran but no fetch has succeeded yet
	#[error("No result: {0}")]
	NoResult(Box<ErrorContext>),

	/// An exception condition failed; the wait must stop
	#[error("{0}")]
	ExceptionConditionNotMet(Box<ErrorContext>),

	/// The HTTP session could not be created
	#[error("Session error: {0}")]
	SessionError(Box<ErrorContext>),

	/// The request source cannot be polled
	#[error("Invalid source: {0}")]
	InvalidSource(Box<ErrorContext>),
}

impl ExecutorError {
	pub fn not_ready(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NotReady(Box::new(ErrorContext::new(msg, source, metadata)))
	}

	pub fn no_result(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NoResult(Box::new(ErrorContext::new(msg, source, metadata)))
	}

	pub fn exception_condition_not_met(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ExceptionConditionNotMet(Box::new(ErrorContext::new_with_log(
			msg, source, metadata,
		)))
	}

	pub fn session_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::SessionError(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn invalid_source(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidSource(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	/// Message without the variant prefix
	pub fn message(&self) -> &str {
		match self {
			Self::NotReady(ctx)
			| Self::NoResult(ctx)
			| Self::ExceptionConditionNotMet(ctx)
			| Self::SessionError(ctx)
			| Self::InvalidSource(ctx) => &ctx.message,
		}
	}
}

impl TraceableError for ExecutorError {
	fn trace_id(&self) -> String {
		match self {
			Self::NotReady(ctx)
			| Self::NoResult(ctx)
			| Self::ExceptionConditionNotMet(ctx)
			| Self::SessionError(ctx)
			| Self::InvalidSource(ctx) => ctx.trace_id.clone(),
		}
	}
}
