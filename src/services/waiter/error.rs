//! Waiter error types.
//!
//! Only two failures of a running wait reach the caller: the condition still not
//! being met once the retry budget is spent, and a failing exception condition.
//! The remaining variants cover invalid arguments and configuration.

use crate::{
	models::ConfigError,
	services::executor::ExecutorError,
	utils::logging::error::{BoxedSource, ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error as ThisError;
use uuid::Uuid;

/// Represents errors that can occur while waiting for a condition
#[derive(ThisError, Debug)]
pub enum WaiterError {
	/// Retries exhausted; carries the executor's error message
	#[error("Condition not met: {0}")]
	ConditionNotMet(Box<ErrorContext>),

	/// Arguments that make the wait meaningless, such as zero retries
	#[error("Invalid argument: {0}")]
	InvalidArgument(Box<ErrorContext>),

	/// Errors raised by the executor, including the exception-condition abort
	#[error(transparent)]
	Executor(#[from] ExecutorError),

	/// Unknown comparer, checker or stage names
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Other errors that don't fit into the categories above
	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl WaiterError {
	pub fn condition_not_met(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ConditionNotMet(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn invalid_argument(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidArgument(Box::new(ErrorContext::new(msg, source, metadata)))
	}

	/// Whether the wait was aborted by a failing exception condition
	pub fn is_exception_condition(&self) -> bool {
		matches!(self, Self::Executor(ExecutorError::ExceptionConditionNotMet(_)))
	}

	/// Message without the variant prefix
	pub fn message(&self) -> String {
		match self {
			Self::ConditionNotMet(ctx) | Self::InvalidArgument(ctx) => ctx.message.clone(),
			Self::Executor(e) => e.message().to_string(),
			Self::Config(e) => e.to_string(),
			Self::Other(e) => e.to_string(),
		}
	}
}

impl TraceableError for WaiterError {
	fn trace_id(&self) -> String {
		match self {
			Self::ConditionNotMet(ctx) | Self::InvalidArgument(ctx) => ctx.trace_id.clone(),
			Self::Executor(e) => e.trace_id(),
			Self::Config(e) => e.trace_id(),
			Self::Other(_) => Uuid::new_v4().to_string(),
		}
	}
}
