//! Error raised when an exception condition fails.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

use super::FailedCheck;

#[derive(Debug, Error)]
pub enum ConditionsError {
	/// An exception condition failed; waiting any longer cannot succeed.
	#[error("Exception condition not met: {context}")]
	ExceptionConditionNotMet {
		context: ErrorContext,
		failed: Vec<FailedCheck>,
	},
}

impl ConditionsError {
	pub fn exception_condition_not_met(
		failed: Vec<FailedCheck>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let message = format!("Failed checkers: ({})", FailedCheck::join(&failed));
		Self::ExceptionConditionNotMet {
			context: ErrorContext::new_with_log(message, source, metadata),
			failed,
		}
	}

	/// Checkers whose failure ended the evaluation
	pub fn failed_checks(&self) -> &[FailedCheck] {
		match self {
			Self::ExceptionConditionNotMet { failed, .. } => failed,
		}
	}
}

impl TraceableError for ConditionsError {
	fn trace_id(&self) -> String {
		match self {
			Self::ExceptionConditionNotMet { context, .. } => context.trace_id.clone(),
		}
	}
}
