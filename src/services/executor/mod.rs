//! Executors: a data source bound to a set of conditions.
//!
//! An executor fetches fresh data once per probe (an HTTP response or SQL rows),
//! runs its conditions against it and remembers the outcome. Fetch failures are
//! absorbed and only fail the current probe. A failing exception condition is
//! returned as [`ExecutorError::ExceptionConditionNotMet`] so the wait stops.
//!
//! Results and messages are only available once the first probe has run.

use async_trait::async_trait;

mod error;
mod http;
mod sql;

pub use error::ExecutorError;
pub use http::{RequestSource, RequestsExecutor, DEFAULT_TIMEOUT};
pub use sql::SqlExecutor;

use crate::services::conditions::{ConditionsError, FailedCheck};

/// Message of a successful probe
pub const SUCCESS_MESSAGE: &str = "All conditions have been met.";

/// Message of the not-ready error
pub const NOT_READY_MESSAGE: &str = "The condition has not yet been checked.";

const NOT_MET_PREFIX: &str = "The condition has not been met!";

const ABORTED_PREFIX: &str = "Exception condition not met!";

/// Single-probe access to a data source and its conditions
#[async_trait]
pub trait Executor: Send {
	/// Data fetched by a probe
	type Output: Send + Sync;

	/// Fetches fresh data once and evaluates the conditions against it.
	///
	/// Returns `Ok(false)` when the fetch fails or a pre/main condition is not met.
	async fn is_condition_met(&mut self) -> Result<bool, ExecutorError>;

	/// Data of the latest successful fetch
	fn get_result(&self) -> Result<&Self::Output, ExecutorError>;

	/// Outcome of the latest probe, rendered for humans
	fn error_message(&self) -> Result<String, ExecutorError>;
}

/// Outcome of the latest probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
	NotChecked,
	Met,
	Unmet(Vec<FailedCheck>),
	Aborted(Vec<FailedCheck>),
	FetchFailed(String),
}

/// Bookkeeping shared by the executors
#[derive(Debug)]
pub(crate) struct ProbeState<T> {
	pub result: Option<T>,
	pub outcome: ProbeOutcome,
}

impl<T> ProbeState<T> {
	pub fn new(result: Option<T>) -> Self {
		Self {
			result,
			outcome: ProbeOutcome::NotChecked,
		}
	}

	pub fn is_checked(&self) -> bool {
		self.outcome != ProbeOutcome::NotChecked
	}

	/// Records the failures of an evaluated probe and reports whether it passed
	pub fn record(&mut self, failed: Vec<FailedCheck>) -> bool {
		if failed.is_empty() {
			self.outcome = ProbeOutcome::Met;
			true
		} else {
			self.outcome = ProbeOutcome::Unmet(failed);
			false
		}
	}

	pub fn record_fetch_failure(&mut self, error: impl ToString) {
		self.outcome = ProbeOutcome::FetchFailed(error.to_string());
	}

	/// Records a failed exception condition and builds the error ending the wait
	pub fn abort(&mut self, error: ConditionsError, input: &str) -> ExecutorError {
		let failed = error.failed_checks().to_vec();
		let message = format!(
			"{} | Failed checkers: ({}) | {}",
			ABORTED_PREFIX,
			FailedCheck::join(&failed),
			input
		);
		self.outcome = ProbeOutcome::Aborted(failed);
		ExecutorError::exception_condition_not_met(message, Some(Box::new(error)), None)
	}

	pub fn failed_checks(&self) -> &[FailedCheck] {
		match &self.outcome {
			ProbeOutcome::Unmet(failed) | ProbeOutcome::Aborted(failed) => failed,
			_ => &[],
		}
	}

	pub fn get_result(&self) -> Result<&T, ExecutorError> {
		if !self.is_checked() {
			return Err(ExecutorError::not_ready(NOT_READY_MESSAGE, None, None));
		}
		self.result.as_ref().ok_or_else(|| {
			ExecutorError::no_result("No fetch has succeeded yet", None, None)
		})
	}

	/// Renders the outcome, ending with `input` (a curl command or a query)
	pub fn error_message(&self, input: &str) -> Result<String, ExecutorError> {
		match &self.outcome {
			ProbeOutcome::NotChecked => {
				Err(ExecutorError::not_ready(NOT_READY_MESSAGE, None, None))
			}
			ProbeOutcome::Met => Ok(SUCCESS_MESSAGE.to_string()),
			ProbeOutcome::Unmet(failed) => Ok(format!(
				"{} | Failed checkers: ({}) | {}",
				NOT_MET_PREFIX,
				FailedCheck::join(failed),
				input
			)),
			ProbeOutcome::Aborted(failed) => Ok(format!(
				"{} | Failed checkers: ({}) | {}",
				ABORTED_PREFIX,
				FailedCheck::join(failed),
				input
			)),
			ProbeOutcome::FetchFailed(error) => Ok(format!(
				"{} | Fetch failed: {} | {}",
				NOT_MET_PREFIX, error, input
			)),
		}
	}
}
