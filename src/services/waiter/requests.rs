//! Waiting for an HTTP endpoint to return the expected data.

use std::{sync::Arc, time::Duration};

use super::{wait_for_executor, WaitOptions, WaiterError};
use crate::{
	models::{CheckerConfig, HttpResponse},
	services::{
		checker::{Checker, ResponseChecker},
		conditions::ConditionStage,
		executor::{Executor, RequestSource, RequestsExecutor},
		http::HttpSession,
	},
};

/// Fluent front end over a [`RequestsExecutor`].
///
/// ```no_run
/// # async fn example() -> Result<(), bepatient::services::waiter::WaiterError> {
/// use bepatient::{
///     models::{CheckerConfig, HttpRequest},
///     services::{comparator::Comparator, waiter::RequestsWaiter},
/// };
/// use std::time::Duration;
///
/// let mut waiter = RequestsWaiter::new(HttpRequest::get("https://webludus.pl/orders"), 200)?;
/// waiter.add_checker(CheckerConfig::new(Comparator::HaveLenGreater, 0).path("data"))?;
/// let response = waiter
///     .run(5, Duration::from_secs(2), true)
///     .await?
///     .get_result()?;
/// # let _ = response;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestsWaiter {
	executor: RequestsExecutor,
}

impl RequestsWaiter {
	/// Creates a waiter sending requests through a new default session
	pub fn new(source: impl Into<RequestSource>, status_code: u16) -> Result<Self, WaiterError> {
		Ok(Self {
			executor: RequestsExecutor::new(source, status_code, None)?,
		})
	}

	/// Creates a waiter sending requests through `session`
	pub fn with_session(
		source: impl Into<RequestSource>,
		status_code: u16,
		session: Arc<dyn HttpSession>,
	) -> Result<Self, WaiterError> {
		Ok(Self {
			executor: RequestsExecutor::new(source, status_code, Some(session))?,
		})
	}

	/// Overrides the per-request timeout
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.executor = self.executor.with_timeout(timeout);
		self
	}

	/// Resolves a configured checker and adds it to its condition group.
	///
	/// Fails on checker kinds that do not evaluate responses.
	pub fn add_checker(&mut self, config: CheckerConfig) -> Result<&mut Self, WaiterError> {
		let checker = ResponseChecker::from_config(&config)?;
		self.executor.add_checker(config.stage, Box::new(checker));
		Ok(self)
	}

	/// Adds a user-defined checker to the main conditions
	pub fn add_custom_checker(
		&mut self,
		checker: impl Checker<HttpResponse> + 'static,
	) -> &mut Self {
		self.add_custom_checker_to(ConditionStage::Main, checker)
	}

	/// Adds a user-defined checker to the given condition group
	pub fn add_custom_checker_to(
		&mut self,
		stage: ConditionStage,
		checker: impl Checker<HttpResponse> + 'static,
	) -> &mut Self {
		self.executor.add_checker(stage, Box::new(checker));
		self
	}

	/// Polls until the conditions are met, see [`wait_for_executor`]
	pub async fn run(
		&mut self,
		retries: usize,
		delay: Duration,
		raise_error: bool,
	) -> Result<&mut Self, WaiterError> {
		wait_for_executor(&mut self.executor, retries, delay, raise_error).await?;
		Ok(self)
	}

	/// Response of the latest successful request
	pub fn get_result(&self) -> Result<&HttpResponse, WaiterError> {
		Ok(self.executor.get_result()?)
	}

	pub fn error_message(&self) -> Result<String, WaiterError> {
		Ok(self.executor.error_message()?)
	}

	pub fn executor(&self) -> &RequestsExecutor {
		&self.executor
	}
}

/// Waits for a single value in the response.
///
/// Without a checker only the status code is awaited.
pub async fn wait_for_value_in_request(
	source: impl Into<RequestSource>,
	status_code: u16,
	checker: Option<CheckerConfig>,
	session: Option<Arc<dyn HttpSession>>,
	options: WaitOptions,
) -> Result<HttpResponse, WaiterError> {
	wait_for_values_in_request(source, checker.into_iter().collect(), status_code, session, options)
		.await
}

/// Waits until every configured checker passes on the same response
pub async fn wait_for_values_in_request(
	source: impl Into<RequestSource>,
	checkers: Vec<CheckerConfig>,
	status_code: u16,
	session: Option<Arc<dyn HttpSession>>,
	options: WaitOptions,
) -> Result<HttpResponse, WaiterError> {
	let mut waiter = match session {
		Some(session) => RequestsWaiter::with_session(source, status_code, session)?,
		None => RequestsWaiter::new(source, status_code)?,
	};
	for checker in checkers {
		waiter.add_checker(checker)?;
	}

	let response = waiter
		.run(options.retries, options.delay, options.raise_error)
		.await?
		.get_result()?
		.clone();
	Ok(response)
}
