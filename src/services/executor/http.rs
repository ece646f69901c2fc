//! Executor re-issuing an HTTP request on every probe.

use async_trait::async_trait;
use std::{fmt, sync::Arc, time::Duration};

use super::{Executor, ExecutorError, ProbeState};
use crate::{
	models::{HttpRequest, HttpResponse, PreparedRequest},
	services::{
		checker::{Checker, ResponseChecker},
		conditions::{ConditionStage, ConditionsManager, FailedCheck},
		http::{to_curl, HttpSession, ReqwestSession},
	},
};

/// Per-request timeout used unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// What a request executor polls
#[derive(Debug, Clone)]
pub enum RequestSource {
	/// Prepared on construction; session headers and cookies are merged in
	Request(HttpRequest),
	/// Sent exactly as given
	Prepared(PreparedRequest),
	/// The request behind this response is re-issued with session data merged in
	Response(HttpResponse),
}

impl From<HttpRequest> for RequestSource {
	fn from(request: HttpRequest) -> Self {
		Self::Request(request)
	}
}

impl From<PreparedRequest> for RequestSource {
	fn from(request: PreparedRequest) -> Self {
		Self::Prepared(request)
	}
}

impl From<HttpResponse> for RequestSource {
	fn from(response: HttpResponse) -> Self {
		Self::Response(response)
	}
}

/// Sends a request on every probe and checks the response.
///
/// Exception conditions run first, so an error response can still end the wait.
/// The status code is checked next, ahead of the pre and main conditions. When
/// it does not match, the status code checker is the only failure of the probe
/// and the pre and main conditions are not evaluated.
pub struct RequestsExecutor {
	session: Arc<dyn HttpSession>,
	request: PreparedRequest,
	curl: String,
	timeout: Duration,
	status_code_checker: ResponseChecker,
	conditions: ConditionsManager<HttpResponse>,
	state: ProbeState<HttpResponse>,
}

impl RequestsExecutor {
	/// Creates an executor for `source`, expecting `expected_status_code`.
	///
	/// Without a session a reqwest-backed one is created.
	pub fn new(
		source: impl Into<RequestSource>,
		expected_status_code: u16,
		session: Option<Arc<dyn HttpSession>>,
	) -> Result<Self, ExecutorError> {
		let session: Arc<dyn HttpSession> = match session {
			Some(session) => session,
			None => {
				tracing::info!("Creating a new Session object");
				let session = ReqwestSession::new().map_err(|e| {
					ExecutorError::session_error(
						"Failed to create the default session",
						Some(Box::new(e)),
						None,
					)
				})?;
				Arc::new(session)
			}
		};

		let (request, initial_result) = match source.into() {
			RequestSource::Request(request) => {
				let mut prepared = request.prepare().map_err(|e| {
					ExecutorError::invalid_source(
						format!("Failed to prepare request: {}", e),
						Some(Box::new(e)),
						None,
					)
				})?;
				merge_session_data(&mut prepared, session.as_ref());
				(prepared, None)
			}
			RequestSource::Prepared(prepared) => (prepared, None),
			RequestSource::Response(response) => {
				let mut prepared = response.originating_request().cloned().ok_or_else(|| {
					ExecutorError::invalid_source(
						"Response does not carry the request that produced it",
						None,
						None,
					)
				})?;
				merge_session_data(&mut prepared, session.as_ref());
				(prepared, Some(response))
			}
		};

		let curl = to_curl(&request);

		Ok(Self {
			session,
			request,
			curl,
			timeout: DEFAULT_TIMEOUT,
			status_code_checker: ResponseChecker::status_code(expected_status_code),
			conditions: ConditionsManager::new(),
			state: ProbeState::new(initial_result),
		})
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Adds a checker to the given condition group
	pub fn add_checker(
		&mut self,
		stage: ConditionStage,
		checker: Box<dyn Checker<HttpResponse>>,
	) -> &mut Self {
		self.conditions.add(stage, checker);
		self
	}

	pub fn add_exception_condition(
		&mut self,
		checker: impl Checker<HttpResponse> + 'static,
	) -> &mut Self {
		self.conditions.add_exception_condition(checker);
		self
	}

	pub fn add_pre_condition(&mut self, checker: impl Checker<HttpResponse> + 'static) -> &mut Self {
		self.conditions.add_pre_condition(checker);
		self
	}

	pub fn add_main_condition(
		&mut self,
		checker: impl Checker<HttpResponse> + 'static,
	) -> &mut Self {
		self.conditions.add_main_condition(checker);
		self
	}

	/// Request sent on every probe
	pub fn request(&self) -> &PreparedRequest {
		&self.request
	}

	/// Curl rendering of the request
	pub fn curl(&self) -> &str {
		&self.curl
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Failures of the latest probe
	pub fn failed_checks(&self) -> &[FailedCheck] {
		self.state.failed_checks()
	}
}

impl fmt::Debug for RequestsExecutor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RequestsExecutor")
			.field("curl", &self.curl)
			.field("timeout", &self.timeout)
			.field("conditions", &self.conditions)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl Executor for RequestsExecutor {
	type Output = HttpResponse;

	async fn is_condition_met(&mut self) -> Result<bool, ExecutorError> {
		let response = match self.session.send(&self.request, self.timeout).await {
			Ok(response) => response,
			Err(e) => {
				tracing::error!("Request failed! CURL: {} | {}", self.curl, e);
				self.state.record_fetch_failure(&e);
				return Ok(false);
			}
		};
		tracing::debug!("Sent: {}", self.curl);

		if let Err(e) = self.conditions.check_exceptions(&response) {
			self.state.result = Some(response);
			return Err(self.state.abort(e, &self.curl));
		}

		let failed = if self.status_code_checker.check(&response) {
			self.conditions.check_conditions(&response).to_vec()
		} else {
			vec![FailedCheck::new(None, 0, self.status_code_checker.to_string())]
		};

		self.state.result = Some(response);
		Ok(self.state.record(failed))
	}

	fn get_result(&self) -> Result<&HttpResponse, ExecutorError> {
		self.state.get_result()
	}

	fn error_message(&self) -> Result<String, ExecutorError> {
		self.state.error_message(&self.curl)
	}
}

fn merge_session_data(request: &mut PreparedRequest, session: &dyn HttpSession) {
	let defaults = session.defaults();
	tracing::debug!("Merging session headers and cookies into the prepared request");
	request.merge_session(&defaults.headers, &defaults.cookies);
}
