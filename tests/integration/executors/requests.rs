use crate::integration::mocks::{scripted_session, MockHttpSession};

use bepatient::{
	models::{HttpRequest, HttpResponse},
	services::{
		checker::{Extraction, ResponseChecker},
		comparator::Comparator,
		conditions::ConditionStage,
		executor::{Executor, ExecutorError, RequestsExecutor},
		http::{HttpSession, ReqwestSession, SessionDefaults, TransportError},
		waiter::RequestsWaiter,
	},
	utils::tests::{create_test_session, json_response, StubChecker},
};
use mockito::Matcher;
use std::{sync::Arc, time::Duration};

#[tokio::test]
async fn test_session_headers_and_cookies_reach_the_server() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/profile")
		.match_header("task", "test")
		.match_header("user-agent", "bepatient-tests")
		.match_header("cookie", "user-token=abc-123; session=s1")
		.with_status(200)
		.with_body(r#"{"ok": true}"#)
		.create_async()
		.await;

	let session: Arc<dyn HttpSession> = Arc::new(
		ReqwestSession::new()
			.unwrap()
			.header("task", "session-value")
			.header("User-Agent", "bepatient-tests")
			.cookie("session", "s1"),
	);
	let request = HttpRequest::get(format!("{}/profile", server.url()))
		.header("task", "test")
		.cookie("user-token", "abc-123");

	let mut executor = RequestsExecutor::new(request, 200, Some(session)).unwrap();
	executor.add_main_condition(ResponseChecker::json(
		Comparator::IsEqual,
		true,
		Extraction::new().path("ok"),
	));

	assert!(executor.is_condition_met().await.unwrap());
	mock.assert_async().await;
}

#[tokio::test]
async fn test_error_message_renders_post_body_as_curl() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("POST", "/orders")
		.match_body(Matcher::JsonString(r#"{"id": 7}"#.to_string()))
		.with_status(200)
		.with_body(r#"{"state": "queued"}"#)
		.create_async()
		.await;

	let request = HttpRequest::post(format!("{}/orders", server.url()))
		.json(&serde_json::json!({"id": 7}));
	let mut executor = RequestsExecutor::new(request, 200, Some(create_test_session())).unwrap();
	executor.add_main_condition(ResponseChecker::json(
		Comparator::IsEqual,
		"done",
		Extraction::new().path("state"),
	));

	assert!(!executor.is_condition_met().await.unwrap());
	assert_eq!(
		executor.error_message().unwrap(),
		format!(
			"The condition has not been met! | Failed checkers: (Checker: JsonChecker | Comparer: is_equal | Expected_value: \"done\" | Fallback: None | Path: state | Search_query: None | Data: \"queued\") | curl -X POST -H 'Content-Type: application/json' -d '{{\"id\":7}}' {}/orders",
			server.url()
		)
	);
}

#[tokio::test]
async fn test_response_source_reissues_its_request() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/jobs/1")
		.with_status(200)
		.with_body(r#"{"state": "done"}"#)
		.expect(1)
		.create_async()
		.await;
	let session = create_test_session();

	let first = session
		.send(
			&HttpRequest::get(format!("{}/jobs/1", server.url()))
				.prepare()
				.unwrap(),
			Duration::from_secs(5),
		)
		.await
		.unwrap();
	mock.assert_async().await;
	mock.remove_async().await;

	let again = server
		.mock("GET", "/jobs/1")
		.with_status(200)
		.with_body(r#"{"state": "done"}"#)
		.expect(1)
		.create_async()
		.await;
	let mut executor = RequestsExecutor::new(first, 200, Some(session)).unwrap();

	assert!(executor.is_condition_met().await.unwrap());
	again.assert_async().await;
}

#[tokio::test]
async fn test_status_mismatch_is_the_only_failure() {
	let body_checker = StubChecker::passing("body");
	let calls = body_checker.calls();
	let session = scripted_session(vec![Ok(json_response(404, r#"{"ok": true}"#))]);

	let mut executor = RequestsExecutor::new(
		HttpRequest::get("https://webludus.pl/"),
		200,
		Some(session),
	)
	.unwrap();
	executor.add_pre_condition(body_checker);

	assert!(!executor.is_condition_met().await.unwrap());
	assert_eq!(calls.get(), 0);
	assert_eq!(
		executor.error_message().unwrap(),
		"The condition has not been met! | Failed checkers: (Checker: StatusCodeChecker | Comparer: is_equal | Expected_value: 200 | Data: 404) | curl -X GET https://webludus.pl/"
	);
}

#[tokio::test]
async fn test_fatal_error_status_aborts_through_exception_condition() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/")
		.with_status(500)
		.with_body(r#"{"error": "fatal"}"#)
		.expect(1)
		.create_async()
		.await;

	let mut waiter =
		RequestsWaiter::with_session(HttpRequest::get(server.url()), 200, create_test_session())
			.unwrap();
	waiter.add_custom_checker_to(
		ConditionStage::Exception,
		ResponseChecker::json(Comparator::IsNotEqual, "fatal", Extraction::new().path("error")),
	);

	let error = waiter
		.run(5, Duration::from_millis(1), true)
		.await
		.unwrap_err();

	assert!(error.is_exception_condition());
	assert_eq!(
		error.message(),
		format!(
			"Exception condition not met! | Failed checkers: (Checker: JsonChecker | Comparer: is_not_equal | Expected_value: \"fatal\" | Fallback: None | Path: error | Search_query: None | Data: \"fatal\") | curl -X GET {}/",
			server.url()
		)
	);
	assert_eq!(waiter.get_result().unwrap().status_code, 500);
	mock.assert_async().await;
}

#[tokio::test]
async fn test_passing_exception_condition_keeps_status_as_sole_failure() {
	let body_checker = StubChecker::passing("body");
	let calls = body_checker.calls();
	let session = scripted_session(vec![Ok(json_response(503, r#"{"error": null}"#))]);

	let mut executor = RequestsExecutor::new(
		HttpRequest::get("https://webludus.pl/"),
		200,
		Some(session),
	)
	.unwrap();
	executor
		.add_exception_condition(ResponseChecker::json(
			Comparator::IsNotEqual,
			"fatal",
			Extraction::new().path("error"),
		))
		.add_main_condition(body_checker);

	assert!(!executor.is_condition_met().await.unwrap());
	assert_eq!(calls.get(), 0);
	assert_eq!(executor.failed_checks().len(), 1);
	assert_eq!(executor.failed_checks()[0].stage, None);
}

#[tokio::test]
async fn test_result_is_kept_when_later_sends_fail() {
	let session = scripted_session(vec![
		Ok(json_response(200, r#"{"ok": false}"#)),
		Err(TransportError::timeout("no answer within 5s", None, None)),
	]);
	let mut executor = RequestsExecutor::new(
		HttpRequest::get("https://webludus.pl/"),
		200,
		Some(session),
	)
	.unwrap();
	executor.add_main_condition(ResponseChecker::json(
		Comparator::IsEqual,
		true,
		Extraction::new().path("ok"),
	));

	assert!(!executor.is_condition_met().await.unwrap());
	assert!(!executor.is_condition_met().await.unwrap());

	assert_eq!(
		executor.get_result().unwrap().body,
		br#"{"ok": false}"#.to_vec()
	);
	assert_eq!(
		executor.error_message().unwrap(),
		"The condition has not been met! | Fetch failed: Request timed out: no answer within 5s | curl -X GET https://webludus.pl/"
	);
}

#[tokio::test]
async fn test_timeout_is_passed_to_the_session() {
	let mut session = MockHttpSession::new();
	session.expect_defaults().returning(SessionDefaults::default);
	session
		.expect_send()
		.withf(|_, timeout| *timeout == Duration::from_millis(250))
		.times(1)
		.returning(|_, _| Ok(HttpResponse::new(200)));

	let mut executor = RequestsExecutor::new(
		HttpRequest::get("https://webludus.pl/"),
		200,
		Some(Arc::new(session)),
	)
	.unwrap()
	.with_timeout(Duration::from_millis(250));

	assert!(executor.is_condition_met().await.unwrap());
}

#[tokio::test]
async fn test_results_require_a_probe() {
	let executor = RequestsExecutor::new(
		HttpRequest::get("https://webludus.pl/"),
		200,
		Some(scripted_session(vec![])),
	)
	.unwrap();

	assert!(matches!(executor.get_result(), Err(ExecutorError::NotReady(_))));
	assert_eq!(
		executor.error_message().unwrap_err().message(),
		"The condition has not yet been checked."
	);
}
