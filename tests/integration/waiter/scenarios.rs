//! End-to-end waits against a mock HTTP server.

use bepatient::{
	models::{CheckerConfig, HttpRequest},
	services::{
		checker::{CheckerKind, Checker, Extraction, ResponseChecker},
		comparator::{Comparator, Comparer},
		conditions::ConditionStage,
		waiter::{wait_for_values_in_request, RequestsWaiter, WaitOptions, WaiterError},
	},
	utils::tests::{create_test_session, json_response, StubChecker},
};
use serde_json::Value;
use std::time::Duration;

#[test]
fn test_json_path_checker_matches_boolean() {
	let mut checker =
		ResponseChecker::json(Comparator::IsEqual, true, Extraction::new().path("ok"));

	assert!(checker.check(&json_response(200, r#"{"ok": true}"#)));
}

#[test]
fn test_search_query_collects_every_match() {
	let mut checker = ResponseChecker::json(
		Comparator::Contain,
		"John",
		Extraction::new().search_query("name"),
	);
	let response = json_response(
		200,
		r#"{"list_of_dicts":[{"name":"John"},{"name":"Mike"}]}"#,
	);

	assert!(checker.check(&response));
	assert_eq!(
		checker.prepared_data(),
		Some(&serde_json::json!(["John", "Mike"]))
	);
}

#[tokio::test]
async fn test_status_code_mismatch_skips_body_checkers() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("GET", "/")
		.with_status(404)
		.with_body(r#"{"ok": true}"#)
		.create_async()
		.await;
	let body = StubChecker::passing("body");
	let calls = body.calls();

	let mut waiter =
		RequestsWaiter::with_session(HttpRequest::get(server.url()), 200, create_test_session())
			.unwrap();
	waiter.add_custom_checker(body);

	let error = waiter
		.run(2, Duration::from_millis(1), true)
		.await
		.unwrap_err();

	assert_eq!(calls.get(), 0);
	assert_eq!(waiter.executor().failed_checks().len(), 1);
	assert!(error
		.message()
		.contains("Failed checkers: (Checker: StatusCodeChecker | Comparer: is_equal | Expected_value: 200 | Data: 404)"));
}

#[tokio::test]
async fn test_exception_condition_aborts_after_one_probe() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/jobs/1")
		.with_status(200)
		.with_body(r#"{"state": "crashed"}"#)
		.expect(1)
		.create_async()
		.await;

	let mut waiter = RequestsWaiter::with_session(
		HttpRequest::get(format!("{}/jobs/1", server.url())),
		200,
		create_test_session(),
	)
	.unwrap();
	waiter
		.add_checker(
			CheckerConfig::new(Comparator::IsNotEqual, "crashed")
				.path("state")
				.stage(ConditionStage::Exception),
		)
		.unwrap()
		.add_checker(CheckerConfig::new(Comparator::IsEqual, "done").path("state"))
		.unwrap();

	let error = waiter
		.run(60, Duration::from_secs(1), true)
		.await
		.unwrap_err();

	assert!(error.is_exception_condition());
	assert!(matches!(error, WaiterError::Executor(_)));
	mock.assert_async().await;
}

#[tokio::test]
async fn test_headers_checker_reads_lowercased_headers() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("GET", "/")
		.with_status(200)
		.with_header("X-Request-State", "ready")
		.create_async()
		.await;

	let response = wait_for_values_in_request(
		HttpRequest::get(server.url()),
		vec![CheckerConfig::new(Comparator::IsEqual, "ready")
			.checker(CheckerKind::Headers)
			.path("X-Request-State")],
		200,
		Some(create_test_session()),
		WaitOptions {
			retries: 1,
			delay: Duration::ZERO,
			raise_error: true,
		},
	)
	.await
	.unwrap();

	assert_eq!(response.header("x-request-state"), Some("ready"));
}

#[tokio::test]
async fn test_custom_comparer_in_custom_checker() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("GET", "/")
		.with_status(200)
		.with_body(r#"{"version": "2.4.1"}"#)
		.create_async()
		.await;
	let at_least_two = Comparer::custom("major_at_least", |actual: &Value, expected: &Value| {
		let major = actual
			.as_str()
			.and_then(|v| v.split('.').next())
			.and_then(|m| m.parse::<u64>().ok());
		matches!((major, expected.as_u64()), (Some(m), Some(e)) if m >= e)
	});

	let mut waiter =
		RequestsWaiter::with_session(HttpRequest::get(server.url()), 200, create_test_session())
			.unwrap();
	waiter.add_custom_checker(ResponseChecker::json(
		at_least_two,
		2,
		Extraction::new().path("version"),
	));

	waiter.run(1, Duration::ZERO, true).await.unwrap();
	assert_eq!(
		waiter.error_message().unwrap(),
		"All conditions have been met."
	);
}

#[test]
fn test_unknown_names_fail_at_registration() {
	let error = CheckerConfig::from_names("is_same", "json_checker", 1).unwrap_err();
	assert!(error.to_string().contains("Unknown comparer 'is_same'"));

	let error = CheckerConfig::from_names("is_equal", "xml_checker", 1).unwrap_err();
	assert!(error.to_string().contains("Unknown checker 'xml_checker'"));
}
