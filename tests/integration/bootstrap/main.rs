use bepatient::{
	bootstrap::{create_waiter, load_waits, run_wait, WaitOverrides},
	models::CheckerConfig,
	services::{checker::CheckerKind, comparator::Comparator, waiter::WaiterError},
	utils::tests::{create_test_session, WaitConfigBuilder},
};
use serde_json::json;
use std::{fs, time::Duration};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_waits_prefers_single_file() {
	let dir = TempDir::new().unwrap();
	for name in ["b_second", "a_first"] {
		fs::write(
			dir.path().join(format!("{}.json", name)),
			json!({"name": name, "request": {"url": "https://webludus.pl"}}).to_string(),
		)
		.unwrap();
	}

	let all = load_waits(None, Some(dir.path())).await.unwrap();
	let names: Vec<&str> = all.iter().map(|wait| wait.name.as_str()).collect();
	assert_eq!(names, vec!["a_first", "b_second"]);

	let single = load_waits(Some(&dir.path().join("b_second.json")), Some(dir.path()))
		.await
		.unwrap();
	assert_eq!(single.len(), 1);
	assert_eq!(single[0].name, "b_second");
}

#[tokio::test]
async fn test_run_wait_polls_until_ready() {
	let mut server = mockito::Server::new_async().await;
	let pending = server
		.mock("GET", "/orders/1")
		.with_status(200)
		.with_body(r#"{"status": "pending"}"#)
		.expect(1)
		.create_async()
		.await;

	let wait = WaitConfigBuilder::new()
		.url(&format!("{}/orders/1", server.url()))
		.checker(CheckerConfig::new(Comparator::IsEqual, "ready").path("status"))
		.retries(1)
		.build();

	let error = run_wait(&wait, Some(create_test_session()))
		.await
		.unwrap_err();
	assert!(matches!(error, WaiterError::ConditionNotMet(_)));
	pending.assert_async().await;
	pending.remove_async().await;

	server
		.mock("GET", "/orders/1")
		.with_status(200)
		.with_body(r#"{"status": "ready"}"#)
		.create_async()
		.await;

	let report = run_wait(&wait, Some(create_test_session())).await.unwrap();
	assert_eq!(report.name, "order_ready");
	assert_eq!(report.message, "All conditions have been met.");
	assert_eq!(report.response.unwrap().status_code, 200);
}

#[tokio::test]
async fn test_overrides_disable_raising() {
	let mut server = mockito::Server::new_async().await;
	server
		.mock("GET", "/")
		.with_status(503)
		.create_async()
		.await;

	let mut wait = WaitConfigBuilder::new().url(&server.url()).build();
	WaitOverrides {
		retries: Some(2),
		delay: Some(Duration::from_millis(1)),
		raise_error: Some(false),
	}
	.apply(&mut wait);

	assert_eq!(wait.retries, 2);
	assert_eq!(wait.delay_ms, 1);

	let report = run_wait(&wait, Some(create_test_session())).await.unwrap();
	assert!(report
		.message
		.starts_with("The condition has not been met! | Failed checkers: (Checker: StatusCodeChecker"));
	assert_eq!(report.response.unwrap().status_code, 503);
}

#[test]
fn test_create_waiter_rejects_misplaced_checker() {
	let wait = WaitConfigBuilder::new()
		.checker(CheckerConfig::new(Comparator::IsEqual, 1).checker(CheckerKind::Sql))
		.build();

	assert!(create_waiter(&wait, Some(create_test_session())).is_err());
}
