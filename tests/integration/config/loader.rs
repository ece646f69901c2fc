//! Loading wait configuration directories.

use bepatient::{
	models::{ConfigError, ConfigLoader, WaitConfig},
	services::{checker::CheckerKind, comparator::Comparator, conditions::ConditionStage},
};
use serde_json::json;
use std::{collections::HashMap, fs, path::Path};
use tempfile::TempDir;

fn write(dir: &Path, file: &str, content: &serde_json::Value) {
	fs::write(dir.join(file), content.to_string()).unwrap();
}

#[tokio::test]
async fn test_load_all_reads_every_json_file() {
	let dir = TempDir::new().unwrap();
	write(
		dir.path(),
		"orders.json",
		&json!({
			"name": "orders",
			"request": {
				"method": "post",
				"url": "https://webludus.pl/orders",
				"headers": {"task": "test"},
				"cookies": {"user-token": "abc-123"},
				"body": "{\"id\": 7}"
			},
			"status_code": 201,
			"retries": 10,
			"delay_ms": 250,
			"checkers": [
				{"comparer": "is_not_equal", "expected_value": "failed", "path": "state", "stage": "exception"},
				{"checker": "headers_checker", "comparer": "contain", "expected_value": "json", "path": "content-type"},
				{"comparer": "have_len_greater", "expected_value": 0, "dict_path": "items"}
			]
		}),
	);
	write(
		dir.path(),
		"health.json",
		&json!({"name": "health", "request": {"url": "https://webludus.pl/health"}}),
	);
	fs::write(dir.path().join("README.md"), "not a wait").unwrap();

	let waits: HashMap<String, WaitConfig> = WaitConfig::load_all(Some(dir.path())).await.unwrap();

	assert_eq!(waits.len(), 2);

	let health = &waits["health"];
	assert_eq!(health.status_code, 200);
	assert_eq!(health.retries, 60);
	assert_eq!(health.delay_ms, 1000);
	assert_eq!(health.timeout_ms, 5000);
	assert!(health.raise_error);
	assert!(health.checkers.is_empty());

	let orders = &waits["orders"];
	assert_eq!(orders.status_code, 201);
	assert_eq!(orders.checkers.len(), 3);
	assert_eq!(orders.checkers[0].stage, ConditionStage::Exception);
	assert_eq!(orders.checkers[1].checker, CheckerKind::Headers);
	assert_eq!(orders.checkers[2].comparer, Comparator::HaveLenGreater);
	assert_eq!(orders.checkers[2].path.as_deref(), Some("items"));

	let prepared = orders.request.prepare().unwrap();
	assert_eq!(prepared.method, "POST");
	assert_eq!(prepared.header("cookie"), Some("user-token=abc-123"));
}

#[tokio::test]
async fn test_unknown_comparer_is_rejected_with_available_names() {
	let dir = TempDir::new().unwrap();
	write(
		dir.path(),
		"bad.json",
		&json!({
			"name": "bad",
			"request": {"url": "https://webludus.pl"},
			"checkers": [{"comparer": "is_same", "expected_value": 1}]
		}),
	);

	let error = WaitConfig::load_all::<Vec<(String, WaitConfig)>>(Some(dir.path()))
		.await
		.unwrap_err();

	assert!(matches!(error, ConfigError::ParseError(_)));
	let message = error.to_string();
	assert!(message.contains("Unknown comparer 'is_same'"));
	assert!(message.contains("have_len_lesser"));
}

#[tokio::test]
async fn test_duplicate_names_are_rejected() {
	let dir = TempDir::new().unwrap();
	let wait = json!({"name": "same", "request": {"url": "https://webludus.pl"}});
	write(dir.path(), "a.json", &wait);
	write(dir.path(), "b.json", &wait);

	let error = WaitConfig::load_all::<Vec<(String, WaitConfig)>>(Some(dir.path()))
		.await
		.unwrap_err();

	assert!(error.to_string().contains("Duplicate wait name found: 'same'"));
}

#[tokio::test]
async fn test_zero_retries_fail_validation() {
	let dir = TempDir::new().unwrap();
	write(
		dir.path(),
		"zero.json",
		&json!({"name": "zero", "request": {"url": "https://webludus.pl"}, "retries": 0}),
	);

	let error = WaitConfig::load_from_path(&dir.path().join("zero.json"))
		.await
		.unwrap_err();

	assert!(matches!(error, ConfigError::ValidationError(_)));
	assert!(error.to_string().contains("retries must be a positive number"));
}

#[tokio::test]
async fn test_missing_directory_is_a_file_error() {
	let dir = TempDir::new().unwrap();

	let error = WaitConfig::load_all::<Vec<(String, WaitConfig)>>(Some(&dir.path().join("missing")))
		.await
		.unwrap_err();

	assert!(matches!(error, ConfigError::FileError(_)));
}
