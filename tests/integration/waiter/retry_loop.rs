//! Retry loop behaviour over scripted executors.

use bepatient::{
	services::{
		executor::Executor,
		waiter::{retry, wait_for_executor, WaiterError},
	},
	utils::tests::StubExecutor,
};
use std::time::Duration;

#[tokio::test]
async fn test_success_after_failures_within_budget() {
	let mut executor = StubExecutor::succeeding_after(4);

	wait_for_executor(&mut executor, 5, Duration::ZERO, true)
		.await
		.unwrap();

	assert_eq!(executor.probes(), 5);
	assert_eq!(
		executor.error_message().unwrap(),
		"All conditions have been met."
	);
}

#[tokio::test]
async fn test_budget_exhausted_raises_with_message() {
	let mut executor = StubExecutor::succeeding_after(5);

	let error = wait_for_executor(&mut executor, 5, Duration::ZERO, true)
		.await
		.unwrap_err();

	assert_eq!(executor.probes(), 5);
	assert!(matches!(error, WaiterError::ConditionNotMet(_)));
	assert_eq!(error.message(), StubExecutor::UNMET_MESSAGE);
}

#[tokio::test]
async fn test_budget_exhausted_without_raise_error_leaves_result() {
	let mut executor = StubExecutor::succeeding_after(5);

	wait_for_executor(&mut executor, 2, Duration::ZERO, false)
		.await
		.unwrap();

	assert_eq!(executor.get_result().unwrap(), &serde_json::json!(2));
	assert_eq!(executor.error_message().unwrap(), StubExecutor::UNMET_MESSAGE);
}

#[tokio::test]
async fn test_abort_ignores_remaining_budget() {
	let mut executor = StubExecutor::aborting();

	let error = wait_for_executor(&mut executor, 1000, Duration::from_secs(3600), false)
		.await
		.unwrap_err();

	assert!(error.is_exception_condition());
	assert_eq!(executor.probes(), 1);
}

#[tokio::test]
async fn test_retry_helper_returns_last_error() {
	let mut attempts = 0;

	let result: Result<(), String> = retry(4, Duration::ZERO, || {
		attempts += 1;
		let attempt = attempts;
		async move { Err(format!("attempt {} failed", attempt)) }
	})
	.await;

	assert_eq!(result.unwrap_err(), "attempt 4 failed");
	assert_eq!(attempts, 4);
}
