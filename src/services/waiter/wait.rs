//! Bounded retry loop driving an executor.

use std::time::Duration;

use super::WaiterError;
use crate::services::executor::Executor;

/// Probes `executor` until its conditions are met or `retries` probes have run.
///
/// Probes never overlap; `delay` is slept between two consecutive probes. A
/// failing exception condition ends the wait at once. When the budget runs out
/// a [`WaiterError::ConditionNotMet`] carrying the executor's error message is
/// returned if `raise_error` is set, otherwise the loop returns `Ok(())` and
/// the caller inspects the executor.
pub async fn wait_for_executor<E: Executor + ?Sized>(
	executor: &mut E,
	retries: usize,
	delay: Duration,
	raise_error: bool,
) -> Result<(), WaiterError> {
	if retries == 0 {
		return Err(WaiterError::invalid_argument(
			"retries must be a positive number",
			None,
			None,
		));
	}

	for attempt in 1..=retries {
		tracing::debug!(
			"Checking whether the condition has been met. The {} approach",
			attempt
		);
		if executor.is_condition_met().await? {
			tracing::debug!("Condition met!");
			return Ok(());
		}
		if attempt < retries {
			tracing::debug!(
				"The condition has not been met. Waiting: {:?}",
				delay
			);
			tokio::time::sleep(delay).await;
		}
	}

	let message = executor.error_message()?;
	if raise_error {
		return Err(WaiterError::condition_not_met(message, None, None));
	}
	tracing::info!("Giving up after {} attempts: {}", retries, message);
	Ok(())
}
