//! Retrying a fallible async operation with a constant delay.

use backon::{ConstantBuilder, Retryable};
use std::{fmt::Display, future::Future, time::Duration};

/// Runs `op` up to `attempts` times, sleeping `delay` after each failure.
///
/// At least one attempt is made. The error of the last attempt is returned
/// when all of them fail.
pub async fn retry<T, E, F, Fut>(attempts: usize, delay: Duration, op: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: Display,
{
	let backoff = ConstantBuilder::default()
		.with_delay(delay)
		.with_max_times(attempts.saturating_sub(1));

	op.retry(backoff)
		.sleep(tokio::time::sleep)
		.notify(|err: &E, dur: Duration| {
			tracing::warn!("Attempt failed: {}. Retrying in {:?}", err, dur);
		})
		.await
}
