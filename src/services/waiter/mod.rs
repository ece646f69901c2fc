//! Waiting for conditions to be met.
//!
//! - `wait`: the bounded retry loop driving any [`Executor`](crate::services::executor::Executor)
//! - `requests`: [`RequestsWaiter`] and the one-call HTTP helpers
//! - `sql`: [`SqlWaiter`]
//! - `retry`: retrying an arbitrary async operation

use std::time::Duration;

mod error;
mod requests;
mod retry;
mod sql;
mod wait;

pub use error::WaiterError;
pub use requests::{wait_for_value_in_request, wait_for_values_in_request, RequestsWaiter};
pub use retry::retry;
pub use sql::SqlWaiter;
pub use wait::wait_for_executor;

/// Retry budget of a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
	/// Maximum number of probes, at least one
	pub retries: usize,
	/// Pause between two probes
	pub delay: Duration,
	/// Return [`WaiterError::ConditionNotMet`] once the budget is spent
	pub raise_error: bool,
}

impl Default for WaitOptions {
	fn default() -> Self {
		Self {
			retries: 60,
			delay: Duration::from_secs(1),
			raise_error: true,
		}
	}
}
