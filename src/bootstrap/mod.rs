//! Bootstrap module for turning wait configuration into running waits.
//!
//! This module loads wait configuration files, applies command line overrides and
//! builds a [`RequestsWaiter`] per configured wait.
//!
//! # Functions
//! - `load_waits`: Loads a single wait file or every wait in a directory
//! - `create_waiter`: Builds a waiter with all configured checkers resolved
//! - `run_wait`: Runs one configured wait and reports its outcome

use std::{error::Error, path::Path, sync::Arc, time::Duration};

use crate::{
	models::{ConfigError, ConfigLoader, HttpResponse, WaitConfig},
	services::{
		http::HttpSession,
		waiter::{RequestsWaiter, WaiterError},
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Loads the waits to run.
///
/// A single file wins over a directory; without either the default directory
/// is loaded. Directory waits are returned in file name order.
pub async fn load_waits(
	config_file: Option<&Path>,
	config_dir: Option<&Path>,
) -> std::result::Result<Vec<WaitConfig>, ConfigError> {
	let waits = match config_file {
		Some(path) => vec![WaitConfig::load_from_path(path).await?],
		None => WaitConfig::load_all::<Vec<(String, WaitConfig)>>(config_dir)
			.await?
			.into_iter()
			.map(|(_, wait)| wait)
			.collect(),
	};

	for wait in &waits {
		wait.validate_protocol();
	}
	Ok(waits)
}

/// Command line values replacing the ones of every loaded wait
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaitOverrides {
	pub retries: Option<u32>,
	pub delay: Option<Duration>,
	pub raise_error: Option<bool>,
}

impl WaitOverrides {
	pub fn apply(&self, wait: &mut WaitConfig) {
		if let Some(retries) = self.retries {
			wait.retries = retries;
		}
		if let Some(delay) = self.delay {
			wait.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
		}
		if let Some(raise_error) = self.raise_error {
			wait.raise_error = raise_error;
		}
	}
}

/// Builds the waiter of a configured wait.
///
/// Without a session the waiter creates its own.
pub fn create_waiter(
	wait: &WaitConfig,
	session: Option<Arc<dyn HttpSession>>,
) -> std::result::Result<RequestsWaiter, WaiterError> {
	let waiter = match session {
		Some(session) => {
			RequestsWaiter::with_session(wait.request.clone(), wait.status_code, session)?
		}
		None => RequestsWaiter::new(wait.request.clone(), wait.status_code)?,
	};
	let mut waiter = waiter.with_timeout(wait.timeout());
	for checker in &wait.checkers {
		waiter.add_checker(checker.clone())?;
	}
	Ok(waiter)
}

/// Outcome of a wait that did not fail
#[derive(Debug, Clone)]
pub struct WaitReport {
	pub name: String,
	/// Executor message of the last probe
	pub message: String,
	/// Response of the last successful request, if any
	pub response: Option<HttpResponse>,
}

/// Runs a configured wait to completion.
///
/// Fails only when the wait raises: an exception condition failed, or the
/// retries ran out with `raise_error` set.
pub async fn run_wait(
	wait: &WaitConfig,
	session: Option<Arc<dyn HttpSession>>,
) -> std::result::Result<WaitReport, WaiterError> {
	tracing::info!(
		wait = %wait.name,
		retries = wait.retries,
		delay_ms = wait.delay_ms,
		"Starting wait"
	);

	let mut waiter = create_waiter(wait, session)?;
	waiter
		.run(wait.retries as usize, wait.delay(), wait.raise_error)
		.await?;

	let message = waiter.error_message()?;
	tracing::info!(wait = %wait.name, "{}", message);

	Ok(WaitReport {
		name: wait.name.clone(),
		message,
		response: waiter.get_result().ok().cloned(),
	})
}
