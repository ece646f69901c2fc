//! Waiting for a SQL query to return the expected rows.

use std::time::Duration;

use super::{wait_for_executor, WaiterError};
use crate::{
	models::{CheckerConfig, SqlRow},
	services::{
		checker::{Checker, SqlChecker},
		conditions::ConditionStage,
		executor::{Executor, SqlExecutor},
		sql::SqlCursor,
	},
};

/// Fluent front end over a [`SqlExecutor`]
#[derive(Debug)]
pub struct SqlWaiter<C: SqlCursor> {
	executor: SqlExecutor<C>,
}

impl<C: SqlCursor> SqlWaiter<C> {
	pub fn new(cursor: C, query: impl Into<String>) -> Self {
		Self {
			executor: SqlExecutor::new(cursor, query),
		}
	}

	/// Resolves a configured checker and adds it to its condition group.
	///
	/// Only `sql_checker` entries are accepted.
	pub fn add_checker(&mut self, config: CheckerConfig) -> Result<&mut Self, WaiterError> {
		let checker = SqlChecker::from_config(&config)?;
		self.executor.add_checker(config.stage, Box::new(checker));
		Ok(self)
	}

	/// Adds a user-defined checker to the main conditions
	pub fn add_custom_checker(&mut self, checker: impl Checker<[SqlRow]> + 'static) -> &mut Self {
		self.add_custom_checker_to(ConditionStage::Main, checker)
	}

	/// Adds a user-defined checker to the given condition group
	pub fn add_custom_checker_to(
		&mut self,
		stage: ConditionStage,
		checker: impl Checker<[SqlRow]> + 'static,
	) -> &mut Self {
		self.executor.add_checker(stage, Box::new(checker));
		self
	}

	/// Polls until the conditions are met, see [`wait_for_executor`]
	pub async fn run(
		&mut self,
		retries: usize,
		delay: Duration,
		raise_error: bool,
	) -> Result<&mut Self, WaiterError> {
		wait_for_executor(&mut self.executor, retries, delay, raise_error).await?;
		Ok(self)
	}

	/// Rows of the latest successful query
	pub fn get_result(&self) -> Result<&Vec<SqlRow>, WaiterError> {
		Ok(self.executor.get_result()?)
	}

	pub fn error_message(&self) -> Result<String, WaiterError> {
		Ok(self.executor.error_message()?)
	}

	pub fn executor(&self) -> &SqlExecutor<C> {
		&self.executor
	}
}
