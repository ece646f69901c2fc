//! Executor re-running a SQL query on every probe.

use async_trait::async_trait;
use std::fmt;

use super::{Executor, ExecutorError, ProbeState};
use crate::{
	models::SqlRow,
	services::{
		checker::Checker,
		conditions::{ConditionStage, ConditionsManager, FailedCheck},
		sql::SqlCursor,
	},
};

/// Runs a query through a cursor on every probe and checks the fetched rows
pub struct SqlExecutor<C: SqlCursor> {
	cursor: C,
	query: String,
	conditions: ConditionsManager<[SqlRow]>,
	state: ProbeState<Vec<SqlRow>>,
}

impl<C: SqlCursor> SqlExecutor<C> {
	pub fn new(cursor: C, query: impl Into<String>) -> Self {
		Self {
			cursor,
			query: query.into(),
			conditions: ConditionsManager::new(),
			state: ProbeState::new(None),
		}
	}

	/// Adds a checker to the given condition group
	pub fn add_checker(
		&mut self,
		stage: ConditionStage,
		checker: Box<dyn Checker<[SqlRow]>>,
	) -> &mut Self {
		self.conditions.add(stage, checker);
		self
	}

	pub fn add_exception_condition(&mut self, checker: impl Checker<[SqlRow]> + 'static) -> &mut Self {
		self.conditions.add_exception_condition(checker);
		self
	}

	pub fn add_pre_condition(&mut self, checker: impl Checker<[SqlRow]> + 'static) -> &mut Self {
		self.conditions.add_pre_condition(checker);
		self
	}

	pub fn add_main_condition(&mut self, checker: impl Checker<[SqlRow]> + 'static) -> &mut Self {
		self.conditions.add_main_condition(checker);
		self
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	/// Failures of the latest probe
	pub fn failed_checks(&self) -> &[FailedCheck] {
		self.state.failed_checks()
	}

	/// Gives the cursor back, e.g. to inspect or close the connection
	pub fn into_cursor(self) -> C {
		self.cursor
	}
}

impl<C: SqlCursor> fmt::Debug for SqlExecutor<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SqlExecutor")
			.field("query", &self.query)
			.field("conditions", &self.conditions)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl<C: SqlCursor> Executor for SqlExecutor<C> {
	type Output = Vec<SqlRow>;

	async fn is_condition_met(&mut self) -> Result<bool, ExecutorError> {
		let rows = match self.cursor.fetch_all(&self.query).await {
			Ok(rows) => rows,
			Err(e) => {
				tracing::error!("Query failed! QUERY: {} | {}", self.query, e);
				self.state.record_fetch_failure(&e);
				return Ok(false);
			}
		};
		tracing::debug!("Executed: {}", self.query);

		let outcome = self.conditions.check_all(&rows).map(|failed| failed.to_vec());
		self.state.result = Some(rows);

		match outcome {
			Ok(failed) => Ok(self.state.record(failed)),
			Err(e) => Err(self.state.abort(e, &self.query)),
		}
	}

	fn get_result(&self) -> Result<&Vec<SqlRow>, ExecutorError> {
		self.state.get_result()
	}

	fn error_message(&self) -> Result<String, ExecutorError> {
		self.state.error_message(&self.query)
	}
}
