//! Ordered condition groups evaluated on every attempt.
//!
//! Checkers are grouped into exception, pre and main conditions and evaluated in
//! that order. Within a group every checker runs, in insertion order. A failing
//! exception condition aborts the wait with [`ConditionsError`]; a failing
//! pre-condition keeps the main conditions from being evaluated for that attempt.

use std::fmt;

mod error;

pub use error::ConditionsError;

use crate::services::checker::Checker;

/// Condition group a checker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionStage {
	/// Failure aborts the wait
	Exception,
	/// Failure skips the main conditions for the attempt
	Pre,
	#[default]
	Main,
}

crate::impl_registry_name_enum!(ConditionStage, "stage", {
	"exception" => Exception,
	"pre" => Pre,
	"main" => Main,
});

/// A checker that failed during the latest evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCheck {
	/// Group of the checker; `None` for checks the executor runs itself
	pub stage: Option<ConditionStage>,
	/// Insertion index within the group
	pub position: usize,
	/// Checker rendering taken right after the failed check
	pub description: String,
}

impl FailedCheck {
	pub fn new(
		stage: Option<ConditionStage>,
		position: usize,
		description: impl Into<String>,
	) -> Self {
		Self {
			stage,
			position,
			description: description.into(),
		}
	}

	/// Renderings joined by `", "`
	pub fn join(failed: &[FailedCheck]) -> String {
		failed
			.iter()
			.map(|check| check.description.as_str())
			.collect::<Vec<_>>()
			.join(", ")
	}
}

impl fmt::Display for FailedCheck {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.description)
	}
}

type BoxedChecker<D> = Box<dyn Checker<D>>;

/// Owns the checkers of one executor and evaluates them group by group
pub struct ConditionsManager<D: ?Sized> {
	exception_conditions: Vec<BoxedChecker<D>>,
	pre_conditions: Vec<BoxedChecker<D>>,
	main_conditions: Vec<BoxedChecker<D>>,
	failed: Vec<FailedCheck>,
}

impl<D: ?Sized> Default for ConditionsManager<D> {
	fn default() -> Self {
		Self {
			exception_conditions: Vec::new(),
			pre_conditions: Vec::new(),
			main_conditions: Vec::new(),
			failed: Vec::new(),
		}
	}
}

impl<D: ?Sized> ConditionsManager<D> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a checker to the given group
	pub fn add(&mut self, stage: ConditionStage, checker: BoxedChecker<D>) -> &mut Self {
		match stage {
			ConditionStage::Exception => self.exception_conditions.push(checker),
			ConditionStage::Pre => self.pre_conditions.push(checker),
			ConditionStage::Main => self.main_conditions.push(checker),
		}
		self
	}

	pub fn add_exception_condition(&mut self, checker: impl Checker<D> + 'static) -> &mut Self {
		self.add(ConditionStage::Exception, Box::new(checker))
	}

	pub fn add_pre_condition(&mut self, checker: impl Checker<D> + 'static) -> &mut Self {
		self.add(ConditionStage::Pre, Box::new(checker))
	}

	pub fn add_main_condition(&mut self, checker: impl Checker<D> + 'static) -> &mut Self {
		self.add(ConditionStage::Main, Box::new(checker))
	}

	/// Number of checkers in a group
	pub fn len(&self, stage: ConditionStage) -> usize {
		match stage {
			ConditionStage::Exception => self.exception_conditions.len(),
			ConditionStage::Pre => self.pre_conditions.len(),
			ConditionStage::Main => self.main_conditions.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.exception_conditions.is_empty()
			&& self.pre_conditions.is_empty()
			&& self.main_conditions.is_empty()
	}

	/// Failures of the latest evaluation
	pub fn failed_checks(&self) -> &[FailedCheck] {
		&self.failed
	}

	/// Evaluates the groups in order and returns the failures of this round.
	///
	/// The failures replace those of the previous round. An exception-condition
	/// failure is returned as an error instead, after being recorded the same way.
	pub fn check_all(&mut self, data: &D) -> Result<&[FailedCheck], ConditionsError> {
		self.check_exceptions(data)?;
		Ok(self.check_conditions(data))
	}

	/// Evaluates only the exception conditions.
	///
	/// Lets an executor run its own checks between the exception group and the
	/// pre/main groups. Clears the failures of the previous round on success.
	pub fn check_exceptions(&mut self, data: &D) -> Result<(), ConditionsError> {
		let failed = run_stage(&mut self.exception_conditions, ConditionStage::Exception, data);
		if !failed.is_empty() {
			self.failed = failed.clone();
			return Err(ConditionsError::exception_condition_not_met(failed, None, None));
		}
		self.failed.clear();
		Ok(())
	}

	/// Evaluates the pre conditions, then the main conditions if all pre
	/// conditions passed
	pub fn check_conditions(&mut self, data: &D) -> &[FailedCheck] {
		self.failed = run_stage(&mut self.pre_conditions, ConditionStage::Pre, data);
		if self.failed.is_empty() {
			self.failed = run_stage(&mut self.main_conditions, ConditionStage::Main, data);
		}
		&self.failed
	}
}

impl<D: ?Sized> fmt::Debug for ConditionsManager<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let render = |checkers: &[BoxedChecker<D>]| -> Vec<String> {
			checkers.iter().map(|checker| checker.to_string()).collect()
		};
		f.debug_struct("ConditionsManager")
			.field("exception_conditions", &render(&self.exception_conditions))
			.field("pre_conditions", &render(&self.pre_conditions))
			.field("main_conditions", &render(&self.main_conditions))
			.field("failed", &self.failed)
			.finish()
	}
}

fn run_stage<D: ?Sized>(
	checkers: &mut [BoxedChecker<D>],
	stage: ConditionStage,
	data: &D,
) -> Vec<FailedCheck> {
	checkers
		.iter_mut()
		.enumerate()
		.filter_map(|(position, checker)| {
			if checker.check(data) {
				None
			} else {
				Some(FailedCheck::new(Some(stage), position, checker.to_string()))
			}
		})
		.collect()
}
