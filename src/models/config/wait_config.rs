//! Wait configuration loading and validation.
//!
//! A wait configuration describes one HTTP poll: the request, the expected status
//! code, the retry budget and the checkers to evaluate on every response. Files are
//! plain JSON; comparer, checker and stage names are resolved while parsing so an
//! unknown name fails the load instead of the wait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path, time::Duration};

use crate::{
	models::{config::error::ConfigError, ConfigLoader, HttpRequest},
	services::{checker::CheckerKind, comparator::Comparator, conditions::ConditionStage},
};

const DEFAULT_CONFIG_DIR: &str = "config/waits";

fn default_status_code() -> u16 {
	200
}

fn default_timeout_ms() -> u64 {
	5000
}

fn default_retries() -> u32 {
	60
}

fn default_delay_ms() -> u64 {
	1000
}

fn default_raise_error() -> bool {
	true
}

/// One checker entry of a wait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
	/// Checker kind, `json_checker` when omitted
	#[serde(default)]
	pub checker: CheckerKind,
	/// Comparer applied to the extracted value
	pub comparer: Comparator,
	/// Value handed to the comparer as its second operand
	#[serde(default)]
	pub expected_value: Value,
	/// Dot-separated path into the payload
	#[serde(default, alias = "dict_path", skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	/// Key collected recursively from the payload
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub search_query: Option<String>,
	/// Returned when extraction finds nothing
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fallback: Option<Value>,
	/// Condition group the checker joins
	#[serde(default)]
	pub stage: ConditionStage,
}

impl CheckerConfig {
	pub fn new(comparer: Comparator, expected_value: impl Into<Value>) -> Self {
		Self {
			checker: CheckerKind::default(),
			comparer,
			expected_value: expected_value.into(),
			path: None,
			search_query: None,
			fallback: None,
			stage: ConditionStage::default(),
		}
	}

	/// Builds a checker entry from registry names.
	///
	/// Fails with a validation error naming the available entries when either
	/// name is unknown.
	pub fn from_names(
		comparer: &str,
		checker: &str,
		expected_value: impl Into<Value>,
	) -> Result<Self, ConfigError> {
		Ok(Self::new(comparer.parse()?, expected_value).checker(checker.parse()?))
	}

	pub fn checker(mut self, checker: CheckerKind) -> Self {
		self.checker = checker;
		self
	}

	pub fn path(mut self, path: impl Into<String>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn search_query(mut self, search_query: impl Into<String>) -> Self {
		self.search_query = Some(search_query.into());
		self
	}

	pub fn fallback(mut self, fallback: impl Into<Value>) -> Self {
		self.fallback = Some(fallback.into());
		self
	}

	pub fn stage(mut self, stage: ConditionStage) -> Self {
		self.stage = stage;
		self
	}

	/// Checks that the entry can be evaluated against the given payload kinds.
	pub fn validate_for(&self, allowed: &[CheckerKind]) -> Result<(), ConfigError> {
		if !allowed.contains(&self.checker) {
			return Err(ConfigError::validation_error(
				format!(
					"Checker '{}' cannot be used here. Available: {}",
					self.checker,
					allowed
						.iter()
						.map(|kind| kind.name())
						.collect::<Vec<_>>()
						.join(", ")
				),
				None,
				None,
			));
		}

		if self.checker == CheckerKind::StatusCode
			&& (self.path.is_some() || self.search_query.is_some())
		{
			return Err(ConfigError::validation_error(
				"status_code_checker does not accept path or search_query",
				None,
				None,
			));
		}

		for (field, value) in [("path", &self.path), ("search_query", &self.search_query)] {
			if matches!(value, Some(v) if v.trim().is_empty()) {
				return Err(ConfigError::validation_error(
					format!("{} cannot be empty", field),
					None,
					None,
				));
			}
		}

		Ok(())
	}
}

/// Configuration of a single HTTP wait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaitConfig {
	/// Unique name of the wait
	pub name: String,
	/// Request re-issued on every attempt
	pub request: HttpRequest,
	/// Expected response status code
	#[serde(default = "default_status_code")]
	pub status_code: u16,
	/// Per-request timeout in milliseconds
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	/// Attempt budget
	#[serde(default = "default_retries")]
	pub retries: u32,
	/// Pause between attempts in milliseconds
	#[serde(default = "default_delay_ms")]
	pub delay_ms: u64,
	/// Whether an exhausted budget is an error
	#[serde(default = "default_raise_error")]
	pub raise_error: bool,
	/// Checkers evaluated on every response
	#[serde(default)]
	pub checkers: Vec<CheckerConfig>,
}

impl WaitConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	pub fn delay(&self) -> Duration {
		Duration::from_millis(self.delay_ms)
	}
}

#[async_trait]
impl ConfigLoader for WaitConfig {
	/// Load all wait configurations from a directory
	///
	/// Reads and parses every JSON file in the directory, keyed by file stem.
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		let wait_dir = path.unwrap_or(Path::new(DEFAULT_CONFIG_DIR));
		let dir_metadata = || {
			Some(HashMap::from([(
				"path".to_string(),
				wait_dir.display().to_string(),
			)]))
		};
		let mut pairs: Vec<(String, Self)> = Vec::new();

		if !wait_dir.exists() {
			return Err(ConfigError::file_error(
				"waits directory not found",
				None,
				dir_metadata(),
			));
		}

		let mut paths = Vec::new();
		for entry in fs::read_dir(wait_dir).map_err(|e| {
			ConfigError::file_error(
				format!("failed to read waits directory: {}", e),
				Some(Box::new(e)),
				dir_metadata(),
			)
		})? {
			let entry = entry.map_err(|e| {
				ConfigError::file_error(
					format!("failed to read directory entry: {}", e),
					Some(Box::new(e)),
					dir_metadata(),
				)
			})?;
			let path = entry.path();
			if Self::is_json_file(&path) {
				paths.push(path);
			}
		}
		// read_dir order is platform dependent; waits run in file name order
		paths.sort();

		for path in paths {
			let name = path
				.file_stem()
				.and_then(|s| s.to_str())
				.unwrap_or("unknown")
				.to_string();

			let wait = Self::load_from_path(&path).await?;

			let existing: Vec<&WaitConfig> = pairs.iter().map(|(_, wait)| wait).collect();
			Self::validate_uniqueness(&existing, &wait, &path.display().to_string())?;

			pairs.push((name, wait));
		}

		Ok(T::from_iter(pairs))
	}

	/// Load a wait configuration from a specific file
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open wait config file: {}", e),
				Some(Box::new(e)),
				Some(HashMap::from([(
					"path".to_string(),
					path.display().to_string(),
				)])),
			)
		})?;
		let config: WaitConfig = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse wait config: {}", e),
				Some(Box::new(e)),
				Some(HashMap::from([(
					"path".to_string(),
					path.display().to_string(),
				)])),
			)
		})?;

		config.validate().map_err(|e| {
			ConfigError::validation_error(
				format!("wait validation failed: {}", e),
				Some(Box::new(e)),
				Some(HashMap::from([
					("path".to_string(), path.display().to_string()),
					("wait_name".to_string(), config.name.clone()),
				])),
			)
		})?;

		Ok(config)
	}

	/// Validate the wait configuration
	fn validate(&self) -> Result<(), ConfigError> {
		if self.name.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Wait name is required",
				None,
				None,
			));
		}

		if self.request.url.trim().is_empty() {
			return Err(ConfigError::validation_error(
				"Request URL is required",
				None,
				None,
			));
		}
		self.request.prepare()?;

		if !(100..=599).contains(&self.status_code) {
			return Err(ConfigError::validation_error(
				format!("Invalid status code: {}", self.status_code),
				None,
				None,
			));
		}

		if self.retries == 0 {
			return Err(ConfigError::validation_error(
				"retries must be a positive number",
				None,
				None,
			));
		}

		if self.timeout_ms == 0 {
			return Err(ConfigError::validation_error(
				"timeout_ms must be a positive number",
				None,
				None,
			));
		}

		for (index, checker) in self.checkers.iter().enumerate() {
			checker
				.validate_for(CheckerKind::RESPONSE_KINDS)
				.map_err(|e| {
					ConfigError::validation_error(
						format!("Invalid checker #{}: {}", index, e),
						Some(Box::new(e)),
						None,
					)
				})?;
		}

		self.validate_protocol();

		Ok(())
	}

	/// Warns about plain HTTP requests carrying credentials
	fn validate_protocol(&self) {
		if !self.request.url.trim_start().to_lowercase().starts_with("http://") {
			return;
		}

		let has_credentials = !self.request.cookies.is_empty()
			|| self.request.headers.iter().any(|(name, _)| {
				name.eq_ignore_ascii_case("authorization") || name.eq_ignore_ascii_case("cookie")
			});

		if has_credentials {
			tracing::warn!(
				"Wait '{}' sends credentials over an insecure protocol: {}",
				self.name,
				self.request.url
			);
		}
	}

	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError> {
		if instances.iter().any(|existing| existing.name == current_instance.name) {
			return Err(ConfigError::validation_error(
				format!("Duplicate wait name found: '{}'", current_instance.name),
				None,
				Some(HashMap::from([
					("wait_name".to_string(), current_instance.name.clone()),
					("path".to_string(), file_path.to_string()),
				])),
			));
		}
		Ok(())
	}
}
