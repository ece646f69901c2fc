//! Test helper utilities for wait configuration
//!
//! - `WaitConfigBuilder`: Builder for creating test WaitConfig instances

use crate::models::{CheckerConfig, HttpRequest, WaitConfig};

/// Builder for creating test WaitConfig instances
pub struct WaitConfigBuilder {
	name: String,
	request: HttpRequest,
	status_code: u16,
	timeout_ms: u64,
	retries: u32,
	delay_ms: u64,
	raise_error: bool,
	checkers: Vec<CheckerConfig>,
}

impl Default for WaitConfigBuilder {
	fn default() -> Self {
		Self {
			name: "order_ready".to_string(),
			request: HttpRequest::get("https://webludus.pl/orders/1"),
			status_code: 200,
			timeout_ms: 5000,
			retries: 3,
			delay_ms: 10,
			raise_error: true,
			checkers: Vec::new(),
		}
	}
}

impl WaitConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: &str) -> Self {
		self.name = name.to_string();
		self
	}

	pub fn request(mut self, request: HttpRequest) -> Self {
		self.request = request;
		self
	}

	pub fn url(mut self, url: &str) -> Self {
		self.request.url = url.to_string();
		self
	}

	pub fn status_code(mut self, status_code: u16) -> Self {
		self.status_code = status_code;
		self
	}

	pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	pub fn retries(mut self, retries: u32) -> Self {
		self.retries = retries;
		self
	}

	pub fn delay_ms(mut self, delay_ms: u64) -> Self {
		self.delay_ms = delay_ms;
		self
	}

	pub fn raise_error(mut self, raise_error: bool) -> Self {
		self.raise_error = raise_error;
		self
	}

	pub fn checker(mut self, checker: CheckerConfig) -> Self {
		self.checkers.push(checker);
		self
	}

	pub fn build(self) -> WaitConfig {
		WaitConfig {
			name: self.name,
			request: self.request,
			status_code: self.status_code,
			timeout_ms: self.timeout_ms,
			retries: self.retries,
			delay_ms: self.delay_ms,
			raise_error: self.raise_error,
			checkers: self.checkers,
		}
	}
}
