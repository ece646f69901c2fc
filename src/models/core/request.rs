//! HTTP request specification and its prepared form.
//!
//! An [`HttpRequest`] is what a caller or a configuration file describes: method,
//! URL, headers, cookies and body. [`HttpRequest::prepare`] validates the URL and
//! folds cookies into a single `Cookie` header, producing the [`PreparedRequest`]
//! that is actually sent on every probe and rendered in failure messages.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{models::ConfigError, utils::ordered_pairs};

const COOKIE_HEADER: &str = "Cookie";

fn default_method() -> String {
	"GET".to_string()
}

/// Request specification before preparation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
	/// HTTP method, any case
	#[serde(default = "default_method")]
	pub method: String,
	/// Absolute URL
	pub url: String,
	/// Headers in sending order
	#[serde(default, with = "ordered_pairs")]
	pub headers: Vec<(String, String)>,
	/// Cookies in sending order
	#[serde(default, with = "ordered_pairs")]
	pub cookies: Vec<(String, String)>,
	/// Raw request body
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub body: Option<String>,
}

impl HttpRequest {
	pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			method: method.into(),
			url: url.into(),
			headers: Vec::new(),
			cookies: Vec::new(),
			body: None,
		}
	}

	pub fn get(url: impl Into<String>) -> Self {
		Self::new("GET", url)
	}

	pub fn post(url: impl Into<String>) -> Self {
		Self::new("POST", url)
	}

	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.cookies.push((name.into(), value.into()));
		self
	}

	pub fn body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());
		self
	}

	/// Sets a JSON body and a `Content-Type: application/json` header if none is set.
	pub fn json(mut self, body: &serde_json::Value) -> Self {
		if find_header(&self.headers, "Content-Type").is_none() {
			self.headers
				.push(("Content-Type".to_string(), "application/json".to_string()));
		}
		self.body = Some(body.to_string());
		self
	}

	/// Validates the URL, upper-cases the method and folds cookies into `Cookie`.
	pub fn prepare(&self) -> Result<PreparedRequest, ConfigError> {
		let url = Url::parse(&self.url).map_err(|e| {
			ConfigError::validation_error(
				format!("Invalid request URL '{}': {}", self.url, e),
				Some(Box::new(e)),
				None,
			)
		})?;

		let method = self.method.trim().to_uppercase();
		if method.is_empty() {
			return Err(ConfigError::validation_error(
				"Request method cannot be empty",
				None,
				None,
			));
		}

		let mut prepared = PreparedRequest {
			method,
			url,
			headers: self.headers.clone(),
			body: self.body.clone(),
		};
		prepared.append_cookies(&self.cookies);

		Ok(prepared)
	}
}

/// Immutable, ready-to-send request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
	pub method: String,
	pub url: Url,
	pub headers: Vec<(String, String)>,
	pub body: Option<String>,
}

impl PreparedRequest {
	/// Case-insensitive header lookup
	pub fn header(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}

	/// Replaces the first header with this name, or appends it.
	pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self
			.headers
			.iter_mut()
			.find(|(key, _)| key.eq_ignore_ascii_case(&name))
		{
			Some(entry) => entry.1 = value,
			None => self.headers.push((name, value)),
		}
	}

	/// Appends cookies to the `Cookie` header, creating it when absent.
	pub fn append_cookies(&mut self, cookies: &[(String, String)]) {
		if cookies.is_empty() {
			return;
		}

		let rendered = cookies
			.iter()
			.map(|(name, value)| format!("{}={}", name, value))
			.collect::<Vec<_>>()
			.join("; ");

		let merged = match self.header(COOKIE_HEADER) {
			Some(existing) if !existing.is_empty() => format!("{}; {}", existing, rendered),
			_ => rendered,
		};
		self.set_header(COOKIE_HEADER, merged);
	}

	/// Merges ambient session defaults into the request.
	///
	/// Headers already present on the request win; session headers only fill gaps.
	/// Session cookies are appended after the request's own cookies.
	pub fn merge_session(&mut self, headers: &[(String, String)], cookies: &[(String, String)]) {
		for (name, value) in headers {
			if name.eq_ignore_ascii_case(COOKIE_HEADER) {
				continue;
			}
			if self.header(name).is_none() {
				self.headers.push((name.clone(), value.clone()));
			}
		}
		self.append_cookies(cookies);
	}
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
	headers
		.iter()
		.find(|(key, _)| key.eq_ignore_ascii_case(name))
		.map(|(_, value)| value.as_str())
}
