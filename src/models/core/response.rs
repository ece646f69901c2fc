//! HTTP response as seen by checkers.

use serde_json::{Map, Value};

use crate::models::PreparedRequest;

/// Response of a single fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
	/// Numeric status code
	pub status_code: u16,
	/// Headers in received order
	pub headers: Vec<(String, String)>,
	/// Raw body bytes
	pub body: Vec<u8>,
	/// Request that produced this response
	pub request: Option<PreparedRequest>,
	/// Redirect hops that led to this response, oldest first
	pub history: Vec<HttpResponse>,
}

impl HttpResponse {
	pub fn new(status_code: u16) -> Self {
		Self {
			status_code,
			..Self::default()
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_request(mut self, request: PreparedRequest) -> Self {
		self.request = Some(request);
		self
	}

	pub fn with_history(mut self, history: Vec<HttpResponse>) -> Self {
		self.history = history;
		self
	}

	/// Case-insensitive header lookup
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Body decoded as UTF-8, invalid sequences replaced
	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Body parsed as JSON
	pub fn json(&self) -> Result<Value, serde_json::Error> {
		serde_json::from_slice(&self.body)
	}

	/// Headers as a JSON object keyed by lowercase name.
	///
	/// Repeated headers are joined with `", "`.
	pub fn headers_object(&self) -> Value {
		let mut object = Map::new();
		for (name, value) in &self.headers {
			let key = name.to_lowercase();
			match object.get_mut(&key) {
				Some(Value::String(existing)) => {
					existing.push_str(", ");
					existing.push_str(value);
				}
				_ => {
					object.insert(key, Value::String(value.clone()));
				}
			}
		}
		Value::Object(object)
	}

	/// Request to re-issue when polling from this response.
	///
	/// After redirects this is the request of the first hop, otherwise the request
	/// attached to the response itself.
	pub fn originating_request(&self) -> Option<&PreparedRequest> {
		match self.history.first() {
			Some(first) => first.request.as_ref(),
			None => self.request.as_ref(),
		}
	}
}
