//! Test helper utilities for HTTP responses
//!
//! - `ResponseBuilder`: Builder for creating test HttpResponse instances

use crate::models::{HttpRequest, HttpResponse};

/// Builder for creating test HttpResponse instances
pub struct ResponseBuilder {
	status_code: u16,
	headers: Vec<(String, String)>,
	body: Vec<u8>,
	request: Option<HttpRequest>,
	history: Vec<HttpResponse>,
}

impl Default for ResponseBuilder {
	fn default() -> Self {
		Self {
			status_code: 200,
			headers: vec![("Content-Type".to_string(), "application/json".to_string())],
			body: b"{}".to_vec(),
			request: None,
			history: Vec::new(),
		}
	}
}

impl ResponseBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn status_code(mut self, status_code: u16) -> Self {
		self.status_code = status_code;
		self
	}

	pub fn header(mut self, name: &str, value: &str) -> Self {
		self.headers.push((name.to_string(), value.to_string()));
		self
	}

	pub fn body(mut self, body: &str) -> Self {
		self.body = body.as_bytes().to_vec();
		self
	}

	pub fn json(mut self, body: &serde_json::Value) -> Self {
		self.body = body.to_string().into_bytes();
		self
	}

	/// Request the response answers; prepared on build
	pub fn request(mut self, request: HttpRequest) -> Self {
		self.request = Some(request);
		self
	}

	/// Redirect hops preceding the response
	pub fn redirected_from(mut self, hop: HttpResponse) -> Self {
		self.history.push(hop);
		self
	}

	pub fn build(self) -> HttpResponse {
		HttpResponse {
			status_code: self.status_code,
			headers: self.headers,
			body: self.body,
			request: self
				.request
				.map(|request| request.prepare().expect("test request must be valid")),
			history: self.history,
		}
	}
}

/// JSON response with the given status code and body
pub fn json_response(status_code: u16, body: &str) -> HttpResponse {
	ResponseBuilder::new()
		.status_code(status_code)
		.body(body)
		.build()
}
