//! Curl command rendering of requests, for logs and failure messages.

use crate::models::{HttpResponse, PreparedRequest};

/// Renders `request` as `curl -X <METHOD> -H '<name>: <value>' ... [-d '<body>'] <url>`.
///
/// Headers keep their sending order; single quotes inside values are escaped for
/// POSIX shells.
pub fn to_curl(request: &PreparedRequest) -> String {
	let mut parts = vec!["curl".to_string(), "-X".to_string(), request.method.clone()];

	for (name, value) in &request.headers {
		parts.push("-H".to_string());
		parts.push(quote(&format!("{}: {}", name, value)));
	}

	if let Some(body) = request.body.as_deref().filter(|b| !b.is_empty()) {
		parts.push("-d".to_string());
		parts.push(quote(body));
	}

	parts.push(request.url.to_string());
	parts.join(" ")
}

/// Renders the request that produced `response`, if it is known
pub fn response_to_curl(response: &HttpResponse) -> Option<String> {
	response.request.as_ref().map(to_curl)
}

fn quote(value: &str) -> String {
	format!("'{}'", value.replace('\'', r#"'\''"#))
}
