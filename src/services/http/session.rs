//! HTTP sessions used by request executors.
//!
//! A session sends prepared requests and carries ambient headers and cookies that
//! executors merge into the requests they re-issue. [`ReqwestSession`] is the
//! default implementation on top of a middleware-enabled reqwest client.

use async_trait::async_trait;
use reqwest::Method;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::DefaultRetryableStrategy;
use std::{collections::HashMap, fmt, time::Duration};

use super::TransportError;
use crate::{
	models::{HttpResponse, PreparedRequest},
	utils::{create_retryable_http_client, RetryConfig},
};

/// Headers and cookies every request of a session carries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDefaults {
	pub headers: Vec<(String, String)>,
	pub cookies: Vec<(String, String)>,
}

/// Sends prepared requests
#[async_trait]
pub trait HttpSession: Send + Sync {
	/// Ambient headers and cookies of the session
	fn defaults(&self) -> SessionDefaults;

	/// Sends `request`, failing when no response arrives within `timeout`
	async fn send(
		&self,
		request: &PreparedRequest,
		timeout: Duration,
	) -> Result<HttpResponse, TransportError>;
}

/// Session backed by a reqwest client with retry middleware
#[derive(Clone)]
pub struct ReqwestSession {
	client: ClientWithMiddleware,
	defaults: SessionDefaults,
}

impl ReqwestSession {
	/// Creates a session with transport retries disabled
	pub fn new() -> Result<Self, TransportError> {
		Self::with_retry_config(&RetryConfig::default())
	}

	/// Creates a session whose sends retry transient failures per `config`
	pub fn with_retry_config(config: &RetryConfig) -> Result<Self, TransportError> {
		let base_client = reqwest::Client::builder().build().map_err(|e| {
			TransportError::network_error(
				format!("Failed to build HTTP client: {}", e),
				Some(Box::new(e)),
				None,
			)
		})?;

		Ok(Self::with_client(create_retryable_http_client::<
			DefaultRetryableStrategy,
		>(config, base_client, None)))
	}

	/// Wraps an existing client
	pub fn with_client(client: ClientWithMiddleware) -> Self {
		Self {
			client,
			defaults: SessionDefaults::default(),
		}
	}

	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.defaults.headers.push((name.into(), value.into()));
		self
	}

	pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.defaults.cookies.push((name.into(), value.into()));
		self
	}
}

impl fmt::Debug for ReqwestSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ReqwestSession")
			.field("defaults", &self.defaults)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl HttpSession for ReqwestSession {
	fn defaults(&self) -> SessionDefaults {
		self.defaults.clone()
	}

	async fn send(
		&self,
		request: &PreparedRequest,
		timeout: Duration,
	) -> Result<HttpResponse, TransportError> {
		let url = request.url.to_string();
		let metadata = || Some(HashMap::from([("url".to_string(), url.clone())]));

		let method = Method::from_bytes(request.method.as_bytes()).map_err(|e| {
			TransportError::invalid_request(
				format!("Invalid HTTP method: {}", request.method),
				Some(Box::new(e)),
				metadata(),
			)
		})?;

		let mut builder = self
			.client
			.request(method, request.url.clone())
			.timeout(timeout);
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(body) = &request.body {
			builder = builder.body(body.clone());
		}

		let response = builder
			.send()
			.await
			.map_err(|e| TransportError::from_send_error(e, &url))?;

		let status_code = response.status().as_u16();
		let headers = response
			.headers()
			.iter()
			.map(|(name, value)| {
				(
					name.as_str().to_string(),
					String::from_utf8_lossy(value.as_bytes()).into_owned(),
				)
			})
			.collect();
		let body = response.bytes().await.map_err(|e| {
			TransportError::response_error(
				format!("Failed to read response body: {}", e),
				Some(Box::new(e)),
				metadata(),
			)
		})?;

		Ok(HttpResponse {
			status_code,
			headers,
			body: body.to_vec(),
			request: Some(request.clone()),
			history: Vec::new(),
		})
	}
}
