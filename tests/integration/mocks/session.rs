//! Mock implementation of the HTTP session.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bepatient::{
	models::{HttpResponse, PreparedRequest},
	services::http::{HttpSession, SessionDefaults, TransportError},
};
use mockall::mock;

mock! {
	/// Mock implementation of the HTTP session trait.
	///
	/// Lets tests script responses and transport failures without a server.
	pub HttpSession {}

	#[async_trait]
	impl HttpSession for HttpSession {
		fn defaults(&self) -> SessionDefaults;
		async fn send(
			&self,
			request: &PreparedRequest,
			timeout: Duration,
		) -> Result<HttpResponse, TransportError>;
	}
}

/// Session answering the sends with `responses`, in order
#[allow(dead_code)]
pub fn scripted_session(
	responses: Vec<Result<HttpResponse, TransportError>>,
) -> Arc<dyn HttpSession> {
	let mut session = MockHttpSession::new();
	session.expect_defaults().returning(SessionDefaults::default);

	let mut responses = responses.into_iter();
	session
		.expect_send()
		.times(responses.len())
		.returning(move |_, _| {
			responses
				.next()
				.unwrap_or_else(|| Ok(HttpResponse::new(500)))
		});
	Arc::new(session)
}
