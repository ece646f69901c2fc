//! HTTP transport used by request executors.
//!
//! - `session`: the [`HttpSession`] trait and its reqwest implementation
//! - `curl`: curl command rendering for diagnostics
//! - `error`: transport errors

mod curl;
mod error;
mod session;

pub use curl::{response_to_curl, to_curl};
pub use error::TransportError;
pub use session::{HttpSession, ReqwestSession, SessionDefaults};
