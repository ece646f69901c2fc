//! Test helper utilities
//!
//! This module contains test helper utilities for the application.
//!
//! - `builders`: Test helper utilities for creating test instances of models
//! - `http`: Test helper utilities for creating HTTP clients and sessions
//! - `stubs`: Scripted checkers and executors with call counters

pub mod builders {
	pub mod response;
	pub mod wait;
}


pub use builders::*;
pub use http::*;
pub use response::{json_response, ResponseBuilder};
pub use stubs::*;
pub use wait::WaitConfigBuilder;
