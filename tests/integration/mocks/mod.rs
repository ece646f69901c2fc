//! Mock implementations for testing purposes.
//!
//! This module contains mock implementations of the traits the executors depend
//! on. It includes mocks for:
//! - HTTP sessions
//!
//! The mocks are implemented using the `mockall` crate.

mod session;

#[allow(unused_imports)]
pub use session::*;
