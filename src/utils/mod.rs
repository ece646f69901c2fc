//! Utility modules for common functionality.
//!
//! - http: HTTP client construction (retryable reqwest clients)
//! - logging: Logging setup and the shared error context
//! - macros: Registry-name enums and serde helpers
//! - parsing: Parsing utilities
//! - tests: Builders and stubs for tests

pub mod http;
pub mod logging;
pub mod macros;
pub mod parsing;
pub mod tests;

pub use http::*;
pub use macros::*;
pub use parsing::*;
