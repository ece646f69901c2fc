//! Domain models and data structures for polling.
//!
//! This module contains the plain data used throughout the application:
//!
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (HTTP request/response, SQL rows)

mod config;
mod core;

// Re-export core types
pub use core::{rows_to_value, HttpRequest, HttpResponse, PreparedRequest, SqlRow};

// Re-export config types
pub use config::{CheckerConfig, ConfigError, ConfigLoader, WaitConfig};
