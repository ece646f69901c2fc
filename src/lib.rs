//! Polling utility for integration tests against eventually consistent systems.
//!
//! This library re-issues an HTTP request (or re-runs a SQL query) until the data
//! it returns satisfies a set of conditions, or a retry budget runs out. It includes:
//!
//! - Named comparators and checkers with path/search extraction
//! - Exception, pre and main condition groups with short-circuit evaluation
//! - HTTP and SQL executors with single-probe semantics
//! - A bounded retry loop and fluent waiters on top of it
//! - Configuration management through JSON files
//!
//! # Module Structure
//!
//! - `bootstrap`: Turns wait configuration into running waits
//! - `models`: Data structures for configuration, requests, responses and rows
//! - `services`: Checkers, conditions, executors and the retry loop
//! - `utils`: Common utilities and helper functions

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
