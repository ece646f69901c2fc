//! Core services implementing the polling engine.
//!
//! This module contains the main service implementations:
//! - `comparator`: Named predicates comparing extracted and expected values
//! - `checker`: Extraction plus comparison over fetched data
//! - `conditions`: Exception, pre and main condition groups
//! - `executor`: Data sources bound to their conditions
//! - `http`: HTTP sessions and curl rendering
//! - `sql`: SQL cursors
//! - `waiter`: Retry loop and the waiter front ends

pub mod checker;
pub mod comparator;
pub mod conditions;
pub mod executor;
pub mod http;
pub mod sql;
pub mod waiter;
