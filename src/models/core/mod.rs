//! Core data models for polling.
//!
//! - Requests: what gets sent on every attempt, before and after preparation
//! - Responses: what HTTP checkers evaluate
//! - SQL rows: what SQL checkers evaluate

mod request;
mod response;
mod sql;

pub use request::{HttpRequest, PreparedRequest};
pub use response::HttpResponse;
pub use sql::{rows_to_value, SqlRow};
