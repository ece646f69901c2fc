//! Macros and serde helpers shared by models and services.

pub mod deserialization;

pub use deserialization::ordered_pairs;
