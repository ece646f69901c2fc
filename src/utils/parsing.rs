//! Parsing utilities

use byte_unit::Byte;
use std::{str::FromStr, time::Duration};

/// Parses a human readable size ("1GB", "500MB", "1024KB") into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	match Byte::from_str(s) {
		Ok(byte) => Ok(byte.as_u64()),
		Err(e) => Err(format!("Invalid size format: '{}'. Error: {}", s, e)),
	}
}

/// Parses a millisecond count given on the command line into a `Duration`.
pub fn parse_millis(s: &str) -> Result<Duration, String> {
	s.trim()
		.parse::<u64>()
		.map(Duration::from_millis)
		.map_err(|e| format!("Invalid duration in milliseconds: '{}'. Error: {}", s, e))
}

/// Normalizes a registry name: trimmed, lowercase, `-` and spaces turned into `_`.
///
/// Lets `"Is-Equal"`, `" is equal "` and `"is_equal"` resolve to the same comparer.
pub fn normalize_name(input: &str) -> String {
	input
		.trim()
		.to_lowercase()
		.chars()
		.map(|c| if c == '-' || c == ' ' { '_' } else { c })
		.collect()
}
