//! Comparers applied by checkers to `(actual, expected)` pairs.
//!
//! Every built-in comparer is total over `serde_json::Value`: operand shapes it
//! cannot compare yield `false` instead of an error, so a transient payload of the
//! wrong shape only fails the check for the current attempt.
//!
//! Numbers compare by value (`1 == 1.0`), strings and arrays order
//! lexicographically, and containment understands arrays (element), strings
//! (substring) and objects (key).

use serde_json::Value;
use std::{cmp::Ordering, fmt, sync::Arc};

/// Built-in comparers, addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Comparator {
	#[default]
	IsEqual,
	IsNotEqual,
	IsGreaterThan,
	IsLesserThan,
	IsGreaterThanOrEqual,
	IsLesserThanOrEqual,
	Contain,
	NotContain,
	ContainAll,
	ContainAny,
	HaveLenEqual,
	HaveLenGreater,
	HaveLenLesser,
}

crate::impl_registry_name_enum!(Comparator, "comparer", {
	"is_equal" => IsEqual,
	"is_not_equal" => IsNotEqual,
	"is_greater_than" => IsGreaterThan,
	"is_lesser_than" => IsLesserThan,
	"is_greater_than_or_equal" => IsGreaterThanOrEqual,
	"is_lesser_than_or_equal" => IsLesserThanOrEqual,
	"contain" => Contain,
	"not_contain" => NotContain,
	"contain_all" => ContainAll,
	"contain_any" => ContainAny,
	"have_len_equal" => HaveLenEqual,
	"have_len_greater" => HaveLenGreater,
	"have_len_lesser" => HaveLenLesser,
});

impl Comparator {
	/// Applies the comparer to `(actual, expected)`
	pub fn compare(&self, actual: &Value, expected: &Value) -> bool {
		match self {
			Self::IsEqual => is_equal(actual, expected),
			Self::IsNotEqual => is_not_equal(actual, expected),
			Self::IsGreaterThan => is_greater_than(actual, expected),
			Self::IsLesserThan => is_lesser_than(actual, expected),
			Self::IsGreaterThanOrEqual => is_greater_than_or_equal(actual, expected),
			Self::IsLesserThanOrEqual => is_lesser_than_or_equal(actual, expected),
			Self::Contain => contain(actual, expected),
			Self::NotContain => not_contain(actual, expected),
			Self::ContainAll => contain_all(actual, expected),
			Self::ContainAny => contain_any(actual, expected),
			Self::HaveLenEqual => have_len_equal(actual, expected),
			Self::HaveLenGreater => have_len_greater(actual, expected),
			Self::HaveLenLesser => have_len_lesser(actual, expected),
		}
	}
}

/// User-supplied comparison function
pub type CompareFn = dyn Fn(&Value, &Value) -> bool + Send + Sync;

/// Comparer held by a checker: a built-in or a named closure
#[derive(Clone)]
pub enum Comparer {
	Builtin(Comparator),
	Custom { name: String, func: Arc<CompareFn> },
}

impl Comparer {
	pub fn custom<F>(name: impl Into<String>, func: F) -> Self
	where
		F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
	{
		Self::Custom {
			name: name.into(),
			func: Arc::new(func),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Builtin(comparator) => comparator.name(),
			Self::Custom { name, .. } => name,
		}
	}

	pub fn compare(&self, actual: &Value, expected: &Value) -> bool {
		match self {
			Self::Builtin(comparator) => comparator.compare(actual, expected),
			Self::Custom { func, .. } => func(actual, expected),
		}
	}
}

impl From<Comparator> for Comparer {
	fn from(comparator: Comparator) -> Self {
		Self::Builtin(comparator)
	}
}

impl fmt::Debug for Comparer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Builtin(comparator) => f.debug_tuple("Builtin").field(comparator).finish(),
			Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
		}
	}
}

impl fmt::Display for Comparer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Structural equality; numbers compare by value
pub fn is_equal(actual: &Value, expected: &Value) -> bool {
	match (actual, expected) {
		(Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
		(Value::Array(a), Value::Array(b)) => {
			a.len() == b.len() && a.iter().zip(b).all(|(x, y)| is_equal(x, y))
		}
		(Value::Object(a), Value::Object(b)) => {
			a.len() == b.len()
				&& a.iter()
					.all(|(key, x)| b.get(key).is_some_and(|y| is_equal(x, y)))
		}
		_ => actual == expected,
	}
}

pub fn is_not_equal(actual: &Value, expected: &Value) -> bool {
	!is_equal(actual, expected)
}

pub fn is_greater_than(actual: &Value, expected: &Value) -> bool {
	order(actual, expected) == Some(Ordering::Greater)
}

pub fn is_lesser_than(actual: &Value, expected: &Value) -> bool {
	order(actual, expected) == Some(Ordering::Less)
}

pub fn is_greater_than_or_equal(actual: &Value, expected: &Value) -> bool {
	matches!(
		order(actual, expected),
		Some(Ordering::Greater | Ordering::Equal)
	)
}

pub fn is_lesser_than_or_equal(actual: &Value, expected: &Value) -> bool {
	matches!(order(actual, expected), Some(Ordering::Less | Ordering::Equal))
}

/// True when `expected` is an element of an array, a substring of a string or
/// a key of an object held in `actual`
pub fn contain(actual: &Value, expected: &Value) -> bool {
	match actual {
		Value::Array(items) => items.iter().any(|item| is_equal(item, expected)),
		Value::String(haystack) => expected
			.as_str()
			.is_some_and(|needle| haystack.contains(needle)),
		Value::Object(map) => expected.as_str().is_some_and(|key| map.contains_key(key)),
		_ => false,
	}
}

pub fn not_contain(actual: &Value, expected: &Value) -> bool {
	!contain(actual, expected)
}

/// Every element of `expected` is contained in `actual`.
///
/// A non-array `expected` is treated as a single element.
pub fn contain_all(actual: &Value, expected: &Value) -> bool {
	match expected {
		Value::Array(items) => items.iter().all(|item| contain(actual, item)),
		single => contain(actual, single),
	}
}

/// At least one element of `expected` is contained in `actual`
pub fn contain_any(actual: &Value, expected: &Value) -> bool {
	match expected {
		Value::Array(items) => items.iter().any(|item| contain(actual, item)),
		single => contain(actual, single),
	}
}

pub fn have_len_equal(actual: &Value, expected: &Value) -> bool {
	compare_len(actual, expected) == Some(Ordering::Equal)
}

pub fn have_len_greater(actual: &Value, expected: &Value) -> bool {
	compare_len(actual, expected) == Some(Ordering::Greater)
}

pub fn have_len_lesser(actual: &Value, expected: &Value) -> bool {
	compare_len(actual, expected) == Some(Ordering::Less)
}

/// Length of arrays, strings (in chars) and objects; `None` for everything else
fn length(value: &Value) -> Option<u64> {
	match value {
		Value::Array(items) => Some(items.len() as u64),
		Value::String(s) => Some(s.chars().count() as u64),
		Value::Object(map) => Some(map.len() as u64),
		_ => None,
	}
}

fn compare_len(actual: &Value, expected: &Value) -> Option<Ordering> {
	let len = length(actual)?;
	match expected {
		Value::Number(n) => compare_numbers(&serde_json::Number::from(len), n),
		_ => None,
	}
}

fn compare_numbers(a: &serde_json::Number, b: &serde_json::Number) -> Option<Ordering> {
	if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
		return Some(x.cmp(&y));
	}
	if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
		return Some(x.cmp(&y));
	}
	a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Ordering of two values, `None` when they are not orderable against each other
fn order(actual: &Value, expected: &Value) -> Option<Ordering> {
	match (actual, expected) {
		(Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
		(Value::String(a), Value::String(b)) => Some(a.cmp(b)),
		(Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
		(Value::Array(a), Value::Array(b)) => {
			for (x, y) in a.iter().zip(b) {
				match order(x, y)? {
					Ordering::Equal => continue,
					other => return Some(other),
				}
			}
			Some(a.len().cmp(&b.len()))
		}
		_ => None,
	}
}
