//! Serde helpers for registry names and ordered key/value lists.
//!
//! Comparers, checkers and condition stages are referred to by name in wait
//! configurations and in the builder API. [`impl_registry_name_enum!`] gives a
//! unit enum its name table, a `FromStr` that rejects unknown names with a
//! `ConfigError`, and string (de)serialization through that same table.

/// Implements the name registry of a unit enum.
///
/// Names are matched after [`normalize_name`](crate::utils::normalize_name), so
/// `"Is-Equal"` resolves like `"is_equal"`.
#[macro_export]
macro_rules! impl_registry_name_enum {
	($enum_name:ident, $kind:literal, { $($name:literal => $variant:ident),* $(,)? }) => {
		impl $enum_name {
			/// Every registered name, in declaration order
			pub const NAMES: &'static [&'static str] = &[$($name),*];

			/// Registry name of the variant
			pub fn name(&self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}
		}

		impl ::std::str::FromStr for $enum_name {
			type Err = $crate::models::ConfigError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let normalized = $crate::utils::normalize_name(s);
				match normalized.as_str() {
					$($name => Ok(Self::$variant),)*
					_ => Err($crate::models::ConfigError::validation_error(
						format!(
							"Unknown {} '{}'. Available: {}",
							$kind,
							s,
							Self::NAMES.join(", ")
						),
						None,
						None,
					)),
				}
			}
		}

		impl ::std::fmt::Display for $enum_name {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str(self.name())
			}
		}

		impl ::serde::Serialize for $enum_name {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: ::serde::Serializer,
			{
				serializer.serialize_str(self.name())
			}
		}

		impl<'de> ::serde::Deserialize<'de> for $enum_name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: ::serde::Deserializer<'de>,
			{
				let raw = <String as ::serde::Deserialize>::deserialize(deserializer)?;
				raw.parse::<$enum_name>()
					.map_err(|e| <D::Error as ::serde::de::Error>::custom(e.to_string()))
			}
		}
	};
}

/// (De)serializes a `Vec<(String, String)>` as a JSON object, keeping key order.
///
/// Used with `#[serde(with = "...")]` for headers and cookies, which are ordered
/// lists on the wire but read naturally as objects in configuration files.
pub mod ordered_pairs {
	use serde::{
		de::{MapAccess, Visitor},
		ser::SerializeMap,
		Deserializer, Serializer,
	};
	use std::fmt;

	pub fn serialize<S>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(pairs.len()))?;
		for (key, value) in pairs {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
	where
		D: Deserializer<'de>,
	{
		struct PairsVisitor;

		impl<'de> Visitor<'de> for PairsVisitor {
			type Value = Vec<(String, String)>;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("an object of string values")
			}

			fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
			where
				M: MapAccess<'de>,
			{
				let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some((key, value)) = map.next_entry::<String, String>()? {
					pairs.push((key, value));
				}
				Ok(pairs)
			}
		}

		deserializer.deserialize_map(PairsVisitor)
	}
}
