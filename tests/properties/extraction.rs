use crate::properties::strategies::{json_value_strategy, key_strategy, non_null_value_strategy};
use bepatient::services::checker::Extraction;
use proptest::{prelude::*, test_runner::Config};
use serde_json::{json, Value};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn test_empty_extraction_returns_payload(data in non_null_value_strategy()) {
		prop_assert_eq!(Extraction::new().extract(&data), data);
	}

	#[test]
	fn test_path_reaches_nested_value(
		outer in key_strategy(),
		inner in key_strategy(),
		value in non_null_value_strategy()
	) {
		let data = json!({ outer.clone(): { inner.clone(): value.clone() } });
		let extraction = Extraction::new().path(format!("{}.{}", outer, inner));

		prop_assert_eq!(extraction.extract(&data), value);
	}

	#[test]
	fn test_missing_path_yields_fallback(
		data in json_value_strategy(),
		fallback in non_null_value_strategy()
	) {
		let extraction = Extraction::new()
			.path("missing-segment")
			.fallback(fallback.clone());

		prop_assert_eq!(extraction.extract(&data), fallback);
	}

	#[test]
	fn test_search_collects_every_array_entry(
		values in prop::collection::vec(non_null_value_strategy(), 1..5)
	) {
		let data = Value::Array(values.iter().map(|v| json!({ "id": v })).collect());
		let extraction = Extraction::new().search_query("id");

		let found = extraction.extract(&data);
		let found = found.as_array().unwrap();
		prop_assert!(found.len() >= values.len());
		prop_assert_eq!(&found[0], &values[0]);
	}

	#[test]
	fn test_extraction_is_deterministic(
		data in json_value_strategy(),
		key in key_strategy()
	) {
		let extraction = Extraction::new().search_query(key);
		prop_assert_eq!(extraction.extract(&data), extraction.extract(&data));
	}
}
