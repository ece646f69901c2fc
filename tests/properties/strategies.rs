use proptest::prelude::*;
use serde_json::{Map, Number, Value};

const MAX_DEPTH: u32 = 3;
const MAX_NODES: u32 = 32;
const MAX_COLLECTION_SIZE: usize = 5;

pub fn key_strategy() -> impl Strategy<Value = String> {
	"[a-z]{1,4}".prop_map(|s| s.to_string())
}

pub fn scalar_strategy() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(|n| Value::Number(n.into())),
		(-1.0e6f64..1.0e6f64).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
		"[a-zA-Z0-9 ]{0,8}".prop_map(Value::String),
	]
}

pub fn json_value_strategy() -> impl Strategy<Value = Value> {
	scalar_strategy().prop_recursive(MAX_DEPTH, MAX_NODES, MAX_COLLECTION_SIZE as u32, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..MAX_COLLECTION_SIZE).prop_map(Value::Array),
			prop::collection::vec((key_strategy(), inner), 0..MAX_COLLECTION_SIZE)
				.prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
		]
	})
}

pub fn non_null_value_strategy() -> impl Strategy<Value = Value> {
	json_value_strategy().prop_filter("value must not be null", |value| !value.is_null())
}

pub fn number_strategy() -> impl Strategy<Value = Value> {
	prop_oneof![
		any::<i64>().prop_map(|n| Value::Number(n.into())),
		any::<u64>().prop_map(|n| Value::Number(n.into())),
		(-1.0e9f64..1.0e9f64).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
	]
}
