//! Conversion between [`Value`] and `serde_json::Value`.
//!
//! JSON has fewer kinds than [`Value`]; the mapping is lossy in one
//! direction only. BigInts and non-finite floats render as strings,
//! datetimes as RFC 3339 strings, sets as arrays.

use thiserror::Error;

use crate::{Array, KeyValue, Map, Set, Value};

#[derive(Debug, Error)]
pub enum JsonError {
    /// Complex numbers have no JSON counterpart.
    #[error("cannot represent complex number {0} as JSON")]
    UnrepresentableComplex(String),
}

/// Convert a JSON document into a dynamic [`Value`].
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::I64(i)
            } else if let Some(u) = n.as_u64() {
                Value::U64(u)
            } else {
                Value::F64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(Array(items.into_iter().map(from_json).collect()))
        }
        serde_json::Value::Object(entries) => Value::Map(Map(entries
            .into_iter()
            .map(|(k, v)| (KeyValue::String(k), from_json(v)))
            .collect())),
    }
}

/// Convert a dynamic [`Value`] into a JSON document.
pub fn to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::json!(*b)),
        Value::I64(i) => Ok(serde_json::json!(*i)),
        Value::U64(u) => Ok(serde_json::json!(*u)),
        Value::F32(f) => float_to_json(*f as f64),
        Value::F64(f) => float_to_json(*f),
        Value::BigInt(b) => Ok(serde_json::Value::String(b.to_string())),
        Value::Complex(c) => Err(JsonError::UnrepresentableComplex(c.to_string())),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::DateTime(dt) => Ok(serde_json::Value::String(dt.to_rfc3339())),
        Value::Array(Array(items)) => {
            let json_items: Result<Vec<_>, _> = items.iter().map(to_json).collect();
            Ok(serde_json::Value::Array(json_items?))
        }
        Value::Map(Map(map)) => {
            let mut json_map = serde_json::Map::new();
            for (key, value) in map {
                json_map.insert(key_to_string(key), to_json(value)?);
            }
            Ok(serde_json::Value::Object(json_map))
        }
        Value::Set(Set(set)) => Ok(serde_json::Value::Array(
            set.iter()
                .map(|element| to_json(&element.clone().into_value()))
                .collect::<Result<Vec<_>, _>>()?,
        )),
    }
}

fn float_to_json(f: f64) -> Result<serde_json::Value, JsonError> {
    if f.is_nan() {
        Ok(serde_json::Value::String("NaN".to_string()))
    } else if f.is_infinite() {
        let name = if f > 0.0 { "+Inf" } else { "-Inf" };
        Ok(serde_json::Value::String(name.to_string()))
    } else {
        Ok(serde_json::json!(f))
    }
}

/// JSON object keys are strings; other key kinds use their display form.
fn key_to_string(key: &KeyValue) -> String {
    match key {
        KeyValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_number_kinds() {
        assert_eq!(from_json(json!(-3)), Value::I64(-3));
        assert_eq!(from_json(json!(u64::MAX)), Value::U64(u64::MAX));
        assert_eq!(from_json(json!(1.5)), Value::F64(1.5));
    }

    #[test]
    fn test_object_round_trip_preserves_order() {
        let value = from_json(json!({"b": 1, "a": [true, null]}));
        let back = to_json(&value).unwrap();
        assert_eq!(back, json!({"b": 1, "a": [true, null]}));
    }

    #[test]
    fn test_non_finite_floats_render_as_strings() {
        assert_eq!(to_json(&Value::F64(f64::NAN)).unwrap(), json!("NaN"));
        assert_eq!(to_json(&Value::F64(f64::INFINITY)).unwrap(), json!("+Inf"));
        assert_eq!(
            to_json(&Value::F64(f64::NEG_INFINITY)).unwrap(),
            json!("-Inf")
        );
    }
}
