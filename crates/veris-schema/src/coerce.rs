//! The kind-parameterized conversion table.
//!
//! Coercion is opt-in per schema. When the flag is set the driver asks this
//! table to convert the input into the leaf's native kind before the type
//! probe; a `None` answer fails the parse with `invalid_type`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use veris_value::Value;

use crate::internals::TypeCode;

/// Leaf kinds with a column in the conversion table.
pub(crate) fn coercible(target: TypeCode) -> bool {
    matches!(
        target,
        TypeCode::String
            | TypeCode::Int
            | TypeCode::Float
            | TypeCode::Bool
            | TypeCode::BigInt
            | TypeCode::Complex
            | TypeCode::DateTime
    )
}

/// Convert `input` into the native kind of `target`, if the table permits.
pub(crate) fn coerce_to(target: TypeCode, input: &Value) -> Option<Value> {
    match target {
        TypeCode::String => to_string(input),
        TypeCode::Int => to_int(input),
        TypeCode::Float => to_float(input),
        TypeCode::Bool => to_bool(input),
        TypeCode::BigInt => to_bigint(input),
        TypeCode::Complex => to_complex(input),
        TypeCode::DateTime => to_datetime(input),
        _ => None,
    }
}

fn to_string(input: &Value) -> Option<Value> {
    let text = match input {
        Value::String(s) => s.clone(),
        Value::I64(i) => i.to_string(),
        Value::U64(u) => u.to_string(),
        Value::F32(f) => float_text(*f as f64),
        Value::F64(f) => float_text(*f),
        Value::Bool(b) => b.to_string(),
        Value::BigInt(b) => b.to_string(),
        _ => return None,
    };
    Some(Value::String(text))
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "+Inf" } else { "-Inf" }.to_string()
    } else {
        f.to_string()
    }
}

fn to_int(input: &Value) -> Option<Value> {
    match input {
        Value::I64(_) | Value::U64(_) => Some(input.clone()),
        // Base-10 text only; fractional text is rejected.
        Value::String(s) => {
            if let Ok(i) = s.parse::<i64>() {
                Some(Value::I64(i))
            } else if let Ok(u) = s.parse::<u64>() {
                Some(Value::U64(u))
            } else {
                None
            }
        }
        Value::Bool(b) => Some(Value::I64(if *b { 1 } else { 0 })),
        Value::F32(f) => integral_float(*f as f64),
        Value::F64(f) => integral_float(*f),
        Value::BigInt(b) => {
            if let Some(i) = b.to_i64() {
                Some(Value::I64(i))
            } else {
                b.to_u64().map(Value::U64)
            }
        }
        _ => None,
    }
}

fn integral_float(f: f64) -> Option<Value> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(Value::I64(f as i64))
    } else if f >= 0.0 && f <= u64::MAX as f64 {
        Some(Value::U64(f as u64))
    } else {
        None
    }
}

fn to_float(input: &Value) -> Option<Value> {
    match input {
        Value::F32(_) | Value::F64(_) => Some(input.clone()),
        Value::I64(i) => Some(Value::F64(*i as f64)),
        Value::U64(u) => Some(Value::F64(*u as f64)),
        // `parse::<f64>` understands "NaN", "inf" and friends, so the
        // float specials survive a text round trip.
        Value::String(s) => s.trim().parse::<f64>().ok().map(Value::F64),
        Value::Bool(b) => Some(Value::F64(if *b { 1.0 } else { 0.0 })),
        _ => None,
    }
}

fn to_bool(input: &Value) -> Option<Value> {
    match input {
        Value::Bool(_) => Some(input.clone()),
        Value::String(s) => {
            let lowered = s.to_ascii_lowercase();
            match lowered.as_str() {
                "true" | "1" | "yes" => Some(Value::Bool(true)),
                "false" | "0" | "no" | "" => Some(Value::Bool(false)),
                _ => None,
            }
        }
        Value::I64(i) => Some(Value::Bool(*i != 0)),
        Value::U64(u) => Some(Value::Bool(*u != 0)),
        Value::F32(f) => Some(Value::Bool(*f != 0.0)),
        Value::F64(f) => Some(Value::Bool(*f != 0.0)),
        Value::BigInt(b) => Some(Value::Bool(!b.is_zero())),
        _ => None,
    }
}

fn to_bigint(input: &Value) -> Option<Value> {
    match input {
        Value::BigInt(_) => Some(input.clone()),
        Value::I64(i) => Some(Value::BigInt(BigInt::from(*i))),
        Value::U64(u) => Some(Value::BigInt(BigInt::from(*u))),
        Value::Bool(b) => Some(Value::BigInt(BigInt::from(if *b { 1 } else { 0 }))),
        Value::String(s) => s.trim().parse::<BigInt>().ok().map(Value::BigInt),
        Value::F32(f) => bigint_from_float(*f as f64),
        Value::F64(f) => bigint_from_float(*f),
        _ => None,
    }
}

fn bigint_from_float(f: f64) -> Option<Value> {
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    BigInt::from_f64(f).map(Value::BigInt)
}

fn to_complex(input: &Value) -> Option<Value> {
    match input {
        Value::Complex(_) => Some(input.clone()),
        // Real-axis widening.
        Value::I64(i) => Some(Value::Complex(Complex64::new(*i as f64, 0.0))),
        Value::U64(u) => Some(Value::Complex(Complex64::new(*u as f64, 0.0))),
        Value::F32(f) => Some(Value::Complex(Complex64::new(*f as f64, 0.0))),
        Value::F64(f) => Some(Value::Complex(Complex64::new(*f, 0.0))),
        _ => None,
    }
}

fn to_datetime(input: &Value) -> Option<Value> {
    match input {
        Value::DateTime(_) => Some(input.clone()),
        Value::String(s) => parse_datetime(s).map(Value::DateTime),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_float_specials() {
        assert_eq!(
            to_string(&Value::F64(f64::NAN)),
            Some(Value::String("NaN".to_string()))
        );
        assert_eq!(
            to_string(&Value::F64(f64::INFINITY)),
            Some(Value::String("+Inf".to_string()))
        );
        assert_eq!(
            to_string(&Value::F32(f32::NEG_INFINITY)),
            Some(Value::String("-Inf".to_string()))
        );
    }

    #[test]
    fn test_int_rejects_fractional_sources() {
        assert_eq!(to_int(&Value::String("12".to_string())), Some(Value::I64(12)));
        assert_eq!(to_int(&Value::String("1.5".to_string())), None);
        assert_eq!(to_int(&Value::F64(2.0)), Some(Value::I64(2)));
        assert_eq!(to_int(&Value::F64(2.5)), None);
    }

    #[test]
    fn test_bool_text_forms() {
        assert_eq!(to_bool(&Value::String("YES".to_string())), Some(Value::Bool(true)));
        assert_eq!(to_bool(&Value::String("".to_string())), Some(Value::Bool(false)));
        assert_eq!(to_bool(&Value::String("maybe".to_string())), None);
        assert_eq!(to_bool(&Value::I64(-3)), Some(Value::Bool(true)));
        assert_eq!(to_bool(&Value::U64(0)), Some(Value::Bool(false)));
    }

    #[test]
    fn test_bigint_rejects_nan_and_fractions() {
        assert_eq!(to_bigint(&Value::F64(f64::NAN)), None);
        assert_eq!(to_bigint(&Value::F64(2.5)), None);
        assert_eq!(
            to_bigint(&Value::String("123456789012345678901234567890".to_string())),
            Some(Value::BigInt(
                "123456789012345678901234567890".parse().unwrap()
            ))
        );
    }

    #[test]
    fn test_complex_widens_real_axis() {
        assert_eq!(
            to_complex(&Value::I64(2)),
            Some(Value::Complex(Complex64::new(2.0, 0.0)))
        );
        assert_eq!(to_complex(&Value::String("2".to_string())), None);
    }

    #[test]
    fn test_datetime_iso_forms() {
        assert!(to_datetime(&Value::String("2024-05-06T07:08:09Z".to_string())).is_some());
        assert!(to_datetime(&Value::String("2024-05-06".to_string())).is_some());
        assert!(to_datetime(&Value::String("yesterday".to_string())).is_none());
    }
}
