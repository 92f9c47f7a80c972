use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use num_complex::Complex64;

use crate::{Array, KeyValue, Map, Set, Value};

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::I64(value as i64)
                }
            }

            impl From<$ty> for KeyValue {
                fn from(value: $ty) -> Self {
                    KeyValue::I64(value as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_uint {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::U64(value as u64)
                }
            }

            impl From<$ty> for KeyValue {
                fn from(value: $ty) -> Self {
                    KeyValue::U64(value as u64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64);
impl_from_uint!(u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Value::Complex(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Set> for Value {
    fn from(value: Set) -> Self {
        Value::Set(value)
    }
}

impl From<KeyValue> for Value {
    fn from(value: KeyValue) -> Self {
        value.into_value()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::Array(Array(value.into_iter().map(Into::into).collect()))
    }
}

macro_rules! impl_from_tuple {
    ($(($($name:ident : $ty:ident),+))*) => {
        $(
            impl<$($ty: Into<Value>),+> From<($($ty,)+)> for Value {
                fn from(($($name,)+): ($($ty,)+)) -> Self {
                    Value::Array(Array(vec![$($name.into()),+]))
                }
            }
        )*
    };
}

impl_from_tuple! {
    (a: A, b: B)
    (a: A, b: B, c: C)
    (a: A, b: B, c: C, d: D)
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        KeyValue::String(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        KeyValue::String(value)
    }
}

impl From<bool> for KeyValue {
    fn from(value: bool) -> Self {
        KeyValue::Bool(value)
    }
}

impl From<BigInt> for KeyValue {
    fn from(value: BigInt) -> Self {
        KeyValue::BigInt(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths_collapse() {
        assert_eq!(Value::from(3i8), Value::I64(3));
        assert_eq!(Value::from(3u16), Value::U64(3));
    }

    #[test]
    fn test_option_maps_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
    }

    #[test]
    fn test_vec_and_tuple_become_arrays() {
        assert_eq!(
            Value::from(vec![1i64, 2]),
            Value::Array(Array(vec![Value::I64(1), Value::I64(2)]))
        );
        assert_eq!(
            Value::from(("a", 1i64)),
            Value::Array(Array(vec![Value::String("a".to_string()), Value::I64(1)]))
        );
    }
}
