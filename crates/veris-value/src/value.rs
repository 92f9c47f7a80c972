use core::fmt;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use num_bigint::BigInt;
use num_complex::Complex64;
use thisisplural::Plural;

/// A dynamically-typed value.
///
/// Every parse entry point takes a `Value` (or something convertible into
/// one) and drives it through a schema. Numeric kinds are kept distinct so
/// that schemas can tell an integer input from a float input.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    BigInt(BigInt),
    Complex(Complex64),
    String(String),
    DateTime(DateTime<Utc>),
    Array(Array),
    Map(Map),
    Set(Set),
}

/// Key-comparable value which implements `Eq`, `Ord` and `Hash`.
///
/// Used for map keys, set elements and value-typed path segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    String(String),
    BigInt(BigInt),
}

/// The kind of a [`Value`], used in error reporting as the `received` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    BigInt,
    Complex,
    String,
    DateTime,
    Array,
    Map,
    Set,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Uint => "uint",
            ValueKind::Float => "float",
            ValueKind::BigInt => "bigint",
            ValueKind::Complex => "complex",
            ValueKind::String => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::Set => "set",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Plural, Default)]
pub struct Array(pub Vec<Value>);

/// An insertion-ordered mapping from [`KeyValue`] to [`Value`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(pub IndexMap<KeyValue, Value>);

/// An insertion-ordered collection of unique [`KeyValue`] elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Set(pub IndexSet<KeyValue>);

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::I64(_) => ValueKind::Int,
            Value::U64(_) => ValueKind::Uint,
            Value::F32(_) | Value::F64(_) => ValueKind::Float,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Complex(_) => ValueKind::Complex,
            Value::String(_) => ValueKind::String,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::Set(_) => ValueKind::Set,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// View this value as a key-comparable value, if it is one.
    pub fn as_key(&self) -> Option<KeyValue> {
        match self {
            Value::Null => Some(KeyValue::Null),
            Value::Bool(b) => Some(KeyValue::Bool(*b)),
            Value::I64(i) => Some(KeyValue::I64(*i)),
            Value::U64(u) => Some(KeyValue::U64(*u)),
            Value::String(s) => Some(KeyValue::String(s.clone())),
            Value::BigInt(b) => Some(KeyValue::BigInt(b.clone())),
            _ => None,
        }
    }

    /// Widened view over the machine-integer kinds.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::I64(i) => Some(*i as i128),
            Value::U64(u) => Some(*u as i128),
            _ => None,
        }
    }

    /// Lossy numeric view over every machine-numeric kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I64(i) => Some(*i as f64),
            Value::U64(u) => Some(*u as f64),
            Value::F32(f) => Some(*f as f64),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }
}

impl KeyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            KeyValue::Null => ValueKind::Null,
            KeyValue::Bool(_) => ValueKind::Bool,
            KeyValue::I64(_) => ValueKind::Int,
            KeyValue::U64(_) => ValueKind::Uint,
            KeyValue::String(_) => ValueKind::String,
            KeyValue::BigInt(_) => ValueKind::BigInt,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            KeyValue::Null => Value::Null,
            KeyValue::Bool(b) => Value::Bool(b),
            KeyValue::I64(i) => Value::I64(i),
            KeyValue::U64(u) => Value::U64(u),
            KeyValue::String(s) => Value::String(s),
            KeyValue::BigInt(b) => Value::BigInt(b),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => write!(f, "null"),
            KeyValue::Bool(b) => write!(f, "{b}"),
            KeyValue::I64(i) => write!(f, "{i}"),
            KeyValue::U64(u) => write!(f, "{u}"),
            KeyValue::String(s) => write!(f, "{s:?}"),
            KeyValue::BigInt(b) => write!(f, "{b}"),
        }
    }
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &KeyValue) -> Option<&Value> {
        self.0.get(key)
    }

    /// Lookup by string key without allocating a `KeyValue`.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.0.get(&KeyValue::String(key.to_string()))
    }

    pub fn insert(&mut self, key: KeyValue, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    pub fn contains_key(&self, key: &KeyValue) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, KeyValue, Value> {
        self.0.iter()
    }

    /// Build a map from (key, value) pairs of convertible types.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<KeyValue>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Map(pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect())
    }
}

impl FromIterator<(KeyValue, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (KeyValue, Value)>>(iter: I) -> Self {
        Map(iter.into_iter().collect())
    }
}

impl IntoIterator for Map {
    type Item = (KeyValue, Value);
    type IntoIter = indexmap::map::IntoIter<KeyValue, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Set {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if the element was not already present.
    pub fn insert(&mut self, element: KeyValue) -> bool {
        self.0.insert(element)
    }

    pub fn contains(&self, element: &KeyValue) -> bool {
        self.0.contains(element)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, KeyValue> {
        self.0.iter()
    }
}

impl FromIterator<KeyValue> for Set {
    fn from_iter<I: IntoIterator<Item = KeyValue>>(iter: I) -> Self {
        Set(iter.into_iter().collect())
    }
}

impl IntoIterator for Set {
    type Item = KeyValue;
    type IntoIter = indexmap::set::IntoIter<KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_kind_names() {
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::I64(-1).kind().name(), "int");
        assert_eq!(Value::U64(1).kind().name(), "uint");
        assert_eq!(Value::F64(1.5).kind().name(), "float");
        assert_eq!(Value::String("x".into()).kind().name(), "string");
        assert_eq!(Value::Array(Array(vec![])).kind().name(), "array");
    }

    #[test]
    fn test_as_key_subset() {
        assert_eq!(Value::Bool(true).as_key(), Some(KeyValue::Bool(true)));
        assert_eq!(Value::I64(3).as_key(), Some(KeyValue::I64(3)));
        assert!(Value::F64(3.0).as_key().is_none());
        assert!(Value::Array(Array(vec![])).as_key().is_none());
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let map = Map::from_pairs([("b", 1i64), ("a", 2i64)]);
        let keys: Vec<_> = map.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                KeyValue::String("b".to_string()),
                KeyValue::String("a".to_string())
            ]
        );
    }

    #[test]
    fn test_set_dedups() {
        let mut set = Set::new();
        assert!(set.insert(KeyValue::I64(1)));
        assert!(!set.insert(KeyValue::I64(1)));
        assert_eq!(set.len(), 1);
    }
}
