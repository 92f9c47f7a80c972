//! Membership schema over a named finite set.

use indexmap::IndexMap;
use veris_value::{KeyValue, Value};

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, EnumDef, SchemaNode};
use crate::schema::{Schema, conversion_error};

/// Accepts members of a finite set of strings or integers.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    node: SchemaNode,
}

/// An enum whose member values are the names themselves.
pub fn enum_of<S, I>(names: I) -> EnumSchema
where
    S: Into<String>,
    I: IntoIterator<Item = S>,
{
    let entries: IndexMap<String, KeyValue> = names
        .into_iter()
        .map(Into::into)
        .map(|name| (name.clone(), KeyValue::String(name)))
        .collect();
    from_entries(entries)
}

/// An enum mapping names to arbitrary key-comparable member values.
pub fn enum_map<S, V, I>(pairs: I) -> EnumSchema
where
    S: Into<String>,
    V: Into<KeyValue>,
    I: IntoIterator<Item = (S, V)>,
{
    let entries: IndexMap<String, KeyValue> = pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect();
    from_entries(entries)
}

fn from_entries(entries: IndexMap<String, KeyValue>) -> EnumSchema {
    EnumSchema {
        node: SchemaNode::new(TypeCode::Enum, Def::Enum(EnumDef { entries })),
    }
}

impl EnumSchema {
    fn entries(&self) -> Option<&IndexMap<String, KeyValue>> {
        match &self.node.def {
            Def::Enum(def) => Some(&def.entries),
            _ => None,
        }
    }

    /// Member values, in declaration order.
    pub fn options(&self) -> Vec<KeyValue> {
        self.entries()
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Member names, in declaration order.
    pub fn keys(&self) -> Vec<String> {
        self.entries()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Look up a member value by name.
    pub fn value_of(&self, name: &str) -> Option<KeyValue> {
        self.entries()?.get(name).cloned()
    }

    /// A new enum restricted to the named members.
    pub fn extract(&self, names: &[&str]) -> EnumSchema {
        self.filtered(|name| names.contains(&name))
    }

    /// A new enum without the named members.
    pub fn exclude(&self, names: &[&str]) -> EnumSchema {
        self.filtered(|name| !names.contains(&name))
    }

    fn filtered(&self, keep: impl Fn(&str) -> bool) -> EnumSchema {
        let entries: IndexMap<String, KeyValue> = self
            .entries()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(name, _)| keep(name.as_str()))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        from_entries(entries)
    }
}

impl Schema for EnumSchema {
    type Output = KeyValue;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        EnumSchema { node }
    }

    fn decode(&self, value: Value) -> Result<KeyValue, ParseError> {
        value
            .as_key()
            .ok_or_else(|| conversion_error("enum member", &value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;

    #[test]
    fn test_string_members() {
        let schema = enum_of(["red", "green", "blue"]);
        assert_eq!(schema.parse("green").unwrap(), KeyValue::String("green".to_string()));
        let error = schema.parse("teal").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidValue);
    }

    #[test]
    fn test_mapped_integer_members() {
        let schema = enum_map([("Low", 1i64), ("High", 2i64)]);
        assert_eq!(schema.parse(2i64).unwrap(), KeyValue::I64(2));
        assert!(schema.parse(3i64).is_err());
        assert_eq!(schema.value_of("Low"), Some(KeyValue::I64(1)));
    }

    #[test]
    fn test_extract_and_exclude() {
        let schema = enum_of(["a", "b", "c"]);
        let extracted = schema.extract(&["a", "c"]);
        assert!(extracted.parse("a").is_ok());
        assert!(extracted.parse("b").is_err());

        let excluded = schema.exclude(&["a"]);
        assert!(excluded.parse("a").is_err());
        assert!(excluded.parse("b").is_ok());
        assert_eq!(excluded.keys(), vec!["b".to_string(), "c".to_string()]);
    }
}
