//! Exact-value schema.

use veris_value::{KeyValue, Value};

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::Schema;

/// Accepts values equal to one of a finite option set.
#[derive(Debug, Clone)]
pub struct LiteralSchema {
    node: SchemaNode,
}

pub fn literal(value: impl Into<KeyValue>) -> LiteralSchema {
    literal_of([value])
}

pub fn literal_of<V, I>(values: I) -> LiteralSchema
where
    V: Into<KeyValue>,
    I: IntoIterator<Item = V>,
{
    let options: Vec<KeyValue> = values.into_iter().map(Into::into).collect();
    LiteralSchema {
        node: SchemaNode::new(TypeCode::Literal, Def::Literal(options)),
    }
}

impl LiteralSchema {
    pub fn options(&self) -> Vec<KeyValue> {
        match &self.node.def {
            Def::Literal(options) => options.clone(),
            _ => Vec::new(),
        }
    }
}

impl Schema for LiteralSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        LiteralSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;

    #[test]
    fn test_single_literal() {
        let schema = literal("on");
        assert_eq!(schema.parse("on").unwrap(), Value::String("on".to_string()));
        let error = schema.parse("off").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidValue);
    }

    #[test]
    fn test_option_set() {
        let schema = literal_of([KeyValue::I64(1), KeyValue::I64(2)]);
        assert!(schema.parse(1i64).is_ok());
        assert!(schema.parse(3i64).is_err());
    }

    #[test]
    fn test_null_literal_accepts_null() {
        let schema = literal(KeyValue::Null);
        assert!(schema.parse(Value::Null).is_ok());
        assert!(schema.parse(1i64).is_err());
    }

    #[test]
    fn test_no_coercion_ever() {
        let schema = literal(1i64);
        assert!(schema.parse("1").is_err());
    }
}
