//! Null, any and unknown schemas.

use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

/// Accepts the null value only.
#[derive(Debug, Clone)]
pub struct NullSchema {
    node: SchemaNode,
}

pub fn null() -> NullSchema {
    NullSchema {
        node: SchemaNode::new(TypeCode::Null, Def::Null),
    }
}

impl Schema for NullSchema {
    type Output = ();

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        NullSchema { node }
    }

    fn decode(&self, value: Value) -> Result<(), ParseError> {
        match value {
            Value::Null => Ok(()),
            other => Err(conversion_error("null", &other)),
        }
    }
}

/// Accepts anything.
#[derive(Debug, Clone)]
pub struct AnySchema {
    node: SchemaNode,
}

pub fn any() -> AnySchema {
    AnySchema {
        node: SchemaNode::new(TypeCode::Any, Def::Any),
    }
}

impl Schema for AnySchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        AnySchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

/// Accepts anything; the output is deliberately untyped.
#[derive(Debug, Clone)]
pub struct UnknownSchema {
    node: SchemaNode,
}

pub fn unknown() -> UnknownSchema {
    UnknownSchema {
        node: SchemaNode::new(TypeCode::Unknown, Def::Unknown),
    }
}

impl Schema for UnknownSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        UnknownSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_accepts_only_null() {
        assert!(null().parse(Value::Null).is_ok());
        assert!(null().parse(0i64).is_err());
        assert!(null().parse("").is_err());
    }

    #[test]
    fn test_any_and_unknown_accept_everything() {
        assert_eq!(any().parse(1i64).unwrap(), Value::I64(1));
        assert_eq!(any().parse(Value::Null).unwrap(), Value::Null);
        assert_eq!(unknown().parse("x").unwrap(), Value::String("x".to_string()));
    }

    #[test]
    fn test_any_supports_refinement() {
        let schema = any().refine_with(|value| !value.is_null(), "must not be null");
        assert!(schema.parse(1i64).is_ok());
        assert!(schema.parse(Value::Null).is_err());
    }
}
