//! Bool schema.

use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

#[derive(Debug, Clone)]
pub struct BoolSchema {
    node: SchemaNode,
}

pub fn boolean() -> BoolSchema {
    BoolSchema {
        node: SchemaNode::new(TypeCode::Bool, Def::Bool),
    }
}

impl Schema for BoolSchema {
    type Output = bool;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        BoolSchema { node }
    }

    fn decode(&self, value: Value) -> Result<bool, ParseError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(conversion_error("bool", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert!(boolean().parse(true).unwrap());
        assert!(!boolean().parse(false).unwrap());
    }

    #[test]
    fn test_no_implicit_conversion() {
        assert!(boolean().parse(1i64).is_err());
        assert!(boolean().parse("true").is_err());
    }

    #[test]
    fn test_coercion_is_opt_in() {
        let schema = boolean().coerce();
        assert!(schema.parse("yes").unwrap());
        assert!(!schema.parse("").unwrap());
        assert!(schema.parse(-2i64).unwrap());
        assert!(schema.parse("maybe").is_err());
    }
}
