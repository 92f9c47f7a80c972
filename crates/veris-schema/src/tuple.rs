//! Tuple schema: fixed positions, optionally followed by a rest schema.

use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode, TupleDef};
use crate::schema::{Schema, SchemaList, conversion_error};

/// Positional elements stay heterogeneous, so the output is dynamic.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    node: SchemaNode,
}

pub fn tuple(items: impl SchemaList) -> TupleSchema {
    TupleSchema {
        node: SchemaNode::new(
            TypeCode::Tuple,
            Def::Tuple(TupleDef {
                items: items.into_nodes(),
                rest: None,
            }),
        ),
    }
}

impl TupleSchema {
    /// Validate elements beyond the fixed positions against `rest`.
    pub fn rest(&self, rest: impl Schema) -> Self {
        let rest_node = rest.to_node();
        let mut node = self.node.clone();
        node.internals = node.internals.fork();
        if let Def::Tuple(def) = &mut node.def {
            def.rest = Some(Box::new(rest_node));
        }
        TupleSchema { node }
    }
}

impl Schema for TupleSchema {
    type Output = Vec<Value>;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        TupleSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Vec<Value>, ParseError> {
        match value {
            Value::Array(items) => Ok(items.0),
            other => Err(conversion_error("tuple", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean::boolean;
    use crate::issue::IssueCode;
    use crate::number::int;
    use crate::string::string;

    #[test]
    fn test_fixed_positions() {
        let schema = tuple((string(), int()));
        let output = schema.parse(("s", 1i64)).unwrap();
        assert_eq!(output, vec![Value::String("s".into()), Value::I64(1)]);
    }

    #[test]
    fn test_length_bounds() {
        let schema = tuple((string(), int()));
        let error = schema.parse(vec![Value::String("s".into())]).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);

        let error = schema
            .parse(vec![Value::String("s".into()), Value::I64(1), Value::I64(2)])
            .unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooBig);
    }

    #[test]
    fn test_optional_tail_and_rest() {
        let schema = tuple((string(), int().optional(), string().optional())).rest(boolean());

        let output = schema
            .parse(vec![
                Value::String("s".into()),
                Value::I64(1),
                Value::String("t".into()),
                Value::Bool(true),
                Value::Bool(false),
            ])
            .unwrap();
        assert_eq!(output.len(), 5);

        // Optional positions may be absent at the tail.
        assert!(schema.parse(vec![Value::String("s".into())]).is_ok());

        // A present element still validates against its position.
        let error = schema
            .parse(vec![Value::String("s".into()), Value::String("x".into())])
            .unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
        assert_eq!(error.issues()[0].path.to_string(), "[1]");
    }

    #[test]
    fn test_rest_elements_validate() {
        let schema = tuple((string(),)).rest(int());
        let error = schema
            .parse(vec![
                Value::String("s".into()),
                Value::I64(1),
                Value::String("x".into()),
            ])
            .unwrap_err();
        assert_eq!(error.issues()[0].path.to_string(), "[2]");
    }

    #[test]
    fn test_trailing_defaults_fill_in() {
        let schema = tuple((string(), int().default_value(7i64)));
        let output = schema.parse(vec![Value::String("s".into())]).unwrap();
        assert_eq!(output, vec![Value::String("s".into()), Value::I64(7)]);
    }
}
