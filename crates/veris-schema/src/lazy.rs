//! Lazy schema for recursive definitions.

use std::sync::Arc;

use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, LazyDef, SchemaNode};
use crate::schema::Schema;

/// Defers to the schema produced by a nullary factory. The factory runs
/// once per lazy node; the result is memoized, which is what lets a
/// recursive definition terminate.
#[derive(Debug, Clone)]
pub struct LazySchema {
    node: SchemaNode,
}

pub fn lazy<S, F>(init: F) -> LazySchema
where
    S: Schema,
    F: Fn() -> S + Send + Sync + 'static,
{
    LazySchema {
        node: SchemaNode::new(
            TypeCode::Lazy,
            Def::Lazy(LazyDef::new(Arc::new(move || init().to_node()))),
        ),
    }
}

impl Schema for LazySchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        LazySchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::array;
    use crate::number::int;
    use crate::object::{Shape, object};
    use crate::string::string;
    use veris_value::json::from_json;

    #[test]
    fn test_defers_to_inner() {
        let schema = lazy(int);
        assert_eq!(schema.parse(3i64).unwrap(), Value::I64(3));
        assert!(schema.parse("x").is_err());
    }

    fn tree() -> LazySchema {
        lazy(|| {
            object(
                Shape::new()
                    .field("label", string())
                    .field("children", array(tree()).optional()),
            )
        })
    }

    #[test]
    fn test_recursive_schema() {
        let input = from_json(serde_json::json!({
            "label": "root",
            "children": [
                {"label": "left"},
                {"label": "right", "children": [{"label": "leaf"}]}
            ]
        }));
        assert!(tree().parse(input).is_ok());

        let bad = from_json(serde_json::json!({
            "label": "root",
            "children": [{"label": 3}]
        }));
        let error = tree().parse(bad).unwrap_err();
        assert_eq!(error.issues()[0].path.to_string(), "children[0].label");
    }
}
