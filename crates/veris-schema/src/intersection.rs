//! Intersection schema.

use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::Schema;

/// Input must satisfy both branches; map outputs merge by shallow key
/// union, anything else must agree structurally.
#[derive(Debug, Clone)]
pub struct IntersectionSchema {
    node: SchemaNode,
}

pub fn intersection(left: impl Schema, right: impl Schema) -> IntersectionSchema {
    IntersectionSchema {
        node: SchemaNode::new(
            TypeCode::Intersection,
            Def::Intersection(Box::new(left.to_node()), Box::new(right.to_node())),
        ),
    }
}

impl Schema for IntersectionSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        IntersectionSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;
    use crate::number::int;
    use crate::object::{Shape, object};
    use crate::string::string;
    use veris_value::json::from_json;

    fn ab() -> IntersectionSchema {
        intersection(
            object(Shape::new().field("a", string())).passthrough(),
            object(Shape::new().field("b", int())).passthrough(),
        )
    }

    #[test]
    fn test_maps_merge() {
        let output = ab()
            .parse(from_json(serde_json::json!({"a": "x", "b": 2})))
            .unwrap();
        let Value::Map(map) = output else {
            panic!("expected a map");
        };
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_either_branch_failure_propagates() {
        let error = ab()
            .parse(from_json(serde_json::json!({"a": "x", "b": "no"})))
            .unwrap_err();
        assert_eq!(error.issues()[0].path.to_string(), "b");
    }

    #[test]
    fn test_scalar_branches_require_equal_outputs() {
        let schema = intersection(int().gte(0), int().lte(10));
        assert_eq!(schema.parse(5i64).unwrap(), Value::I64(5));
        assert!(schema.parse(11i64).is_err());
    }

    #[test]
    fn test_and_chaining() {
        let schema = int().gte(0).and(int().lte(10));
        assert!(schema.parse(5i64).is_ok());
        assert!(schema.parse(-1i64).is_err());
    }

    #[test]
    fn test_conflicting_merge_reports_key() {
        // Both branches keep "x" but normalize it differently.
        let lower = object(Shape::new().field("x", string().to_lowercase())).passthrough();
        let upper = object(Shape::new().field("x", string().to_uppercase())).passthrough();
        let error = intersection(lower, upper)
            .parse(from_json(serde_json::json!({"x": "Mixed"})))
            .unwrap_err();
        assert_eq!(
            error.issues()[0].code,
            IssueCode::InvalidIntersectionTypes
        );
        assert_eq!(error.issues()[0].path.to_string(), "x");
    }
}
