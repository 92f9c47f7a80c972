//! Record schema: homogeneous keys and values.

use veris_value::{Map, Value};

use crate::check::Check;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, RecordDef, SchemaNode};
use crate::schema::{Schema, conversion_error};

#[derive(Debug, Clone)]
pub struct RecordSchema {
    node: SchemaNode,
}

pub fn record(key: impl Schema, value: impl Schema) -> RecordSchema {
    RecordSchema {
        node: SchemaNode::new(
            TypeCode::Record,
            Def::Record(RecordDef {
                key: Box::new(key.to_node()),
                value: Box::new(value.to_node()),
            }),
        ),
    }
}

impl Schema for RecordSchema {
    type Output = Map;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        RecordSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Map, ParseError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(conversion_error("map", &other)),
        }
    }
}

impl RecordSchema {
    pub fn min(&self, minimum: usize) -> Self {
        self.with_check(Check::min_size(minimum, None))
    }

    pub fn max(&self, maximum: usize) -> Self {
        self.with_check(Check::max_size(maximum, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;
    use crate::number::int;
    use crate::string::string;
    use veris_value::json::from_json;

    #[test]
    fn test_round_trip() {
        let schema = record(string(), int());
        let output = schema
            .parse(from_json(serde_json::json!({"a": 1, "b": 2})))
            .unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.get_str("b"), Some(&Value::I64(2)));
    }

    #[test]
    fn test_value_issue_path_is_the_key() {
        let schema = record(string(), int());
        let error = schema
            .parse(from_json(serde_json::json!({"a": 1, "b": "x"})))
            .unwrap_err();
        assert_eq!(error.issues()[0].path.to_string(), "b");
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
    }

    #[test]
    fn test_key_failure_reports_invalid_key() {
        let schema = record(string().min(2), int());
        let error = schema
            .parse(from_json(serde_json::json!({"a": 1, "bb": 2})))
            .unwrap_err();
        assert_eq!(error.len(), 1);
        assert_eq!(error.issues()[0].code, IssueCode::InvalidKey);
        assert_eq!(error.issues()[0].path.to_string(), "a");
    }

    #[test]
    fn test_duplicate_keys_after_normalization() {
        let schema = record(string().trim(), int());
        let error = schema
            .parse(from_json(serde_json::json!({"a": 1, " a": 2})))
            .unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidKey);
    }

    #[test]
    fn test_size_checks_use_map_origin() {
        let schema = record(string(), int()).min(2);
        let error = schema
            .parse(from_json(serde_json::json!({"a": 1})))
            .unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(error.issues()[0].props.origin, Some("map"));
    }
}
