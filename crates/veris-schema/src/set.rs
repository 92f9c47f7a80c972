//! Set schema: a unique collection of key-comparable elements.

use veris_value::{Set, Value};

use crate::check::Check;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

/// Accepts an explicit set, or a sequence that is deduplicated on the fly.
#[derive(Debug, Clone)]
pub struct SetSchema {
    node: SchemaNode,
}

pub fn set(element: impl Schema) -> SetSchema {
    SetSchema {
        node: SchemaNode::new(TypeCode::Set, Def::Set(Box::new(element.to_node()))),
    }
}

impl Schema for SetSchema {
    type Output = Set;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        SetSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Set, ParseError> {
        match value {
            Value::Set(set) => Ok(set),
            other => Err(conversion_error("set", &other)),
        }
    }
}

impl SetSchema {
    /// Minimum element count, measured after deduplication.
    pub fn min(&self, minimum: usize) -> Self {
        self.with_check(Check::min_size(minimum, None))
    }

    /// Maximum element count, measured after deduplication.
    pub fn max(&self, maximum: usize) -> Self {
        self.with_check(Check::max_size(maximum, None))
    }

    pub fn size(&self, expected: usize) -> Self {
        self.with_check(Check::exact_size(expected, None))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueCode;
    use crate::number::int;
    use crate::string::string;
    use veris_value::KeyValue;

    #[test]
    fn test_sequence_input_dedups_silently() {
        let schema = set(int().gte(0)).min(2);
        let output = schema.parse(vec![1i64, 1, 2]).unwrap();
        assert_eq!(output.len(), 2);
        assert!(output.contains(&KeyValue::I64(1)));
        assert!(output.contains(&KeyValue::I64(2)));
    }

    #[test]
    fn test_min_counts_unique_elements() {
        let schema = set(int().gte(0)).min(2);
        let error = schema.parse(vec![1i64]).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(error.issues()[0].props.origin, Some("set"));
    }

    #[test]
    fn test_element_failure_path_is_the_element() {
        let schema = set(int().gte(0)).min(2);
        let error = schema.parse(vec![-1i64, 2]).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
        assert_eq!(error.issues()[0].path.to_string(), "{-1}");
    }

    #[test]
    fn test_explicit_set_input() {
        let input: Set = [KeyValue::I64(3), KeyValue::I64(4)].into_iter().collect();
        let schema = set(int());
        assert_eq!(schema.parse(input.clone()).unwrap(), input);
    }

    #[test]
    fn test_overwrite_collision_reports_not_unique() {
        let schema = set(string().trim());
        let error = schema
            .parse(vec![Value::String("a".into()), Value::String(" a".into())])
            .unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::NotUnique);
    }

    #[test]
    fn test_non_sequence_input() {
        let error = set(int()).parse(1i64).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::InvalidType);
    }
}
