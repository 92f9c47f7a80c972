//! Absolute-instant schema.

use chrono::{DateTime, Utc};
use veris_value::Value;

use crate::check::Check;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

#[derive(Debug, Clone)]
pub struct DateTimeSchema {
    node: SchemaNode,
}

pub fn datetime() -> DateTimeSchema {
    DateTimeSchema {
        node: SchemaNode::new(TypeCode::DateTime, Def::DateTime),
    }
}

impl Schema for DateTimeSchema {
    type Output = DateTime<Utc>;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        DateTimeSchema { node }
    }

    fn decode(&self, value: Value) -> Result<DateTime<Utc>, ParseError> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            other => Err(conversion_error("datetime", &other)),
        }
    }
}

impl DateTimeSchema {
    /// Inclusive lower bound.
    pub fn min(&self, bound: DateTime<Utc>) -> Self {
        self.with_check(Check::gte(Value::DateTime(bound), "datetime", None))
    }

    /// Inclusive upper bound.
    pub fn max(&self, bound: DateTime<Utc>) -> Self {
        self.with_check(Check::lte(Value::DateTime(bound), "datetime", None))
    }
}
