//! Array schema.

use std::sync::Arc;

use ahash::AHashSet;
use veris_value::Value;

use crate::check::{Check, CheckKind};
use crate::internals::TypeCode;
use crate::issue::{IssueCode, ParseError};
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

/// A homogeneous sequence of `S` outputs.
#[derive(Debug, Clone)]
pub struct ArraySchema<S> {
    node: SchemaNode,
    element: S,
}

pub fn array<S: Schema>(element: S) -> ArraySchema<S> {
    let node = SchemaNode::new(TypeCode::Array, Def::Array(Box::new(element.to_node())));
    ArraySchema { node, element }
}

impl<S: Schema> Schema for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        ArraySchema {
            node,
            element: self.element.clone(),
        }
    }

    fn decode(&self, value: Value) -> Result<Vec<S::Output>, ParseError> {
        match value {
            Value::Array(items) => items
                .0
                .into_iter()
                .map(|item| self.element.decode(item))
                .collect(),
            other => Err(conversion_error("array", &other)),
        }
    }
}

impl<S: Schema> ArraySchema<S> {
    pub fn min(&self, minimum: usize) -> Self {
        self.with_check(Check::min_size(minimum, None))
    }

    pub fn max(&self, maximum: usize) -> Self {
        self.with_check(Check::max_size(maximum, None))
    }

    pub fn length(&self, expected: usize) -> Self {
        self.with_check(Check::exact_size(expected, None))
    }

    pub fn nonempty(&self) -> Self {
        self.min(1)
    }

    /// Reject arrays whose key-comparable elements repeat.
    pub fn unique(&self) -> Self {
        self.with_check(Check::new(
            CheckKind::Custom,
            Arc::new(|payload| {
                let Value::Array(items) = &payload.value else {
                    return;
                };
                let mut seen = AHashSet::new();
                let mut duplicate = None;
                for item in &items.0 {
                    if let Some(key) = item.as_key()
                        && !seen.insert(key)
                    {
                        duplicate = Some(item.clone());
                        break;
                    }
                }
                if let Some(duplicate) = duplicate {
                    let mut raw = payload.raw_issue(IssueCode::NotUnique);
                    raw.input = duplicate;
                    payload.push_issue(raw);
                }
            }),
        ))
    }
}
