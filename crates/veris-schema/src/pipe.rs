//! Pipe and transform schemas.

use std::marker::PhantomData;

use veris_value::Value;

use crate::check::RefineCtx;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode, TransformFn};
use crate::schema::Schema;

/// Stage one validates, stage two consumes its output. A null produced by
/// stage one (optional input, for instance) skips stage two.
#[derive(Debug, Clone)]
pub struct PipeSchema<A, B> {
    node: SchemaNode,
    target: B,
    marker: PhantomData<A>,
}

pub fn pipe<A: Schema, B: Schema>(source: A, target: B) -> PipeSchema<A, B> {
    PipeSchema::new(source, target)
}

impl<A: Schema, B: Schema> PipeSchema<A, B> {
    pub(crate) fn new(source: A, target: B) -> Self {
        let node = SchemaNode::new(
            TypeCode::Pipe,
            Def::Pipe(Box::new(source.to_node()), Box::new(target.to_node())),
        );
        PipeSchema {
            node,
            target,
            marker: PhantomData,
        }
    }
}

impl<A: Schema, B: Schema> Schema for PipeSchema<A, B> {
    type Output = B::Output;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        PipeSchema {
            node,
            target: self.target.clone(),
            marker: PhantomData,
        }
    }

    fn decode(&self, value: Value) -> Result<B::Output, ParseError> {
        self.target.decode(value)
    }
}

/// A schema whose validated value is mapped through a user function.
/// Composes as `Pipe(source, Transform(func))`, so downstream stages see
/// the transformed value.
#[derive(Debug, Clone)]
pub struct Transformed<S> {
    node: SchemaNode,
    marker: PhantomData<S>,
}

impl<S: Schema> Transformed<S> {
    pub(crate) fn new(source: &S, func: TransformFn) -> Self {
        let transform = SchemaNode::new(TypeCode::Transform, Def::Transform(func));
        let node = SchemaNode::new(
            TypeCode::Pipe,
            Def::Pipe(Box::new(source.to_node()), Box::new(transform)),
        );
        Transformed {
            node,
            marker: PhantomData,
        }
    }
}

impl<S: Schema> Schema for Transformed<S> {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        Transformed {
            node,
            marker: PhantomData,
        }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

/// A bare transform stage: applies `func` to whatever flows in.
#[derive(Debug, Clone)]
pub struct TransformSchema {
    node: SchemaNode,
}

pub fn transform(
    func: impl Fn(Value, &mut RefineCtx) -> Value + Send + Sync + 'static,
) -> TransformSchema {
    TransformSchema {
        node: SchemaNode::new(TypeCode::Transform, Def::Transform(std::sync::Arc::new(func))),
    }
}

impl Schema for TransformSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        TransformSchema { node }
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
    use crate::string::string;
    use crate::schema::Schema;

    fn length_of(value: Value, _ctx: &mut RefineCtx) -> Value {
        match value {
            Value::String(s) => Value::I64(s.chars().count() as i64),
            other => other,
        }
    }

    #[test]
    fn test_transform_then_pipe() {
        let schema = string().transform(length_of).pipe(int().gte(3));
        assert_eq!(schema.parse("hello").unwrap(), 5);

        let error = schema.parse("hi").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_pipe_validates_both_stages() {
        let schema = string().min(2).pipe(string().max(4));
        assert!(schema.parse("abc").is_ok());
        assert_eq!(
            schema.parse("a").unwrap_err().issues()[0].code,
            IssueCode::TooSmall
        );
        assert_eq!(
            schema.parse("abcdef").unwrap_err().issues()[0].code,
            IssueCode::TooBig
        );
    }

    #[test]
    fn test_optional_source_short_circuits() {
        let schema = string().optional().transform(length_of);
        assert_eq!(schema.parse(Value::Null).unwrap(), Value::Null);
        assert_eq!(schema.parse("abc").unwrap(), Value::I64(3));
    }

    #[test]
    fn test_transform_can_report_issues() {
        let schema = string().transform(|value, ctx| {
            ctx.add_issue("always rejected");
            value
        });
        let error = schema.parse("x").unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::Custom);
        assert_eq!(error.issues()[0].message, "always rejected");
    }

    #[test]
    fn test_default_flows_into_pipe_target() {
        // The default bypasses the first stage's checks but the second
        // stage still validates it.
        let schema = string().min(10).default_value("short").pipe(string().max(3));
        let error = schema.parse(Value::Null).unwrap_err();
        assert_eq!(error.issues()[0].code, IssueCode::TooBig);
    }
}
