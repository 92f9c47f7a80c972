//! Function schema.
//!
//! There is no callable value kind, so the input/output schemas are carried
//! as metadata and enforcement happens through [`FunctionSchema::implement`],
//! which wraps a callable with runtime argument and return validation.

use veris_value::{PathSegment, Value, ValuePath};

use crate::driver::ParseContext;
use crate::internals::TypeCode;
use crate::issue::{Issue, IssueCode, IssueProps, ParseError};
use crate::node::{Def, FunctionDef, SchemaNode};
use crate::schema::{Schema, SchemaList};

#[derive(Debug, Clone)]
pub struct FunctionSchema {
    node: SchemaNode,
}

pub fn function() -> FunctionSchema {
    FunctionSchema {
        node: SchemaNode::new(
            TypeCode::Function,
            Def::Function(FunctionDef {
                input: Vec::new(),
                output: None,
            }),
        ),
    }
}

impl FunctionSchema {
    fn map_def(&self, func: impl FnOnce(&mut FunctionDef)) -> Self {
        let mut node = self.node.clone();
        node.internals = node.internals.fork();
        if let Def::Function(def) = &mut node.def {
            func(def);
        }
        FunctionSchema { node }
    }

    /// Declare the argument schemas, positionally.
    pub fn input(&self, items: impl SchemaList) -> Self {
        let nodes = items.into_nodes();
        self.map_def(move |def| def.input = nodes)
    }

    /// Declare the return schema.
    pub fn output(&self, schema: impl Schema) -> Self {
        let node = schema.to_node();
        self.map_def(move |def| def.output = Some(Box::new(node)))
    }

    fn def(&self) -> &FunctionDef {
        match &self.node.def {
            Def::Function(def) => def,
            // The node is built by `function()` and only rebuilt through
            // `map_def`, so any other kind is a bug in this module.
            _ => unreachable!("function schema holds a function definition"),
        }
    }

    /// Wrap `func` so that arguments and the return value are validated on
    /// every call.
    pub fn implement<F>(&self, func: F) -> impl Fn(&[Value]) -> Result<Value, ParseError>
    where
        F: Fn(&[Value]) -> Value,
    {
        let input: Vec<SchemaNode> = self.def().input.clone();
        let output: Option<SchemaNode> = self.def().output.clone().map(|node| *node);

        move |args: &[Value]| {
            if args.len() != input.len() {
                return Err(arity_error(input.len(), args.len()));
            }

            let ctx = ParseContext::default();
            let mut validated = Vec::with_capacity(args.len());
            let mut issues = Vec::new();
            for (index, (node, arg)) in input.iter().zip(args).enumerate() {
                let arg_ctx = ParseContext {
                    path_prefix: Some(ValuePath(vec![PathSegment::Index(index)])),
                    ..ctx.clone()
                };
                match crate::driver::parse_node(node, arg.clone(), &arg_ctx) {
                    Ok(value) => validated.push(value),
                    Err(error) => issues.extend(error.into_issues()),
                }
            }
            if !issues.is_empty() {
                return Err(ParseError::new(issues));
            }

            let result = func(&validated);
            match &output {
                Some(node) => crate::driver::parse_node(node, result, &ctx),
                None => Ok(result),
            }
        }
    }
}

fn arity_error(expected: usize, received: usize) -> ParseError {
    let code = if received < expected {
        IssueCode::TooSmall
    } else {
        IssueCode::TooBig
    };
    let mut props = IssueProps::default();
    if received < expected {
        props.minimum = Some(Value::U64(expected as u64));
    } else {
        props.maximum = Some(Value::U64(expected as u64));
    }
    props.inclusive = Some(true);
    props.origin = Some("array");
    ParseError::new(vec![Issue {
        code,
        path: ValuePath::root(),
        message: format!("expected {expected} argument(s), but got {received}"),
        input: Value::U64(received as u64),
        props,
    }])
}

impl Schema for FunctionSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        FunctionSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::int;
    use crate::string::string;

    #[test]
    fn test_implement_validates_arguments() {
        let schema = function().input((string(), int())).output(int());
        let repeat_len = schema.implement(|args| match (&args[0], &args[1]) {
            (Value::String(s), Value::I64(n)) => Value::I64(s.len() as i64 * n),
            _ => Value::Null,
        });

        assert_eq!(repeat_len(&["ab".into(), Value::I64(3)]).unwrap(), Value::I64(6));

        let error = repeat_len(&[Value::I64(1), Value::I64(3)]).unwrap_err();
        assert_eq!(error.issues()[0].path.to_string(), "[0]");
    }

    #[test]
    fn test_implement_validates_return() {
        let schema = function().input((int(),)).output(string());
        let bad = schema.implement(|_| Value::I64(1));
        assert!(bad(&[Value::I64(1)]).is_err());
    }

    #[test]
    fn test_arity_mismatch() {
        let schema = function().input((int(),));
        let wrapped = schema.implement(|args| args[0].clone());
        assert!(wrapped(&[]).is_err());
    }

    #[test]
    fn test_function_schema_rejects_plain_values() {
        assert!(function().parse(1i64).is_err());
    }
}
