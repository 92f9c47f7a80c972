//! Complex number schema.

use num_complex::Complex64;
use veris_value::Value;

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

#[derive(Debug, Clone)]
pub struct ComplexSchema {
    node: SchemaNode,
}

pub fn complex() -> ComplexSchema {
    ComplexSchema {
        node: SchemaNode::new(TypeCode::Complex, Def::Complex),
    }
}

impl Schema for ComplexSchema {
    type Output = Complex64;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        ComplexSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Complex64, ParseError> {
        match value {
            Value::Complex(c) => Ok(c),
            other => Err(conversion_error("complex", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let value = Complex64::new(1.0, -2.0);
        assert_eq!(complex().parse(value).unwrap(), value);
    }

    #[test]
    fn test_reals_widen_only_with_coercion() {
        assert!(complex().parse(2i64).is_err());
        assert_eq!(
            complex().coerce().parse(2i64).unwrap(),
            Complex64::new(2.0, 0.0)
        );
        assert_eq!(
            complex().coerce().parse(1.5f64).unwrap(),
            Complex64::new(1.5, 0.0)
        );
    }
}
