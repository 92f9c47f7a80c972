//! Arbitrary-precision integer schema.

use num_bigint::BigInt;
use veris_value::Value;

use crate::check::Check;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, SchemaNode};
use crate::schema::{Schema, conversion_error};

#[derive(Debug, Clone)]
pub struct BigIntSchema {
    node: SchemaNode,
}

pub fn bigint() -> BigIntSchema {
    BigIntSchema {
        node: SchemaNode::new(TypeCode::BigInt, Def::BigInt),
    }
}

impl Schema for BigIntSchema {
    type Output = BigInt;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        BigIntSchema { node }
    }

    fn decode(&self, value: Value) -> Result<BigInt, ParseError> {
        match value {
            Value::BigInt(b) => Ok(b),
            other => Err(conversion_error("bigint", &other)),
        }
    }
}

impl BigIntSchema {
    pub fn gt(&self, bound: impl Into<BigInt>) -> Self {
        self.with_check(Check::gt(Value::BigInt(bound.into()), "bigint", None))
    }

    pub fn gte(&self, bound: impl Into<BigInt>) -> Self {
        self.with_check(Check::gte(Value::BigInt(bound.into()), "bigint", None))
    }

    pub fn lt(&self, bound: impl Into<BigInt>) -> Self {
        self.with_check(Check::lt(Value::BigInt(bound.into()), "bigint", None))
    }

    pub fn lte(&self, bound: impl Into<BigInt>) -> Self {
        self.with_check(Check::lte(Value::BigInt(bound.into()), "bigint", None))
    }

    pub fn multiple_of(&self, divisor: impl Into<BigInt>) -> Self {
        self.with_check(Check::multiple_of(Value::BigInt(divisor.into()), None))
    }

    pub fn positive(&self) -> Self {
        self.gt(0)
    }

    pub fn negative(&self) -> Self {
        self.lt(0)
    }

    pub fn non_negative(&self) -> Self {
        self.gte(0)
    }

    pub fn non_positive(&self) -> Self {
        self.lte(0)
    }
}
