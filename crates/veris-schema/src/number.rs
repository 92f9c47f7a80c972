//! The integer family and floats.
//!
//! One generic schema covers every machine width: the definition stores
//! width bounds widened to `i128`, so the driver's probe is width-aware
//! while the typed handle knows the exact output type.

use std::marker::PhantomData;

use veris_value::Value;

use crate::check::Check;
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, FloatWidth, IntDef, SchemaNode};
use crate::schema::{Schema, conversion_error};

mod sealed {
    pub trait Sealed {}
}

/// Machine integer types usable as schema outputs.
pub trait IntegerType: sealed::Sealed + Copy + Send + Sync + 'static {
    const MIN: i128;
    const MAX: i128;
    const NAME: &'static str;

    fn from_i128(wide: i128) -> Option<Self>;
    fn into_value(self) -> Value;
}

macro_rules! impl_integer_type {
    ($($ty:ty => $name:literal, $variant:ident, $widen:ty;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl IntegerType for $ty {
                const MIN: i128 = <$ty>::MIN as i128;
                const MAX: i128 = <$ty>::MAX as i128;
                const NAME: &'static str = $name;

                fn from_i128(wide: i128) -> Option<Self> {
                    <$ty>::try_from(wide).ok()
                }

                fn into_value(self) -> Value {
                    Value::$variant(self as $widen)
                }
            }
        )*
    };
}

impl_integer_type! {
    i8 => "i8", I64, i64;
    i16 => "i16", I64, i64;
    i32 => "i32", I64, i64;
    i64 => "i64", I64, i64;
    u8 => "u8", U64, u64;
    u16 => "u16", U64, u64;
    u32 => "u32", U64, u64;
    u64 => "u64", U64, u64;
}

#[derive(Debug, Clone)]
pub struct IntegerSchema<T> {
    node: SchemaNode,
    marker: PhantomData<T>,
}

/// An integer schema for any machine width.
pub fn integer<T: IntegerType>() -> IntegerSchema<T> {
    IntegerSchema {
        node: SchemaNode::new(
            TypeCode::Int,
            Def::Int(IntDef {
                min: T::MIN,
                max: T::MAX,
            }),
        ),
        marker: PhantomData,
    }
}

pub fn int() -> IntegerSchema<i64> {
    integer()
}

pub fn int8() -> IntegerSchema<i8> {
    integer()
}

pub fn int16() -> IntegerSchema<i16> {
    integer()
}

pub fn int32() -> IntegerSchema<i32> {
    integer()
}

pub fn int64() -> IntegerSchema<i64> {
    integer()
}

pub fn uint8() -> IntegerSchema<u8> {
    integer()
}

pub fn uint16() -> IntegerSchema<u16> {
    integer()
}

pub fn uint32() -> IntegerSchema<u32> {
    integer()
}

pub fn uint64() -> IntegerSchema<u64> {
    integer()
}

impl<T: IntegerType> Schema for IntegerSchema<T> {
    type Output = T;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        IntegerSchema {
            node,
            marker: PhantomData,
        }
    }

    fn decode(&self, value: Value) -> Result<T, ParseError> {
        value
            .as_i128()
            .and_then(T::from_i128)
            .ok_or_else(|| conversion_error(T::NAME, &value))
    }
}

/// The largest integer window representable exactly in an `f64`.
const MAX_SAFE: i64 = 9_007_199_254_740_991;

impl<T: IntegerType> IntegerSchema<T> {
    pub fn gt(&self, bound: T) -> Self {
        self.with_check(Check::gt(bound.into_value(), "int", None))
    }

    pub fn gte(&self, bound: T) -> Self {
        self.with_check(Check::gte(bound.into_value(), "int", None))
    }

    pub fn lt(&self, bound: T) -> Self {
        self.with_check(Check::lt(bound.into_value(), "int", None))
    }

    pub fn lte(&self, bound: T) -> Self {
        self.with_check(Check::lte(bound.into_value(), "int", None))
    }

    pub fn min(&self, bound: T) -> Self {
        self.gte(bound)
    }

    pub fn max(&self, bound: T) -> Self {
        self.lte(bound)
    }

    pub fn multiple_of(&self, divisor: T) -> Self {
        self.with_check(Check::multiple_of(divisor.into_value(), None))
    }

    pub fn step(&self, divisor: T) -> Self {
        self.multiple_of(divisor)
    }

    pub fn positive(&self) -> Self {
        self.with_check(Check::gt(Value::I64(0), "int", None))
    }

    pub fn negative(&self) -> Self {
        self.with_check(Check::lt(Value::I64(0), "int", None))
    }

    pub fn non_negative(&self) -> Self {
        self.with_check(Check::gte(Value::I64(0), "int", None))
    }

    pub fn non_positive(&self) -> Self {
        self.with_check(Check::lte(Value::I64(0), "int", None))
    }

    /// Constrain to the window that survives an `f64` round trip.
    pub fn safe(&self) -> Self {
        self.with_check(Check::gte(Value::I64(-MAX_SAFE), "int", None))
            .with_check(Check::lte(Value::I64(MAX_SAFE), "int", None))
    }
}

/// Machine float types usable as schema outputs.
pub trait FloatType: sealed::Sealed + Copy + Send + Sync + 'static {
    const NAME: &'static str;
    const WIDTH: FloatWidth;

    fn from_f64(f: f64) -> Self;
    fn into_value(self) -> Value;
}

impl sealed::Sealed for f32 {}
impl sealed::Sealed for f64 {}

impl FloatType for f32 {
    const NAME: &'static str = "f32";
    const WIDTH: FloatWidth = FloatWidth::W32;

    fn from_f64(f: f64) -> Self {
        f as f32
    }

    fn into_value(self) -> Value {
        Value::F32(self)
    }
}

impl FloatType for f64 {
    const NAME: &'static str = "f64";
    const WIDTH: FloatWidth = FloatWidth::W64;

    fn from_f64(f: f64) -> Self {
        f
    }

    fn into_value(self) -> Value {
        Value::F64(self)
    }
}

#[derive(Debug, Clone)]
pub struct FloatSchema<F> {
    node: SchemaNode,
    marker: PhantomData<F>,
}

pub fn float<F: FloatType>() -> FloatSchema<F> {
    FloatSchema {
        node: SchemaNode::new(TypeCode::Float, Def::Float(F::WIDTH)),
        marker: PhantomData,
    }
}

pub fn float32() -> FloatSchema<f32> {
    float()
}

pub fn float64() -> FloatSchema<f64> {
    float()
}

impl<F: FloatType> Schema for FloatSchema<F> {
    type Output = F;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        FloatSchema {
            node,
            marker: PhantomData,
        }
    }

    fn decode(&self, value: Value) -> Result<F, ParseError> {
        value
            .as_f64()
            .map(F::from_f64)
            .ok_or_else(|| conversion_error(F::NAME, &value))
    }
}

impl<F: FloatType> FloatSchema<F> {
    pub fn gt(&self, bound: F) -> Self {
        self.with_check(Check::gt(bound.into_value(), "float", None))
    }

    pub fn gte(&self, bound: F) -> Self {
        self.with_check(Check::gte(bound.into_value(), "float", None))
    }

    pub fn lt(&self, bound: F) -> Self {
        self.with_check(Check::lt(bound.into_value(), "float", None))
    }

    pub fn lte(&self, bound: F) -> Self {
        self.with_check(Check::lte(bound.into_value(), "float", None))
    }

    pub fn min(&self, bound: F) -> Self {
        self.gte(bound)
    }

    pub fn max(&self, bound: F) -> Self {
        self.lte(bound)
    }

    pub fn positive(&self) -> Self {
        self.with_check(Check::gt(Value::F64(0.0), "float", None))
    }

    pub fn negative(&self) -> Self {
        self.with_check(Check::lt(Value::F64(0.0), "float", None))
    }

    pub fn non_negative(&self) -> Self {
        self.with_check(Check::gte(Value::F64(0.0), "float", None))
    }

    pub fn non_positive(&self) -> Self {
        self.with_check(Check::lte(Value::F64(0.0), "float", None))
    }

    /// Reject NaN and the infinities, which are otherwise valid inputs.
    pub fn finite(&self) -> Self {
        self.refine_with(
            |value| value.as_f64().map(f64::is_finite).unwrap_or(true),
            "must be a finite number",
        )
    }

    /// Constrain to the integer-exact window of an `f64`.
    pub fn safe(&self) -> Self {
        self.with_check(Check::gte(Value::F64(-(MAX_SAFE as f64)), "float", None))
            .with_check(Check::lte(Value::F64(MAX_SAFE as f64), "float", None))
    }
}
