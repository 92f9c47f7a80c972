//! Composable runtime schema validation and parsing.
//!
//! A schema describes what input it accepts, how the accepted value is
//! normalized, and how every failure is located by path inside the input.
//! Schemas are immutable value-like handles: every modifier or check method
//! returns a new schema and leaves the receiver untouched, so handles are
//! safe to share across threads for concurrent parsing.
//!
//! ```
//! use veris_schema::{Schema, Shape, int, object, string};
//!
//! let user = object(
//!     Shape::new()
//!         .field("name", string().min(1))
//!         .field("age", int().gte(0).optional()),
//! );
//!
//! let input = veris_value::json::from_json(serde_json::json!({"name": "ada"}));
//! assert!(user.parse(input).is_ok());
//! ```

/// Issue model and error aggregation.
mod issue;

/// Shared per-schema state: type codes, flags, checks, defaults, overrides.
mod internals;

/// Check kinds, built-in check constructors, refinement context.
mod check;

/// Schema nodes and kind-specific definitions.
mod node;

/// The parse pipeline.
mod driver;

/// The opt-in conversion table.
mod coerce;

/// Format predicates for string checks.
mod format;

/// The `Schema` trait: parse, modifier and composition surfaces.
mod schema;

/// Typed modifier wrappers.
mod modifier;

/// Metadata registry keyed by schema identity.
pub mod registry;

// Leaves.
mod bigint;
mod boolean;
mod complex;
mod datetime;
mod enums;
mod function;
mod literal;
mod number;
mod special;
mod string;

// Composites.
mod array;
mod intersection;
mod lazy;
mod object;
mod pipe;
mod record;
mod set;
mod tuple;
mod union;

pub use array::{ArraySchema, array};
pub use bigint::{BigIntSchema, bigint};
pub use boolean::{BoolSchema, boolean};
pub use check::{Check, CheckKind, RefineCtx};
pub use complex::{ComplexSchema, complex};
pub use datetime::{DateTimeSchema, datetime};
pub use driver::{ParseContext, ParsePayload};
pub use enums::{EnumSchema, enum_map, enum_of};
pub use function::{FunctionSchema, function};
pub use internals::{Bag, DefaultSource, ErrorOverride, Flags, Internals, SchemaId, TypeCode};
pub use intersection::{IntersectionSchema, intersection};
pub use issue::{Issue, IssueCode, IssueProps, ParseError, RawIssue};
pub use lazy::{LazySchema, lazy};
pub use literal::{LiteralSchema, literal, literal_of};
pub use modifier::{
    ExactOptional, Nilable, NonOptional, Nullish, Optional, WithDefault, WithPrefault,
};
pub use node::{SchemaNode, UnknownKeys};
pub use number::{
    FloatSchema, FloatType, IntegerSchema, IntegerType, float, float32, float64, int, int8,
    int16, int32, int64, integer, uint8, uint16, uint32, uint64,
};
pub use object::{ObjectSchema, Shape, object};
pub use pipe::{PipeSchema, TransformSchema, Transformed, pipe, transform};
pub use record::{RecordSchema, record};
pub use registry::{Metadata, Registry};
pub use schema::{Schema, SchemaList};
pub use set::{SetSchema, set};
pub use special::{AnySchema, NullSchema, UnknownSchema, any, null, unknown};
pub use string::{StringSchema, string};
pub use tuple::{TupleSchema, tuple};
pub use union::{UnionSchema, discriminated_union, union};

/// Coercion-enabled factory variants.
///
/// `coercing::string()` is `string()` with the conversion flag pre-set.
pub mod coercing {
    use crate::schema::Schema;

    pub fn string() -> crate::StringSchema {
        crate::string().coerce()
    }

    pub fn integer<T: crate::IntegerType>() -> crate::IntegerSchema<T> {
        crate::integer::<T>().coerce()
    }

    pub fn int() -> crate::IntegerSchema<i64> {
        integer()
    }

    pub fn float<F: crate::FloatType>() -> crate::FloatSchema<F> {
        crate::float::<F>().coerce()
    }

    pub fn float64() -> crate::FloatSchema<f64> {
        float()
    }

    pub fn float32() -> crate::FloatSchema<f32> {
        float()
    }

    pub fn boolean() -> crate::BoolSchema {
        crate::boolean().coerce()
    }

    pub fn bigint() -> crate::BigIntSchema {
        crate::bigint().coerce()
    }

    pub fn complex() -> crate::ComplexSchema {
        crate::complex().coerce()
    }

    pub fn datetime() -> crate::DateTimeSchema {
        crate::datetime().coerce()
    }
}
