//! Veris core library.
//!
//! Re-exports the schema combinators from `veris-schema` and the dynamic
//! value model from `veris-value` under one roof.

pub use veris_schema::*;

pub use veris_value::{
    Array, KeyValue, Map, PathSegment, Set, Value, ValueKind, ValuePath, json,
};

/// One-line import for the common surface.
pub mod prelude {
    pub use veris_schema::{
        Schema, Shape, any, array, bigint, boolean, coercing, complex, datetime,
        discriminated_union, enum_map, enum_of, float32, float64, function, int, int8, int16,
        int32, int64, intersection, lazy, literal, literal_of, null, object, pipe, record, set,
        string, transform, tuple, uint8, uint16, uint32, uint64, union, unknown,
    };
    pub use veris_value::{KeyValue, Value};
}
