//! Shared per-schema state.
//!
//! Every schema node carries an [`Internals`] block: its type code, modifier
//! flags, the ordered check list, default/prefault sources, an optional
//! error override and a bag of cross-cutting hints. Internals are mutable
//! during construction only; every modifying operation works on a fork so
//! existing handles never observe the change.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use veris_value::{Value, ValuePath};

use crate::check::Check;
use crate::issue::RawIssue;

/// Construction-assigned identity, used by the metadata registry and for
/// lazy-schema memoization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(u64);

static NEXT_SCHEMA_ID: AtomicU64 = AtomicU64::new(1);

impl SchemaId {
    pub(crate) fn next() -> Self {
        SchemaId(NEXT_SCHEMA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kind identity of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    String,
    Int,
    Float,
    Bool,
    BigInt,
    Complex,
    Null,
    Any,
    Unknown,
    DateTime,
    Literal,
    Enum,
    Function,
    Array,
    Tuple,
    Object,
    Record,
    Set,
    Union,
    Intersection,
    Lazy,
    Pipe,
    Transform,
}

impl TypeCode {
    pub fn name(self) -> &'static str {
        match self {
            TypeCode::String => "string",
            TypeCode::Int => "int",
            TypeCode::Float => "float",
            TypeCode::Bool => "bool",
            TypeCode::BigInt => "bigint",
            TypeCode::Complex => "complex",
            TypeCode::Null => "null",
            TypeCode::Any => "any",
            TypeCode::Unknown => "unknown",
            TypeCode::DateTime => "datetime",
            TypeCode::Literal => "literal",
            TypeCode::Enum => "enum",
            TypeCode::Function => "function",
            TypeCode::Array => "array",
            TypeCode::Tuple => "tuple",
            TypeCode::Object => "object",
            TypeCode::Record => "record",
            TypeCode::Set => "set",
            TypeCode::Union => "union",
            TypeCode::Intersection => "intersection",
            TypeCode::Lazy => "lazy",
            TypeCode::Pipe => "pipe",
            TypeCode::Transform => "transform",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier flags consulted by the absence gate of the parse pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Absent-or-null input produces a null output.
    pub optional: bool,
    /// Explicit null input produces a null output.
    pub nilable: bool,
    /// Null is rejected even when an enclosing shape made this optional.
    pub non_optional: bool,
    /// Absence is allowed in a shape, explicit null is not.
    pub exact_optional: bool,
    /// Run the conversion table before the type probe.
    pub coerce: bool,
}

/// Where a default or prefault value comes from.
#[derive(Clone)]
pub enum DefaultSource {
    Value(Value),
    Func(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultSource {
    pub(crate) fn produce(&self) -> Value {
        match self {
            DefaultSource::Value(value) => value.clone(),
            DefaultSource::Func(func) => func(),
        }
    }
}

impl fmt::Debug for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultSource::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Schema-local replacement for issue messages.
#[derive(Clone)]
pub enum ErrorOverride {
    /// A literal message; may contain `{expected}`-style placeholders.
    Literal(String),
    /// Computed per issue.
    Func(Arc<dyn Fn(&RawIssue) -> String + Send + Sync>),
}

impl ErrorOverride {
    pub(crate) fn resolve(&self, raw: &RawIssue) -> String {
        match self {
            ErrorOverride::Literal(message) => message.clone(),
            ErrorOverride::Func(func) => func(raw),
        }
    }
}

impl fmt::Debug for ErrorOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOverride::Literal(message) => f.debug_tuple("Literal").field(message).finish(),
            ErrorOverride::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Cross-cutting hints recorded at construction time.
#[derive(Debug, Clone, Default)]
pub struct Bag {
    pub description: Option<String>,
    /// Stop at the first issue instead of collecting all of them.
    pub abort: bool,
    /// Prefix prepended to every issue path produced under this schema.
    pub path_prefix: Option<ValuePath>,
}

/// The frozen-at-parse state block shared by every schema kind.
#[derive(Debug, Clone)]
pub struct Internals {
    pub id: SchemaId,
    pub type_code: TypeCode,
    pub flags: Flags,
    pub checks: Vec<Check>,
    pub default: Option<DefaultSource>,
    pub prefault: Option<DefaultSource>,
    pub error_override: Option<ErrorOverride>,
    pub bag: Bag,
}

impl Internals {
    pub(crate) fn new(type_code: TypeCode) -> Self {
        Internals {
            id: SchemaId::next(),
            type_code,
            flags: Flags::default(),
            checks: Vec::new(),
            default: None,
            prefault: None,
            error_override: None,
            bag: Bag::default(),
        }
    }

    /// Copy-on-write clone with a fresh identity.
    pub(crate) fn fork(&self) -> Self {
        let mut forked = self.clone();
        forked.id = SchemaId::next();
        forked
    }
}
