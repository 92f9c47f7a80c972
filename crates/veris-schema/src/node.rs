//! Schema nodes and kind-specific definition blocks.
//!
//! A [`SchemaNode`] is the dynamic representation behind every typed schema
//! handle: shared [`Internals`] plus a [`Def`] naming the kind and holding
//! construction parameters (child nodes for composites). Composites store
//! children as plain nodes, so heterogeneous shapes need no generics.

use core::fmt;
use std::sync::{Arc, OnceLock};

use ahash::AHashMap;
use indexmap::IndexMap;
use veris_value::{KeyValue, Value};

use crate::check::RefineCtx;
use crate::internals::{Internals, TypeCode};

#[derive(Clone)]
pub struct SchemaNode {
    pub(crate) internals: Internals,
    pub(crate) def: Def,
}

/// Integer width bounds, widened to `i128` so one probe covers every
/// signed and unsigned machine width.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntDef {
    pub min: i128,
    pub max: i128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatWidth {
    W32,
    W64,
}

#[derive(Debug, Clone)]
pub(crate) struct EnumDef {
    /// Name → member value, in declaration order.
    pub entries: IndexMap<String, KeyValue>,
}

#[derive(Clone)]
pub(crate) struct FunctionDef {
    pub input: Vec<SchemaNode>,
    pub output: Option<Box<SchemaNode>>,
}

#[derive(Clone)]
pub(crate) struct TupleDef {
    pub items: Vec<SchemaNode>,
    pub rest: Option<Box<SchemaNode>>,
}

/// Policy for input keys not named in an object shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Silently removed.
    #[default]
    Strip,
    /// Reported as `unrecognized_keys`.
    Strict,
    /// Preserved as-is.
    Passthrough,
}

#[derive(Clone)]
pub(crate) struct ObjectDef {
    pub shape: IndexMap<String, SchemaNode>,
    pub mode: UnknownKeys,
    pub catchall: Option<Box<SchemaNode>>,
}

#[derive(Clone)]
pub(crate) struct RecordDef {
    pub key: Box<SchemaNode>,
    pub value: Box<SchemaNode>,
}

/// Discriminated dispatch table: tag value → member index.
#[derive(Clone)]
pub(crate) struct Discriminator {
    pub key: String,
    pub table: AHashMap<KeyValue, usize>,
}

#[derive(Clone)]
pub(crate) struct UnionDef {
    pub members: Vec<SchemaNode>,
    pub discriminator: Option<Discriminator>,
}

#[derive(Clone)]
pub(crate) struct LazyDef {
    init: Arc<dyn Fn() -> SchemaNode + Send + Sync>,
    cell: Arc<OnceLock<SchemaNode>>,
}

impl LazyDef {
    pub(crate) fn new(init: Arc<dyn Fn() -> SchemaNode + Send + Sync>) -> Self {
        LazyDef {
            init,
            cell: Arc::new(OnceLock::new()),
        }
    }

    /// Obtain the wrapped schema, building and memoizing it on first use.
    pub(crate) fn resolve(&self) -> &SchemaNode {
        self.cell.get_or_init(|| (self.init)())
    }
}

pub(crate) type TransformFn = Arc<dyn Fn(Value, &mut RefineCtx) -> Value + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Def {
    String,
    Int(IntDef),
    Float(FloatWidth),
    Bool,
    BigInt,
    Complex,
    Null,
    Any,
    Unknown,
    DateTime,
    Literal(Vec<KeyValue>),
    Enum(EnumDef),
    Function(FunctionDef),
    Array(Box<SchemaNode>),
    Tuple(TupleDef),
    Object(ObjectDef),
    Record(RecordDef),
    Set(Box<SchemaNode>),
    Union(UnionDef),
    Intersection(Box<SchemaNode>, Box<SchemaNode>),
    Lazy(LazyDef),
    Pipe(Box<SchemaNode>, Box<SchemaNode>),
    Transform(TransformFn),
}

impl SchemaNode {
    pub(crate) fn new(type_code: TypeCode, def: Def) -> Self {
        SchemaNode {
            internals: Internals::new(type_code),
            def,
        }
    }

    pub fn type_code(&self) -> TypeCode {
        self.internals.type_code
    }

    pub fn id(&self) -> crate::internals::SchemaId {
        self.internals.id
    }

    pub fn description(&self) -> Option<&str> {
        self.internals.bag.description.as_deref()
    }

    /// Kinds that interpret a null input themselves instead of letting the
    /// absence gate reject it.
    pub(crate) fn consumes_null(&self) -> bool {
        match &self.def {
            Def::Null | Def::Any | Def::Unknown => true,
            Def::Literal(options) => options.contains(&KeyValue::Null),
            Def::Enum(def) => def.entries.values().any(|v| *v == KeyValue::Null),
            Def::Union(_)
            | Def::Intersection(..)
            | Def::Lazy(_)
            | Def::Pipe(..)
            | Def::Transform(_) => true,
            _ => false,
        }
    }

    /// In a shape, may this field's key be absent without error?
    pub(crate) fn absent_ok(&self) -> bool {
        let flags = self.internals.flags;
        !flags.non_optional && (flags.optional || flags.exact_optional)
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("type", &self.internals.type_code)
            .field("id", &self.internals.id)
            .field("flags", &self.internals.flags)
            .finish_non_exhaustive()
    }
}

/// Literal or enum values usable as a union discriminator at `key`.
pub(crate) fn discriminator_values(member: &SchemaNode, key: &str) -> Option<Vec<KeyValue>> {
    let member = match &member.def {
        Def::Lazy(lazy) => lazy.resolve(),
        _ => member,
    };
    let Def::Object(object) = &member.def else {
        return None;
    };
    let field = object.shape.get(key)?;
    match &field.def {
        Def::Literal(options) => Some(options.clone()),
        Def::Enum(def) => Some(def.entries.values().cloned().collect()),
        _ => None,
    }
}
