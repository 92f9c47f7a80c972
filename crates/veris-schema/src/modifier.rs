//! Modifier wrappers.
//!
//! Modifiers are flag toggles on forked internals, not extra nodes: the
//! driver consults the flags directly in its absence gate. The wrapper
//! types exist so the typed `Output` can change shape — `Optional<S>`
//! produces `Option<S::Output>` while sharing `S`'s parse pipeline.

use veris_value::Value;

use crate::issue::ParseError;
use crate::node::SchemaNode;
use crate::schema::Schema;

macro_rules! delegate_schema_plumbing {
    () => {
        fn node(&self) -> &SchemaNode {
            self.inner.node()
        }

        fn with_node(&self, node: SchemaNode) -> Self {
            Self {
                inner: self.inner.with_node(node),
            }
        }
    };
}

/// Null (or an absent key) becomes `None`.
#[derive(Debug, Clone)]
pub struct Optional<S> {
    pub(crate) inner: S,
}

impl<S: Schema> Optional<S> {
    pub(crate) fn new(inner: S) -> Self {
        Optional { inner }
    }

    /// The wrapped schema, with its original output shape.
    pub fn unwrap(&self) -> S {
        self.inner.clone()
    }
}

impl<S: Schema> Schema for Optional<S> {
    type Output = Option<S::Output>;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(self.inner.decode(other)?)),
        }
    }
}

/// Explicit null becomes `None`.
#[derive(Debug, Clone)]
pub struct Nilable<S> {
    pub(crate) inner: S,
}

impl<S: Schema> Nilable<S> {
    pub(crate) fn new(inner: S) -> Self {
        Nilable { inner }
    }

    pub fn unwrap(&self) -> S {
        self.inner.clone()
    }
}

impl<S: Schema> Schema for Nilable<S> {
    type Output = Option<S::Output>;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(self.inner.decode(other)?)),
        }
    }
}

/// Optional and nilable combined.
#[derive(Debug, Clone)]
pub struct Nullish<S> {
    pub(crate) inner: S,
}

impl<S: Schema> Nullish<S> {
    pub(crate) fn new(inner: S) -> Self {
        Nullish { inner }
    }

    pub fn unwrap(&self) -> S {
        self.inner.clone()
    }
}

impl<S: Schema> Schema for Nullish<S> {
    type Output = Option<S::Output>;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(self.inner.decode(other)?)),
        }
    }
}

/// Null is rejected even under an optional-making ancestor.
#[derive(Debug, Clone)]
pub struct NonOptional<S> {
    pub(crate) inner: S,
}

impl<S: Schema> NonOptional<S> {
    pub(crate) fn new(inner: S) -> Self {
        NonOptional { inner }
    }
}

impl<S: Schema> Schema for NonOptional<S> {
    type Output = S::Output;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        self.inner.decode(value)
    }
}

/// The key may be absent in a shape; explicit null is rejected.
#[derive(Debug, Clone)]
pub struct ExactOptional<S> {
    pub(crate) inner: S,
}

impl<S: Schema> ExactOptional<S> {
    pub(crate) fn new(inner: S) -> Self {
        ExactOptional { inner }
    }
}

impl<S: Schema> Schema for ExactOptional<S> {
    type Output = S::Output;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        self.inner.decode(value)
    }
}

/// Null input is replaced by the default, bypassing validation.
#[derive(Debug, Clone)]
pub struct WithDefault<S> {
    pub(crate) inner: S,
}

impl<S: Schema> WithDefault<S> {
    pub(crate) fn new(inner: S) -> Self {
        WithDefault { inner }
    }
}

impl<S: Schema> Schema for WithDefault<S> {
    type Output = S::Output;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        self.inner.decode(value)
    }
}

/// Null input is replaced by the prefault, which validates in full.
#[derive(Debug, Clone)]
pub struct WithPrefault<S> {
    pub(crate) inner: S,
}

impl<S: Schema> WithPrefault<S> {
    pub(crate) fn new(inner: S) -> Self {
        WithPrefault { inner }
    }
}

impl<S: Schema> Schema for WithPrefault<S> {
    type Output = S::Output;

    delegate_schema_plumbing!();

    fn decode(&self, value: Value) -> Result<Self::Output, ParseError> {
        self.inner.decode(value)
    }
}
