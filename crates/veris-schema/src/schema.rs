//! The polymorphic schema interface.
//!
//! [`Schema`] is implemented by every typed schema handle. The associated
//! `Output` type models what a successful parse produces: modifier wrappers
//! adjust it (`Optional<S>` yields `Option<S::Output>`), transforms and
//! heterogeneous composites fall back to dynamic [`Value`].
//!
//! All schemas are value-like: modifier and check methods take `&self` and
//! return a rebuilt handle around forked internals, so existing handles are
//! never affected.

use std::sync::Arc;

use veris_value::{Value, ValuePath};

use crate::check::{Check, RefineCtx};
use crate::driver::{ParseContext, parse_node};
use crate::internals::{DefaultSource, ErrorOverride, Internals};
use crate::issue::{Issue, IssueCode, IssueProps, ParseError, RawIssue};
use crate::modifier::{
    ExactOptional, Nilable, NonOptional, Nullish, Optional, WithDefault, WithPrefault,
};
use crate::node::SchemaNode;
use crate::pipe::{PipeSchema, Transformed};
use crate::registry::{self, Metadata};

/// A composable parser for dynamically-typed input.
pub trait Schema: Sized + Clone {
    /// What a successful parse produces.
    type Output;

    fn node(&self) -> &SchemaNode;

    /// Rebuild this handle around a replacement node.
    #[doc(hidden)]
    fn with_node(&self, node: SchemaNode) -> Self;

    /// Convert a driven value into the typed output.
    ///
    /// Only values that already passed validation reach this point, so a
    /// failure here is a programming error in the schema itself.
    fn decode(&self, value: Value) -> Result<Self::Output, ParseError>;

    /// A detached copy of the underlying node, for heterogeneous storage.
    fn to_node(&self) -> SchemaNode {
        self.node().clone()
    }

    // ------------------------------------------------------------------
    // Parse surface
    // ------------------------------------------------------------------

    /// Validate `input` and produce the typed output.
    fn parse(&self, input: impl Into<Value>) -> Result<Self::Output, ParseError> {
        self.parse_with(input, &ParseContext::default())
    }

    /// [`Schema::parse`] with caller-supplied options.
    fn parse_with(
        &self,
        input: impl Into<Value>,
        ctx: &ParseContext,
    ) -> Result<Self::Output, ParseError> {
        let value = parse_node(self.node(), input.into(), ctx)?;
        self.decode(value)
    }

    /// Alias of [`Schema::parse`] for callers who prefer the explicit name.
    fn safe_parse(&self, input: impl Into<Value>) -> Result<Self::Output, ParseError> {
        self.parse(input)
    }

    /// [`Schema::parse`], panicking on failure.
    fn must_parse(&self, input: impl Into<Value>) -> Self::Output {
        match self.parse(input) {
            Ok(output) => output,
            Err(error) => panic!("{error}"),
        }
    }

    /// Same pipeline, dynamic output.
    fn parse_any(&self, input: impl Into<Value>) -> Result<Value, ParseError> {
        parse_node(self.node(), input.into(), &ParseContext::default())
    }

    /// Same pipeline for input that is already typed.
    fn strict_parse(&self, input: Self::Output) -> Result<Self::Output, ParseError>
    where
        Self::Output: Into<Value>,
    {
        self.parse(input.into())
    }

    /// [`Schema::strict_parse`], panicking on failure.
    fn must_strict_parse(&self, input: Self::Output) -> Self::Output
    where
        Self::Output: Into<Value>,
    {
        match self.strict_parse(input) {
            Ok(output) => output,
            Err(error) => panic!("{error}"),
        }
    }

    // ------------------------------------------------------------------
    // Modifier surface
    // ------------------------------------------------------------------

    /// Accept null (or an absent key) and produce `None` for it.
    fn optional(&self) -> Optional<Self> {
        Optional::new(self.map_internals(|internals| {
            internals.flags.optional = true;
            internals.flags.non_optional = false;
        }))
    }

    /// Accept an explicit null and produce `None` for it.
    fn nilable(&self) -> Nilable<Self> {
        Nilable::new(self.map_internals(|internals| {
            internals.flags.nilable = true;
            internals.flags.non_optional = false;
        }))
    }

    /// [`Schema::optional`] and [`Schema::nilable`] combined.
    fn nullish(&self) -> Nullish<Self> {
        Nullish::new(self.map_internals(|internals| {
            internals.flags.optional = true;
            internals.flags.nilable = true;
            internals.flags.non_optional = false;
        }))
    }

    /// Reject null even when an enclosing shape made this optional.
    fn non_optional(&self) -> NonOptional<Self> {
        NonOptional::new(self.map_internals(|internals| {
            internals.flags.non_optional = true;
            internals.flags.optional = false;
            internals.flags.nilable = false;
            internals.flags.exact_optional = false;
        }))
    }

    /// Allow the key to be absent in a shape while rejecting explicit null.
    fn exact_optional(&self) -> ExactOptional<Self> {
        ExactOptional::new(self.map_internals(|internals| {
            internals.flags.exact_optional = true;
            internals.flags.non_optional = false;
        }))
    }

    /// Replace null input with `value`, bypassing this schema's checks.
    fn default_value(&self, value: impl Into<Value>) -> WithDefault<Self> {
        let value = value.into();
        WithDefault::new(self.map_internals(move |internals| {
            internals.default = Some(DefaultSource::Value(value.clone()));
        }))
    }

    /// Like [`Schema::default_value`] with a lazily-produced value.
    fn default_fn(
        &self,
        func: impl Fn() -> Value + Send + Sync + 'static,
    ) -> WithDefault<Self> {
        let source = DefaultSource::Func(Arc::new(func));
        WithDefault::new(self.map_internals(move |internals| {
            internals.default = Some(source.clone());
        }))
    }

    /// Replace null input with `value`, which then validates in full.
    fn prefault_value(&self, value: impl Into<Value>) -> WithPrefault<Self> {
        let value = value.into();
        WithPrefault::new(self.map_internals(move |internals| {
            internals.prefault = Some(DefaultSource::Value(value.clone()));
        }))
    }

    /// Like [`Schema::prefault_value`] with a lazily-produced value.
    fn prefault_fn(
        &self,
        func: impl Fn() -> Value + Send + Sync + 'static,
    ) -> WithPrefault<Self> {
        let source = DefaultSource::Func(Arc::new(func));
        WithPrefault::new(self.map_internals(move |internals| {
            internals.prefault = Some(source.clone());
        }))
    }

    /// Opt in to the conversion table for this schema's kind.
    fn coerce(&self) -> Self {
        self.map_internals(|internals| internals.flags.coerce = true)
    }

    /// Attach a description, also recorded in the global registry.
    fn describe(&self, description: impl Into<String>) -> Self {
        let description = description.into();
        let next = self.map_internals({
            let description = description.clone();
            move |internals| internals.bag.description = Some(description.clone())
        });
        registry::global().merge(
            next.node().id(),
            Metadata {
                description: Some(description),
                ..Metadata::default()
            },
        );
        next
    }

    /// Record metadata for this schema in the global registry.
    fn meta(&self, metadata: Metadata) -> Self {
        let next = self.map_internals(|_| {});
        registry::global().merge(next.node().id(), metadata);
        next
    }

    fn description(&self) -> Option<String> {
        self.node()
            .description()
            .map(str::to_string)
            .or_else(|| registry::global().get(self.node().id())?.description)
    }

    fn metadata(&self) -> Option<Metadata> {
        registry::global().get(self.node().id())
    }

    /// Replace the message of every issue this schema reports itself.
    fn error(&self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.map_internals(move |internals| {
            internals.error_override = Some(ErrorOverride::Literal(message.clone()));
        })
    }

    /// Like [`Schema::error`], computed per issue.
    fn error_fn(
        &self,
        func: impl Fn(&RawIssue) -> String + Send + Sync + 'static,
    ) -> Self {
        let over = ErrorOverride::Func(Arc::new(func));
        self.map_internals(move |internals| {
            internals.error_override = Some(over.clone());
        })
    }

    /// Stop at the first issue instead of collecting all of them.
    fn abort_early(&self) -> Self {
        self.map_internals(|internals| internals.bag.abort = true)
    }

    /// Prefix every issue path reported under this schema.
    fn at_path(&self, path: ValuePath) -> Self {
        self.map_internals(move |internals| {
            internals.bag.path_prefix = Some(path.clone());
        })
    }

    // ------------------------------------------------------------------
    // Composition surface
    // ------------------------------------------------------------------

    /// Add a predicate check; a `false` answer reports `custom`.
    fn refine(&self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.with_check(Check::custom(Arc::new(predicate), None))
    }

    /// [`Schema::refine`] with a custom message.
    fn refine_with(
        &self,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.with_check(Check::custom(Arc::new(predicate), Some(message.into())))
    }

    /// Dynamic-value alias of [`Schema::refine`].
    fn refine_any(&self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.refine(predicate)
    }

    /// Add a check that may report any number of issues.
    fn check(&self, func: impl Fn(&mut RefineCtx) + Send + Sync + 'static) -> Self {
        self.with_check(Check::custom_with(Arc::new(func)))
    }

    /// Add a transforming check: replaces the value, never reports.
    fn overwrite(&self, func: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.with_check(Check::overwrite(Arc::new(func)))
    }

    /// Map the validated value through `func`; issues may be reported via
    /// the context. The output is dynamic.
    fn transform(
        &self,
        func: impl Fn(Value, &mut RefineCtx) -> Value + Send + Sync + 'static,
    ) -> Transformed<Self> {
        Transformed::new(self, Arc::new(func))
    }

    /// Feed this schema's output into `target`.
    fn pipe<T: Schema>(&self, target: T) -> PipeSchema<Self, T> {
        PipeSchema::new(self.clone(), target)
    }

    /// Ordered union of `self` and `other`.
    fn or<T: Schema>(&self, other: T) -> crate::union::UnionSchema {
        crate::union::union(vec![self.to_node(), other.to_node()])
    }

    /// Intersection of `self` and `other`.
    fn and<T: Schema>(&self, other: T) -> crate::intersection::IntersectionSchema {
        crate::intersection::intersection(self.clone(), other)
    }

    // ------------------------------------------------------------------
    // Internal plumbing
    // ------------------------------------------------------------------

    /// Fork the internals, apply `func`, and rebuild the handle.
    #[doc(hidden)]
    fn map_internals(&self, func: impl FnOnce(&mut Internals)) -> Self {
        let mut node = self.node().clone();
        node.internals = node.internals.fork();
        func(&mut node.internals);
        self.with_node(node)
    }

    #[doc(hidden)]
    fn with_check(&self, check: Check) -> Self {
        self.map_internals(move |internals| internals.checks.push(check))
    }
}

/// Build the internal-bug error reported when output conversion fails.
pub(crate) fn conversion_error(expected: &str, value: &Value) -> ParseError {
    ParseError::new(vec![Issue {
        code: IssueCode::InvalidType,
        path: ValuePath::root(),
        message: format!(
            "internal: cannot convert {} output to {expected}",
            value.kind().name()
        ),
        input: value.clone(),
        props: IssueProps::default(),
    }])
}

/// Heterogeneous lists of schemas, for tuples, unions and function inputs.
pub trait SchemaList {
    fn into_nodes(self) -> Vec<SchemaNode>;
}

impl SchemaList for Vec<SchemaNode> {
    fn into_nodes(self) -> Vec<SchemaNode> {
        self
    }
}

macro_rules! impl_schema_list {
    ($(($($ty:ident . $idx:tt),+))*) => {
        $(
            impl<$($ty: Schema),+> SchemaList for ($($ty,)+) {
                fn into_nodes(self) -> Vec<SchemaNode> {
                    vec![$(self.$idx.to_node()),+]
                }
            }
        )*
    };
}

impl_schema_list! {
    (A.0)
    (A.0, B.1)
    (A.0, B.1, C.2)
    (A.0, B.1, C.2, D.3)
    (A.0, B.1, C.2, D.3, E.4)
    (A.0, B.1, C.2, D.3, E.4, F.5)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6)
    (A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7)
}
