//! Object schema: an ordered shape of named fields.

use indexmap::IndexMap;
use veris_value::{Map, Value};

use crate::enums::{EnumSchema, enum_of};
use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, ObjectDef, SchemaNode, UnknownKeys};
use crate::schema::{Schema, conversion_error};

/// Ordered field list for [`object`].
#[derive(Debug, Clone, Default)]
pub struct Shape {
    entries: IndexMap<String, SchemaNode>,
}

impl Shape {
    pub fn new() -> Self {
        Shape::default()
    }

    /// Add a field; insertion order is the validation order.
    pub fn field(mut self, key: impl Into<String>, schema: impl Schema) -> Self {
        self.entries.insert(key.into(), schema.to_node());
        self
    }

    pub fn field_node(mut self, key: impl Into<String>, node: SchemaNode) -> Self {
        self.entries.insert(key.into(), node);
        self
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn into_entries(self) -> IndexMap<String, SchemaNode> {
        self.entries
    }
}

/// Unknown input keys are stripped unless the mode says otherwise.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    node: SchemaNode,
}

pub fn object(shape: Shape) -> ObjectSchema {
    ObjectSchema {
        node: SchemaNode::new(
            TypeCode::Object,
            Def::Object(ObjectDef {
                shape: shape.into_entries(),
                mode: UnknownKeys::Strip,
                catchall: None,
            }),
        ),
    }
}

impl Schema for ObjectSchema {
    type Output = Map;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        ObjectSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Map, ParseError> {
        match value {
            Value::Map(map) => Ok(map),
            other => Err(conversion_error("map", &other)),
        }
    }
}

impl ObjectSchema {
    fn map_def(&self, func: impl FnOnce(&mut ObjectDef)) -> Self {
        let mut node = self.node.clone();
        node.internals = node.internals.fork();
        if let Def::Object(def) = &mut node.def {
            func(def);
        }
        ObjectSchema { node }
    }

    fn def(&self) -> Option<&ObjectDef> {
        match &self.node.def {
            Def::Object(def) => Some(def),
            _ => None,
        }
    }

    /// Report unknown keys as `unrecognized_keys`.
    pub fn strict(&self) -> Self {
        self.map_def(|def| def.mode = UnknownKeys::Strict)
    }

    /// Silently remove unknown keys (the default).
    pub fn strip(&self) -> Self {
        self.map_def(|def| def.mode = UnknownKeys::Strip)
    }

    /// Keep unknown keys in the output as-is.
    pub fn passthrough(&self) -> Self {
        self.map_def(|def| def.mode = UnknownKeys::Passthrough)
    }

    /// Validate unknown keys against `schema` and keep them.
    pub fn catchall(&self, schema: impl Schema) -> Self {
        let node = schema.to_node();
        self.map_def(move |def| def.catchall = Some(Box::new(node)))
    }

    /// Make every field optional.
    pub fn partial(&self) -> Self {
        self.map_def(|def| {
            for (_, child) in def.shape.iter_mut() {
                make_optional(child);
            }
        })
    }

    /// Make the named fields optional.
    pub fn partial_of(&self, keys: &[&str]) -> Self {
        self.map_def(|def| {
            for (key, child) in def.shape.iter_mut() {
                if keys.contains(&key.as_str()) {
                    make_optional(child);
                }
            }
        })
    }

    /// Make every field required, undoing optional/nilable wrappers.
    pub fn required(&self) -> Self {
        self.map_def(|def| {
            for (_, child) in def.shape.iter_mut() {
                make_required(child);
            }
        })
    }

    /// Make the named fields required.
    pub fn required_of(&self, keys: &[&str]) -> Self {
        self.map_def(|def| {
            for (key, child) in def.shape.iter_mut() {
                if keys.contains(&key.as_str()) {
                    make_required(child);
                }
            }
        })
    }

    /// Keep only the named fields.
    pub fn pick(&self, keys: &[&str]) -> Self {
        self.map_def(|def| {
            def.shape.retain(|key, _| keys.contains(&key.as_str()));
        })
    }

    /// Drop the named fields.
    pub fn omit(&self, keys: &[&str]) -> Self {
        self.map_def(|def| {
            def.shape.retain(|key, _| !keys.contains(&key.as_str()));
        })
    }

    /// Add (or replace) fields from `shape`.
    pub fn extend(&self, shape: Shape) -> Self {
        self.map_def(move |def| {
            for (key, node) in shape.into_entries() {
                def.shape.insert(key, node);
            }
        })
    }

    /// Combine with `other`; its fields, unknown-key mode and catchall win.
    pub fn merge(&self, other: &ObjectSchema) -> Self {
        let Some(other_def) = other.def() else {
            return self.clone();
        };
        let other_shape = other_def.shape.clone();
        let other_mode = other_def.mode;
        let other_catchall = other_def.catchall.clone();
        self.map_def(move |def| {
            for (key, node) in other_shape {
                def.shape.insert(key, node);
            }
            def.mode = other_mode;
            if other_catchall.is_some() {
                def.catchall = other_catchall;
            }
        })
    }

    /// An enum schema over this shape's keys.
    pub fn keyof(&self) -> EnumSchema {
        let keys: Vec<String> = self
            .def()
            .map(|def| def.shape.keys().cloned().collect())
            .unwrap_or_default();
        enum_of(keys)
    }

    pub fn keys(&self) -> Vec<String> {
        self.def()
            .map(|def| def.shape.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn make_optional(child: &mut SchemaNode) {
    child.internals = child.internals.fork();
    child.internals.flags.optional = true;
    child.internals.flags.non_optional = false;
}

fn make_required(child: &mut SchemaNode) {
    child.internals = child.internals.fork();
    child.internals.flags.non_optional = true;
    child.internals.flags.optional = false;
    child.internals.flags.nilable = false;
    child.internals.flags.exact_optional = false;
}
