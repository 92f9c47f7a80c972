//! Union schemas: ordered and discriminated.

use ahash::AHashMap;
use veris_value::{KeyValue, Value};

use crate::internals::TypeCode;
use crate::issue::ParseError;
use crate::node::{Def, Discriminator, SchemaNode, UnionDef, discriminator_values};
use crate::schema::{Schema, SchemaList};

/// Members are tried in declaration order; see the crate docs for the
/// kind-exact preference rule.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    node: SchemaNode,
}

pub fn union(members: impl SchemaList) -> UnionSchema {
    UnionSchema {
        node: SchemaNode::new(
            TypeCode::Union,
            Def::Union(UnionDef {
                members: members.into_nodes(),
                discriminator: None,
            }),
        ),
    }
}

/// A union dispatched in O(1) on the literal/enum field named `key`.
///
/// # Panics
///
/// Panics when a member is not an object schema carrying a literal or enum
/// at `key`, or when two members claim the same discriminator value. Both
/// are construction-time programming errors.
pub fn discriminated_union(key: impl Into<String>, members: impl SchemaList) -> UnionSchema {
    let key = key.into();
    let members = members.into_nodes();

    let mut table: AHashMap<KeyValue, usize> = AHashMap::new();
    for (index, member) in members.iter().enumerate() {
        let values = discriminator_values(member, &key).unwrap_or_else(|| {
            panic!(
                "discriminated union member {index} must be an object with \
                 a literal or enum field at {key:?}"
            )
        });
        for value in values {
            if table.insert(value.clone(), index).is_some() {
                panic!("discriminator value {value} is claimed by two union members");
            }
        }
    }

    UnionSchema {
        node: SchemaNode::new(
            TypeCode::Union,
            Def::Union(UnionDef {
                members,
                discriminator: Some(Discriminator { key, table }),
            }),
        ),
    }
}

impl UnionSchema {
    pub fn members_len(&self) -> usize {
        match &self.node.def {
            Def::Union(def) => def.members.len(),
            _ => 0,
        }
    }

    /// Append another member, keeping declaration order.
    pub fn or_else_member(&self, member: impl Schema) -> Self {
        let member_node = member.to_node();
        let mut node = self.node.clone();
        node.internals = node.internals.fork();
        if let Def::Union(def) = &mut node.def {
            def.members.push(member_node);
        }
        UnionSchema { node }
    }
}

impl Schema for UnionSchema {
    type Output = Value;

    fn node(&self) -> &SchemaNode {
        &self.node
    }

    fn with_node(&self, node: SchemaNode) -> Self {
        UnionSchema { node }
    }

    fn decode(&self, value: Value) -> Result<Value, ParseError> {
        Ok(value)
    }
}
