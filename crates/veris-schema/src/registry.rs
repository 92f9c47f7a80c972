//! Metadata registry keyed by schema identity.
//!
//! Writes happen at construction time only (`describe` / `meta`); reads are
//! lock-guarded lookups. The process-global registry exists so fluent
//! chaining works without threading a registry handle through every call.

use std::sync::{OnceLock, RwLock};

use ahash::AHashMap;
use indexmap::IndexMap;
use veris_value::Value;

use crate::internals::SchemaId;

/// Side-channel documentation attached to a schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub description: Option<String>,
    pub title: Option<String>,
    pub examples: Vec<Value>,
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<AHashMap<SchemaId, Metadata>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn add(&self, id: SchemaId, metadata: Metadata) {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        entries.insert(id, metadata);
    }

    /// Merge non-empty fields of `metadata` into the existing entry.
    pub fn merge(&self, id: SchemaId, metadata: Metadata) {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        let entry = entries.entry(id).or_default();
        if metadata.description.is_some() {
            entry.description = metadata.description;
        }
        if metadata.title.is_some() {
            entry.title = metadata.title;
        }
        if !metadata.examples.is_empty() {
            entry.examples = metadata.examples;
        }
        for (key, value) in metadata.extra {
            entry.extra.insert(key, value);
        }
    }

    pub fn get(&self, id: SchemaId) -> Option<Metadata> {
        let entries = self.entries.read().expect("registry lock poisoned");
        entries.get(&id).cloned()
    }

    pub fn remove(&self, id: SchemaId) -> Option<Metadata> {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        entries.remove(&id)
    }
}

/// The process-global registry used by `describe` and `meta`.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let registry = Registry::new();
        let id = SchemaId::next();
        registry.add(
            id,
            Metadata {
                description: Some("a user".to_string()),
                ..Metadata::default()
            },
        );
        assert_eq!(
            registry.get(id).unwrap().description.as_deref(),
            Some("a user")
        );
        assert!(registry.get(SchemaId::next()).is_none());
    }

    #[test]
    fn test_merge_keeps_existing_fields() {
        let registry = Registry::new();
        let id = SchemaId::next();
        registry.add(
            id,
            Metadata {
                title: Some("User".to_string()),
                ..Metadata::default()
            },
        );
        registry.merge(
            id,
            Metadata {
                description: Some("a user".to_string()),
                ..Metadata::default()
            },
        );
        let merged = registry.get(id).unwrap();
        assert_eq!(merged.title.as_deref(), Some("User"));
        assert_eq!(merged.description.as_deref(), Some("a user"));
    }
}
