//! Registry of mapped entity types.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use graphwire_domain::{EntityKind, EntityMetadata};

use crate::infrastructure::ports::MappingError;

/// Thread-safe metadata registry keyed by type name and by alias.
#[derive(Default)]
pub struct Neo4jMappingContext {
    types: DashMap<String, Arc<EntityMetadata>>,
    aliases: DashMap<String, String>,
}

impl Neo4jMappingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with `entities` registered up front.
    pub fn with_entities(
        entities: impl IntoIterator<Item = EntityMetadata>,
    ) -> Result<Self, MappingError> {
        let context = Self::new();
        for metadata in entities {
            context.register(metadata)?;
        }
        Ok(context)
    }

    /// Register a type. Type names and aliases must both be unique.
    pub fn register(&self, metadata: EntityMetadata) -> Result<Arc<EntityMetadata>, MappingError> {
        let type_name = metadata.type_name().to_string();
        let alias = metadata.alias().to_string();

        let type_slot = match self.types.entry(type_name.clone()) {
            Entry::Occupied(_) => return Err(MappingError::DuplicateType(type_name)),
            Entry::Vacant(slot) => slot,
        };
        match self.aliases.entry(alias.clone()) {
            Entry::Occupied(existing) => {
                return Err(MappingError::DuplicateAlias {
                    alias,
                    existing: existing.get().clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(type_name.clone());
            }
        }

        let metadata = Arc::new(metadata);
        type_slot.insert(Arc::clone(&metadata));
        tracing::debug!(type_name = %type_name, alias = %alias, kind = %metadata.kind(), "Registered entity type");
        Ok(metadata)
    }

    pub fn find(&self, type_name: &str) -> Option<Arc<EntityMetadata>> {
        self.types.get(type_name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn metadata_for(&self, type_name: &str) -> Result<Arc<EntityMetadata>, MappingError> {
        self.find(type_name)
            .ok_or_else(|| MappingError::UnknownType(type_name.to_string()))
    }

    /// Metadata of the type persisted under `alias`.
    pub fn metadata_for_alias(&self, alias: &str) -> Result<Arc<EntityMetadata>, MappingError> {
        let type_name = self
            .aliases
            .get(alias)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| MappingError::UnknownType(alias.to_string()))?;
        self.metadata_for(&type_name)
    }

    pub fn is_managed(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered types of `kind`, sorted by type name.
    pub fn entities_of_kind(&self, kind: EntityKind) -> Vec<Arc<EntityMetadata>> {
        let mut entities: Vec<_> = self
            .types
            .iter()
            .filter(|entry| entry.kind() == kind)
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        entities.sort_by(|a, b| a.type_name().cmp(b.type_name()));
        entities
    }

    /// All registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.types.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
