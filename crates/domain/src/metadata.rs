//! Mapping metadata for entity types.
//!
//! An [`EntityMetadata`] describes how one in-memory type maps onto a node or
//! a relationship: its persisted type tag (alias), its supertypes, and the
//! properties it carries.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Which graph element an entity type is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Node,
    Relationship,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Relationship => write!(f, "relationship"),
        }
    }
}

/// How a property is indexed, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Exact-match range index.
    Exact,
    /// Full-text index.
    FullText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub name: String,
    pub required: bool,
    pub index: Option<IndexKind>,
}

impl PropertyMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            index: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn indexed(mut self, kind: IndexKind) -> Self {
        self.index = Some(kind);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    type_name: String,
    kind: EntityKind,
    alias: String,
    supertypes: Vec<String>,
    properties: Vec<PropertyMetadata>,
}

impl EntityMetadata {
    /// Metadata for a node entity. The alias defaults to the type name.
    pub fn node(type_name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(type_name, EntityKind::Node)
    }

    /// Metadata for a relationship entity. The alias defaults to the type name.
    pub fn relationship(type_name: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(type_name, EntityKind::Relationship)
    }

    fn new(type_name: impl Into<String>, kind: EntityKind) -> Result<Self, DomainError> {
        let type_name = type_name.into();
        if type_name.trim().is_empty() {
            return Err(DomainError::validation("Entity type name cannot be empty"));
        }
        Ok(Self {
            alias: type_name.clone(),
            type_name,
            kind,
            supertypes: Vec::new(),
            properties: Vec::new(),
        })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Result<Self, DomainError> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(DomainError::validation("Entity alias cannot be empty"));
        }
        self.alias = alias;
        Ok(self)
    }

    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn properties(&self) -> &[PropertyMetadata] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyMetadata> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter().filter(|p| p.required)
    }

    pub fn indexed_properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties.iter().filter(|p| p.index.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_defaults_to_type_name() {
        let meta = EntityMetadata::node("Person").expect("valid metadata");
        assert_eq!(meta.alias(), "Person");
        assert_eq!(meta.kind(), EntityKind::Node);
    }

    #[test]
    fn rejects_blank_names() {
        assert!(EntityMetadata::node("  ").is_err());
        let meta = EntityMetadata::relationship("KNOWS").expect("valid metadata");
        assert!(meta.with_alias("").is_err());
    }

    #[test]
    fn filters_required_and_indexed_properties() {
        let meta = EntityMetadata::node("Person")
            .expect("valid metadata")
            .with_property(PropertyMetadata::new("name").required().indexed(IndexKind::Exact))
            .with_property(PropertyMetadata::new("bio").indexed(IndexKind::FullText))
            .with_property(PropertyMetadata::new("age"));

        let required: Vec<_> = meta.required_properties().map(|p| p.name.as_str()).collect();
        let indexed: Vec<_> = meta.indexed_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(required, vec!["name"]);
        assert_eq!(indexed, vec!["name", "bio"]);
        assert!(meta.property("age").is_some());
    }
}
