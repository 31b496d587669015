//! Backing-store state and in-memory entity instances.

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, RelationshipId};
use crate::metadata::EntityKind;
use crate::value::{Properties, PropertyValue};

/// A node as stored in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub id: Option<NodeId>,
    pub labels: Vec<String>,
    pub properties: Properties,
}

/// A relationship as stored in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipState {
    pub id: Option<RelationshipId>,
    pub rel_type: String,
    pub start: NodeId,
    pub end: NodeId,
    pub properties: Properties,
}

/// Either kind of stored graph element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyContainer {
    Node(NodeState),
    Relationship(RelationshipState),
}

impl NodeState {
    pub fn new() -> Self {
        Self {
            id: None,
            labels: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipState {
    pub fn new(rel_type: impl Into<String>, start: NodeId, end: NodeId) -> Self {
        Self {
            id: None,
            rel_type: rel_type.into(),
            start,
            end,
            properties: Properties::new(),
        }
    }

    pub fn with_id(mut self, id: RelationshipId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl PropertyContainer {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Node(_) => EntityKind::Node,
            Self::Relationship(_) => EntityKind::Relationship,
        }
    }

    pub fn properties(&self) -> &Properties {
        match self {
            Self::Node(node) => &node.properties,
            Self::Relationship(rel) => &rel.properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties().get(name)
    }

    /// Raw store id of the element, if it has been persisted.
    pub fn raw_id(&self) -> Option<i64> {
        match self {
            Self::Node(node) => node.id.map(|id| id.as_i64()),
            Self::Relationship(rel) => rel.id.map(|id| id.as_i64()),
        }
    }
}

/// An in-memory mapped entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInstance {
    pub type_name: String,
    pub kind: EntityKind,
    pub id: Option<i64>,
    /// Start and end node of a relationship entity.
    pub endpoints: Option<(NodeId, NodeId)>,
    pub properties: Properties,
}

impl EntityInstance {
    pub fn new(type_name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            id: None,
            endpoints: None,
            properties: Properties::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_endpoints(mut self, start: NodeId, end: NodeId) -> Self {
        self.endpoints = Some((start, end));
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_exposes_kind_and_id() {
        let node = PropertyContainer::Node(NodeState::new().with_id(NodeId::new(7)));
        assert_eq!(node.kind(), EntityKind::Node);
        assert_eq!(node.raw_id(), Some(7));

        let rel = PropertyContainer::Relationship(
            RelationshipState::new("KNOWS", NodeId::new(1), NodeId::new(2))
                .with_property("since", 2011i64),
        );
        assert_eq!(rel.kind(), EntityKind::Relationship);
        assert_eq!(rel.raw_id(), None);
        assert_eq!(rel.property("since"), Some(&PropertyValue::Int(2011)));
    }
}
