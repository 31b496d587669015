//! Query dialects, statements and result rows.

use serde::{Deserialize, Serialize};

use crate::state::{NodeState, PropertyContainer, RelationshipState};
use crate::value::{Properties, PropertyValue};

/// Supported query languages. Only Cypher has an engine today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryType {
    Cypher,
    Gremlin,
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryType::Cypher => write!(f, "cypher"),
            QueryType::Gremlin => write!(f, "gremlin"),
        }
    }
}

/// A query text with named parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub text: String,
    pub params: Properties,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Properties::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Properties) -> Self {
        self.params.extend(params);
        self
    }
}

/// One column value of a result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowValue {
    Value(PropertyValue),
    Node(NodeState),
    Relationship(RelationshipState),
}

impl RowValue {
    pub fn as_value(&self) -> Option<&PropertyValue> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The stored element, if this column holds a node or relationship.
    pub fn to_container(&self) -> Option<PropertyContainer> {
        match self {
            Self::Node(node) => Some(PropertyContainer::Node(node.clone())),
            Self::Relationship(rel) => Some(PropertyContainer::Relationship(rel.clone())),
            Self::Value(_) => None,
        }
    }
}

/// One result row: column name to value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: Vec<(String, RowValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.push(column, RowValue::Value(value.into()));
        self
    }

    pub fn with_node(mut self, column: impl Into<String>, node: NodeState) -> Self {
        self.push(column, RowValue::Node(node));
        self
    }

    pub fn with_relationship(mut self, column: impl Into<String>, rel: RelationshipState) -> Self {
        self.push(column, RowValue::Relationship(rel));
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: RowValue) {
        self.columns.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&RowValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The only value of a single-column row.
    pub fn single(&self) -> Option<&RowValue> {
        match self.columns.as_slice() {
            [(_, value)] => Some(value),
            _ => None,
        }
    }
}
