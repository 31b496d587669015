//! Helper types for port operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use graphwire_domain::{EntityInstance, PropertyValue, Row, TransactionId, ValueKind};

use super::error::MappingError;
use super::services::ResultConverter;

// =============================================================================
// Result Conversion Types
// =============================================================================

/// What a result row should be converted into.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTarget {
    /// Keep the row as returned by the store.
    Row,
    /// A single-column scalar converted to the given kind.
    Value(ValueKind),
    /// A single-column node or relationship projected onto a mapped type.
    Entity(String),
}

/// A converted result row.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Row(Row),
    Value(PropertyValue),
    Entity(EntityInstance),
}

impl ResultValue {
    pub fn into_value(self) -> Option<PropertyValue> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_entity(self) -> Option<EntityInstance> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Rows returned by a query engine, bound to the converter the engine was
/// created with.
pub struct QueryResult {
    rows: Vec<Row>,
    converter: Arc<dyn ResultConverter>,
}

impl QueryResult {
    pub fn new(rows: Vec<Row>, converter: Arc<dyn ResultConverter>) -> Self {
        Self { rows, converter }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert every row to `target`.
    pub fn to(&self, target: &ResultTarget) -> Result<Vec<ResultValue>, MappingError> {
        self.rows
            .iter()
            .map(|row| self.converter.convert(row, target))
            .collect()
    }

    /// Convert the first row to `target`, if there is one.
    pub fn first(&self, target: &ResultTarget) -> Result<Option<ResultValue>, MappingError> {
        self.rows
            .first()
            .map(|row| self.converter.convert(row, target))
            .transpose()
    }
}

impl std::fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryResult")
            .field("rows", &self.rows)
            .field("converter", &self.converter.describe())
            .finish()
    }
}

// =============================================================================
// Validation Types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub property: String,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// Transaction Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Active,
    Committed,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInfo {
    pub id: TransactionId,
    pub status: TransactionStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
