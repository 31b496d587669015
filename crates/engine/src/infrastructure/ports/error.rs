//! Error types for port operations.

use graphwire_domain::{DomainError, EntityKind, QueryType, TransactionId, ValueKind};

use super::types::TransactionStatus;

/// Graph store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Element not found - includes element type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// A stored value could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No engine exists for the requested query language.
    #[error("Unsupported query type: {0}")]
    UnsupportedQueryType(QueryType),

    /// A converted query was issued before any result converter was bound.
    #[error("No result converter is bound to the graph database")]
    NoResultConverter,
}

impl RepoError {
    /// Create a NotFound error with element type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Value conversion failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("No conversion from {from} to {to}")]
    Unsupported { from: ValueKind, to: ValueKind },
    #[error("Cannot convert {value} to {to}")]
    Invalid { value: String, to: ValueKind },
}

/// Failures while mapping between entities and stored graph elements.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Unknown entity type: {0}")]
    UnknownType(String),

    #[error("Entity type already registered: {0}")]
    DuplicateType(String),

    #[error("Alias {alias} already used by {existing}")]
    DuplicateAlias { alias: String, existing: String },

    #[error("{type_name} is a {expected} entity, got a {actual}")]
    KindMismatch {
        type_name: String,
        expected: EntityKind,
        actual: EntityKind,
    },

    #[error("{type_name} is missing required property {property}")]
    MissingProperty { type_name: String, property: String },

    #[error("Relationship entity {0} has no start/end nodes")]
    MissingEndpoints(String),

    #[error("Entity {0} has not been persisted")]
    Transient(String),

    #[error("{strategy} cannot represent {kind} types")]
    UnsupportedStrategy {
        strategy: &'static str,
        kind: EntityKind,
    },

    #[error("Result column for {0} does not hold a node or relationship")]
    NotAGraphElement(String),

    #[error("Result row has {0} columns, expected exactly one")]
    NotSingleColumn(usize),

    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl MappingError {
    pub fn kind_mismatch(type_name: impl Into<String>, expected: EntityKind, actual: EntityKind) -> Self {
        Self::KindMismatch {
            type_name: type_name.into(),
            expected,
            actual,
        }
    }
}

/// Errors from transaction bookkeeping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransactionError {
    #[error("Unknown transaction: {0}")]
    Unknown(TransactionId),
    #[error("Transaction {id} is {status:?}, not active")]
    NotActive {
        id: TransactionId,
        status: TransactionStatus,
    },
}
