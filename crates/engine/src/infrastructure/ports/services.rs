//! Cross-cutting service ports consumed by the mapping runtime.

use async_trait::async_trait;
use graphwire_domain::{
    EntityInstance, EntityMetadata, PropertyContainer, PropertyValue, Row, TransactionId,
    ValueKind,
};

use super::error::{ConversionError, MappingError, TransactionError};
use super::types::{ConstraintViolation, ResultTarget, ResultValue, TransactionStatus};

// =============================================================================
// Conversion
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ConversionService: Send + Sync {
    fn can_convert(&self, from: ValueKind, to: ValueKind) -> bool;
    fn convert(&self, value: PropertyValue, to: ValueKind) -> Result<PropertyValue, ConversionError>;
    fn describe(&self) -> String;
}

/// Adapts raw query rows into values or mapped entities.
#[cfg_attr(test, mockall::automock)]
pub trait ResultConverter: Send + Sync {
    fn convert(&self, row: &Row, target: &ResultTarget) -> Result<ResultValue, MappingError>;
    fn describe(&self) -> String;
}

// =============================================================================
// Validation
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait Validator: Send + Sync {
    fn validate(&self, entity: &EntityInstance, metadata: &EntityMetadata) -> Vec<ConstraintViolation>;
    fn describe(&self) -> String;
}

// =============================================================================
// Transactions
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<TransactionId, TransactionError>;
    async fn commit(&self, id: TransactionId) -> Result<(), TransactionError>;
    async fn rollback(&self, id: TransactionId) -> Result<(), TransactionError>;
    fn status(&self, id: TransactionId) -> Option<TransactionStatus>;
    fn describe(&self) -> String;
}

// =============================================================================
// Indexing
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IndexProvider: Send + Sync {
    /// Name of the index covering `property` of `type_name`.
    fn index_name(&self, type_name: &str, property: &str) -> Result<String, MappingError>;

    /// Create the indexes declared by `type_name`'s metadata, returning their names.
    async fn ensure_indexes(&self, type_name: &str) -> Result<Vec<String>, MappingError>;

    /// Stored elements of `type_name` whose `property` equals `value`.
    async fn lookup(
        &self,
        type_name: &str,
        property: &str,
        value: PropertyValue,
    ) -> Result<Vec<PropertyContainer>, MappingError>;

    fn describe(&self) -> String;
}
