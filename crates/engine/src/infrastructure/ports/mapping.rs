//! Entity mapping ports: type tagging, instantiation and state creation.

use std::sync::Arc;

use async_trait::async_trait;
use graphwire_domain::{EntityInstance, EntityKind, EntityMetadata, PropertyContainer};

use super::error::{MappingError, RepoError};

// =============================================================================
// Type Representation
// =============================================================================

/// Tags stored elements with their mapped type and reads the tag back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TypeRepresentationStrategy: Send + Sync {
    /// Which element kind this strategy tags.
    fn kind(&self) -> EntityKind;

    fn name(&self) -> &'static str;

    /// Persist the type tag of `metadata` on the element with store id `id`.
    async fn write_type(&self, id: i64, metadata: &EntityMetadata) -> Result<(), RepoError>;

    /// The alias stored on `state`, if any.
    fn read_alias(&self, state: &PropertyContainer) -> Option<String>;

    /// Cleanup before the element with store id `id` is deleted.
    async fn pre_entity_removal(&self, _id: i64) -> Result<(), RepoError> {
        Ok(())
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TypeRepresentationStrategyFactory: Send + Sync {
    fn node_strategy(&self) -> Result<Arc<dyn TypeRepresentationStrategy>, MappingError>;
    fn relationship_strategy(&self) -> Result<Arc<dyn TypeRepresentationStrategy>, MappingError>;
}

// =============================================================================
// Entity Construction
// =============================================================================

/// Builds in-memory entities from stored state.
#[cfg_attr(test, mockall::automock)]
pub trait EntityInstantiator: Send + Sync {
    fn kind(&self) -> EntityKind;
    fn instantiate(
        &self,
        state: &PropertyContainer,
        metadata: &EntityMetadata,
    ) -> Result<EntityInstance, MappingError>;
}

/// Builds stored state for in-memory entities.
#[cfg_attr(test, mockall::automock)]
pub trait EntityStateFactory: Send + Sync {
    fn kind(&self) -> EntityKind;
    fn state_for(
        &self,
        entity: &EntityInstance,
        metadata: &EntityMetadata,
    ) -> Result<PropertyContainer, MappingError>;
}
