//! Moves entities between their in-memory and stored forms.

use std::sync::Arc;

use graphwire_domain::{EntityInstance, EntityKind, PropertyContainer};

use super::context::Neo4jMappingContext;
use super::entity_state::EntityStateHandler;
use super::tools::EntityTools;
use crate::infrastructure::ports::{ConversionService, MappingError};

pub struct EntityPersister {
    conversion_service: Arc<dyn ConversionService>,
    node_tools: EntityTools,
    relationship_tools: EntityTools,
    mapping_context: Arc<Neo4jMappingContext>,
    entity_state_handler: Arc<EntityStateHandler>,
}

impl EntityPersister {
    pub fn new(
        conversion_service: Arc<dyn ConversionService>,
        node_tools: EntityTools,
        relationship_tools: EntityTools,
        mapping_context: Arc<Neo4jMappingContext>,
        entity_state_handler: Arc<EntityStateHandler>,
    ) -> Self {
        Self {
            conversion_service,
            node_tools,
            relationship_tools,
            mapping_context,
            entity_state_handler,
        }
    }

    pub fn tools_for(&self, kind: EntityKind) -> &EntityTools {
        match kind {
            EntityKind::Node => &self.node_tools,
            EntityKind::Relationship => &self.relationship_tools,
        }
    }

    pub fn is_managed(&self, type_name: &str) -> bool {
        self.mapping_context.is_managed(type_name)
    }

    /// Load `state` as an entity of `type_name`.
    pub fn project(
        &self,
        state: &PropertyContainer,
        type_name: &str,
    ) -> Result<EntityInstance, MappingError> {
        let metadata = self.mapping_context.metadata_for(type_name)?;
        self.tools_for(metadata.kind())
            .instantiator()
            .instantiate(state, &metadata)
    }

    /// Load `state` as the type its strategy recorded on it.
    pub fn load(&self, state: &PropertyContainer) -> Result<EntityInstance, MappingError> {
        let tools = self.tools_for(state.kind());
        let alias = tools
            .strategy()
            .read_alias(state)
            .ok_or_else(|| MappingError::UnknownType(format!("untyped {}", state.kind())))?;
        let metadata = self.mapping_context.metadata_for_alias(&alias)?;
        tools.instantiator().instantiate(state, &metadata)
    }

    /// Stored form of `entity`, built by the kind's state factory when one is
    /// configured and by the entity-state handler otherwise.
    pub fn state_for(&self, entity: &EntityInstance) -> Result<PropertyContainer, MappingError> {
        let metadata = self.mapping_context.metadata_for(&entity.type_name)?;
        match self.tools_for(metadata.kind()).state_factory() {
            Some(factory) => factory.state_for(entity, &metadata),
            None => self.entity_state_handler.state_of(entity),
        }
    }

    /// Tag the stored element backing `entity` with its type.
    pub async fn write_type(&self, entity: &EntityInstance) -> Result<(), MappingError> {
        let id = entity
            .id
            .ok_or_else(|| MappingError::Transient(entity.type_name.clone()))?;
        let metadata = self.mapping_context.metadata_for(&entity.type_name)?;
        self.tools_for(metadata.kind())
            .strategy()
            .write_type(id, &metadata)
            .await?;
        tracing::debug!(type_name = %entity.type_name, id, "Wrote entity type");
        Ok(())
    }

    pub fn conversion_service(&self) -> &Arc<dyn ConversionService> {
        &self.conversion_service
    }

    pub fn mapping_context(&self) -> &Arc<Neo4jMappingContext> {
        &self.mapping_context
    }

    pub fn entity_state_handler(&self) -> &Arc<EntityStateHandler> {
        &self.entity_state_handler
    }
}
