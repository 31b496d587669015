//! Deletes stored entities.

use std::sync::Arc;

use graphwire_domain::{EntityInstance, EntityKind, NodeId, RelationshipId, Statement};

use super::entity_state::EntityStateHandler;
use crate::infrastructure::ports::{GraphDatabase, MappingError, TypeRepresentationStrategy};

pub struct EntityRemover {
    entity_state_handler: Arc<EntityStateHandler>,
    node_strategy: Arc<dyn TypeRepresentationStrategy>,
    relationship_strategy: Arc<dyn TypeRepresentationStrategy>,
    database: Arc<dyn GraphDatabase>,
}

impl EntityRemover {
    pub fn new(
        entity_state_handler: Arc<EntityStateHandler>,
        node_strategy: Arc<dyn TypeRepresentationStrategy>,
        relationship_strategy: Arc<dyn TypeRepresentationStrategy>,
        database: Arc<dyn GraphDatabase>,
    ) -> Self {
        Self {
            entity_state_handler,
            node_strategy,
            relationship_strategy,
            database,
        }
    }

    /// Delete a node together with its relationships.
    pub async fn remove_node(&self, id: NodeId) -> Result<(), MappingError> {
        self.node_strategy.pre_entity_removal(id.as_i64()).await?;
        self.database
            .run(Statement::new("MATCH (e) WHERE id(e) = $id DETACH DELETE e").param("id", id.as_i64()))
            .await?;
        tracing::debug!(node_id = %id, "Removed node");
        Ok(())
    }

    pub async fn remove_relationship(&self, id: RelationshipId) -> Result<(), MappingError> {
        self.relationship_strategy
            .pre_entity_removal(id.as_i64())
            .await?;
        self.database
            .run(
                Statement::new("MATCH ()-[e]->() WHERE id(e) = $id DELETE e")
                    .param("id", id.as_i64()),
            )
            .await?;
        tracing::debug!(relationship_id = %id, "Removed relationship");
        Ok(())
    }

    /// Delete the stored element backing `entity`.
    pub async fn remove(&self, entity: &EntityInstance) -> Result<(), MappingError> {
        let id = entity
            .id
            .ok_or_else(|| MappingError::Transient(entity.type_name.clone()))?;
        match self.entity_state_handler.kind_of(&entity.type_name)? {
            EntityKind::Node => self.remove_node(NodeId::new(id)).await,
            EntityKind::Relationship => self.remove_relationship(RelationshipId::new(id)).await,
        }
    }

    pub fn entity_state_handler(&self) -> &Arc<EntityStateHandler> {
        &self.entity_state_handler
    }

    pub fn node_strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.node_strategy
    }

    pub fn relationship_strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.relationship_strategy
    }

    pub fn graph_database(&self) -> &Arc<dyn GraphDatabase> {
        &self.database
    }
}
