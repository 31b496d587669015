//! Synchronizes in-memory entities with their stored node/relationship state.

use std::sync::Arc;

use graphwire_domain::{
    EntityInstance, EntityKind, EntityMetadata, NodeId, NodeState, Properties, PropertyContainer,
    RelationshipId, RelationshipState, Statement,
};

use super::context::Neo4jMappingContext;
use crate::infrastructure::ports::{GraphDatabase, MappingError};

pub struct EntityStateHandler {
    mapping_context: Arc<Neo4jMappingContext>,
    database: Arc<dyn GraphDatabase>,
}

impl EntityStateHandler {
    pub fn new(mapping_context: Arc<Neo4jMappingContext>, database: Arc<dyn GraphDatabase>) -> Self {
        Self {
            mapping_context,
            database,
        }
    }

    pub fn mapping_context(&self) -> &Arc<Neo4jMappingContext> {
        &self.mapping_context
    }

    pub fn graph_database(&self) -> &Arc<dyn GraphDatabase> {
        &self.database
    }

    pub fn kind_of(&self, type_name: &str) -> Result<EntityKind, MappingError> {
        Ok(self.mapping_context.metadata_for(type_name)?.kind())
    }

    pub fn is_node_entity(&self, type_name: &str) -> bool {
        matches!(self.kind_of(type_name), Ok(EntityKind::Node))
    }

    pub fn is_relationship_entity(&self, type_name: &str) -> bool {
        matches!(self.kind_of(type_name), Ok(EntityKind::Relationship))
    }

    /// Stored representation of `entity`.
    ///
    /// Only properties declared by the entity's metadata are carried over;
    /// required ones must be present and non-null.
    pub fn state_of(&self, entity: &EntityInstance) -> Result<PropertyContainer, MappingError> {
        let metadata = self.mapping_context.metadata_for(&entity.type_name)?;
        if entity.kind != metadata.kind() {
            return Err(MappingError::kind_mismatch(
                metadata.type_name(),
                metadata.kind(),
                entity.kind,
            ));
        }

        let mut properties = Properties::new();
        for property in metadata.properties() {
            match entity.property(&property.name) {
                Some(value) if !value.is_null() => {
                    properties.insert(property.name.clone(), value.clone());
                }
                _ if property.required => {
                    return Err(MappingError::MissingProperty {
                        type_name: metadata.type_name().to_string(),
                        property: property.name.clone(),
                    })
                }
                _ => {}
            }
        }

        match metadata.kind() {
            EntityKind::Node => {
                let mut node = NodeState::new().with_label(metadata.alias());
                node.id = entity.id.map(NodeId::new);
                node.properties = properties;
                Ok(PropertyContainer::Node(node))
            }
            EntityKind::Relationship => {
                let (start, end) = entity
                    .endpoints
                    .ok_or_else(|| MappingError::MissingEndpoints(entity.type_name.clone()))?;
                let mut rel = RelationshipState::new(metadata.alias(), start, end);
                rel.id = entity.id.map(RelationshipId::new);
                rel.properties = properties;
                Ok(PropertyContainer::Relationship(rel))
            }
        }
    }

    /// In-memory entity of type `metadata` backed by `state`.
    pub fn load(
        &self,
        state: &PropertyContainer,
        metadata: &EntityMetadata,
    ) -> Result<EntityInstance, MappingError> {
        if state.kind() != metadata.kind() {
            return Err(MappingError::kind_mismatch(
                metadata.type_name(),
                metadata.kind(),
                state.kind(),
            ));
        }

        let mut entity = EntityInstance::new(metadata.type_name(), metadata.kind());
        entity.id = state.raw_id();
        entity.properties = state.properties().clone();
        if let PropertyContainer::Relationship(rel) = state {
            entity.endpoints = Some((rel.start, rel.end));
        }
        Ok(entity)
    }

    /// Whether an element of `kind` with store id `id` exists.
    pub async fn exists(&self, kind: EntityKind, id: i64) -> Result<bool, MappingError> {
        let text = match kind {
            EntityKind::Node => "MATCH (e) WHERE id(e) = $id RETURN count(e) AS found",
            EntityKind::Relationship => "MATCH ()-[e]->() WHERE id(e) = $id RETURN count(e) AS found",
        };
        let rows = self
            .database
            .execute(Statement::new(text).param("id", id))
            .await?;
        Ok(rows
            .first()
            .and_then(|row| row.get("found"))
            .and_then(|value| value.as_value())
            .and_then(|value| value.as_i64())
            .is_some_and(|count| count > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{mapping_context, recording_database, recording_database_with_rows};
    use graphwire_domain::{PropertyValue, Row};

    fn handler() -> EntityStateHandler {
        let (_, database) = recording_database();
        EntityStateHandler::new(mapping_context(), database)
    }

    #[test]
    fn kinds_come_from_metadata() {
        let handler = handler();
        assert!(handler.is_node_entity("Person"));
        assert!(handler.is_relationship_entity("Knows"));
        assert!(!handler.is_node_entity("Ghost"));
        assert!(matches!(handler.kind_of("Ghost"), Err(MappingError::UnknownType(_))));
    }

    #[test]
    fn node_state_keeps_declared_properties_only() {
        let entity = EntityInstance::new("Person", EntityKind::Node)
            .with_id(4)
            .with_property("name", "Ada")
            .with_property("nickname", "Countess");

        let state = handler().state_of(&entity).expect("state");
        let PropertyContainer::Node(node) = state else {
            panic!("expected a node");
        };
        assert_eq!(node.id, Some(NodeId::new(4)));
        assert_eq!(node.labels, vec!["Person".to_string()]);
        assert_eq!(node.properties.len(), 1);
        assert_eq!(node.properties.get("name"), Some(&PropertyValue::from("Ada")));
    }

    #[test]
    fn missing_required_property_fails() {
        let entity = EntityInstance::new("Person", EntityKind::Node).with_property("age", 36i64);
        assert!(matches!(
            handler().state_of(&entity),
            Err(MappingError::MissingProperty { property, .. }) if property == "name"
        ));
    }

    #[test]
    fn relationship_state_needs_endpoints() {
        let handler = handler();
        let entity = EntityInstance::new("Knows", EntityKind::Relationship);
        assert!(matches!(
            handler.state_of(&entity),
            Err(MappingError::MissingEndpoints(_))
        ));

        let entity = entity.with_endpoints(NodeId::new(1), NodeId::new(2));
        let PropertyContainer::Relationship(rel) = handler.state_of(&entity).expect("state") else {
            panic!("expected a relationship");
        };
        assert_eq!(rel.rel_type, "KNOWS");
        assert_eq!((rel.start, rel.end), (NodeId::new(1), NodeId::new(2)));
    }

    #[test]
    fn load_rejects_kind_mismatch() {
        let handler = handler();
        let metadata = handler.mapping_context().metadata_for("Knows").expect("metadata");
        let node = PropertyContainer::Node(NodeState::new().with_id(NodeId::new(1)));
        assert!(matches!(
            handler.load(&node, &metadata),
            Err(MappingError::KindMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn exists_reads_the_count_column() {
        let (service, database) = recording_database_with_rows(vec![Row::new().with("found", 1i64)]);
        let handler = EntityStateHandler::new(mapping_context(), database);

        assert!(handler.exists(EntityKind::Node, 9).await.expect("exists"));
        assert_eq!(
            service.statements()[0].params.get("id"),
            Some(&PropertyValue::Int(9))
        );
    }
}
