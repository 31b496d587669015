//! Default entity instantiators, backed by the entity-state handler.

use std::sync::Arc;

use graphwire_domain::{EntityInstance, EntityKind, EntityMetadata, PropertyContainer};

use super::entity_state::EntityStateHandler;
use crate::infrastructure::ports::{EntityInstantiator, MappingError};

fn instantiate_kind(
    handler: &EntityStateHandler,
    kind: EntityKind,
    state: &PropertyContainer,
    metadata: &EntityMetadata,
) -> Result<EntityInstance, MappingError> {
    if metadata.kind() != kind {
        return Err(MappingError::kind_mismatch(metadata.type_name(), kind, metadata.kind()));
    }
    handler.load(state, metadata)
}

pub struct NodeEntityInstantiator {
    handler: Arc<EntityStateHandler>,
}

impl NodeEntityInstantiator {
    pub fn new(handler: Arc<EntityStateHandler>) -> Self {
        Self { handler }
    }

    pub fn entity_state_handler(&self) -> &Arc<EntityStateHandler> {
        &self.handler
    }
}

impl EntityInstantiator for NodeEntityInstantiator {
    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn instantiate(
        &self,
        state: &PropertyContainer,
        metadata: &EntityMetadata,
    ) -> Result<EntityInstance, MappingError> {
        instantiate_kind(&self.handler, EntityKind::Node, state, metadata)
    }
}

pub struct RelationshipEntityInstantiator {
    handler: Arc<EntityStateHandler>,
}

impl RelationshipEntityInstantiator {
    pub fn new(handler: Arc<EntityStateHandler>) -> Self {
        Self { handler }
    }

    pub fn entity_state_handler(&self) -> &Arc<EntityStateHandler> {
        &self.handler
    }
}

impl EntityInstantiator for RelationshipEntityInstantiator {
    fn kind(&self) -> EntityKind {
        EntityKind::Relationship
    }

    fn instantiate(
        &self,
        state: &PropertyContainer,
        metadata: &EntityMetadata,
    ) -> Result<EntityInstance, MappingError> {
        instantiate_kind(&self.handler, EntityKind::Relationship, state, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{knows, mapping_context, person, recording_database};
    use graphwire_domain::{NodeId, NodeState, PropertyValue, RelationshipState};

    fn handler() -> Arc<EntityStateHandler> {
        let (_, database) = recording_database();
        Arc::new(EntityStateHandler::new(mapping_context(), database))
    }

    #[test]
    fn node_instantiator_copies_id_and_properties() {
        let instantiator = NodeEntityInstantiator::new(handler());
        let state = PropertyContainer::Node(
            NodeState::new()
                .with_id(NodeId::new(11))
                .with_property("name", "Ada"),
        );

        let entity = instantiator.instantiate(&state, &person()).expect("entity");
        assert_eq!(entity.type_name, "Person");
        assert_eq!(entity.id, Some(11));
        assert_eq!(entity.property("name"), Some(&PropertyValue::from("Ada")));
    }

    #[test]
    fn relationship_instantiator_keeps_endpoints() {
        let instantiator = RelationshipEntityInstantiator::new(handler());
        let state = PropertyContainer::Relationship(RelationshipState::new(
            "KNOWS",
            NodeId::new(1),
            NodeId::new(2),
        ));

        let entity = instantiator.instantiate(&state, &knows()).expect("entity");
        assert_eq!(entity.endpoints, Some((NodeId::new(1), NodeId::new(2))));
    }

    #[test]
    fn instantiators_refuse_the_other_kind() {
        let instantiator = NodeEntityInstantiator::new(handler());
        let state = PropertyContainer::Node(NodeState::new());
        assert!(matches!(
            instantiator.instantiate(&state, &knows()),
            Err(MappingError::KindMismatch { .. })
        ));
    }
}
