//! Per-kind bundle of the collaborators needed to build and load entities.

use std::sync::Arc;

use graphwire_domain::EntityKind;

use super::context::Neo4jMappingContext;
use crate::infrastructure::ports::{
    EntityInstantiator, EntityStateFactory, TypeRepresentationStrategy,
};

#[derive(Clone)]
pub struct EntityTools {
    kind: EntityKind,
    strategy: Arc<dyn TypeRepresentationStrategy>,
    state_factory: Option<Arc<dyn EntityStateFactory>>,
    instantiator: Arc<dyn EntityInstantiator>,
    mapping_context: Arc<Neo4jMappingContext>,
}

impl EntityTools {
    pub fn new(
        kind: EntityKind,
        strategy: Arc<dyn TypeRepresentationStrategy>,
        state_factory: Option<Arc<dyn EntityStateFactory>>,
        instantiator: Arc<dyn EntityInstantiator>,
        mapping_context: Arc<Neo4jMappingContext>,
    ) -> Self {
        Self {
            kind,
            strategy,
            state_factory,
            instantiator,
            mapping_context,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.strategy
    }

    pub fn state_factory(&self) -> Option<&Arc<dyn EntityStateFactory>> {
        self.state_factory.as_ref()
    }

    pub fn instantiator(&self) -> &Arc<dyn EntityInstantiator> {
        &self.instantiator
    }

    pub fn mapping_context(&self) -> &Arc<Neo4jMappingContext> {
        &self.mapping_context
    }
}
