//! Assembly inputs: one optional override per capability plus the seeds the
//! defaults are derived from.

use std::sync::Arc;

use graphwire_domain::EntityMetadata;

use crate::infrastructure::ports::{
    ConversionService, EntityInstantiator, EntityStateFactory, GraphDatabase,
    GraphDatabaseService, IndexProvider, ResultConverter, TransactionManager,
    TypeRepresentationStrategy, TypeRepresentationStrategyFactory, Validator,
};
use crate::mapping::{EntityStateHandler, Neo4jMappingContext, TypeRepresentationKind};

/// Immutable assembly configuration. Build it with [`InfrastructureConfig::builder`].
#[derive(Clone)]
pub struct InfrastructureConfig {
    pub(crate) conversion_service: Option<Arc<dyn ConversionService>>,
    pub(crate) validator: Option<Arc<dyn Validator>>,
    pub(crate) node_type_representation_strategy: Option<Arc<dyn TypeRepresentationStrategy>>,
    pub(crate) relationship_type_representation_strategy:
        Option<Arc<dyn TypeRepresentationStrategy>>,
    pub(crate) type_representation_strategy_factory:
        Option<Arc<dyn TypeRepresentationStrategyFactory>>,
    pub(crate) mapping_context: Option<Arc<Neo4jMappingContext>>,
    pub(crate) entity_state_handler: Option<Arc<EntityStateHandler>>,
    pub(crate) node_entity_state_factory: Option<Arc<dyn EntityStateFactory>>,
    pub(crate) relationship_entity_state_factory: Option<Arc<dyn EntityStateFactory>>,
    pub(crate) node_entity_instantiator: Option<Arc<dyn EntityInstantiator>>,
    pub(crate) relationship_entity_instantiator: Option<Arc<dyn EntityInstantiator>>,
    pub(crate) result_converter: Option<Arc<dyn ResultConverter>>,
    pub(crate) index_provider: Option<Arc<dyn IndexProvider>>,
    pub(crate) graph_database_service: Option<Arc<dyn GraphDatabaseService>>,
    pub(crate) graph_database: Option<Arc<dyn GraphDatabase>>,
    pub(crate) transaction_manager: Option<Arc<dyn TransactionManager>>,
    /// Registered in the default mapping context. Ignored when a mapping
    /// context override is supplied.
    pub(crate) initial_entities: Vec<EntityMetadata>,
    pub(crate) node_type_representation: TypeRepresentationKind,
    pub(crate) relationship_type_representation: TypeRepresentationKind,
}

impl InfrastructureConfig {
    pub fn builder() -> InfrastructureConfigBuilder {
        InfrastructureConfigBuilder::new()
    }

    /// A configuration holding only the two mandatory seeds.
    pub fn new(
        graph_database: Arc<dyn GraphDatabase>,
        transaction_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self::builder()
            .with_graph_database(graph_database)
            .with_transaction_manager(transaction_manager)
            .build()
    }

    pub fn initial_entities(&self) -> &[EntityMetadata] {
        &self.initial_entities
    }

    pub fn node_type_representation(&self) -> TypeRepresentationKind {
        self.node_type_representation
    }

    pub fn relationship_type_representation(&self) -> TypeRepresentationKind {
        self.relationship_type_representation
    }
}

/// Records explicit overrides. Anything left unset is resolved by `assemble`.
pub struct InfrastructureConfigBuilder {
    config: InfrastructureConfig,
}

impl InfrastructureConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: InfrastructureConfig {
                conversion_service: None,
                validator: None,
                node_type_representation_strategy: None,
                relationship_type_representation_strategy: None,
                type_representation_strategy_factory: None,
                mapping_context: None,
                entity_state_handler: None,
                node_entity_state_factory: None,
                relationship_entity_state_factory: None,
                node_entity_instantiator: None,
                relationship_entity_instantiator: None,
                result_converter: None,
                index_provider: None,
                graph_database_service: None,
                graph_database: None,
                transaction_manager: None,
                initial_entities: Vec::new(),
                node_type_representation: TypeRepresentationKind::Label,
                relationship_type_representation: TypeRepresentationKind::TypeProperty,
            },
        }
    }

    pub fn with_conversion_service(mut self, value: Arc<dyn ConversionService>) -> Self {
        self.config.conversion_service = Some(value);
        self
    }

    pub fn with_validator(mut self, value: Arc<dyn Validator>) -> Self {
        self.config.validator = Some(value);
        self
    }

    pub fn with_node_type_representation_strategy(
        mut self,
        value: Arc<dyn TypeRepresentationStrategy>,
    ) -> Self {
        self.config.node_type_representation_strategy = Some(value);
        self
    }

    pub fn with_relationship_type_representation_strategy(
        mut self,
        value: Arc<dyn TypeRepresentationStrategy>,
    ) -> Self {
        self.config.relationship_type_representation_strategy = Some(value);
        self
    }

    pub fn with_type_representation_strategy_factory(
        mut self,
        value: Arc<dyn TypeRepresentationStrategyFactory>,
    ) -> Self {
        self.config.type_representation_strategy_factory = Some(value);
        self
    }

    pub fn with_mapping_context(mut self, value: Arc<Neo4jMappingContext>) -> Self {
        self.config.mapping_context = Some(value);
        self
    }

    pub fn with_entity_state_handler(mut self, value: Arc<EntityStateHandler>) -> Self {
        self.config.entity_state_handler = Some(value);
        self
    }

    pub fn with_node_entity_state_factory(mut self, value: Arc<dyn EntityStateFactory>) -> Self {
        self.config.node_entity_state_factory = Some(value);
        self
    }

    pub fn with_relationship_entity_state_factory(
        mut self,
        value: Arc<dyn EntityStateFactory>,
    ) -> Self {
        self.config.relationship_entity_state_factory = Some(value);
        self
    }

    pub fn with_node_entity_instantiator(mut self, value: Arc<dyn EntityInstantiator>) -> Self {
        self.config.node_entity_instantiator = Some(value);
        self
    }

    pub fn with_relationship_entity_instantiator(
        mut self,
        value: Arc<dyn EntityInstantiator>,
    ) -> Self {
        self.config.relationship_entity_instantiator = Some(value);
        self
    }

    pub fn with_result_converter(mut self, value: Arc<dyn ResultConverter>) -> Self {
        self.config.result_converter = Some(value);
        self
    }

    pub fn with_index_provider(mut self, value: Arc<dyn IndexProvider>) -> Self {
        self.config.index_provider = Some(value);
        self
    }

    pub fn with_graph_database_service(mut self, value: Arc<dyn GraphDatabaseService>) -> Self {
        self.config.graph_database_service = Some(value);
        self
    }

    pub fn with_graph_database(mut self, value: Arc<dyn GraphDatabase>) -> Self {
        self.config.graph_database = Some(value);
        self
    }

    pub fn with_transaction_manager(mut self, value: Arc<dyn TransactionManager>) -> Self {
        self.config.transaction_manager = Some(value);
        self
    }

    pub fn with_entity(mut self, metadata: EntityMetadata) -> Self {
        self.config.initial_entities.push(metadata);
        self
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = EntityMetadata>) -> Self {
        self.config.initial_entities.extend(entities);
        self
    }

    /// How the default strategy factory tags node types.
    pub fn with_node_type_representation(mut self, kind: TypeRepresentationKind) -> Self {
        self.config.node_type_representation = kind;
        self
    }

    /// How the default strategy factory tags relationship types.
    pub fn with_relationship_type_representation(mut self, kind: TypeRepresentationKind) -> Self {
        self.config.relationship_type_representation = kind;
        self
    }

    pub fn build(self) -> InfrastructureConfig {
        self.config
    }
}

impl Default for InfrastructureConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
