//! Resolves an [`InfrastructureConfig`] into an [`Infrastructure`].
//!
//! Capabilities resolve in [`RESOLUTION_ORDER`]: each one is either the
//! configured override or a default built from capabilities resolved before
//! it. The first failing step aborts assembly and nothing is published.
//!
//! A fresh working entity-state handler is always built. The published
//! handler is the override when one is supplied, otherwise the working one;
//! instantiators derive from the published handler while the persister and
//! remover always receive the working handler.
//!
//! Node and relationship strategies, whether overridden or built by the
//! factory, must tag the kind they are wired in for.
//!
//! [`RESOLUTION_ORDER`]: super::capability::RESOLUTION_ORDER

use std::sync::Arc;

use graphwire_domain::{EntityKind, QueryType};

use super::capability::{Capability, Resolution, Source};
use super::config::InfrastructureConfig;
use super::error::AssemblyError;
use super::infrastructure::Infrastructure;
use crate::infrastructure::conversion::DefaultConversionService;
use crate::infrastructure::database::DelegatingGraphDatabase;
use crate::infrastructure::ports::{
    ConversionService, EntityInstantiator, GraphDatabase, GraphDatabaseService, IndexProvider,
    MappingError, ResultConverter, TypeRepresentationStrategy, TypeRepresentationStrategyFactory,
    Validator,
};
use crate::infrastructure::validation::MetadataValidator;
use crate::mapping::{
    CypherQueryExecutor, DefaultTypeRepresentationStrategyFactory, EntityPersister, EntityRemover,
    EntityResultConverter, EntityStateHandler, EntityTools, IndexProviderImpl,
    Neo4jMappingContext, NodeEntityInstantiator, RelationshipEntityInstantiator,
    TypeRepresentationStrategies,
};

/// Build a new infrastructure from `config`.
///
/// Binds the resolved result converter into the database abstraction as a
/// side effect; when several infrastructures share one database the most
/// recent assembly's converter stays bound.
pub fn assemble(config: &InfrastructureConfig) -> Result<Infrastructure, AssemblyError> {
    match resolve(config) {
        Ok(infrastructure) => {
            tracing::info!(
                node_strategy = infrastructure.node_type_representation_strategy().name(),
                relationship_strategy = infrastructure
                    .relationship_type_representation_strategy()
                    .name(),
                mapped_types = infrastructure.mapping_context().len(),
                overrides = infrastructure
                    .resolutions()
                    .iter()
                    .filter(|r| r.source == Source::Override)
                    .count(),
                "Infrastructure assembled"
            );
            Ok(infrastructure)
        }
        Err(error) => {
            tracing::warn!(error = %error, "Infrastructure assembly failed");
            Err(error)
        }
    }
}

#[derive(Default)]
struct ResolutionLog {
    entries: Vec<Resolution>,
}

impl ResolutionLog {
    fn record(&mut self, capability: Capability, source: Source) {
        tracing::debug!(capability = %capability, source = %source, "Resolved capability");
        self.entries.push(Resolution { capability, source });
    }

    /// The override if present, otherwise `default()` recorded as `source`.
    fn resolve<T: ?Sized>(
        &mut self,
        capability: Capability,
        configured: Option<&Arc<T>>,
        source: Source,
        default: impl FnOnce() -> Result<Arc<T>, AssemblyError>,
    ) -> Result<Arc<T>, AssemblyError> {
        let (value, source) = match configured {
            Some(value) => (Arc::clone(value), Source::Override),
            None => (default()?, source),
        };
        self.record(capability, source);
        Ok(value)
    }

    /// A value that is always rebuilt from other capabilities.
    fn derive<T>(&mut self, capability: Capability, value: T) -> T {
        self.record(capability, Source::Derived);
        value
    }
}

fn check_strategy_kind(
    strategy: Arc<dyn TypeRepresentationStrategy>,
    kind: EntityKind,
) -> Result<Arc<dyn TypeRepresentationStrategy>, AssemblyError> {
    if strategy.kind() == kind {
        return Ok(strategy);
    }
    Err(AssemblyError::TypeRepresentation {
        kind,
        source: MappingError::KindMismatch {
            type_name: strategy.name().to_string(),
            expected: kind,
            actual: strategy.kind(),
        },
    })
}

fn resolve(config: &InfrastructureConfig) -> Result<Infrastructure, AssemblyError> {
    let mut log = ResolutionLog::default();

    let mapping_context = log.resolve(
        Capability::MappingContext,
        config.mapping_context.as_ref(),
        Source::Default,
        || {
            Neo4jMappingContext::with_entities(config.initial_entities.iter().cloned())
                .map(Arc::new)
                .map_err(AssemblyError::MappingContext)
        },
    )?;
    if config.mapping_context.is_some() && !config.initial_entities.is_empty() {
        tracing::debug!(
            count = config.initial_entities.len(),
            "Mapping context supplied; initial entities not registered"
        );
    }

    let graph_database = log.resolve(
        Capability::GraphDatabase,
        config.graph_database.as_ref(),
        Source::Derived,
        || {
            config
                .graph_database_service
                .clone()
                .map(|service| Arc::new(DelegatingGraphDatabase::new(service)) as Arc<dyn GraphDatabase>)
                .ok_or(AssemblyError::MissingDatabase)
        },
    )?;

    let graph_database_service: Arc<dyn GraphDatabaseService> = log.resolve(
        Capability::GraphDatabaseService,
        config.graph_database_service.as_ref(),
        Source::Derived,
        || Ok(graph_database.service()),
    )?;

    let working_state_handler = Arc::new(EntityStateHandler::new(
        Arc::clone(&mapping_context),
        Arc::clone(&graph_database),
    ));
    let entity_state_handler = log.resolve(
        Capability::EntityStateHandler,
        config.entity_state_handler.as_ref(),
        Source::Default,
        || Ok(Arc::clone(&working_state_handler)),
    )?;

    let node_entity_instantiator = log.resolve(
        Capability::NodeEntityInstantiator,
        config.node_entity_instantiator.as_ref(),
        Source::Default,
        || {
            Ok(Arc::new(NodeEntityInstantiator::new(Arc::clone(&entity_state_handler)))
                as Arc<dyn EntityInstantiator>)
        },
    )?;
    let relationship_entity_instantiator = log.resolve(
        Capability::RelationshipEntityInstantiator,
        config.relationship_entity_instantiator.as_ref(),
        Source::Default,
        || {
            Ok(
                Arc::new(RelationshipEntityInstantiator::new(Arc::clone(&entity_state_handler)))
                    as Arc<dyn EntityInstantiator>,
            )
        },
    )?;

    let strategy_factory = log.resolve(
        Capability::TypeRepresentationStrategyFactory,
        config.type_representation_strategy_factory.as_ref(),
        Source::Default,
        || {
            Ok(Arc::new(DefaultTypeRepresentationStrategyFactory::new(
                Arc::clone(&graph_database),
                config.node_type_representation,
                config.relationship_type_representation,
            )) as Arc<dyn TypeRepresentationStrategyFactory>)
        },
    )?;
    let node_strategy = log.resolve(
        Capability::NodeTypeRepresentationStrategy,
        config.node_type_representation_strategy.as_ref(),
        Source::Derived,
        || {
            strategy_factory
                .node_strategy()
                .map_err(|source| AssemblyError::TypeRepresentation {
                    kind: EntityKind::Node,
                    source,
                })
        },
    )?;
    let relationship_strategy = log.resolve(
        Capability::RelationshipTypeRepresentationStrategy,
        config.relationship_type_representation_strategy.as_ref(),
        Source::Derived,
        || {
            strategy_factory
                .relationship_strategy()
                .map_err(|source| AssemblyError::TypeRepresentation {
                    kind: EntityKind::Relationship,
                    source,
                })
        },
    )?;
    let node_strategy = check_strategy_kind(node_strategy, EntityKind::Node)?;
    let relationship_strategy = check_strategy_kind(relationship_strategy, EntityKind::Relationship)?;
    let type_representation_strategies = log.derive(
        Capability::TypeRepresentationStrategies,
        Arc::new(TypeRepresentationStrategies::new(
            Arc::clone(&mapping_context),
            Arc::clone(&node_strategy),
            Arc::clone(&relationship_strategy),
        )),
    );

    let conversion_service = log.resolve(
        Capability::ConversionService,
        config.conversion_service.as_ref(),
        Source::Default,
        || Ok(Arc::new(DefaultConversionService::new()) as Arc<dyn ConversionService>),
    )?;
    let validator = log.resolve(
        Capability::Validator,
        config.validator.as_ref(),
        Source::Default,
        || Ok(Arc::new(MetadataValidator::new()) as Arc<dyn Validator>),
    )?;
    let transaction_manager = log.resolve(
        Capability::TransactionManager,
        config.transaction_manager.as_ref(),
        Source::Default,
        || Err(AssemblyError::MissingTransactionManager),
    )?;

    let node_state_factory = config.node_entity_state_factory.clone();
    log.record(
        Capability::NodeEntityStateFactory,
        if node_state_factory.is_some() { Source::Override } else { Source::Absent },
    );
    let relationship_state_factory = config.relationship_entity_state_factory.clone();
    log.record(
        Capability::RelationshipEntityStateFactory,
        if relationship_state_factory.is_some() { Source::Override } else { Source::Absent },
    );

    let node_tools = EntityTools::new(
        EntityKind::Node,
        Arc::clone(&node_strategy),
        node_state_factory,
        node_entity_instantiator,
        Arc::clone(&mapping_context),
    );
    let relationship_tools = EntityTools::new(
        EntityKind::Relationship,
        Arc::clone(&relationship_strategy),
        relationship_state_factory,
        relationship_entity_instantiator,
        Arc::clone(&mapping_context),
    );

    let entity_persister = log.derive(
        Capability::EntityPersister,
        Arc::new(EntityPersister::new(
            Arc::clone(&conversion_service),
            node_tools,
            relationship_tools,
            Arc::clone(&mapping_context),
            Arc::clone(&working_state_handler),
        )),
    );
    let entity_remover = log.derive(
        Capability::EntityRemover,
        Arc::new(EntityRemover::new(
            Arc::clone(&working_state_handler),
            Arc::clone(&node_strategy),
            Arc::clone(&relationship_strategy),
            Arc::clone(&graph_database),
        )),
    );

    let result_converter = log.resolve(
        Capability::ResultConverter,
        config.result_converter.as_ref(),
        Source::Default,
        || {
            Ok(Arc::new(EntityResultConverter::new(
                Arc::clone(&conversion_service),
                Arc::clone(&entity_persister),
            )) as Arc<dyn ResultConverter>)
        },
    )?;
    graph_database.set_result_converter(Arc::clone(&result_converter));

    let engine = graph_database
        .query_engine_for(QueryType::Cypher, Arc::clone(&result_converter))
        .map_err(|source| AssemblyError::QueryEngine {
            query_type: QueryType::Cypher,
            source,
        })?;
    let cypher_query_executor = log.derive(
        Capability::CypherQueryExecutor,
        Arc::new(CypherQueryExecutor::new(engine)),
    );

    let index_provider = log.resolve(
        Capability::IndexProvider,
        config.index_provider.as_ref(),
        Source::Default,
        || {
            Ok(Arc::new(IndexProviderImpl::new(
                Arc::clone(&mapping_context),
                Arc::clone(&graph_database),
            )) as Arc<dyn IndexProvider>)
        },
    )?;

    Ok(Infrastructure {
        conversion_service,
        validator,
        node_type_representation_strategy: node_strategy,
        relationship_type_representation_strategy: relationship_strategy,
        mapping_context,
        cypher_query_executor,
        entity_state_handler,
        entity_persister,
        entity_remover,
        type_representation_strategies,
        transaction_manager,
        result_converter,
        index_provider,
        graph_database_service,
        graph_database,
        resolutions: log.entries.into(),
    })
}
