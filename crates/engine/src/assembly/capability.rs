//! The capabilities an infrastructure is assembled from, and the order they
//! are resolved in.
//!
//! `RESOLUTION_ORDER` and `depends_on` form a checked ledger of the wiring in
//! `assemble`, not an interpreter for it. Tests hold the table topologically
//! sorted and require the resolution log of every assembly to follow it, so
//! reordering a step in `assemble` without updating the table fails.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    MappingContext,
    GraphDatabase,
    GraphDatabaseService,
    EntityStateHandler,
    NodeEntityInstantiator,
    RelationshipEntityInstantiator,
    TypeRepresentationStrategyFactory,
    NodeTypeRepresentationStrategy,
    RelationshipTypeRepresentationStrategy,
    TypeRepresentationStrategies,
    ConversionService,
    Validator,
    TransactionManager,
    NodeEntityStateFactory,
    RelationshipEntityStateFactory,
    EntityPersister,
    EntityRemover,
    ResultConverter,
    CypherQueryExecutor,
    IndexProvider,
}

/// Every capability, each listed after all of its dependencies.
pub const RESOLUTION_ORDER: [Capability; 20] = [
    Capability::MappingContext,
    Capability::GraphDatabase,
    Capability::GraphDatabaseService,
    Capability::EntityStateHandler,
    Capability::NodeEntityInstantiator,
    Capability::RelationshipEntityInstantiator,
    Capability::TypeRepresentationStrategyFactory,
    Capability::NodeTypeRepresentationStrategy,
    Capability::RelationshipTypeRepresentationStrategy,
    Capability::TypeRepresentationStrategies,
    Capability::ConversionService,
    Capability::Validator,
    Capability::TransactionManager,
    Capability::NodeEntityStateFactory,
    Capability::RelationshipEntityStateFactory,
    Capability::EntityPersister,
    Capability::EntityRemover,
    Capability::ResultConverter,
    Capability::CypherQueryExecutor,
    Capability::IndexProvider,
];

impl Capability {
    /// Capabilities whose resolved values this one's default is built from.
    pub fn depends_on(self) -> &'static [Capability] {
        use Capability::*;
        match self {
            MappingContext | GraphDatabase | ConversionService | Validator | TransactionManager
            | NodeEntityStateFactory | RelationshipEntityStateFactory => &[],
            GraphDatabaseService | TypeRepresentationStrategyFactory => &[GraphDatabase],
            EntityStateHandler => &[MappingContext, GraphDatabase],
            NodeEntityInstantiator | RelationshipEntityInstantiator => &[EntityStateHandler],
            NodeTypeRepresentationStrategy | RelationshipTypeRepresentationStrategy => {
                &[TypeRepresentationStrategyFactory]
            }
            TypeRepresentationStrategies => &[
                MappingContext,
                NodeTypeRepresentationStrategy,
                RelationshipTypeRepresentationStrategy,
            ],
            EntityPersister => &[
                ConversionService,
                NodeTypeRepresentationStrategy,
                RelationshipTypeRepresentationStrategy,
                NodeEntityStateFactory,
                RelationshipEntityStateFactory,
                NodeEntityInstantiator,
                RelationshipEntityInstantiator,
                MappingContext,
                EntityStateHandler,
            ],
            EntityRemover => &[
                EntityStateHandler,
                NodeTypeRepresentationStrategy,
                RelationshipTypeRepresentationStrategy,
                GraphDatabase,
            ],
            ResultConverter => &[ConversionService, EntityPersister],
            CypherQueryExecutor => &[GraphDatabase, ResultConverter],
            IndexProvider => &[MappingContext, GraphDatabase],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MappingContext => "mapping_context",
            Self::GraphDatabase => "graph_database",
            Self::GraphDatabaseService => "graph_database_service",
            Self::EntityStateHandler => "entity_state_handler",
            Self::NodeEntityInstantiator => "node_entity_instantiator",
            Self::RelationshipEntityInstantiator => "relationship_entity_instantiator",
            Self::TypeRepresentationStrategyFactory => "type_representation_strategy_factory",
            Self::NodeTypeRepresentationStrategy => "node_type_representation_strategy",
            Self::RelationshipTypeRepresentationStrategy => {
                "relationship_type_representation_strategy"
            }
            Self::TypeRepresentationStrategies => "type_representation_strategies",
            Self::ConversionService => "conversion_service",
            Self::Validator => "validator",
            Self::TransactionManager => "transaction_manager",
            Self::NodeEntityStateFactory => "node_entity_state_factory",
            Self::RelationshipEntityStateFactory => "relationship_entity_state_factory",
            Self::EntityPersister => "entity_persister",
            Self::EntityRemover => "entity_remover",
            Self::ResultConverter => "result_converter",
            Self::CypherQueryExecutor => "cypher_query_executor",
            Self::IndexProvider => "index_provider",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a resolved capability came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Supplied explicitly in the configuration.
    Override,
    /// Built from a default implementation.
    Default,
    /// Obtained from, or always rebuilt out of, other capabilities.
    Derived,
    /// Optional capability left unset.
    Absent,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Default => write!(f, "default"),
            Self::Derived => write!(f, "derived"),
            Self::Absent => write!(f, "absent"),
        }
    }
}

/// One entry of an infrastructure's resolution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub capability: Capability,
    pub source: Source,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn resolution_order_is_topological() {
        let mut resolved = HashSet::new();
        for capability in RESOLUTION_ORDER {
            for dependency in capability.depends_on() {
                assert!(
                    resolved.contains(dependency),
                    "{capability} resolved before its dependency {dependency}"
                );
            }
            assert!(resolved.insert(capability), "{capability} listed twice");
        }
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = RESOLUTION_ORDER.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), RESOLUTION_ORDER.len());
    }
}
