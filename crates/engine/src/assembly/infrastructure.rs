//! The assembled, immutable bundle of mapping-runtime collaborators.

use std::fmt;
use std::sync::Arc;

use super::assemble::assemble;
use super::capability::{Capability, Resolution, Source};
use super::config::InfrastructureConfig;
use super::error::InfrastructureCreationError;
use crate::infrastructure::ports::{
    ConversionService, GraphDatabase, GraphDatabaseService, IndexProvider, ResultConverter,
    TransactionManager, TypeRepresentationStrategy, Validator,
};
use crate::mapping::{
    CypherQueryExecutor, EntityPersister, EntityRemover, EntityStateHandler, Neo4jMappingContext,
    TypeRepresentationStrategies,
};

/// Fully resolved collaborators. Every reference is set; none changes after
/// construction, so repeated reads return the same `Arc`.
#[derive(Clone)]
pub struct Infrastructure {
    pub(super) conversion_service: Arc<dyn ConversionService>,
    pub(super) validator: Arc<dyn Validator>,
    pub(super) node_type_representation_strategy: Arc<dyn TypeRepresentationStrategy>,
    pub(super) relationship_type_representation_strategy: Arc<dyn TypeRepresentationStrategy>,
    pub(super) mapping_context: Arc<Neo4jMappingContext>,
    pub(super) cypher_query_executor: Arc<CypherQueryExecutor>,
    pub(super) entity_state_handler: Arc<EntityStateHandler>,
    pub(super) entity_persister: Arc<EntityPersister>,
    pub(super) entity_remover: Arc<EntityRemover>,
    pub(super) type_representation_strategies: Arc<TypeRepresentationStrategies>,
    pub(super) transaction_manager: Arc<dyn TransactionManager>,
    pub(super) result_converter: Arc<dyn ResultConverter>,
    pub(super) index_provider: Arc<dyn IndexProvider>,
    pub(super) graph_database_service: Arc<dyn GraphDatabaseService>,
    pub(super) graph_database: Arc<dyn GraphDatabase>,
    pub(super) resolutions: Arc<[Resolution]>,
}

impl Infrastructure {
    /// Assemble an infrastructure from just a database abstraction and a
    /// transaction manager, with every other capability defaulted.
    ///
    /// Each call builds a new, independent infrastructure.
    pub fn create_direct(
        graph_database: Arc<dyn GraphDatabase>,
        transaction_manager: Arc<dyn TransactionManager>,
    ) -> Result<Self, InfrastructureCreationError> {
        let config = InfrastructureConfig::new(graph_database, transaction_manager);
        Ok(assemble(&config)?)
    }

    pub fn conversion_service(&self) -> &Arc<dyn ConversionService> {
        &self.conversion_service
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub fn node_type_representation_strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.node_type_representation_strategy
    }

    pub fn relationship_type_representation_strategy(
        &self,
    ) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.relationship_type_representation_strategy
    }

    pub fn mapping_context(&self) -> &Arc<Neo4jMappingContext> {
        &self.mapping_context
    }

    pub fn cypher_query_executor(&self) -> &Arc<CypherQueryExecutor> {
        &self.cypher_query_executor
    }

    pub fn entity_state_handler(&self) -> &Arc<EntityStateHandler> {
        &self.entity_state_handler
    }

    pub fn entity_persister(&self) -> &Arc<EntityPersister> {
        &self.entity_persister
    }

    pub fn entity_remover(&self) -> &Arc<EntityRemover> {
        &self.entity_remover
    }

    pub fn type_representation_strategies(&self) -> &Arc<TypeRepresentationStrategies> {
        &self.type_representation_strategies
    }

    pub fn transaction_manager(&self) -> &Arc<dyn TransactionManager> {
        &self.transaction_manager
    }

    pub fn result_converter(&self) -> &Arc<dyn ResultConverter> {
        &self.result_converter
    }

    pub fn index_provider(&self) -> &Arc<dyn IndexProvider> {
        &self.index_provider
    }

    /// The raw service: the configured one if supplied, otherwise the one
    /// behind the database abstraction.
    pub fn graph_database_service(&self) -> &Arc<dyn GraphDatabaseService> {
        &self.graph_database_service
    }

    pub fn graph_database(&self) -> &Arc<dyn GraphDatabase> {
        &self.graph_database
    }

    /// How each capability was resolved, in resolution order.
    pub fn resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    pub fn source_of(&self, capability: Capability) -> Option<Source> {
        self.resolutions
            .iter()
            .find(|resolution| resolution.capability == capability)
            .map(|resolution| resolution.source)
    }
}

impl fmt::Debug for Infrastructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Infrastructure")
            .field("conversion_service", &self.conversion_service.describe())
            .field("validator", &self.validator.describe())
            .field(
                "node_type_representation_strategy",
                &self.node_type_representation_strategy.name(),
            )
            .field(
                "relationship_type_representation_strategy",
                &self.relationship_type_representation_strategy.name(),
            )
            .field("mapped_types", &self.mapping_context.type_names())
            .field("transaction_manager", &self.transaction_manager.describe())
            .field("result_converter", &self.result_converter.describe())
            .field("index_provider", &self.index_provider.describe())
            .field("graph_database", &self.graph_database.describe())
            .field("graph_database_service", &self.graph_database_service.describe())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::AssemblyError;
    use crate::infrastructure::ports::{MockGraphDatabase, RepoError};
    use crate::test_fixtures::{recording_database, transaction_manager, RecordingGraphDatabaseService};
    use std::error::Error as _;

    #[test]
    fn create_direct_builds_distinct_instances() {
        let (_, database) = recording_database();
        let tx = transaction_manager();

        let first = Infrastructure::create_direct(Arc::clone(&database), tx.clone()).expect("first");
        let second = Infrastructure::create_direct(database, tx).expect("second");

        assert!(!Arc::ptr_eq(first.mapping_context(), second.mapping_context()));
        assert!(!Arc::ptr_eq(first.entity_persister(), second.entity_persister()));
        assert!(!Arc::ptr_eq(first.result_converter(), second.result_converter()));
    }

    #[test]
    fn accessors_are_stable() {
        let (_, database) = recording_database();
        let infrastructure =
            Infrastructure::create_direct(database, transaction_manager()).expect("assembled");
        let copy = infrastructure.clone();

        assert!(Arc::ptr_eq(
            infrastructure.cypher_query_executor(),
            infrastructure.cypher_query_executor()
        ));
        assert!(Arc::ptr_eq(copy.entity_remover(), infrastructure.entity_remover()));
        assert!(Arc::ptr_eq(
            copy.type_representation_strategies(),
            infrastructure.type_representation_strategies()
        ));
    }

    #[test]
    fn create_direct_wraps_assembly_failures() {
        let mut database = MockGraphDatabase::new();
        database
            .expect_service()
            .returning(|| Arc::new(RecordingGraphDatabaseService::new()));
        database.expect_set_result_converter().return_const(());
        database
            .expect_query_engine_for()
            .returning(|_, _| Err(RepoError::database("query_engine_for", "offline")));

        let err = Infrastructure::create_direct(Arc::new(database), transaction_manager())
            .expect_err("engine refused");

        assert_eq!(err.to_string(), "Error creating infrastructure");
        assert!(matches!(
            err.assembly_error(),
            AssemblyError::QueryEngine {
                source: RepoError::Database { .. },
                ..
            }
        ));
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), err.assembly_error().to_string());
    }

    #[test]
    fn debug_lists_collaborator_names() {
        let (_, database) = recording_database();
        let infrastructure =
            Infrastructure::create_direct(database, transaction_manager()).expect("assembled");

        let debug = format!("{infrastructure:?}");
        assert!(debug.contains("LabelBasedStrategy"));
        assert!(debug.contains("DelegatingGraphDatabase(recording)"));
        assert!(debug.contains("LocalTransactionManager"));
    }
}
