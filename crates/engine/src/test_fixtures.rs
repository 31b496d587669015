//! Shared builders and stubs for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use graphwire_domain::{EntityKind, EntityMetadata, IndexKind, PropertyMetadata, Row, Statement};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::conversion::DefaultConversionService;
use crate::infrastructure::database::DelegatingGraphDatabase;
use crate::infrastructure::ports::{
    EntityStateFactory, GraphDatabase, GraphDatabaseService, MockResultConverter, RepoError,
    ResultConverter, ResultValue,
};
use crate::infrastructure::transaction::LocalTransactionManager;
use crate::mapping::{
    EntityPersister, EntityStateHandler, EntityTools, Neo4jMappingContext, NodeEntityInstantiator,
    NoopStrategy, RelationshipEntityInstantiator, TypePropertyStrategy,
};

/// Records every statement it receives and answers `execute` with canned rows.
#[derive(Default)]
pub struct RecordingGraphDatabaseService {
    statements: Mutex<Vec<Statement>>,
    rows: Mutex<Vec<Row>>,
}

impl RecordingGraphDatabaseService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            statements: Mutex::new(Vec::new()),
            rows: Mutex::new(rows),
        }
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().expect("statements lock").clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.statements().into_iter().map(|s| s.text).collect()
    }

    fn record(&self, statement: Statement) {
        self.statements.lock().expect("statements lock").push(statement);
    }
}

#[async_trait]
impl GraphDatabaseService for RecordingGraphDatabaseService {
    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, RepoError> {
        self.record(statement);
        Ok(self.rows.lock().expect("rows lock").clone())
    }

    async fn run(&self, statement: Statement) -> Result<(), RepoError> {
        self.record(statement);
        Ok(())
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// A converter that hands every row back unchanged.
pub fn row_converter() -> Arc<dyn ResultConverter> {
    let mut converter = MockResultConverter::new();
    converter
        .expect_convert()
        .returning(|row, _| Ok(ResultValue::Row(row.clone())));
    converter
        .expect_describe()
        .returning(|| "row".to_string());
    Arc::new(converter)
}

/// A recording service and a database abstraction delegating to it.
pub fn recording_database() -> (Arc<RecordingGraphDatabaseService>, Arc<dyn GraphDatabase>) {
    recording_database_with_rows(Vec::new())
}

pub fn recording_database_with_rows(
    rows: Vec<Row>,
) -> (Arc<RecordingGraphDatabaseService>, Arc<dyn GraphDatabase>) {
    let service = Arc::new(RecordingGraphDatabaseService::with_rows(rows));
    let database: Arc<dyn GraphDatabase> = Arc::new(DelegatingGraphDatabase::new(service.clone()));
    (service, database)
}

pub fn person() -> EntityMetadata {
    EntityMetadata::node("Person")
        .expect("valid metadata")
        .with_supertype("Animal")
        .with_property(PropertyMetadata::new("name").required().indexed(IndexKind::Exact))
        .with_property(PropertyMetadata::new("bio").indexed(IndexKind::FullText))
        .with_property(PropertyMetadata::new("age"))
}

pub fn knows() -> EntityMetadata {
    EntityMetadata::relationship("Knows")
        .expect("valid metadata")
        .with_alias("KNOWS")
        .expect("valid alias")
        .with_property(PropertyMetadata::new("since").indexed(IndexKind::Exact))
}

pub fn mapping_context() -> Arc<Neo4jMappingContext> {
    Arc::new(Neo4jMappingContext::with_entities([person(), knows()]).expect("mapping context"))
}

pub fn transaction_manager() -> Arc<LocalTransactionManager> {
    let now = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid date");
    Arc::new(LocalTransactionManager::new(Arc::new(FixedClock(now))))
}

/// A persister over `database` with a type-property node strategy and a no-op
/// relationship strategy.
pub fn entity_persister(
    database: Arc<dyn GraphDatabase>,
    node_factory: Option<Arc<dyn EntityStateFactory>>,
) -> EntityPersister {
    let context = mapping_context();
    let handler = Arc::new(EntityStateHandler::new(Arc::clone(&context), Arc::clone(&database)));

    let node_tools = EntityTools::new(
        EntityKind::Node,
        Arc::new(TypePropertyStrategy::new(Arc::clone(&database), EntityKind::Node)),
        node_factory,
        Arc::new(NodeEntityInstantiator::new(Arc::clone(&handler))),
        Arc::clone(&context),
    );
    let relationship_tools = EntityTools::new(
        EntityKind::Relationship,
        Arc::new(NoopStrategy::new(EntityKind::Relationship)),
        None,
        Arc::new(RelationshipEntityInstantiator::new(Arc::clone(&handler))),
        Arc::clone(&context),
    );

    EntityPersister::new(
        Arc::new(DefaultConversionService::new()),
        node_tools,
        relationship_tools,
        context,
        handler,
    )
}
