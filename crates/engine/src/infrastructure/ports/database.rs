//! Graph store ports.

use std::sync::Arc;

use async_trait::async_trait;
use graphwire_domain::{QueryType, Row, Statement};

use super::error::RepoError;
use super::services::ResultConverter;
use super::types::QueryResult;

// =============================================================================
// Raw Database Service
// =============================================================================

/// Direct access to the graph store (e.g. a Neo4j connection).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphDatabaseService: Send + Sync {
    /// Run a statement and collect its rows.
    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, RepoError>;
    /// Run a statement, discarding any rows.
    async fn run(&self, statement: Statement) -> Result<(), RepoError>;
    fn describe(&self) -> String;
}

// =============================================================================
// Database Abstraction
// =============================================================================

/// The mapping layer's view of the graph store.
///
/// Besides delegating statements to the raw service it hands out query
/// engines and carries the result-converter binding used by queries issued
/// through it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphDatabase: Send + Sync {
    /// The raw service this abstraction delegates to.
    fn service(&self) -> Arc<dyn GraphDatabaseService>;

    /// A query engine for `query_type` whose results convert through `converter`.
    fn query_engine_for(
        &self,
        query_type: QueryType,
        converter: Arc<dyn ResultConverter>,
    ) -> Result<Arc<dyn QueryEngine>, RepoError>;

    /// A query engine for `query_type` using the bound result converter.
    fn query_engine(&self, query_type: QueryType) -> Result<Arc<dyn QueryEngine>, RepoError>;

    fn set_result_converter(&self, converter: Arc<dyn ResultConverter>);

    fn result_converter(&self) -> Option<Arc<dyn ResultConverter>>;

    /// Run a Cypher statement; the rows convert through the bound converter.
    async fn query(&self, statement: Statement) -> Result<QueryResult, RepoError>;

    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, RepoError>;

    async fn run(&self, statement: Statement) -> Result<(), RepoError>;

    fn describe(&self) -> String;
}

// =============================================================================
// Query Engine
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryEngine: Send + Sync {
    fn query_type(&self) -> QueryType;
    async fn query(&self, statement: Statement) -> Result<QueryResult, RepoError>;
}
