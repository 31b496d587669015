//! Default `GraphDatabase`: delegates to a raw service and hands out Cypher
//! query engines.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use graphwire_domain::{QueryType, Row, Statement};

use crate::infrastructure::ports::{
    GraphDatabase, GraphDatabaseService, QueryEngine, QueryResult, RepoError, ResultConverter,
};

pub struct DelegatingGraphDatabase {
    service: Arc<dyn GraphDatabaseService>,
    result_converter: RwLock<Option<Arc<dyn ResultConverter>>>,
}

impl DelegatingGraphDatabase {
    pub fn new(service: Arc<dyn GraphDatabaseService>) -> Self {
        Self {
            service,
            result_converter: RwLock::new(None),
        }
    }
}

#[async_trait]
impl GraphDatabase for DelegatingGraphDatabase {
    fn service(&self) -> Arc<dyn GraphDatabaseService> {
        Arc::clone(&self.service)
    }

    fn query_engine_for(
        &self,
        query_type: QueryType,
        converter: Arc<dyn ResultConverter>,
    ) -> Result<Arc<dyn QueryEngine>, RepoError> {
        match query_type {
            QueryType::Cypher => Ok(Arc::new(CypherQueryEngine::new(
                Arc::clone(&self.service),
                converter,
            ))),
            other => Err(RepoError::UnsupportedQueryType(other)),
        }
    }

    fn query_engine(&self, query_type: QueryType) -> Result<Arc<dyn QueryEngine>, RepoError> {
        let converter = self.result_converter().ok_or(RepoError::NoResultConverter)?;
        self.query_engine_for(query_type, converter)
    }

    fn set_result_converter(&self, converter: Arc<dyn ResultConverter>) {
        tracing::debug!("Binding result converter");
        let mut slot = self
            .result_converter
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(converter);
    }

    fn result_converter(&self) -> Option<Arc<dyn ResultConverter>> {
        self.result_converter
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn query(&self, statement: Statement) -> Result<QueryResult, RepoError> {
        self.query_engine(QueryType::Cypher)?.query(statement).await
    }

    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, RepoError> {
        self.service.execute(statement).await
    }

    async fn run(&self, statement: Statement) -> Result<(), RepoError> {
        self.service.run(statement).await
    }

    fn describe(&self) -> String {
        format!("DelegatingGraphDatabase({})", self.service.describe())
    }
}

/// Runs Cypher statements and wraps the rows with the engine's converter.
pub struct CypherQueryEngine {
    service: Arc<dyn GraphDatabaseService>,
    converter: Arc<dyn ResultConverter>,
}

impl CypherQueryEngine {
    pub fn new(service: Arc<dyn GraphDatabaseService>, converter: Arc<dyn ResultConverter>) -> Self {
        Self { service, converter }
    }

    pub fn converter(&self) -> Arc<dyn ResultConverter> {
        Arc::clone(&self.converter)
    }
}

#[async_trait]
impl QueryEngine for CypherQueryEngine {
    fn query_type(&self) -> QueryType {
        QueryType::Cypher
    }

    async fn query(&self, statement: Statement) -> Result<QueryResult, RepoError> {
        let rows = self.service.execute(statement).await?;
        Ok(QueryResult::new(rows, Arc::clone(&self.converter)))
    }
}
