//! Neo4j-backed `GraphDatabaseService`.

use async_trait::async_trait;
use graphwire_domain::{Row, Statement};

use super::graph::Neo4jGraph;
use super::values::{decode_row, to_query};
use crate::infrastructure::ports::{GraphDatabaseService, RepoError};

pub struct Neo4jGraphDatabaseService {
    graph: Neo4jGraph,
}

impl Neo4jGraphDatabaseService {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Neo4jGraph {
        &self.graph
    }
}

#[async_trait]
impl GraphDatabaseService for Neo4jGraphDatabaseService {
    async fn execute(&self, statement: Statement) -> Result<Vec<Row>, RepoError> {
        let mut stream = self
            .graph
            .execute(to_query(&statement))
            .await
            .map_err(|e| RepoError::database("execute", e))?;

        let mut rows = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| RepoError::database("execute", e))?
        {
            rows.push(decode_row(&row));
        }
        tracing::trace!(statement = %statement.text, rows = rows.len(), "Statement executed");
        Ok(rows)
    }

    async fn run(&self, statement: Statement) -> Result<(), RepoError> {
        self.graph
            .run(to_query(&statement))
            .await
            .map_err(|e| RepoError::database("run", e))
    }

    fn describe(&self) -> String {
        "Neo4jGraphDatabaseService".to_string()
    }
}
