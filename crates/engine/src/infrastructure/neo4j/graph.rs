//! Neo4j graph wrapper with query timing.

use std::pin::Pin;
use std::time::Instant;

use futures_util::{Stream, TryStreamExt};
use neo4rs::{ConfigBuilder, Graph, Query, Row};

use crate::infrastructure::config::Neo4jSettings;

/// Concrete wrapper around `neo4rs::Graph`.
///
/// Records per-query timings at `trace` level.
#[derive(Clone)]
pub struct Neo4jGraph {
    inner: Graph,
}

pub struct Neo4jRowStream {
    inner: Pin<Box<dyn Stream<Item = Result<Row, neo4rs::Error>> + Send>>,
}

impl Neo4jRowStream {
    fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Row, neo4rs::Error>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    pub async fn next(&mut self) -> Result<Option<Row>, neo4rs::Error> {
        let next = futures_util::future::poll_fn(|cx| self.inner.as_mut().poll_next(cx)).await;
        match next {
            Some(row) => row.map(Some),
            None => Ok(None),
        }
    }
}

impl Neo4jGraph {
    pub fn new(graph: Graph) -> Self {
        Self { inner: graph }
    }

    /// Open a connection pool for `settings`.
    pub async fn connect(settings: &Neo4jSettings) -> Result<Self, neo4rs::Error> {
        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .build()?;

        let graph = Graph::connect(config).await?;
        tracing::info!(uri = %settings.uri, database = %settings.database, "Connected to Neo4j");

        Ok(Self::new(graph))
    }

    pub fn inner(&self) -> &Graph {
        &self.inner
    }

    fn record(&self, operation: &str, elapsed_ms: u64) {
        tracing::trace!(operation, elapsed_ms, "Neo4j query finished");
    }

    pub async fn run(&self, query: Query) -> Result<(), neo4rs::Error> {
        let start = Instant::now();
        let result = self.inner.run(query).await;
        self.record("run", start.elapsed().as_millis() as u64);
        result
    }

    pub async fn execute(&self, query: Query) -> Result<Neo4jRowStream, neo4rs::Error> {
        let start = Instant::now();
        let result = self.inner.execute(query).await;
        self.record("execute", start.elapsed().as_millis() as u64);
        result.map(|stream| {
            let stream = stream.into_stream();
            let stream = TryStreamExt::into_stream(stream);
            Neo4jRowStream::from_stream(stream)
        })
    }
}
