//! Neo4j adapter for the graph database service port.

mod graph;
mod service;
mod values;

pub use graph::{Neo4jGraph, Neo4jRowStream};
pub use service::Neo4jGraphDatabaseService;
