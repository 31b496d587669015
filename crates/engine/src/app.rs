//! Application composition.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use graphwire_domain::{EntityMetadata, PropertyValue, Statement, ValueKind};

use crate::assembly::{Infrastructure, InfrastructureConfig, MappingInfrastructureFactory};
use crate::infrastructure::{
    clock::SystemClock,
    config::MappingSettings,
    neo4j::{Neo4jGraph, Neo4jGraphDatabaseService},
    ports::{ClockPort, GraphDatabaseService, TransactionManager},
    transaction::LocalTransactionManager,
};

/// Main application state.
///
/// Owns the managed factory and the infrastructure it published.
pub struct App {
    pub factory: MappingInfrastructureFactory,
    pub infrastructure: Arc<Infrastructure>,
}

impl App {
    /// Assemble the mapping runtime over `service` with the strategy kinds from `settings`.
    pub fn new(
        service: Arc<dyn GraphDatabaseService>,
        settings: &MappingSettings,
        entities: Vec<EntityMetadata>,
    ) -> Result<Self> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let transaction_manager: Arc<dyn TransactionManager> =
            Arc::new(LocalTransactionManager::new(clock));

        let config = InfrastructureConfig::builder()
            .with_graph_database_service(service)
            .with_transaction_manager(transaction_manager)
            .with_node_type_representation(settings.node_type_strategy)
            .with_relationship_type_representation(settings.relationship_type_strategy)
            .with_entities(entities)
            .build();

        let factory = MappingInfrastructureFactory::new(config);
        let infrastructure = factory
            .get_or_assemble()
            .context("Failed to assemble mapping infrastructure")?;

        Ok(Self {
            factory,
            infrastructure,
        })
    }

    /// Connect to Neo4j and assemble the runtime, registering the entities
    /// from the configured entities file if there is one.
    pub async fn connect(settings: &MappingSettings) -> Result<Self> {
        let entities = match &settings.entities_file {
            Some(path) => load_entities(path)?,
            None => Vec::new(),
        };

        tracing::info!("Connecting to Neo4j at {}", settings.neo4j.uri);
        let graph = Neo4jGraph::connect(&settings.neo4j)
            .await
            .with_context(|| format!("Failed to connect to Neo4j at {}", settings.neo4j.uri))?;

        Self::new(
            Arc::new(Neo4jGraphDatabaseService::new(graph)),
            settings,
            entities,
        )
    }

    /// Create the indexes declared by every mapped type. Returns the index names.
    pub async fn ensure_indexes(&self) -> Result<Vec<String>> {
        let provider = self.infrastructure.index_provider();
        let mut names = Vec::new();
        for type_name in self.infrastructure.mapping_context().type_names() {
            let created = provider
                .ensure_indexes(&type_name)
                .await
                .with_context(|| format!("Failed to ensure indexes for {type_name}"))?;
            names.extend(created);
        }
        Ok(names)
    }

    /// Round-trip a trivial query through the executor.
    pub async fn probe(&self) -> Result<bool> {
        let value = self
            .infrastructure
            .cypher_query_executor()
            .query_for_value(Statement::new("RETURN 1 AS ok"), ValueKind::Int)
            .await
            .context("Connectivity probe failed")?;
        Ok(value == Some(PropertyValue::Int(1)))
    }
}

/// Read entity metadata from a JSON array file.
pub fn load_entities(path: &Path) -> Result<Vec<EntityMetadata>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read entities file {}", path.display()))?;
    parse_entities(&raw).with_context(|| format!("Invalid entities file {}", path.display()))
}

fn parse_entities(raw: &str) -> Result<Vec<EntityMetadata>> {
    let entities: Vec<EntityMetadata> = serde_json::from_str(raw)?;
    tracing::debug!(count = entities.len(), "Parsed entity metadata");
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::Neo4jSettings;
    use crate::mapping::TypeRepresentationKind;
    use crate::test_fixtures::{knows, person, RecordingGraphDatabaseService};
    use graphwire_domain::{EntityKind, Row};

    fn settings() -> MappingSettings {
        MappingSettings {
            neo4j: Neo4jSettings {
                uri: "bolt://localhost:7687".to_string(),
                user: "neo4j".to_string(),
                password: "secret".to_string(),
                database: "neo4j".to_string(),
            },
            node_type_strategy: TypeRepresentationKind::TypeProperty,
            relationship_type_strategy: TypeRepresentationKind::Noop,
            entities_file: None,
        }
    }

    #[test]
    fn new_publishes_the_factory_infrastructure() {
        let service = Arc::new(RecordingGraphDatabaseService::new());
        let app = App::new(service, &settings(), vec![person(), knows()]).expect("app");

        let published = app.factory.get().expect("published");
        assert!(Arc::ptr_eq(&published, &app.infrastructure));
        assert_eq!(
            app.infrastructure.node_type_representation_strategy().name(),
            "TypePropertyStrategy"
        );
        assert_eq!(
            app.infrastructure.relationship_type_representation_strategy().name(),
            "NoopStrategy"
        );
        assert_eq!(app.infrastructure.mapping_context().len(), 2);
    }

    #[test]
    fn label_strategy_for_relationships_is_rejected() {
        let mut settings = settings();
        settings.relationship_type_strategy = TypeRepresentationKind::Label;

        let service = Arc::new(RecordingGraphDatabaseService::new());
        let err = App::new(service, &settings, Vec::new())
            .err()
            .expect("relationship labels are unsupported");
        assert!(err.to_string().contains("assemble"));
    }

    #[tokio::test]
    async fn ensure_indexes_covers_every_mapped_type() {
        let service = Arc::new(RecordingGraphDatabaseService::new());
        let app = App::new(service.clone(), &settings(), vec![person(), knows()]).expect("app");

        let names = app.ensure_indexes().await.expect("indexes");
        assert_eq!(names, vec!["KNOWS_since", "Person_name", "Person_bio"]);
        assert_eq!(service.texts().len(), 3);
    }

    #[tokio::test]
    async fn probe_reads_a_single_value() {
        let service = Arc::new(RecordingGraphDatabaseService::with_rows(vec![
            Row::new().with("ok", 1i64),
        ]));
        let app = App::new(service.clone(), &settings(), Vec::new()).expect("app");

        assert!(app.probe().await.expect("probe"));
        assert_eq!(service.texts(), vec!["RETURN 1 AS ok"]);
    }

    #[test]
    fn parses_entity_metadata_json() {
        let raw = r#"[
            {
                "type_name": "City",
                "kind": "Node",
                "alias": "City",
                "supertypes": ["Place"],
                "properties": [
                    { "name": "name", "required": true, "index": "Exact" },
                    { "name": "population", "required": false, "index": null }
                ]
            }
        ]"#;

        let entities = parse_entities(raw).expect("entities");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].type_name(), "City");
        assert_eq!(entities[0].kind(), EntityKind::Node);
        assert_eq!(entities[0].supertypes(), ["Place".to_string()]);
        assert!(entities[0].property("name").is_some_and(|p| p.required));
    }

    #[test]
    fn malformed_entities_are_rejected() {
        assert!(parse_entities("{ \"type_name\": \"City\" }").is_err());
    }
}
