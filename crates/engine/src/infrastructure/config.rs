//! Runtime configuration loaded from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::mapping::TypeRepresentationKind;

/// Neo4j connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neo4jSettings {
    /// Bolt URI
    pub uri: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
    /// Database name
    pub database: String,
}

/// Settings for the mapping runtime binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSettings {
    pub neo4j: Neo4jSettings,
    /// How node types are tagged in the store
    pub node_type_strategy: TypeRepresentationKind,
    /// How relationship types are tagged in the store
    pub relationship_type_strategy: TypeRepresentationKind,
    /// JSON file of entity metadata registered in the default mapping context
    pub entities_file: Option<PathBuf>,
}

impl MappingSettings {
    /// Load settings from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let node_type_strategy = var("GRAPHWIRE_NODE_TYPE_STRATEGY", "label")
            .parse::<TypeRepresentationKind>()
            .context("GRAPHWIRE_NODE_TYPE_STRATEGY must be one of: label, type-property, noop")?;
        let relationship_type_strategy = var("GRAPHWIRE_RELATIONSHIP_TYPE_STRATEGY", "type-property")
            .parse::<TypeRepresentationKind>()
            .context(
                "GRAPHWIRE_RELATIONSHIP_TYPE_STRATEGY must be one of: label, type-property, noop",
            )?;

        Ok(Self {
            neo4j: Neo4jSettings {
                uri: var("NEO4J_URI", "bolt://localhost:7687"),
                user: var("NEO4J_USER", "neo4j"),
                password: lookup("NEO4J_PASSWORD")
                    .context("NEO4J_PASSWORD environment variable is required")?,
                database: var("NEO4J_DATABASE", "neo4j"),
            },
            node_type_strategy,
            relationship_type_strategy,
            entities_file: lookup("GRAPHWIRE_ENTITIES_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
