//! Schema indexes over mapped properties.

use std::sync::Arc;

use async_trait::async_trait;
use graphwire_domain::{
    EntityKind, EntityMetadata, IndexKind, PropertyContainer, PropertyValue, RowValue, Statement,
};

use super::context::Neo4jMappingContext;
use super::quote_identifier;
use crate::infrastructure::ports::{
    GraphDatabase, IndexProvider, MappingError, ResultTarget, ResultValue,
};

/// Index provider backed by Neo4j schema indexes.
///
/// Index names are `<alias>_<property>`; node indexes are scoped to the alias
/// label and relationship indexes to the alias relationship type.
pub struct IndexProviderImpl {
    mapping_context: Arc<Neo4jMappingContext>,
    database: Arc<dyn GraphDatabase>,
}

impl IndexProviderImpl {
    pub fn new(mapping_context: Arc<Neo4jMappingContext>, database: Arc<dyn GraphDatabase>) -> Self {
        Self {
            mapping_context,
            database,
        }
    }

    fn declared_property(
        metadata: &EntityMetadata,
        property: &str,
    ) -> Result<(), MappingError> {
        match metadata.property(property) {
            Some(_) => Ok(()),
            None => Err(MappingError::MissingProperty {
                type_name: metadata.type_name().to_string(),
                property: property.to_string(),
            }),
        }
    }

    fn pattern(metadata: &EntityMetadata) -> String {
        let alias = quote_identifier(metadata.alias());
        match metadata.kind() {
            EntityKind::Node => format!("(e:{alias})"),
            EntityKind::Relationship => format!("()-[e:{alias}]-()"),
        }
    }

    fn create_statement(name: &str, metadata: &EntityMetadata, property: &str, kind: IndexKind) -> Statement {
        let name = quote_identifier(name);
        let pattern = Self::pattern(metadata);
        let property = quote_identifier(property);
        let text = match kind {
            IndexKind::Exact => {
                format!("CREATE INDEX {name} IF NOT EXISTS FOR {pattern} ON (e.{property})")
            }
            IndexKind::FullText => format!(
                "CREATE FULLTEXT INDEX {name} IF NOT EXISTS FOR {pattern} ON EACH [e.{property}]"
            ),
        };
        Statement::new(text)
    }
}

#[async_trait]
impl IndexProvider for IndexProviderImpl {
    fn index_name(&self, type_name: &str, property: &str) -> Result<String, MappingError> {
        let metadata = self.mapping_context.metadata_for(type_name)?;
        Self::declared_property(&metadata, property)?;
        Ok(format!("{}_{}", metadata.alias(), property))
    }

    async fn ensure_indexes(&self, type_name: &str) -> Result<Vec<String>, MappingError> {
        let metadata = self.mapping_context.metadata_for(type_name)?;
        let mut names = Vec::new();
        for property in metadata.indexed_properties() {
            let Some(kind) = property.index else {
                continue;
            };
            let name = format!("{}_{}", metadata.alias(), property.name);
            self.database
                .run(Self::create_statement(&name, &metadata, &property.name, kind))
                .await?;
            tracing::debug!(index = %name, type_name, "Ensured index");
            names.push(name);
        }
        Ok(names)
    }

    async fn lookup(
        &self,
        type_name: &str,
        property: &str,
        value: PropertyValue,
    ) -> Result<Vec<PropertyContainer>, MappingError> {
        let metadata = self.mapping_context.metadata_for(type_name)?;
        Self::declared_property(&metadata, property)?;

        let text = match metadata.kind() {
            EntityKind::Node => format!(
                "MATCH {} WHERE e.{} = $value RETURN e",
                Self::pattern(&metadata),
                quote_identifier(property)
            ),
            EntityKind::Relationship => format!(
                "MATCH ()-[e:{}]->() WHERE e.{} = $value RETURN e",
                quote_identifier(metadata.alias()),
                quote_identifier(property)
            ),
        };
        let result = self
            .database
            .query(Statement::new(text).param("value", value))
            .await?;

        Ok(result
            .to(&ResultTarget::Row)?
            .into_iter()
            .filter_map(|value| match value {
                ResultValue::Row(row) => row.single().and_then(RowValue::to_container),
                _ => None,
            })
            .collect())
    }

    fn describe(&self) -> String {
        "IndexProviderImpl".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;
    use crate::test_fixtures::{
        mapping_context, recording_database, recording_database_with_rows, row_converter,
    };
    use graphwire_domain::{NodeId, NodeState, Row};

    #[test]
    fn index_names_follow_alias_and_property() {
        let (_, database) = recording_database();
        let provider = IndexProviderImpl::new(mapping_context(), database);

        assert_eq!(provider.index_name("Person", "name").expect("name"), "Person_name");
        assert_eq!(provider.index_name("Knows", "since").expect("name"), "KNOWS_since");
        assert!(matches!(
            provider.index_name("Person", "shoe_size"),
            Err(MappingError::MissingProperty { .. })
        ));
    }

    #[tokio::test]
    async fn ensure_indexes_creates_one_index_per_indexed_property() {
        let (service, database) = recording_database();
        let provider = IndexProviderImpl::new(mapping_context(), database);

        let names = provider.ensure_indexes("Person").await.expect("indexes");
        assert_eq!(names, vec!["Person_name", "Person_bio"]);
        assert_eq!(
            service.texts(),
            vec![
                "CREATE INDEX `Person_name` IF NOT EXISTS FOR (e:`Person`) ON (e.`name`)",
                "CREATE FULLTEXT INDEX `Person_bio` IF NOT EXISTS FOR (e:`Person`) ON EACH [e.`bio`]",
            ]
        );

        provider.ensure_indexes("Knows").await.expect("indexes");
        assert_eq!(
            service.texts()[2],
            "CREATE INDEX `KNOWS_since` IF NOT EXISTS FOR ()-[e:`KNOWS`]-() ON (e.`since`)"
        );
    }

    #[tokio::test]
    async fn lookup_returns_matching_elements() {
        let node = NodeState::new()
            .with_id(NodeId::new(1))
            .with_property("name", "Ada");
        let (service, database) = recording_database_with_rows(vec![Row::new().with_node("e", node)]);
        database.set_result_converter(row_converter());
        let provider = IndexProviderImpl::new(mapping_context(), database);

        let found = provider
            .lookup("Person", "name", PropertyValue::from("Ada"))
            .await
            .expect("lookup");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_id(), Some(1));

        let statement = &service.statements()[0];
        assert_eq!(statement.text, "MATCH (e:`Person`) WHERE e.`name` = $value RETURN e");
        assert_eq!(statement.params.get("value"), Some(&PropertyValue::from("Ada")));
    }

    #[tokio::test]
    async fn lookup_needs_a_bound_converter() {
        let (_, database) = recording_database();
        let provider = IndexProviderImpl::new(mapping_context(), database);

        let err = provider
            .lookup("Person", "name", PropertyValue::from("Ada"))
            .await
            .expect_err("no converter bound");
        assert!(matches!(err, MappingError::Repo(RepoError::NoResultConverter)));
    }
}
