//! Type representation strategies: how the mapped type of a stored node or
//! relationship is written and read back.
//!
//! - `LabelBasedStrategy` (nodes only): the alias and every supertype become
//!   labels, plus a `_<alias>` marker label naming the concrete type. A marker
//!   only counts when the unprefixed alias label is present too.
//! - `TypePropertyStrategy`: the alias is stored in a `__type__` property.
//! - `NoopStrategy`: nothing is written; types cannot be recovered.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use graphwire_domain::{EntityKind, EntityMetadata, PropertyContainer, Statement};

use super::context::Neo4jMappingContext;
use super::quote_identifier;
use crate::infrastructure::ports::{
    GraphDatabase, MappingError, RepoError, TypeRepresentationStrategy,
    TypeRepresentationStrategyFactory,
};

pub const TYPE_PROPERTY: &str = "__type__";
const CONCRETE_LABEL_PREFIX: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRepresentationKind {
    Label,
    TypeProperty,
    Noop,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown type representation strategy: {0}")]
pub struct UnknownStrategyKind(pub String);

impl FromStr for TypeRepresentationKind {
    type Err = UnknownStrategyKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(Self::Label),
            "type-property" | "type_property" => Ok(Self::TypeProperty),
            "noop" => Ok(Self::Noop),
            other => Err(UnknownStrategyKind(other.to_string())),
        }
    }
}

impl fmt::Display for TypeRepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => write!(f, "label"),
            Self::TypeProperty => write!(f, "type-property"),
            Self::Noop => write!(f, "noop"),
        }
    }
}

fn match_by_id(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Node => "MATCH (e) WHERE id(e) = $id",
        EntityKind::Relationship => "MATCH ()-[e]->() WHERE id(e) = $id",
    }
}

// =============================================================================
// Label strategy
// =============================================================================

pub struct LabelBasedStrategy {
    database: Arc<dyn GraphDatabase>,
}

impl LabelBasedStrategy {
    pub fn new(database: Arc<dyn GraphDatabase>) -> Self {
        Self { database }
    }

    fn labels_for(metadata: &EntityMetadata) -> Vec<String> {
        let mut labels = vec![
            metadata.alias().to_string(),
            format!("{CONCRETE_LABEL_PREFIX}{}", metadata.alias()),
        ];
        labels.extend(metadata.supertypes().iter().cloned());
        labels
    }
}

#[async_trait]
impl TypeRepresentationStrategy for LabelBasedStrategy {
    fn kind(&self) -> EntityKind {
        EntityKind::Node
    }

    fn name(&self) -> &'static str {
        "LabelBasedStrategy"
    }

    async fn write_type(&self, id: i64, metadata: &EntityMetadata) -> Result<(), RepoError> {
        let labels: String = Self::labels_for(metadata)
            .iter()
            .map(|label| format!(":{}", quote_identifier(label)))
            .collect();
        let statement =
            Statement::new(format!("{} SET e{labels}", match_by_id(EntityKind::Node))).param("id", id);
        self.database.run(statement).await
    }

    fn read_alias(&self, state: &PropertyContainer) -> Option<String> {
        match state {
            PropertyContainer::Node(node) => node
                .labels
                .iter()
                .filter_map(|label| label.strip_prefix(CONCRETE_LABEL_PREFIX))
                .find(|alias| node.labels.iter().any(|label| label == alias))
                .map(str::to_string),
            PropertyContainer::Relationship(_) => None,
        }
    }
}

// =============================================================================
// Type property strategy
// =============================================================================

pub struct TypePropertyStrategy {
    database: Arc<dyn GraphDatabase>,
    kind: EntityKind,
}

impl TypePropertyStrategy {
    pub fn new(database: Arc<dyn GraphDatabase>, kind: EntityKind) -> Self {
        Self { database, kind }
    }
}

#[async_trait]
impl TypeRepresentationStrategy for TypePropertyStrategy {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "TypePropertyStrategy"
    }

    async fn write_type(&self, id: i64, metadata: &EntityMetadata) -> Result<(), RepoError> {
        let statement = Statement::new(format!(
            "{} SET e.{TYPE_PROPERTY} = $alias",
            match_by_id(self.kind)
        ))
        .param("id", id)
        .param("alias", metadata.alias());
        self.database.run(statement).await
    }

    fn read_alias(&self, state: &PropertyContainer) -> Option<String> {
        state
            .property(TYPE_PROPERTY)
            .and_then(|value| value.as_str())
            .map(str::to_string)
    }
}

// =============================================================================
// No-op strategy
// =============================================================================

pub struct NoopStrategy {
    kind: EntityKind,
}

impl NoopStrategy {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl TypeRepresentationStrategy for NoopStrategy {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn name(&self) -> &'static str {
        "NoopStrategy"
    }

    async fn write_type(&self, _id: i64, _metadata: &EntityMetadata) -> Result<(), RepoError> {
        Ok(())
    }

    fn read_alias(&self, _state: &PropertyContainer) -> Option<String> {
        None
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Builds strategies of the configured kinds against one database abstraction.
pub struct DefaultTypeRepresentationStrategyFactory {
    database: Arc<dyn GraphDatabase>,
    node_kind: TypeRepresentationKind,
    relationship_kind: TypeRepresentationKind,
}

impl DefaultTypeRepresentationStrategyFactory {
    pub fn new(
        database: Arc<dyn GraphDatabase>,
        node_kind: TypeRepresentationKind,
        relationship_kind: TypeRepresentationKind,
    ) -> Self {
        Self {
            database,
            node_kind,
            relationship_kind,
        }
    }

    fn create(
        &self,
        representation: TypeRepresentationKind,
        kind: EntityKind,
    ) -> Result<Arc<dyn TypeRepresentationStrategy>, MappingError> {
        let database = Arc::clone(&self.database);
        match (representation, kind) {
            (TypeRepresentationKind::Label, EntityKind::Node) => {
                Ok(Arc::new(LabelBasedStrategy::new(database)))
            }
            (TypeRepresentationKind::Label, EntityKind::Relationship) => {
                Err(MappingError::UnsupportedStrategy {
                    strategy: "LabelBasedStrategy",
                    kind,
                })
            }
            (TypeRepresentationKind::TypeProperty, kind) => {
                Ok(Arc::new(TypePropertyStrategy::new(database, kind)))
            }
            (TypeRepresentationKind::Noop, kind) => Ok(Arc::new(NoopStrategy::new(kind))),
        }
    }
}

impl TypeRepresentationStrategyFactory for DefaultTypeRepresentationStrategyFactory {
    fn node_strategy(&self) -> Result<Arc<dyn TypeRepresentationStrategy>, MappingError> {
        self.create(self.node_kind, EntityKind::Node)
    }

    fn relationship_strategy(&self) -> Result<Arc<dyn TypeRepresentationStrategy>, MappingError> {
        self.create(self.relationship_kind, EntityKind::Relationship)
    }
}

// =============================================================================
// Aggregate view
// =============================================================================

/// Dispatches type tagging by entity kind and resolves stored aliases back to
/// registered metadata.
pub struct TypeRepresentationStrategies {
    mapping_context: Arc<Neo4jMappingContext>,
    node_strategy: Arc<dyn TypeRepresentationStrategy>,
    relationship_strategy: Arc<dyn TypeRepresentationStrategy>,
}

impl TypeRepresentationStrategies {
    pub fn new(
        mapping_context: Arc<Neo4jMappingContext>,
        node_strategy: Arc<dyn TypeRepresentationStrategy>,
        relationship_strategy: Arc<dyn TypeRepresentationStrategy>,
    ) -> Self {
        Self {
            mapping_context,
            node_strategy,
            relationship_strategy,
        }
    }

    pub fn strategy_for(&self, kind: EntityKind) -> &Arc<dyn TypeRepresentationStrategy> {
        match kind {
            EntityKind::Node => &self.node_strategy,
            EntityKind::Relationship => &self.relationship_strategy,
        }
    }

    pub fn node_strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.node_strategy
    }

    pub fn relationship_strategy(&self) -> &Arc<dyn TypeRepresentationStrategy> {
        &self.relationship_strategy
    }

    pub fn mapping_context(&self) -> &Arc<Neo4jMappingContext> {
        &self.mapping_context
    }

    pub async fn write_type(&self, id: i64, metadata: &EntityMetadata) -> Result<(), RepoError> {
        self.strategy_for(metadata.kind()).write_type(id, metadata).await
    }

    /// Metadata of the type stored on `state`, or `None` when the strategy
    /// recorded no type.
    pub fn read_type(
        &self,
        state: &PropertyContainer,
    ) -> Result<Option<Arc<EntityMetadata>>, MappingError> {
        self.strategy_for(state.kind())
            .read_alias(state)
            .map(|alias| self.mapping_context.metadata_for_alias(&alias))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{knows, mapping_context, person, recording_database};
    use graphwire_domain::{NodeId, NodeState, RelationshipState};

    #[test]
    fn kind_names_parse_and_display() {
        assert_eq!(
            "label".parse::<TypeRepresentationKind>(),
            Ok(TypeRepresentationKind::Label)
        );
        assert_eq!(
            " Type-Property ".parse::<TypeRepresentationKind>(),
            Ok(TypeRepresentationKind::TypeProperty)
        );
        assert_eq!(
            "noop".parse::<TypeRepresentationKind>(),
            Ok(TypeRepresentationKind::Noop)
        );
        assert!("indexed".parse::<TypeRepresentationKind>().is_err());
        assert_eq!(TypeRepresentationKind::TypeProperty.to_string(), "type-property");
    }

    #[tokio::test]
    async fn label_strategy_writes_alias_marker_and_supertype_labels() {
        let (service, database) = recording_database();
        let strategy = LabelBasedStrategy::new(database);

        strategy.write_type(7, &person()).await.expect("write");

        let statements = service.statements();
        assert_eq!(
            statements[0].text,
            "MATCH (e) WHERE id(e) = $id SET e:`Person`:`_Person`:`Animal`"
        );
        assert_eq!(statements[0].params.get("id"), Some(&7i64.into()));
    }

    #[test]
    fn label_strategy_reads_concrete_marker() {
        let (_, database) = recording_database();
        let strategy = LabelBasedStrategy::new(database);
        let node = NodeState::new()
            .with_label("Animal")
            .with_label("Person")
            .with_label("_Person");

        assert_eq!(
            strategy.read_alias(&PropertyContainer::Node(node)),
            Some("Person".to_string())
        );
    }

    #[test]
    fn label_strategy_ignores_underscored_labels_without_a_twin() {
        let (_, database) = recording_database();
        let strategy = LabelBasedStrategy::new(database);

        let underscored_supertype = NodeState::new()
            .with_label("_Base")
            .with_label("Person")
            .with_label("_Person");
        assert_eq!(
            strategy.read_alias(&PropertyContainer::Node(underscored_supertype)),
            Some("Person".to_string())
        );

        let underscored_alias = NodeState::new()
            .with_label("__Foo")
            .with_label("_Foo");
        assert_eq!(
            strategy.read_alias(&PropertyContainer::Node(underscored_alias)),
            Some("_Foo".to_string())
        );

        let marker_only = NodeState::new().with_label("_Orphan");
        assert_eq!(strategy.read_alias(&PropertyContainer::Node(marker_only)), None);
    }

    #[tokio::test]
    async fn type_property_strategy_round_trips_alias() {
        let (service, database) = recording_database();
        let strategy = TypePropertyStrategy::new(database, EntityKind::Relationship);

        strategy.write_type(3, &knows()).await.expect("write");
        let statement = &service.statements()[0];
        assert!(statement.text.starts_with("MATCH ()-[e]->()"));
        assert_eq!(statement.params.get("alias"), Some(&"KNOWS".into()));

        let rel = RelationshipState::new("KNOWS", NodeId::new(1), NodeId::new(2))
            .with_property(TYPE_PROPERTY, "KNOWS");
        assert_eq!(
            strategy.read_alias(&PropertyContainer::Relationship(rel)),
            Some("KNOWS".to_string())
        );
    }

    #[test]
    fn factory_rejects_labels_for_relationships() {
        let (_, database) = recording_database();
        let factory = DefaultTypeRepresentationStrategyFactory::new(
            database,
            TypeRepresentationKind::Label,
            TypeRepresentationKind::Label,
        );

        assert_eq!(factory.node_strategy().expect("node").name(), "LabelBasedStrategy");
        assert!(matches!(
            factory.relationship_strategy(),
            Err(MappingError::UnsupportedStrategy {
                kind: EntityKind::Relationship,
                ..
            })
        ));
    }

    #[test]
    fn aggregate_resolves_stored_type_through_the_context() {
        let (_, database) = recording_database();
        let strategies = TypeRepresentationStrategies::new(
            mapping_context(),
            Arc::new(LabelBasedStrategy::new(Arc::clone(&database))),
            Arc::new(NoopStrategy::new(EntityKind::Relationship)),
        );

        let node = PropertyContainer::Node(NodeState::new().with_label("_Person"));
        let metadata = strategies.read_type(&node).expect("read").expect("typed");
        assert_eq!(metadata.type_name(), "Person");

        let rel = PropertyContainer::Relationship(RelationshipState::new(
            "KNOWS",
            NodeId::new(1),
            NodeId::new(2),
        ));
        assert!(strategies.read_type(&rel).expect("read").is_none());

        let unknown = PropertyContainer::Node(NodeState::new().with_label("_Ghost"));
        assert!(matches!(
            strategies.read_type(&unknown),
            Err(MappingError::UnknownType(_))
        ));
    }
}
