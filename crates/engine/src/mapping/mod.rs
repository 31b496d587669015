//! Mapping runtime collaborators: the metadata registry, type tagging, entity
//! state, persistence helpers and query execution.

mod context;
mod entity_state;
mod index;
mod instantiator;
mod persister;
mod query_executor;
mod remover;
mod result_converter;
mod tools;
mod type_representation;

pub use context::Neo4jMappingContext;
pub use entity_state::EntityStateHandler;
pub use index::IndexProviderImpl;
pub use instantiator::{NodeEntityInstantiator, RelationshipEntityInstantiator};
pub use persister::EntityPersister;
pub use query_executor::CypherQueryExecutor;
pub use remover::EntityRemover;
pub use result_converter::EntityResultConverter;
pub use tools::EntityTools;
pub use type_representation::{
    DefaultTypeRepresentationStrategyFactory, LabelBasedStrategy, NoopStrategy,
    TypePropertyStrategy, TypeRepresentationKind, TypeRepresentationStrategies,
    UnknownStrategyKind, TYPE_PROPERTY,
};

/// Backtick-quote a label, relationship type, property or index name for Cypher.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_backtick_quoted() {
        assert_eq!(quote_identifier("Person"), "`Person`");
        assert_eq!(quote_identifier("odd`name"), "`odd``name`");
    }
}
