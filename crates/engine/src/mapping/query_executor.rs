//! Typed query helpers over a Cypher query engine.

use std::sync::Arc;

use graphwire_domain::{EntityInstance, PropertyValue, Statement, ValueKind};

use crate::infrastructure::ports::{MappingError, QueryEngine, ResultTarget, ResultValue};

pub struct CypherQueryExecutor {
    engine: Arc<dyn QueryEngine>,
}

impl CypherQueryExecutor {
    pub fn new(engine: Arc<dyn QueryEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<dyn QueryEngine> {
        &self.engine
    }

    /// Every row of `statement`, converted to `target`.
    pub async fn query_for_list(
        &self,
        statement: Statement,
        target: &ResultTarget,
    ) -> Result<Vec<ResultValue>, MappingError> {
        let result = self.engine.query(statement).await?;
        result.to(target)
    }

    /// The single column of the first row, converted to `kind`.
    pub async fn query_for_value(
        &self,
        statement: Statement,
        kind: ValueKind,
    ) -> Result<Option<PropertyValue>, MappingError> {
        let result = self.engine.query(statement).await?;
        Ok(result
            .first(&ResultTarget::Value(kind))?
            .and_then(ResultValue::into_value))
    }

    /// The first row projected onto the mapped type `type_name`.
    pub async fn query_for_entity(
        &self,
        statement: Statement,
        type_name: &str,
    ) -> Result<Option<EntityInstance>, MappingError> {
        let result = self.engine.query(statement).await?;
        Ok(result
            .first(&ResultTarget::Entity(type_name.to_string()))?
            .and_then(ResultValue::into_entity))
    }
}
