//! Default result converter: scalars through the conversion service, graph
//! elements through the entity persister.

use std::sync::Arc;

use graphwire_domain::{Row, RowValue};

use super::persister::EntityPersister;
use crate::infrastructure::ports::{
    ConversionError, ConversionService, MappingError, ResultConverter, ResultTarget, ResultValue,
};

pub struct EntityResultConverter {
    conversion_service: Arc<dyn ConversionService>,
    persister: Arc<EntityPersister>,
}

impl EntityResultConverter {
    pub fn new(conversion_service: Arc<dyn ConversionService>, persister: Arc<EntityPersister>) -> Self {
        Self {
            conversion_service,
            persister,
        }
    }

    pub fn conversion_service(&self) -> &Arc<dyn ConversionService> {
        &self.conversion_service
    }

    pub fn entity_persister(&self) -> &Arc<EntityPersister> {
        &self.persister
    }

    fn single_column(row: &Row) -> Result<&RowValue, MappingError> {
        row.single().ok_or(MappingError::NotSingleColumn(row.len()))
    }
}

impl ResultConverter for EntityResultConverter {
    fn convert(&self, row: &Row, target: &ResultTarget) -> Result<ResultValue, MappingError> {
        match target {
            ResultTarget::Row => Ok(ResultValue::Row(row.clone())),
            ResultTarget::Value(kind) => match Self::single_column(row)? {
                RowValue::Value(value) => Ok(ResultValue::Value(
                    self.conversion_service.convert(value.clone(), *kind)?,
                )),
                RowValue::Node(_) | RowValue::Relationship(_) => {
                    Err(MappingError::Conversion(ConversionError::Invalid {
                        value: "graph element".to_string(),
                        to: *kind,
                    }))
                }
            },
            ResultTarget::Entity(type_name) => {
                if !self.persister.is_managed(type_name) {
                    return Err(MappingError::UnknownType(type_name.clone()));
                }
                let state = Self::single_column(row)?
                    .to_container()
                    .ok_or_else(|| MappingError::NotAGraphElement(type_name.clone()))?;
                Ok(ResultValue::Entity(self.persister.project(&state, type_name)?))
            }
        }
    }

    fn describe(&self) -> String {
        format!(
            "EntityResultConverter({})",
            self.conversion_service.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::conversion::DefaultConversionService;
    use crate::test_fixtures::{entity_persister, recording_database};
    use graphwire_domain::{NodeId, NodeState, PropertyValue, ValueKind};

    fn converter() -> EntityResultConverter {
        let (_, database) = recording_database();
        EntityResultConverter::new(
            Arc::new(DefaultConversionService::new()),
            Arc::new(entity_persister(database, None)),
        )
    }

    #[test]
    fn scalar_columns_go_through_the_conversion_service() {
        let row = Row::new().with("count", "42");
        let value = converter()
            .convert(&row, &ResultTarget::Value(ValueKind::Int))
            .expect("convert");
        assert_eq!(value, ResultValue::Value(PropertyValue::Int(42)));
    }

    #[test]
    fn node_columns_project_onto_managed_types() {
        let node = NodeState::new()
            .with_id(NodeId::new(3))
            .with_property("name", "Ada");
        let row = Row::new().with_node("p", node);

        let entity = converter()
            .convert(&row, &ResultTarget::Entity("Person".to_string()))
            .expect("convert")
            .into_entity()
            .expect("entity");
        assert_eq!(entity.type_name, "Person");
        assert_eq!(entity.id, Some(3));
    }

    #[test]
    fn entity_targets_must_be_managed_graph_elements() {
        let converter = converter();
        let scalar = Row::new().with("name", "Ada");

        assert!(matches!(
            converter.convert(&scalar, &ResultTarget::Entity("Ghost".to_string())),
            Err(MappingError::UnknownType(_))
        ));
        assert!(matches!(
            converter.convert(&scalar, &ResultTarget::Entity("Person".to_string())),
            Err(MappingError::NotAGraphElement(_))
        ));
    }

    #[test]
    fn multi_column_rows_need_the_row_target() {
        let converter = converter();
        let row = Row::new().with("a", 1i64).with("b", 2i64);

        assert!(matches!(
            converter.convert(&row, &ResultTarget::Value(ValueKind::Int)),
            Err(MappingError::NotSingleColumn(2))
        ));
        assert_eq!(
            converter.convert(&row, &ResultTarget::Row).expect("row"),
            ResultValue::Row(row.clone())
        );
    }
}
