//! Metadata-driven entity validation.

use graphwire_domain::{EntityInstance, EntityMetadata};

use crate::infrastructure::ports::{ConstraintViolation, Validator};

/// Checks that every required property is present and non-null, and that the
/// entity's kind matches its metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetadataValidator;

impl MetadataValidator {
    pub fn new() -> Self {
        Self
    }
}

impl Validator for MetadataValidator {
    fn validate(&self, entity: &EntityInstance, metadata: &EntityMetadata) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        if entity.kind != metadata.kind() {
            violations.push(ConstraintViolation::new(
                "",
                format!(
                    "{} is a {} entity, got a {}",
                    metadata.type_name(),
                    metadata.kind(),
                    entity.kind
                ),
            ));
        }

        for property in metadata.required_properties() {
            match entity.property(&property.name) {
                Some(value) if !value.is_null() => {}
                _ => violations.push(ConstraintViolation::new(&property.name, "must not be null")),
            }
        }

        violations
    }

    fn describe(&self) -> String {
        "MetadataValidator".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphwire_domain::{EntityKind, PropertyMetadata, PropertyValue};

    fn person() -> EntityMetadata {
        EntityMetadata::node("Person")
            .expect("valid metadata")
            .with_property(PropertyMetadata::new("name").required())
            .with_property(PropertyMetadata::new("age"))
    }

    #[test]
    fn accepts_complete_entity() {
        let entity = EntityInstance::new("Person", EntityKind::Node).with_property("name", "Ada");
        assert!(MetadataValidator::new().validate(&entity, &person()).is_empty());
    }

    #[test]
    fn reports_missing_and_null_required_properties() {
        let validator = MetadataValidator::new();

        let missing = EntityInstance::new("Person", EntityKind::Node).with_property("age", 36i64);
        let violations = validator.validate(&missing, &person());
        assert_eq!(violations, vec![ConstraintViolation::new("name", "must not be null")]);

        let null = EntityInstance::new("Person", EntityKind::Node).with_property("name", PropertyValue::Null);
        assert_eq!(validator.validate(&null, &person()).len(), 1);
    }

    #[test]
    fn reports_kind_mismatch() {
        let entity = EntityInstance::new("Person", EntityKind::Relationship).with_property("name", "Ada");
        let violations = MetadataValidator::new().validate(&entity, &person());
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("node"));
    }
}
