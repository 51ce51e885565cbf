use serde_json::Value;

use crate::domain::{
    admin::AdminRegistry,
    entities::Event,
    error::DomainError,
    schema::EntitySchema,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_event(event: &Event) -> Result<(), DomainError> {
        event.validate()
    }

    pub fn validate_payload(schema: &EntitySchema, payload: &Value) -> Result<(), DomainError> {
        schema.validate(payload).map_err(DomainError::Validation)
    }

    /// Every relation field of every registered entity must point at a
    /// registered key, or the form planner could not load its options.
    pub fn validate_registry(registry: &AdminRegistry) -> Result<(), DomainError> {
        for entry in registry.entries() {
            for (name, field) in entry.config.schema.iter() {
                let Some(relation) = &field.meta.relation else {
                    continue;
                };
                if !registry.contains(&relation.target) {
                    return Err(DomainError::InvalidAdminConfig {
                        entity: entry.key.clone(),
                        reason: format!(
                            "field '{name}' references unregistered entity '{}'",
                            relation.target
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::admin::{AdminEntityConfig, builtin_registry};
    use crate::domain::schema::Field;
    use crate::domain::value_objects::Cardinality;

    #[test]
    fn builtin_registry_is_closed() {
        let registry = builtin_registry().unwrap();
        assert!(DomainValidator::validate_registry(&registry).is_ok());
    }

    #[test]
    fn dangling_relation_is_rejected() {
        let schema = EntitySchema::new("Venue").field(
            "cityId",
            Field::relation("cities", "name", Cardinality::Single, "City"),
        );
        let config = AdminEntityConfig::builder("Venue", schema)
            .endpoint("/venues")
            .build()
            .unwrap();
        let registry = AdminRegistry::builder()
            .register("venues", config, "/admin/venues", None, None)
            .build();
        let err = DomainValidator::validate_registry(&registry).unwrap_err();
        assert!(err.to_string().contains("cities"));
    }
}
