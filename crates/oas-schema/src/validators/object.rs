use oas_core::{Schema, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: object`.
///
/// Property counts and `required` are checked first. Properties are then
/// visited in instance order: declared ones against their node, undeclared
/// ones against `additionalProperties`, or rejected at the object's path
/// when additional properties are disallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectValidator;

impl TypeValidator for ObjectValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        schema.schema_type == Some(SchemaType::Object)
    }

    fn validate(
        &self,
        root: &JsonValidator<'_>,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        let Some(object) = instance.as_object() else {
            return fail(
                location,
                FailureKind::TypeMismatch {
                    expected: SchemaType::Object,
                },
            );
        };

        if let Some(limit) = schema.max_properties {
            if object.len() > limit {
                return fail(location, FailureKind::MaxProperties { limit });
            }
        }

        if let Some(limit) = schema.min_properties {
            if object.len() < limit {
                return fail(location, FailureKind::MinProperties { limit });
            }
        }

        // `required` is a BTreeSet, so the list comes out sorted.
        let missing: Vec<String> = schema
            .required
            .iter()
            .filter(|name| !object.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return fail(location, FailureKind::RequiredPropertiesMissing { missing });
        }

        for (name, value) in object {
            if let Some(property) = schema.properties.get(name) {
                root.validate_at(property, value, &location.property(name))?;
                continue;
            }

            if !schema.additional_properties_allowed {
                return fail(
                    location,
                    FailureKind::AdditionalPropertyNotAllowed {
                        property: name.clone(),
                    },
                );
            }

            if let Some(additional) = schema.additional_properties.as_deref() {
                root.validate_at(additional, value, &location.property(name))?;
            }
        }

        Ok(())
    }
}
