use oas_core::{Schema, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: boolean`. The instance must be `true` or `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl TypeValidator for BooleanValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        schema.schema_type == Some(SchemaType::Boolean)
    }

    fn validate(
        &self,
        _root: &JsonValidator<'_>,
        _schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        if !instance.is_boolean() {
            return fail(
                location,
                FailureKind::TypeMismatch {
                    expected: SchemaType::Boolean,
                },
            );
        }
        Ok(())
    }
}
