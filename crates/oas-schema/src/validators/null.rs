use oas_core::{Schema, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: null`. The instance must be JSON `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullValidator;

impl TypeValidator for NullValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        schema.schema_type == Some(SchemaType::Null)
    }

    fn validate(
        &self,
        _root: &JsonValidator<'_>,
        _schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        if !instance.is_null() {
            return fail(
                location,
                FailureKind::TypeMismatch {
                    expected: SchemaType::Null,
                },
            );
        }
        Ok(())
    }
}
