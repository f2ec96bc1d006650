use oas_core::{Schema, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: string`.
///
/// Lengths count Unicode scalar values. `pattern` is a search: the string
/// passes if any substring matches, so anchors must be written explicitly.
/// Patterns are compiled through the dispatcher's cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl TypeValidator for StringValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        schema.schema_type == Some(SchemaType::String)
    }

    fn validate(
        &self,
        root: &JsonValidator<'_>,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        let Some(text) = instance.as_str() else {
            return fail(
                location,
                FailureKind::TypeMismatch {
                    expected: SchemaType::String,
                },
            );
        };

        let length = text.chars().count();

        if let Some(limit) = schema.max_length {
            if length > limit {
                return fail(location, FailureKind::MaxLength { limit });
            }
        }

        if let Some(limit) = schema.min_length {
            if length < limit {
                return fail(location, FailureKind::MinLength { limit });
            }
        }

        if let Some(pattern) = schema.pattern.as_deref() {
            let regex = root.pattern(pattern)?;
            if !regex.is_match(text) {
                return fail(
                    location,
                    FailureKind::Pattern {
                        pattern: pattern.to_string(),
                    },
                );
            }
        }

        Ok(())
    }
}
