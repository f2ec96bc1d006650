use std::cmp::Ordering;

use oas_core::{Schema, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::numeric::Numeric;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: array`.
///
/// Elements are validated against `items` first, in order, so a bad element
/// is reported before a size violation. `maxItems`, `minItems` and
/// `uniqueItems` failures are reported at the array's own path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayValidator;

impl TypeValidator for ArrayValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        schema.schema_type == Some(SchemaType::Array)
    }

    fn validate(
        &self,
        root: &JsonValidator<'_>,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        let Some(elements) = instance.as_array() else {
            return fail(
                location,
                FailureKind::TypeMismatch {
                    expected: SchemaType::Array,
                },
            );
        };

        if let Some(items) = schema.items.as_deref() {
            for (index, element) in elements.iter().enumerate() {
                root.validate_at(items, element, &location.index(index))?;
            }
        }

        if let Some(limit) = schema.max_items {
            if elements.len() > limit {
                return fail(location, FailureKind::MaxItems { limit });
            }
        }

        if let Some(limit) = schema.min_items {
            if elements.len() < limit {
                return fail(location, FailureKind::MinItems { limit });
            }
        }

        if schema.unique_items && has_duplicates(elements) {
            return fail(location, FailureKind::UniqueItems);
        }

        Ok(())
    }
}

fn has_duplicates(elements: &[Value]) -> bool {
    elements.iter().enumerate().any(|(i, a)| {
        elements[i + 1..]
            .iter()
            .any(|b| instances_equal(a, b))
    })
}

/// Structural equality: numbers by value, objects regardless of key order.
fn instances_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            Numeric::from_json(x).compare(Numeric::from_json(y)) == Some(Ordering::Equal)
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| instances_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| instances_equal(a, b)))
        }
        _ => a == b,
    }
}
