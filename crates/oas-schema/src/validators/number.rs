use std::cmp::Ordering;

use oas_core::{Schema, SchemaError, SchemaType};
use serde_json::Value;

use crate::error::{fail, FailureKind, ValidationError};
use crate::location::InstanceLocation;
use crate::numeric::Numeric;
use crate::validator::{JsonValidator, TypeValidator};

/// Applies to `type: number` and `type: integer`.
///
/// Keywords are checked in the order `multipleOf`, `maximum`, `minimum`.
/// All comparisons are exact decimal comparisons where the values allow it,
/// so `0.3` is a multiple of `0.1` and `10.0` equals a `maximum` of `10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberValidator;

impl TypeValidator for NumberValidator {
    fn can_validate(&self, schema: &Schema) -> bool {
        matches!(
            schema.schema_type,
            Some(SchemaType::Number | SchemaType::Integer)
        )
    }

    fn validate(
        &self,
        _root: &JsonValidator<'_>,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        let integer_only = schema.schema_type == Some(SchemaType::Integer);
        let expected = if integer_only {
            SchemaType::Integer
        } else {
            SchemaType::Number
        };

        let Some(number) = instance.as_number() else {
            return fail(location, FailureKind::TypeMismatch { expected });
        };
        let value = Numeric::from_json(number);
        if integer_only && !value.is_integral() {
            return fail(location, FailureKind::TypeMismatch { expected });
        }

        if let Some(multiple_of) = schema.multiple_of {
            if !(multiple_of.is_finite() && multiple_of > 0.0) {
                return Err(SchemaError::InvalidMultipleOf { value: multiple_of }.into());
            }
            if !value.is_multiple_of(Numeric::from_f64(multiple_of)) {
                return fail(location, FailureKind::MultipleOf { multiple_of });
            }
        }

        if let Some(limit) = schema.maximum {
            let ordering = value.compare(Numeric::from_f64(limit));
            if schema.exclusive_maximum && ordering != Some(Ordering::Less) {
                return fail(location, FailureKind::ExclusiveMaximum { limit });
            }
            if ordering == Some(Ordering::Greater) {
                return fail(location, FailureKind::Maximum { limit });
            }
        }

        if let Some(limit) = schema.minimum {
            let ordering = value.compare(Numeric::from_f64(limit));
            if schema.exclusive_minimum && ordering != Some(Ordering::Greater) {
                return fail(location, FailureKind::ExclusiveMinimum { limit });
            }
            if ordering == Some(Ordering::Less) {
                return fail(location, FailureKind::Minimum { limit });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::{failure, validate};
    use serde_json::json;

    fn number() -> Schema {
        Schema::of_type(SchemaType::Number)
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(
            failure(&number(), json!("foo")),
            "Path: . Instance is not of type 'number'"
        );
        assert_eq!(
            failure(&number(), json!(null)),
            "Path: . Instance is not of type 'number'"
        );
    }

    #[test]
    fn accepts_integers_and_floats() {
        assert!(validate(&number(), json!(1)).is_ok());
        assert!(validate(&number(), json!(-1.5)).is_ok());
        assert!(validate(&number(), json!(u64::MAX)).is_ok());
    }

    #[test]
    fn multiple_of_uses_exact_remainder() {
        let schema = Schema {
            multiple_of: Some(2.0),
            ..number()
        };
        assert!(validate(&schema, json!(10)).is_ok());
        assert_eq!(
            failure(&schema, json!(9)),
            "Path: . Number is not evenly divisible by multipleOf"
        );

        let cents = Schema {
            multiple_of: Some(0.1),
            ..number()
        };
        assert!(validate(&cents, json!(0.3)).is_ok());
        assert!(validate(&cents, json!(12.7)).is_ok());
        assert!(validate(&cents, json!(0.35)).is_err());
    }

    #[test]
    fn non_positive_multiple_of_is_a_schema_error() {
        for divisor in [0.0, -2.0, f64::NAN] {
            let schema = Schema {
                multiple_of: Some(divisor),
                ..number()
            };
            let err = validate(&schema, json!(4)).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::Schema(SchemaError::InvalidMultipleOf { .. })
            ));
        }
    }

    #[test]
    fn inclusive_maximum() {
        let schema = Schema {
            maximum: Some(10.0),
            ..number()
        };
        assert!(validate(&schema, json!(10)).is_ok());
        assert_eq!(
            failure(&schema, json!(10.1)),
            "Path: . Number is greater than maximum"
        );
    }

    #[test]
    fn exclusive_maximum_rejects_the_bound() {
        let schema = Schema {
            maximum: Some(10.0),
            exclusive_maximum: true,
            ..number()
        };
        assert!(validate(&schema, json!(9.999)).is_ok());
        for instance in [json!(10), json!(10.0), json!(11)] {
            assert_eq!(
                failure(&schema, instance),
                "Path: . Number is greater than, or equal to, maximum"
            );
        }
    }

    #[test]
    fn inclusive_minimum() {
        let schema = Schema {
            minimum: Some(10.0),
            ..number()
        };
        assert!(validate(&schema, json!(10)).is_ok());
        assert_eq!(
            failure(&schema, json!(9.9)),
            "Path: . Number is less than minimum"
        );
    }

    #[test]
    fn exclusive_minimum_rejects_the_bound() {
        let schema = Schema {
            minimum: Some(10.0),
            exclusive_minimum: true,
            ..number()
        };
        assert!(validate(&schema, json!(10.1)).is_ok());
        assert_eq!(
            failure(&schema, json!(10)),
            "Path: . Number is less than, or equal to, minimum"
        );
    }

    #[test]
    fn multiple_of_is_checked_before_bounds() {
        let schema = Schema {
            multiple_of: Some(3.0),
            maximum: Some(5.0),
            ..number()
        };
        assert_eq!(
            failure(&schema, json!(7)),
            "Path: . Number is not evenly divisible by multipleOf"
        );
    }

    #[test]
    fn integer_requires_integral_values() {
        let schema = Schema::of_type(SchemaType::Integer);
        assert!(validate(&schema, json!(3)).is_ok());
        assert!(validate(&schema, json!(3.0)).is_ok());
        assert_eq!(
            failure(&schema, json!(3.5)),
            "Path: . Instance is not of type 'integer'"
        );
        assert_eq!(
            failure(&schema, json!("3")),
            "Path: . Instance is not of type 'integer'"
        );
    }

    #[test]
    fn loaded_maximum_survives_a_looser_numeric_exclusive_bound() {
        let schema: Schema = serde_json::from_value(
            json!({ "type": "number", "maximum": 5, "exclusiveMaximum": 10 }),
        )
        .unwrap();
        assert_eq!(
            failure(&schema, json!(7)),
            "Path: . Number is greater than maximum"
        );
        assert!(validate(&schema, json!(5)).is_ok());
    }
}
