//! # Type Validators
//!
//! One [`TypeValidator`](crate::TypeValidator) per JSON type. Each applies to
//! nodes whose declared `type` names its JSON type and owns every keyword
//! for that type. A validator first checks the instance kind and fails with
//! [`FailureKind::TypeMismatch`](crate::FailureKind::TypeMismatch) when it
//! does not match.
//!
//! [`ArrayValidator`] and [`ObjectValidator`] recurse through the dispatcher
//! for element and property values.

mod array;
mod boolean;
mod null;
mod number;
mod object;
mod string;

pub use array::ArrayValidator;
pub use boolean::BooleanValidator;
pub use null::NullValidator;
pub use number::NumberValidator;
pub use object::ObjectValidator;
pub use string::StringValidator;

#[cfg(test)]
pub(crate) mod test_support {
    use oas_core::{Document, Schema};
    use serde_json::Value;

    use crate::{JsonValidator, ValidationError};

    /// Validate against a document with no components.
    pub(crate) fn validate(schema: &Schema, instance: Value) -> Result<(), ValidationError> {
        let doc = Document::new("test", "v1");
        JsonValidator::new(&doc).validate(schema, &instance)
    }

    /// The rendered failure, panicking if validation passed or the schema was rejected.
    pub(crate) fn failure(schema: &Schema, instance: Value) -> String {
        match validate(schema, instance) {
            Err(ValidationError::Failure(f)) => f.to_string(),
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }
}
