//! # Dispatcher
//!
//! [`JsonValidator`] is the entry point for validating an instance against a
//! schema node. It resolves the node's reference chain against the owning
//! [`Document`], then runs every registered [`TypeValidator`] whose
//! [`can_validate`](TypeValidator::can_validate) accepts the resolved node.
//!
//! ## Design
//!
//! The validator list is an open registry. The six built-in validators are
//! registered by [`JsonValidator::new`]; callers append their own with
//! [`JsonValidator::with_validator`]. Validators that descend into child
//! values (array, object) receive the dispatcher itself and recurse through
//! [`JsonValidator::validate_at`], so nested references are resolved on
//! every visit.
//!
//! The dispatcher holds shared references, boxed `Send + Sync` validators
//! and a lock-guarded cache of compiled `pattern` regexes, so one instance
//! can serve concurrent validation calls. References are never cached.

use std::collections::HashMap;

use oas_core::{Document, Schema, SchemaError};
use parking_lot::RwLock;
use regex::Regex;
use serde_json::Value;

use crate::error::ValidationError;
use crate::location::InstanceLocation;
use crate::validators::{
    ArrayValidator, BooleanValidator, NullValidator, NumberValidator, ObjectValidator,
    StringValidator,
};

/// Tuning knobs for a [`JsonValidator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Reference chains longer than this fail with
    /// [`SchemaError::ReferenceCycle`](oas_core::SchemaError::ReferenceCycle).
    ///
    /// `None` allows any acyclic chain: only a chain that revisits a
    /// component is rejected.
    pub max_reference_hops: Option<usize>,
}

/// Validation rules for one family of schema nodes.
pub trait TypeValidator: Send + Sync {
    /// Whether this validator applies to the (already resolved) node.
    fn can_validate(&self, schema: &Schema) -> bool;

    /// Check `instance` against `schema`.
    ///
    /// `root` is the dispatcher to recurse through for child values;
    /// `location` is where `instance` sits in the root instance.
    fn validate(
        &self,
        root: &JsonValidator<'_>,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError>;
}

/// Validates JSON instances against schema nodes of one document.
pub struct JsonValidator<'d> {
    document: &'d Document,
    validators: Vec<Box<dyn TypeValidator>>,
    options: ValidatorOptions,
    patterns: RwLock<HashMap<String, Regex>>,
}

impl std::fmt::Debug for JsonValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonValidator")
            .field("document", &self.document.info.title)
            .field("validators", &self.validators.len())
            .field("options", &self.options)
            .field("patterns", &self.patterns.read().len())
            .finish()
    }
}

impl<'d> JsonValidator<'d> {
    /// A dispatcher with the built-in validators and default options.
    pub fn new(document: &'d Document) -> Self {
        Self::with_options(document, ValidatorOptions::default())
    }

    /// A dispatcher with the built-in validators and the given options.
    pub fn with_options(document: &'d Document, options: ValidatorOptions) -> Self {
        Self {
            document,
            validators: vec![
                Box::new(NullValidator),
                Box::new(BooleanValidator),
                Box::new(ObjectValidator),
                Box::new(ArrayValidator),
                Box::new(NumberValidator),
                Box::new(StringValidator),
            ],
            options,
            patterns: RwLock::new(HashMap::new()),
        }
    }

    /// Register an additional validator. It runs after the built-in ones.
    pub fn with_validator(mut self, validator: impl TypeValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// The document references are resolved against.
    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// The options this dispatcher was built with.
    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    /// The compiled form of a `pattern` keyword, compiled once per dispatcher.
    pub fn pattern(&self, pattern: &str) -> Result<Regex, SchemaError> {
        if let Some(regex) = self.patterns.read().get(pattern) {
            return Ok(regex.clone());
        }
        let regex = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.patterns
            .write()
            .entry(pattern.to_string())
            .or_insert_with(|| regex.clone());
        Ok(regex)
    }

    /// Validate `instance` as the root value against `schema`.
    pub fn validate(&self, schema: &Schema, instance: &Value) -> Result<(), ValidationError> {
        let result = self.validate_at(schema, instance, &InstanceLocation::root());
        if let Err(ValidationError::Failure(failure)) = &result {
            tracing::debug!(path = failure.path(), kind = ?failure.kind(), "instance rejected");
        }
        result
    }

    /// Validate a value nested at `location` inside the root instance.
    pub fn validate_at(
        &self,
        schema: &Schema,
        instance: &Value,
        location: &InstanceLocation<'_>,
    ) -> Result<(), ValidationError> {
        let schema = self
            .document
            .resolve_schema(schema, self.options.max_reference_hops)?;

        for validator in &self.validators {
            if validator.can_validate(schema) {
                validator.validate(self, schema, instance, location)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use oas_core::{Reference, SchemaType};
    use serde_json::json;

    fn product_document() -> Document {
        Document::new("Products", "v1").with_schema(
            "Product",
            Schema::of_type(SchemaType::Object)
                .with_property("id", Schema::of_type(SchemaType::Number))
                .with_property("name", Schema::of_type(SchemaType::String))
                .with_required(["id", "name"]),
        )
    }

    #[test]
    fn untyped_node_accepts_anything() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc);
        for instance in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
            assert!(validator.validate(&Schema::default(), &instance).is_ok());
        }
    }

    #[test]
    fn unknown_type_tag_matches_no_validator() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc);
        let schema = Schema::of_type(SchemaType::Unknown("file".to_string()));
        assert!(validator.validate(&schema, &json!(42)).is_ok());
    }

    #[test]
    fn reference_is_resolved_before_dispatch() {
        let doc = product_document();
        let validator = JsonValidator::new(&doc);
        let schema = Schema::reference(Reference::component_schema("Product"));

        assert!(validator
            .validate(&schema, &json!({ "id": 1, "name": "foo" }))
            .is_ok());

        let err = validator.validate(&schema, &json!({ "id": "foo", "name": "foo" }));
        let failure = err.unwrap_err();
        let failure = failure.failure().unwrap();
        assert_eq!(failure.path(), "id");
        assert_eq!(failure.message(), "Instance is not of type 'number'");
    }

    #[test]
    fn dangling_reference_is_a_schema_error() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc);
        let schema = Schema::reference(Reference::component_schema("Missing"));
        let err = validator.validate(&schema, &json!({})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Schema(SchemaError::DanglingReference { .. })
        ));
    }

    #[test]
    fn reference_cycle_is_bounded() {
        let doc = Document::new("t", "v1")
            .with_schema("A", Schema::reference(Reference::component_schema("B")))
            .with_schema("B", Schema::reference(Reference::component_schema("A")));
        let validator = JsonValidator::with_options(
            &doc,
            ValidatorOptions {
                max_reference_hops: Some(4),
            },
        );
        let err = validator
            .validate(&Schema::reference(Reference::component_schema("A")), &json!(1))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Schema(SchemaError::ReferenceCycle { max_hops: 4, .. })
        ));
    }

    #[test]
    fn alias_chains_longer_than_any_fixed_bound_validate_like_their_target() {
        let mut doc =
            Document::new("t", "v1").with_schema("S0", Schema::of_type(SchemaType::String));
        for i in 1..=40 {
            doc = doc.with_schema(
                format!("S{i}"),
                Schema::reference(Reference::component_schema(&format!("S{}", i - 1))),
            );
        }
        let validator = JsonValidator::new(&doc);
        let chained = Schema::reference(Reference::component_schema("S40"));
        let direct = Schema::of_type(SchemaType::String);

        for instance in [json!("x"), json!(1)] {
            assert_eq!(
                validator.validate(&chained, &instance),
                validator.validate(&direct, &instance)
            );
        }
    }

    #[test]
    fn reference_cycle_without_a_limit_is_detected() {
        let doc = Document::new("t", "v1")
            .with_schema("A", Schema::reference(Reference::component_schema("B")))
            .with_schema("B", Schema::reference(Reference::component_schema("A")));
        let err = JsonValidator::new(&doc)
            .validate(&Schema::reference(Reference::component_schema("A")), &json!(1))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Schema(SchemaError::ReferenceCycle { .. })
        ));
    }

    #[test]
    fn patterns_compile_once_per_dispatcher() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc);
        let schema = Schema::array_of(Schema {
            pattern: Some("^[a-z]+$".to_string()),
            ..Schema::of_type(SchemaType::String)
        });
        let instance = Value::Array((0..100).map(|_| json!("abc")).collect());

        assert!(validator.validate(&schema, &instance).is_ok());
        assert_eq!(validator.patterns.read().len(), 1);

        let err = validator.validate(&schema, &json!(["abc", "ABC"])).unwrap_err();
        assert_eq!(err.to_string(), "Path: [1]. String does not match pattern");
        assert_eq!(validator.patterns.read().len(), 1);
    }

    #[test]
    fn invalid_patterns_are_not_cached() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc);
        assert!(matches!(
            validator.pattern("("),
            Err(SchemaError::InvalidPattern { .. })
        ));
        assert!(validator.patterns.read().is_empty());
    }

    struct NoEmptyStrings;

    impl TypeValidator for NoEmptyStrings {
        fn can_validate(&self, schema: &Schema) -> bool {
            schema.schema_type == Some(SchemaType::String)
        }

        fn validate(
            &self,
            _root: &JsonValidator<'_>,
            _schema: &Schema,
            instance: &Value,
            location: &InstanceLocation<'_>,
        ) -> Result<(), ValidationError> {
            if instance.as_str() == Some("") {
                return crate::error::fail(
                    location,
                    FailureKind::Custom("String must not be empty".to_string()),
                );
            }
            Ok(())
        }
    }

    #[test]
    fn custom_validators_run_after_builtins() {
        let doc = Document::new("t", "v1");
        let validator = JsonValidator::new(&doc).with_validator(NoEmptyStrings);
        let schema = Schema::of_type(SchemaType::Object)
            .with_property("name", Schema::of_type(SchemaType::String));

        let err = validator
            .validate(&schema, &json!({ "name": "" }))
            .unwrap_err();
        assert_eq!(err.to_string(), "Path: name. String must not be empty");

        // Built-in type check fires first.
        let err = validator.validate(&schema, &json!({ "name": 3 })).unwrap_err();
        assert_eq!(err.to_string(), "Path: name. Instance is not of type 'string'");
    }

    #[test]
    fn dispatcher_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonValidator<'static>>();
        assert_send_sync::<Document>();
    }
}
