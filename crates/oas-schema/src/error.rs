//! # Validation Errors
//!
//! A [`ValidationFailure`] pairs the rendered path of the offending value
//! with a [`FailureKind`]. Its `Display` form is the one-line diagnostic
//! contract tests print, e.g. `Path: id. Instance is not of type 'number'`.
//!
//! [`ValidationError`] is what the dispatcher returns: either a failure or a
//! fatal [`SchemaError`] from the schema itself.

use std::fmt;

use oas_core::{SchemaError, SchemaType};
use thiserror::Error;

use crate::location::InstanceLocation;

/// The rule an instance violated.
///
/// The `Display` text of each variant is the human-readable message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FailureKind {
    /// The instance is not of the declared JSON type.
    #[error("Instance is not of type '{expected}'")]
    TypeMismatch {
        /// The declared type.
        expected: SchemaType,
    },

    /// The number is not an exact multiple of `multipleOf`.
    #[error("Number is not evenly divisible by multipleOf")]
    MultipleOf {
        /// The declared divisor.
        multiple_of: f64,
    },

    /// The number reaches an exclusive `maximum`.
    #[error("Number is greater than, or equal to, maximum")]
    ExclusiveMaximum {
        /// The declared bound.
        limit: f64,
    },

    /// The number exceeds `maximum`.
    #[error("Number is greater than maximum")]
    Maximum {
        /// The declared bound.
        limit: f64,
    },

    /// The number reaches an exclusive `minimum`.
    #[error("Number is less than, or equal to, minimum")]
    ExclusiveMinimum {
        /// The declared bound.
        limit: f64,
    },

    /// The number is below `minimum`.
    #[error("Number is less than minimum")]
    Minimum {
        /// The declared bound.
        limit: f64,
    },

    /// The string is longer than `maxLength`.
    #[error("String length is greater than maxLength")]
    MaxLength {
        /// The declared bound.
        limit: usize,
    },

    /// The string is shorter than `minLength`.
    #[error("String length is less than minLength")]
    MinLength {
        /// The declared bound.
        limit: usize,
    },

    /// The string contains no match for `pattern`.
    #[error("String does not match pattern")]
    Pattern {
        /// The declared pattern.
        pattern: String,
    },

    /// The array has more elements than `maxItems`.
    #[error("Array size is greater than maxItems")]
    MaxItems {
        /// The declared bound.
        limit: usize,
    },

    /// The array has fewer elements than `minItems`.
    #[error("Array size is less than minItems")]
    MinItems {
        /// The declared bound.
        limit: usize,
    },

    /// Two array elements are structurally equal.
    #[error("Array does not contain uniqueItems")]
    UniqueItems,

    /// The object has more properties than `maxProperties`.
    #[error("Number of properties is greater than maxProperties")]
    MaxProperties {
        /// The declared bound.
        limit: usize,
    },

    /// The object has fewer properties than `minProperties`.
    #[error("Number of properties is less than minProperties")]
    MinProperties {
        /// The declared bound.
        limit: usize,
    },

    /// One or more `required` properties are absent.
    ///
    /// The message does not list them; `missing` carries the names, sorted.
    #[error("Required property(s) not present")]
    RequiredPropertiesMissing {
        /// Absent property names.
        missing: Vec<String>,
    },

    /// A property not named in `properties` appeared while
    /// `additionalProperties` is `false`.
    #[error("Additional properties not allowed")]
    AdditionalPropertyNotAllowed {
        /// The first undeclared property found.
        property: String,
    },

    /// A failure raised by a custom [`TypeValidator`](crate::TypeValidator).
    #[error("{0}")]
    Custom(String),
}

/// An instance does not conform to its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    path: String,
    kind: FailureKind,
}

impl ValidationFailure {
    /// A failure of `kind` at `location`.
    pub fn at(location: &InstanceLocation<'_>, kind: FailureKind) -> Self {
        Self {
            path: location.to_string(),
            kind,
        }
    }

    /// The rendered location of the offending value; `.` for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The violated rule.
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// The human-readable message, without the path.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The root path doubles as the sentence stop.
        if self.path == "." {
            write!(f, "Path: . {}", self.kind)
        } else {
            write!(f, "Path: {}. {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Result of a failed validation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The schema cannot be evaluated. Fatal.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// The instance does not conform.
    #[error(transparent)]
    Failure(#[from] ValidationFailure),
}

impl ValidationError {
    /// The failure, if this is a contract violation rather than a schema defect.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Failure(f) => Some(f),
            Self::Schema(_) => None,
        }
    }

    /// Whether this is a contract violation.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Shorthand for validators: fail with `kind` at `location`.
pub(crate) fn fail<T>(
    location: &InstanceLocation<'_>,
    kind: FailureKind,
) -> Result<T, ValidationError> {
    Err(ValidationFailure::at(location, kind).into())
}
