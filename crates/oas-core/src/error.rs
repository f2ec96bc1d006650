//! # Error Types
//!
//! Two families of errors live here:
//!
//! - [`SchemaError`]: the schema itself is unusable (a dangling reference,
//!   an uncompilable pattern). This is an authoring defect, never a
//!   validation outcome, and aborts a validation call.
//! - [`DocumentError`]: a lookup into the document failed (unknown path,
//!   operation or response) or the document could not be loaded.

use thiserror::Error;

use crate::document::OperationType;

/// A schema node cannot be evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The reference names a component schema the document does not define.
    #[error("reference '{reference}' does not resolve to a schema in the document")]
    DanglingReference {
        /// The raw `$ref` value.
        reference: String,
    },

    /// The reference is not a `#/components/schemas/<name>` pointer.
    #[error("reference '{reference}' is not a '#/components/schemas/' pointer")]
    UnsupportedReference {
        /// The raw `$ref` value.
        reference: String,
    },

    /// Following the reference chain did not reach a concrete node.
    #[error("reference chain starting at '{reference}' exceeds {max_hops} hops")]
    ReferenceCycle {
        /// The first `$ref` in the chain.
        reference: String,
        /// The hop limit that was exceeded.
        max_hops: usize,
    },

    /// The `pattern` keyword is not a valid regular expression.
    #[error("pattern '{pattern}' is not a valid regular expression: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// `multipleOf` must be strictly positive.
    #[error("multipleOf must be greater than zero, found {value}")]
    InvalidMultipleOf {
        /// The declared divisor.
        value: f64,
    },
}

/// A document lookup or load failed.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No path item is declared for the template.
    #[error("path '{template}' is not declared in the document")]
    PathNotFound {
        /// The path template, e.g. `/products/{id}`.
        template: String,
    },

    /// The path item declares no operation for the method.
    #[error("operation {operation} is not declared for path '{template}'")]
    OperationNotFound {
        /// The path template.
        template: String,
        /// The requested operation.
        operation: OperationType,
    },

    /// The operation declares no response for the status code.
    #[error("response '{status}' is not declared for {operation} '{template}'")]
    ResponseNotFound {
        /// The path template.
        template: String,
        /// The requested operation.
        operation: OperationType,
        /// The status code key, e.g. `"200"`.
        status: String,
    },

    /// A method name could not be parsed.
    #[error("unknown operation type '{0}'")]
    InvalidOperationType(String),

    /// The document file could not be read.
    #[error("document load error for '{path}': {reason}")]
    Load {
        /// Path to the document file.
        path: String,
        /// Reason the file could not be read.
        reason: String,
    },

    /// The document text is not a valid description.
    #[error("invalid {format} document: {reason}")]
    Parse {
        /// `"JSON"` or `"YAML"`.
        format: &'static str,
        /// Parser diagnostic.
        reason: String,
    },
}
