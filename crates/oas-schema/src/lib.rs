//! # oas-schema — Schema Validation
//!
//! Checks whether a JSON instance conforms to a schema node of an API
//! description document.
//!
//! ## Structure
//!
//! - [`JsonValidator`] is the dispatcher. It resolves a node's reference
//!   against the [`Document`](oas_core::Document) and runs every registered
//!   [`TypeValidator`] whose applicability check accepts the node.
//! - [`validators`] holds the six built-in type validators (null, boolean,
//!   number, string, array, object). Array and object validators recurse
//!   through the dispatcher for nested values.
//! - [`ValidationFailure`] is the single diagnostic returned when an
//!   instance does not conform: the [`InstanceLocation`] of the offending
//!   value rendered as a path, plus a [`FailureKind`].
//!
//! ## Failure Tiers
//!
//! [`ValidationError::Failure`] is an expected outcome: the instance broke
//! the contract. [`ValidationError::Schema`] means the schema itself is
//! unusable (dangling reference, invalid pattern) and is an authoring
//! defect.
//!
//! Validation is fail-fast: the first violation found, depth-first in
//! instance order, is the one reported.

pub mod error;
pub mod location;
mod numeric;
pub mod validator;
pub mod validators;

pub use error::{FailureKind, ValidationError, ValidationFailure};
pub use location::{InstanceLocation, Segment};
pub use validator::{JsonValidator, TypeValidator, ValidatorOptions};
