//! # oas-core — Foundational Types for API Contract Testing
//!
//! This crate is the leaf of the workspace. It defines the in-memory model
//! of an API description document and the schema nodes embedded in it.
//! Every other crate in the workspace depends on `oas-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed schema nodes.** [`Schema`] carries every constraint keyword
//!    the validator understands as a typed field. The serialized
//!    `additionalProperties: false | true | {schema}` tri-state is split into
//!    `additional_properties_allowed` plus an optional nested node on load.
//!
//! 2. **References are indirections.** A node with a [`Reference`] is a pure
//!    pointer into `components.schemas`. [`Document::resolve_schema`] follows
//!    the pointer on every call; nothing is cached.
//!
//! 3. **Immutable during validation.** A [`Document`] is built once (loaded
//!    or assembled in code) and then only read. It is `Send + Sync`, so many
//!    validation calls may share it across threads.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oas-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod load;
pub mod reference;
pub mod schema;

// Re-export primary types for ergonomic imports.
pub use document::{
    Components, Document, Header, Info, MediaType, Operation, OperationType, Parameter,
    ParameterLocation, PathItem, RequestBody, Response,
};
pub use error::{DocumentError, SchemaError};
pub use load::{load_instance, yaml_to_json_value};
pub use reference::Reference;
pub use schema::{Schema, SchemaType};
