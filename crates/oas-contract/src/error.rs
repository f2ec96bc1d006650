//! # Contract Errors
//!
//! Every way a contract test can fail, from an unknown document name to a
//! response body that does not match its schema.

use std::path::PathBuf;

use oas_core::DocumentError;
use oas_schema::ValidationError;
use thiserror::Error;

/// A contract test could not run, or the API broke the contract.
#[derive(Error, Debug)]
pub enum ContractError {
    /// No document is registered under this name.
    #[error("document not found: {name}")]
    DocumentNotFound {
        /// The requested document name.
        name: String,
    },

    /// A document is already registered under this name.
    #[error("document already registered: {name}")]
    DuplicateDocument {
        /// The conflicting document name.
        name: String,
    },

    /// A registered document could not be written out.
    #[error("cannot write document to {}: {source}", path.display())]
    WriteDocument {
        /// Target file or directory.
        path: PathBuf,
        /// Underlying I/O or serialization failure.
        #[source]
        source: std::io::Error,
    },

    /// Path, operation or response lookup failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// A parameter value cannot be placed in the request.
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// No serializer exists for the request body's media type.
    #[error("unsupported request media type: {media_type}")]
    UnsupportedMediaType {
        /// The media type selected for the body.
        media_type: String,
    },

    /// The request body could not be serialized for its media type.
    #[error("cannot encode request body as {media_type}: {reason}")]
    RequestBody {
        /// The media type selected for the body.
        media_type: String,
        /// Serializer message.
        reason: String,
    },

    /// The transport failed to produce a response.
    #[error("transport failed: {0:#}")]
    Transport(anyhow::Error),

    /// The response status differs from the expected one.
    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Expected status code as written in the document.
        expected: String,
        /// Status received.
        actual: u16,
    },

    /// A header the response declares as required is absent.
    #[error("required response header missing: {header}")]
    MissingHeader {
        /// Header name as declared.
        header: String,
    },

    /// The response declares content but carries no content type.
    #[error("response has no content type; expected one of {expected:?}")]
    MissingContent {
        /// Declared media types.
        expected: Vec<String>,
    },

    /// The response content type is not among the declared media types.
    #[error("unexpected response media type {media_type}; expected one of {expected:?}")]
    UnexpectedMediaType {
        /// Media type received.
        media_type: String,
        /// Declared media types.
        expected: Vec<String>,
    },

    /// A JSON response body could not be parsed.
    #[error("response body is not valid JSON: {reason}")]
    InvalidBody {
        /// Parser message.
        reason: String,
    },

    /// The response body does not match its declared schema, or the schema
    /// itself cannot be evaluated.
    #[error("response body does not match schema: {0}")]
    Validation(#[from] ValidationError),
}

impl ContractError {
    /// Whether the API broke its contract, as opposed to the test or the
    /// document being unusable.
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::StatusMismatch { .. }
            | Self::MissingHeader { .. }
            | Self::MissingContent { .. }
            | Self::UnexpectedMediaType { .. }
            | Self::InvalidBody { .. } => true,
            Self::Validation(e) => e.is_failure(),
            _ => false,
        }
    }
}
