//! # Response Assertion
//!
//! [`assert_response`] checks a received [`ApiResponse`] against the
//! [`Response`] declared for the expected status, in this order:
//!
//! 1. the status code equals the expected one;
//! 2. every header declared `required` is present (names compare
//!    case-insensitively);
//! 3. when content is declared, the response content type is one of the
//!    declared media types;
//! 4. for JSON media types, the body parses and validates against the
//!    declared schema.
//!
//! Non-JSON bodies and media types declared without a schema are accepted
//! after step 3 with a warning.

use oas_core::{Document, Response};
use oas_schema::JsonValidator;
use serde_json::Value;

use crate::error::ContractError;
use crate::media;

/// A response received from the API under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs as received.
    pub headers: Vec<(String, String)>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// An empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a header (builder style).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a body and its `Content-Type` (builder style).
    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case("content-type"));
        self.headers.push(("Content-Type".to_string(), content_type.into()));
        self.body = body.into();
        self
    }

    /// Set a JSON body (builder style).
    pub fn with_json(self, body: &Value) -> Self {
        self.with_body("application/json; charset=utf-8", body.to_string())
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }
}

/// Check `response` against `response_spec`, the response `document`
/// declares for `expected_status`.
pub fn assert_response(
    document: &Document,
    expected_status: &str,
    response_spec: &Response,
    response: &ApiResponse,
) -> Result<(), ContractError> {
    if response.status.to_string() != expected_status {
        return Err(ContractError::StatusMismatch {
            expected: expected_status.to_string(),
            actual: response.status,
        });
    }

    for (name, header) in &response_spec.headers {
        if header.required && response.header(name).is_none() {
            return Err(ContractError::MissingHeader {
                header: name.clone(),
            });
        }
    }

    if response_spec.content.is_empty() {
        tracing::debug!(status = expected_status, "response matches (no content declared)");
        return Ok(());
    }

    let declared: Vec<String> = response_spec.content.keys().cloned().collect();
    let Some(content_type) = response.content_type() else {
        return Err(ContractError::MissingContent { expected: declared });
    };
    let essence = media::essence(content_type);
    let Some((media_type, declared_media)) = response_spec
        .content
        .iter()
        .find(|(key, _)| media::essence(key) == essence)
    else {
        return Err(ContractError::UnexpectedMediaType {
            media_type: content_type.to_string(),
            expected: declared,
        });
    };

    if !media::is_json(media_type) {
        tracing::warn!(media_type = %media_type, "skipping body validation for non-JSON media type");
        return Ok(());
    }
    let Some(schema) = declared_media.schema.as_ref() else {
        tracing::warn!(media_type = %media_type, "no schema declared; skipping body validation");
        return Ok(());
    };

    let body: Value =
        serde_json::from_slice(&response.body).map_err(|e| ContractError::InvalidBody {
            reason: e.to_string(),
        })?;
    JsonValidator::new(document).validate(schema, &body)?;

    tracing::debug!(status = expected_status, media_type = %media_type, "response matches");
    Ok(())
}
