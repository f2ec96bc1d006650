//! # Document Registry
//!
//! [`ApiTests`] owns the documents a test suite runs against, keyed by
//! name. Tests add operations to a document as they describe them, then
//! run an [`ApiCall`] through a [`Transport`].
//!
//! Once a suite has described its operations, [`ApiTests::write_documents`]
//! publishes every document as `<root>/<name>/openapi.json`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use oas_core::{Document, Operation, OperationType};
use serde_json::Value;

use crate::error::ContractError;
use crate::request::{build_request, RequestParameters};
use crate::response::assert_response;
use crate::transport::Transport;

/// One request to send and the status it is expected to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    /// Path template of the operation.
    pub template: String,
    /// Method of the operation.
    pub operation: OperationType,
    /// Expected status code key, e.g. `"201"`.
    pub expected_status: String,
    /// Parameter values by name.
    pub parameters: RequestParameters,
    /// Request body, if any.
    pub body: Option<Value>,
}

impl ApiCall {
    /// A call with no parameters and no body.
    pub fn new(
        template: impl Into<String>,
        operation: OperationType,
        expected_status: impl Into<String>,
    ) -> Self {
        Self {
            template: template.into(),
            operation,
            expected_status: expected_status.into(),
            parameters: RequestParameters::new(),
            body: None,
        }
    }

    /// Set one parameter value (builder style).
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Replace all parameter values (builder style).
    pub fn with_parameters(mut self, parameters: RequestParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the request body (builder style).
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Named API description documents under test.
#[derive(Debug, Default)]
pub struct ApiTests {
    documents: IndexMap<String, Document>,
}

impl ApiTests {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `name`. Names are unique.
    pub fn add_document(
        &mut self,
        name: impl Into<String>,
        document: Document,
    ) -> Result<(), ContractError> {
        let name = name.into();
        if self.documents.contains_key(&name) {
            return Err(ContractError::DuplicateDocument { name });
        }
        self.documents.insert(name, document);
        Ok(())
    }

    /// Declare an operation in a registered document, creating the path
    /// item when the template is new.
    pub fn add_operation(
        &mut self,
        document_name: &str,
        template: &str,
        operation_type: OperationType,
        operation: Operation,
    ) -> Result<(), ContractError> {
        let document = self.documents.get_mut(document_name).ok_or_else(|| {
            ContractError::DocumentNotFound {
                name: document_name.to_string(),
            }
        })?;
        document.add_operation(template, operation_type, operation);
        tracing::debug!(
            document = document_name,
            method = operation_type.method(),
            template,
            "operation described"
        );
        Ok(())
    }

    /// A registered document.
    pub fn document(&self, name: &str) -> Result<&Document, ContractError> {
        self.documents
            .get(name)
            .ok_or_else(|| ContractError::DocumentNotFound {
                name: name.to_string(),
            })
    }

    /// Registered documents in registration order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.documents.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Write every registered document to `<root>/<name>/openapi.json`,
    /// creating directories as needed. Returns the written paths in
    /// registration order.
    pub fn write_documents(&self, root: &Path) -> Result<Vec<PathBuf>, ContractError> {
        let mut written = Vec::with_capacity(self.documents.len());
        for (name, document) in &self.documents {
            let dir = root.join(name);
            fs::create_dir_all(&dir).map_err(|source| ContractError::WriteDocument {
                path: dir.clone(),
                source,
            })?;

            let path = dir.join("openapi.json");
            let write_error = |source: std::io::Error| ContractError::WriteDocument {
                path: path.clone(),
                source,
            };
            let mut writer = BufWriter::new(File::create(&path).map_err(write_error)?);
            serde_json::to_writer_pretty(&mut writer, document)
                .map_err(|e| write_error(e.into()))?;
            writer.flush().map_err(write_error)?;

            tracing::info!(document = %name, path = %path.display(), "wrote document");
            written.push(path);
        }
        Ok(written)
    }

    /// Build the request for `call`, send it, and assert the response
    /// against the one declared for the expected status.
    pub fn test(
        &self,
        document_name: &str,
        call: &ApiCall,
        transport: &impl Transport,
    ) -> Result<(), ContractError> {
        let document = self.document(document_name)?;

        let request = build_request(
            document,
            &call.template,
            call.operation,
            &call.parameters,
            call.body.as_ref(),
        )?;
        let response = transport
            .send(&request)
            .map_err(ContractError::Transport)?;

        let response_spec =
            document.response(&call.template, call.operation, &call.expected_status)?;
        assert_response(document, &call.expected_status, response_spec, &response)
    }
}
