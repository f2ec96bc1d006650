//! # API Description Document
//!
//! The [`Document`] owns every schema node reachable from an API
//! description: the named schemas under `components.schemas` and the inline
//! schemas of parameters, request bodies and responses under `paths`.
//!
//! ## Lookup
//!
//! [`Document::path_item`], [`Document::operation`] and
//! [`Document::response`] walk from a path template down to the declared
//! response for a status code, failing with a [`DocumentError`] that names
//! the missing step.
//!
//! ## Reference Resolution
//!
//! [`Document::resolve_reference`] maps a `#/components/schemas/<name>`
//! pointer to its node. [`Document::resolve_schema`] follows a chain of such
//! pointers until it reaches a node without a reference. An acyclic chain
//! lands on a distinct component at every hop, so a chain longer than the
//! number of components must revisit one and is reported as a cycle.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DocumentError, SchemaError};
use crate::reference::Reference;
use crate::schema::Schema;

/// An HTTP method an operation can be declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
    /// `OPTIONS`
    Options,
    /// `HEAD`
    Head,
    /// `PATCH`
    Patch,
    /// `TRACE`
    Trace,
}

impl OperationType {
    /// All operation types in document order.
    pub fn all() -> &'static [OperationType] {
        &[
            Self::Get,
            Self::Put,
            Self::Post,
            Self::Delete,
            Self::Options,
            Self::Head,
            Self::Patch,
            Self::Trace,
        ]
    }

    /// The HTTP method name, upper case.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

impl FromStr for OperationType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|op| op.method().eq_ignore_ascii_case(s))
            .ok_or_else(|| DocumentError::InvalidOperationType(s.to_string()))
    }
}

/// Where a parameter is carried in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// URL query string.
    Query,
    /// Request header.
    Header,
    /// Path template placeholder.
    Path,
    /// Cookie.
    Cookie,
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; for path parameters, the placeholder name.
    pub name: String,
    /// Where the parameter goes.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Schema of the parameter value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// A parameter with no schema.
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            required: location == ParameterLocation::Path,
            location,
            description: None,
            schema: None,
        }
    }
}

/// The schema of one media type of a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl MediaType {
    /// A media type entry with a body schema.
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: Some(schema),
        }
    }
}

/// A declared request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether the body must be sent.
    #[serde(default)]
    pub required: bool,
    /// Accepted media types, in declaration order.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A declared response header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Whether the header must be present on the response.
    #[serde(default)]
    pub required: bool,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// A declared response for one status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Response headers by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Header>,
    /// Response bodies by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

/// A declared operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Operation-level parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body, if the operation accepts one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code key (`"200"`, `"4XX"`, `"default"`).
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// The operations available under one path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Parameters shared by every operation of the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    get: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    put: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    post: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delete: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    head: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    patch: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace: Option<Operation>,
}

impl PathItem {
    fn slot(&self, operation: OperationType) -> &Option<Operation> {
        match operation {
            OperationType::Get => &self.get,
            OperationType::Put => &self.put,
            OperationType::Post => &self.post,
            OperationType::Delete => &self.delete,
            OperationType::Options => &self.options,
            OperationType::Head => &self.head,
            OperationType::Patch => &self.patch,
            OperationType::Trace => &self.trace,
        }
    }

    fn slot_mut(&mut self, operation: OperationType) -> &mut Option<Operation> {
        match operation {
            OperationType::Get => &mut self.get,
            OperationType::Put => &mut self.put,
            OperationType::Post => &mut self.post,
            OperationType::Delete => &mut self.delete,
            OperationType::Options => &mut self.options,
            OperationType::Head => &mut self.head,
            OperationType::Patch => &mut self.patch,
            OperationType::Trace => &mut self.trace,
        }
    }

    /// The operation declared for a method, if any.
    pub fn operation(&self, operation: OperationType) -> Option<&Operation> {
        self.slot(operation).as_ref()
    }

    /// Declare (or replace) the operation for a method.
    pub fn set_operation(&mut self, operation_type: OperationType, operation: Operation) {
        *self.slot_mut(operation_type) = Some(operation);
    }

    /// All declared operations in method order.
    pub fn operations(&self) -> impl Iterator<Item = (OperationType, &Operation)> {
        OperationType::all()
            .iter()
            .filter_map(move |op| self.operation(*op).map(|o| (*op, o)))
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version.
    #[serde(default)]
    pub version: String,
}

/// Reusable document components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Named schemas, the targets of `#/components/schemas/<name>`.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// An API description document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Description format version, e.g. `"3.0.1"`.
    #[serde(default)]
    pub openapi: String,
    /// Metadata.
    #[serde(default)]
    pub info: Info,
    /// Path items by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Named components.
    #[serde(default)]
    pub components: Components,
}

impl Document {
    /// An empty document with the given title and version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: "3.0.1".to_string(),
            info: Info {
                title: title.into(),
                version: version.into(),
            },
            ..Self::default()
        }
    }

    /// Register a named component schema (builder style).
    pub fn with_schema(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.components.schemas.insert(name.into(), schema);
        self
    }

    /// Declare an operation, creating the path item if needed.
    pub fn add_operation(
        &mut self,
        template: impl Into<String>,
        operation_type: OperationType,
        operation: Operation,
    ) {
        self.paths
            .entry(template.into())
            .or_default()
            .set_operation(operation_type, operation);
    }

    /// The path item declared for a template.
    pub fn path_item(&self, template: &str) -> Result<&PathItem, DocumentError> {
        self.paths
            .get(template)
            .ok_or_else(|| DocumentError::PathNotFound {
                template: template.to_string(),
            })
    }

    /// The operation declared for a template and method.
    pub fn operation(
        &self,
        template: &str,
        operation: OperationType,
    ) -> Result<&Operation, DocumentError> {
        self.path_item(template)?
            .operation(operation)
            .ok_or_else(|| DocumentError::OperationNotFound {
                template: template.to_string(),
                operation,
            })
    }

    /// The response declared for a template, method and status code.
    pub fn response(
        &self,
        template: &str,
        operation: OperationType,
        status: &str,
    ) -> Result<&Response, DocumentError> {
        self.operation(template, operation)?
            .responses
            .get(status)
            .ok_or_else(|| DocumentError::ResponseNotFound {
                template: template.to_string(),
                operation,
                status: status.to_string(),
            })
    }

    /// Resolve a single reference to its target node.
    pub fn resolve_reference(&self, reference: &Reference) -> Result<&Schema, SchemaError> {
        let name = reference
            .component_name()
            .ok_or_else(|| SchemaError::UnsupportedReference {
                reference: reference.to_string(),
            })?;
        self.components
            .schemas
            .get(name.as_ref())
            .ok_or_else(|| SchemaError::DanglingReference {
                reference: reference.to_string(),
            })
    }

    /// Follow references from `schema` until a concrete node is reached.
    ///
    /// Returns `schema` itself when it carries no reference. Fails with
    /// [`SchemaError::ReferenceCycle`] once the chain is longer than the
    /// number of components, or than `max_hops` when one is given.
    pub fn resolve_schema<'a>(
        &'a self,
        schema: &'a Schema,
        max_hops: Option<usize>,
    ) -> Result<&'a Schema, SchemaError> {
        let Some(first) = schema.reference.as_ref() else {
            return Ok(schema);
        };
        let max_hops = max_hops.unwrap_or(self.components.schemas.len());

        let mut current = schema;
        let mut hops = 0usize;
        while let Some(reference) = current.reference.as_ref() {
            if hops == max_hops {
                return Err(SchemaError::ReferenceCycle {
                    reference: first.to_string(),
                    max_hops,
                });
            }
            current = self.resolve_reference(reference)?;
            hops += 1;
            tracing::trace!(reference = %reference, hops, "resolved schema reference");
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaType;
    use serde_json::json;

    fn products_document() -> Document {
        serde_json::from_value(json!({
            "openapi": "3.0.1",
            "info": { "title": "Products", "version": "v1" },
            "paths": {
                "/products/{id}": {
                    "parameters": [{ "name": "id", "in": "path", "required": true }],
                    "get": {
                        "operationId": "GetProduct",
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Product" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Product": {
                        "type": "object",
                        "properties": { "id": { "type": "integer" } }
                    },
                    "ProductAlias": { "$ref": "#/components/schemas/Product" },
                    "Loop": { "$ref": "#/components/schemas/Loop" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn operation_type_parses_case_insensitively() {
        assert_eq!("get".parse::<OperationType>().unwrap(), OperationType::Get);
        assert_eq!("PATCH".parse::<OperationType>().unwrap(), OperationType::Patch);
        assert!(matches!(
            "fetch".parse::<OperationType>(),
            Err(DocumentError::InvalidOperationType(_))
        ));
    }

    #[test]
    fn response_lookup_walks_path_operation_status() {
        let doc = products_document();
        let response = doc
            .response("/products/{id}", OperationType::Get, "200")
            .unwrap();
        assert_eq!(response.description, "OK");
        assert!(response.content.contains_key("application/json"));
    }

    #[test]
    fn lookup_failures_name_the_missing_step() {
        let doc = products_document();
        assert!(matches!(
            doc.path_item("/orders"),
            Err(DocumentError::PathNotFound { .. })
        ));
        assert!(matches!(
            doc.operation("/products/{id}", OperationType::Delete),
            Err(DocumentError::OperationNotFound { .. })
        ));
        assert!(matches!(
            doc.response("/products/{id}", OperationType::Get, "404"),
            Err(DocumentError::ResponseNotFound { .. })
        ));
    }

    #[test]
    fn resolve_reference_finds_component() {
        let doc = products_document();
        let target = doc
            .resolve_reference(&Reference::component_schema("Product"))
            .unwrap();
        assert_eq!(target.schema_type, Some(SchemaType::Object));
    }

    #[test]
    fn dangling_and_foreign_references_are_schema_errors() {
        let doc = products_document();
        assert!(matches!(
            doc.resolve_reference(&Reference::component_schema("Missing")),
            Err(SchemaError::DanglingReference { .. })
        ));
        assert!(matches!(
            doc.resolve_reference(&Reference::new("#/definitions/Product")),
            Err(SchemaError::UnsupportedReference { .. })
        ));
    }

    #[test]
    fn resolve_schema_follows_chains_and_detects_cycles() {
        let doc = products_document();
        let alias = Schema::reference(Reference::component_schema("ProductAlias"));
        let resolved = doc.resolve_schema(&alias, None).unwrap();
        assert_eq!(resolved.schema_type, Some(SchemaType::Object));

        let looped = Schema::reference(Reference::component_schema("Loop"));
        assert!(matches!(
            doc.resolve_schema(&looped, Some(8)),
            Err(SchemaError::ReferenceCycle { max_hops: 8, .. })
        ));
        assert!(matches!(
            doc.resolve_schema(&looped, None),
            Err(SchemaError::ReferenceCycle { .. })
        ));
    }

    #[test]
    fn long_acyclic_chains_resolve_without_an_explicit_limit() {
        let mut doc =
            Document::new("Aliases", "v1").with_schema("S0", Schema::of_type(SchemaType::String));
        for i in 1..=40 {
            doc = doc.with_schema(
                format!("S{i}"),
                Schema::reference(Reference::component_schema(&format!("S{}", i - 1))),
            );
        }
        let head = Schema::reference(Reference::component_schema("S40"));
        let resolved = doc.resolve_schema(&head, None).unwrap();
        assert_eq!(resolved.schema_type, Some(SchemaType::String));

        assert!(matches!(
            doc.resolve_schema(&head, Some(32)),
            Err(SchemaError::ReferenceCycle { max_hops: 32, .. })
        ));
    }

    #[test]
    fn resolve_schema_returns_plain_node_unchanged() {
        let doc = Document::default();
        let plain = Schema::of_type(SchemaType::String);
        assert!(std::ptr::eq(doc.resolve_schema(&plain, Some(0)).unwrap(), &plain));
    }

    #[test]
    fn add_operation_creates_path_item() {
        let mut doc = Document::new("Test", "v1");
        doc.add_operation("/items", OperationType::Post, Operation::default());
        doc.add_operation("/items", OperationType::Get, Operation::default());
        let methods: Vec<_> = doc
            .path_item("/items")
            .unwrap()
            .operations()
            .map(|(op, _)| op)
            .collect();
        assert_eq!(methods, vec![OperationType::Get, OperationType::Post]);
    }

    #[test]
    fn path_parameter_defaults_to_required() {
        assert!(Parameter::new("id", ParameterLocation::Path).required);
        assert!(!Parameter::new("q", ParameterLocation::Query).required);
    }
}
