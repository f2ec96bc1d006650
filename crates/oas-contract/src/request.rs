//! # Request Construction
//!
//! [`build_request`] maps an operation declared in a [`Document`] plus
//! caller-supplied parameter values and body onto a transport-neutral
//! [`ApiRequest`].
//!
//! ## Rules
//!
//! - Parameters are the path item's followed by the operation's. When both
//!   declare the same name, the first declaration wins.
//! - Path parameters replace their `{name}` placeholder in the template,
//!   percent-encoded as a single path segment. Query parameters are form-encoded into the query string. Header
//!   parameters become request headers. Cookie parameters are joined into
//!   one `Cookie` header.
//! - `Accept` lists the distinct media types of every declared response.
//! - A body is attached only when the operation declares a request body and
//!   one is given. Its media type is the `Content-Type` parameter when
//!   supplied, else the first declared media type. JSON, form and XML
//!   media types can be encoded.

use std::collections::HashSet;

use indexmap::IndexSet;
use oas_core::{Document, Operation, OperationType, Parameter, ParameterLocation, RequestBody};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::ContractError;
use crate::media;
use crate::xml;

/// Parameter values by name. `Content-Type` selects the body media type.
pub type RequestParameters = Map<String, Value>;

/// The parameter that selects the request body's media type.
const CONTENT_TYPE: &str = "Content-Type";

/// Characters escaped in a path segment: the URL path set plus `/` and `%`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// An encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContent {
    /// Media type the body was encoded as.
    pub media_type: String,
    /// Encoded bytes.
    pub body: Vec<u8>,
}

/// A request ready to hand to a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: OperationType,
    /// Relative URI: the expanded path template plus any query string.
    pub uri: String,
    /// Header name/value pairs in insertion order. Multi-valued headers
    /// appear once per value.
    pub headers: Vec<(String, String)>,
    /// Encoded body, if any.
    pub content: Option<RequestContent>,
}

impl ApiRequest {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every value of a header, matched case-insensitively.
    pub fn header_values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        let name = name.to_owned();
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(&name))
            .map(|(_, value)| value.as_str())
    }

    /// The body parsed as JSON, if it was encoded as JSON.
    pub fn json_body(&self) -> Option<Value> {
        let content = self.content.as_ref()?;
        if !media::is_json(&content.media_type) {
            return None;
        }
        serde_json::from_slice(&content.body).ok()
    }
}

/// Build the request for `operation_type` on `template`.
pub fn build_request(
    document: &Document,
    template: &str,
    operation_type: OperationType,
    parameters: &RequestParameters,
    body: Option<&Value>,
) -> Result<ApiRequest, ContractError> {
    let path_item = document.path_item(template)?;
    let operation = document.operation(template, operation_type)?;
    let declared = declared_parameters(&path_item.parameters, &operation.parameters);

    let mut path = template.to_string();
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut has_query = false;
    let mut headers = Vec::new();
    let mut cookies = Vec::new();

    if let Some(accept) = accept_header(operation) {
        headers.push(("Accept".to_string(), accept));
    }

    for parameter in declared {
        let Some(value) = parameters.get(&parameter.name) else {
            if parameter.location == ParameterLocation::Path {
                tracing::warn!(
                    parameter = %parameter.name,
                    template,
                    "path parameter not supplied; placeholder left in place"
                );
            }
            continue;
        };

        let values = parameter_values(&parameter.name, value)?;
        match parameter.location {
            ParameterLocation::Path => {
                let placeholder = format!("{{{}}}", parameter.name);
                let segment = values
                    .iter()
                    .map(|v| utf8_percent_encode(v, PATH_SEGMENT).to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                path = path.replace(&placeholder, &segment);
            }
            ParameterLocation::Query => {
                for v in &values {
                    query.append_pair(&parameter.name, v);
                    has_query = true;
                }
            }
            ParameterLocation::Header => {
                headers.extend(values.into_iter().map(|v| (parameter.name.clone(), v)));
            }
            ParameterLocation::Cookie => {
                cookies.extend(values.into_iter().map(|v| format!("{}={v}", parameter.name)));
            }
        }
    }

    if !cookies.is_empty() {
        headers.push(("Cookie".to_string(), cookies.join("; ")));
    }

    let uri = if has_query {
        format!("{path}?{}", query.finish())
    } else {
        path
    };

    let content = match (&operation.request_body, body) {
        (Some(declared), Some(body)) => Some(encode_body(declared, parameters, body)?),
        _ => None,
    };

    tracing::debug!(
        method = operation_type.method(),
        uri = %uri,
        has_body = content.is_some(),
        "built request"
    );

    Ok(ApiRequest {
        method: operation_type,
        uri,
        headers,
        content,
    })
}

/// Path-level then operation-level parameters, first declaration per name.
fn declared_parameters<'a>(
    path_level: &'a [Parameter],
    operation_level: &'a [Parameter],
) -> Vec<&'a Parameter> {
    let mut seen = HashSet::new();
    let mut declared = Vec::new();
    for parameter in path_level.iter().chain(operation_level) {
        if seen.insert(parameter.name.as_str()) {
            declared.push(parameter);
        }
    }
    declared
}

fn accept_header(operation: &Operation) -> Option<String> {
    let media_types: IndexSet<&str> = operation
        .responses
        .values()
        .flat_map(|r| r.content.keys().map(String::as_str))
        .collect();
    if media_types.is_empty() {
        return None;
    }
    Some(media_types.into_iter().collect::<Vec<_>>().join(", "))
}

/// Render a parameter value as one string per occurrence.
fn parameter_values(name: &str, value: &Value) -> Result<Vec<String>, ContractError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar_to_string(item).ok_or_else(|| ContractError::InvalidParameter {
                    name: name.to_string(),
                    reason: "array elements must be scalars".to_string(),
                })
            })
            .collect(),
        other => scalar_to_string(other)
            .map(|s| vec![s])
            .ok_or_else(|| ContractError::InvalidParameter {
                name: name.to_string(),
                reason: "objects cannot be sent as parameter values".to_string(),
            }),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn encode_body(
    declared: &RequestBody,
    parameters: &RequestParameters,
    body: &Value,
) -> Result<RequestContent, ContractError> {
    let media_type = match parameters.get(CONTENT_TYPE) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ContractError::InvalidParameter {
                name: CONTENT_TYPE.to_string(),
                reason: "must be a string".to_string(),
            })
        }
        None => declared
            .content
            .keys()
            .next()
            .cloned()
            .ok_or_else(|| ContractError::RequestBody {
                media_type: String::new(),
                reason: "the request body declares no media types".to_string(),
            })?,
    };

    let body = if media::is_json(&media_type) {
        serde_json::to_vec(body).map_err(|e| ContractError::RequestBody {
            media_type: media_type.clone(),
            reason: e.to_string(),
        })?
    } else if media::essence(&media_type) == media::FORM_URLENCODED {
        encode_form(&media_type, body)?.into_bytes()
    } else if media::is_xml(&media_type) {
        let root = xml_root(declared, &media_type);
        xml::encode(&media_type, &root, body)?
    } else {
        return Err(ContractError::UnsupportedMediaType { media_type });
    };

    Ok(RequestContent { media_type, body })
}

/// The body schema's component name, else a generic root element.
fn xml_root(declared: &RequestBody, media_type: &str) -> String {
    declared
        .content
        .get(media_type)
        .and_then(|m| m.schema.as_ref())
        .and_then(|schema| schema.reference.as_ref())
        .and_then(|reference| reference.component_name())
        .map_or_else(|| xml::DEFAULT_ROOT.to_string(), |name| name.into_owned())
}

fn encode_form(media_type: &str, body: &Value) -> Result<String, ContractError> {
    let invalid = |reason: &str| ContractError::RequestBody {
        media_type: media_type.to_string(),
        reason: reason.to_string(),
    };

    let fields = body
        .as_object()
        .ok_or_else(|| invalid("form bodies must be JSON objects"))?;

    let mut form = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    let item = scalar_to_string(item)
                        .ok_or_else(|| invalid("form field arrays must hold scalars"))?;
                    form.append_pair(name, &item);
                }
            }
            other => {
                let value = scalar_to_string(other)
                    .ok_or_else(|| invalid("form fields cannot hold nested objects"))?;
                form.append_pair(name, &value);
            }
        }
    }
    Ok(form.finish())
}
