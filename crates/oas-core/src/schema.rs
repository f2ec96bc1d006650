//! # Schema Nodes
//!
//! A [`Schema`] describes the structure of one JSON value and, through
//! `items`, `properties` and `additionalProperties`, of its children.
//!
//! ## Serialized Form
//!
//! Nodes load from and save to the camelCase keyword form used by API
//! description documents (`multipleOf`, `maxLength`, `$ref`, ...). Two
//! keywords need translation:
//!
//! - `additionalProperties` is `false`, `true` or a nested schema. On load it
//!   becomes [`Schema::additional_properties_allowed`] plus an optional
//!   [`Schema::additional_properties`] node.
//! - `exclusiveMaximum` / `exclusiveMinimum` are flags next to
//!   `maximum` / `minimum`. A numeric bound in their place is also accepted
//!   and treated as an exclusive bound with that value. When both a numeric
//!   exclusive bound and an inclusive one are declared, the tighter is kept.
//!
//! Composition keywords (`allOf`, `anyOf`, `oneOf`) are not modelled and are
//! dropped on load.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::reference::Reference;

/// The declared primitive type of a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaType {
    /// JSON `null`.
    Null,
    /// JSON `true` / `false`.
    Boolean,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    /// JSON string.
    String,
    /// A type tag this crate does not know. No validator applies to it.
    Unknown(String),
}

impl SchemaType {
    /// The tag as written in a document.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Unknown(tag) => tag,
        }
    }
}

impl From<String> for SchemaType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "string" => Self::String,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<SchemaType> for String {
    fn from(t: SchemaType) -> Self {
        match t {
            SchemaType::Unknown(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural constraint description for one JSON value.
///
/// Every field is optional. A node with no `schema_type` places no type
/// constraint on its instance. A node with a `reference` is a pure
/// indirection: the validator resolves it and ignores the other fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaRepr", into = "SchemaRepr")]
pub struct Schema {
    /// Declared primitive type.
    pub schema_type: Option<SchemaType>,
    /// Pointer to the node this one stands for.
    pub reference: Option<Reference>,

    /// Instance must be an exact multiple of this value.
    pub multiple_of: Option<f64>,
    /// Upper bound.
    pub maximum: Option<f64>,
    /// Makes `maximum` strict.
    pub exclusive_maximum: bool,
    /// Lower bound.
    pub minimum: Option<f64>,
    /// Makes `minimum` strict.
    pub exclusive_minimum: bool,

    /// Maximum string length in characters.
    pub max_length: Option<usize>,
    /// Minimum string length in characters.
    pub min_length: Option<usize>,
    /// Regular expression the string must contain a match for.
    pub pattern: Option<String>,

    /// Schema applied to every array element.
    pub items: Option<Box<Schema>>,
    /// Maximum element count.
    pub max_items: Option<usize>,
    /// Minimum element count.
    pub min_items: Option<usize>,
    /// Elements must be pairwise distinct.
    pub unique_items: bool,

    /// Schemas for named properties.
    pub properties: IndexMap<String, Schema>,
    /// Property names that must be present.
    pub required: BTreeSet<String>,
    /// Maximum property count.
    pub max_properties: Option<usize>,
    /// Minimum property count.
    pub min_properties: Option<usize>,
    /// Schema for properties not named in `properties`.
    pub additional_properties: Option<Box<Schema>>,
    /// Whether properties not named in `properties` are accepted at all.
    pub additional_properties_allowed: bool,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            schema_type: None,
            reference: None,
            multiple_of: None,
            maximum: None,
            exclusive_maximum: false,
            minimum: None,
            exclusive_minimum: false,
            max_length: None,
            min_length: None,
            pattern: None,
            items: None,
            max_items: None,
            min_items: None,
            unique_items: false,
            properties: IndexMap::new(),
            required: BTreeSet::new(),
            max_properties: None,
            min_properties: None,
            additional_properties: None,
            additional_properties_allowed: true,
        }
    }
}

impl Schema {
    /// An unconstrained node of the given type.
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// A pure indirection to another node.
    pub fn reference(reference: Reference) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    /// An array node whose elements must match `items`.
    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// Add a named property (builder style).
    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark property names as required (builder style).
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }
}

/// `additionalProperties` as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// `exclusiveMaximum` / `exclusiveMinimum` as written in a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ExclusiveBound {
    Flag(bool),
    Value(f64),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SchemaRepr {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    schema_type: Option<SchemaType>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    reference: Option<Reference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multiple_of: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusive_maximum: Option<ExclusiveBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclusive_minimum: Option<ExclusiveBound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unique_items: Option<bool>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    required: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_properties: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_properties: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_properties: Option<AdditionalProperties>,
}

/// Fold an `exclusive*` keyword into its bound.
///
/// `at_least_as_tight(v, b)` says whether exclusive `v` excludes everything
/// inclusive `b` does.
fn split_bound(
    bound: Option<f64>,
    exclusive: Option<ExclusiveBound>,
    at_least_as_tight: fn(f64, f64) -> bool,
) -> (Option<f64>, bool) {
    match (exclusive, bound) {
        (None | Some(ExclusiveBound::Flag(false)), _) => (bound, false),
        (Some(ExclusiveBound::Flag(true)), _) => (bound, true),
        (Some(ExclusiveBound::Value(v)), Some(b)) if !at_least_as_tight(v, b) => (Some(b), false),
        (Some(ExclusiveBound::Value(v)), _) => (Some(v), true),
    }
}

impl From<SchemaRepr> for Schema {
    fn from(r: SchemaRepr) -> Self {
        let (maximum, exclusive_maximum) =
            split_bound(r.maximum, r.exclusive_maximum, |v, b| v <= b);
        let (minimum, exclusive_minimum) =
            split_bound(r.minimum, r.exclusive_minimum, |v, b| v >= b);
        let (additional_properties_allowed, additional_properties) = match r.additional_properties
        {
            None => (true, None),
            Some(AdditionalProperties::Allowed(allowed)) => (allowed, None),
            Some(AdditionalProperties::Schema(schema)) => (true, Some(schema)),
        };

        Self {
            schema_type: r.schema_type,
            reference: r.reference,
            multiple_of: r.multiple_of,
            maximum,
            exclusive_maximum,
            minimum,
            exclusive_minimum,
            max_length: r.max_length,
            min_length: r.min_length,
            pattern: r.pattern,
            items: r.items,
            max_items: r.max_items,
            min_items: r.min_items,
            unique_items: r.unique_items.unwrap_or(false),
            properties: r.properties,
            required: r.required,
            max_properties: r.max_properties,
            min_properties: r.min_properties,
            additional_properties,
            additional_properties_allowed,
        }
    }
}

impl From<Schema> for SchemaRepr {
    fn from(s: Schema) -> Self {
        let additional_properties = match (s.additional_properties_allowed, s.additional_properties)
        {
            (false, _) => Some(AdditionalProperties::Allowed(false)),
            (true, Some(schema)) => Some(AdditionalProperties::Schema(schema)),
            (true, None) => None,
        };

        Self {
            schema_type: s.schema_type,
            reference: s.reference,
            multiple_of: s.multiple_of,
            maximum: s.maximum,
            exclusive_maximum: s.exclusive_maximum.then_some(ExclusiveBound::Flag(true)),
            minimum: s.minimum,
            exclusive_minimum: s.exclusive_minimum.then_some(ExclusiveBound::Flag(true)),
            max_length: s.max_length,
            min_length: s.min_length,
            pattern: s.pattern,
            items: s.items,
            max_items: s.max_items,
            min_items: s.min_items,
            unique_items: s.unique_items.then_some(true),
            properties: s.properties,
            required: s.required,
            max_properties: s.max_properties,
            min_properties: s.min_properties,
            additional_properties,
        }
    }
}
