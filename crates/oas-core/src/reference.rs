//! # Schema References
//!
//! A [`Reference`] is the raw `$ref` string of a schema node. Only local
//! component pointers of the form `#/components/schemas/<name>` are
//! resolvable; the name segment is a JSON Pointer token, so `~1` decodes to
//! `/` and `~0` to `~`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Pointer prefix for component schemas.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// A `$ref` pointer from one schema node to another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Wrap a raw `$ref` value without checking its shape.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build a pointer to the component schema called `name`.
    pub fn component_schema(name: &str) -> Self {
        let token = name.replace('~', "~0").replace('/', "~1");
        Self(format!("{COMPONENT_SCHEMA_PREFIX}{token}"))
    }

    /// The raw pointer text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The component schema name this reference points to, if it is a
    /// `#/components/schemas/<name>` pointer.
    pub fn component_name(&self) -> Option<Cow<'_, str>> {
        let token = self.0.strip_prefix(COMPONENT_SCHEMA_PREFIX)?;
        if token.is_empty() || token.contains('/') {
            return None;
        }
        if token.contains('~') {
            Some(Cow::Owned(token.replace("~1", "/").replace("~0", "~")))
        } else {
            Some(Cow::Borrowed(token))
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
