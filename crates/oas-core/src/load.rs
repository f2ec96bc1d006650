//! # Loading Documents and Instances
//!
//! Reads API description documents and JSON instances from text or files.
//! The format is chosen from the file extension: `.yaml` / `.yml` parse as
//! YAML, anything else as JSON.
//!
//! YAML instances are converted into `serde_json::Value` trees so the
//! validator sees one value model regardless of the source format.

use std::path::Path;

use serde_json::Value;

use crate::document::Document;
use crate::error::DocumentError;

impl Document {
    /// Parse a document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(text).map_err(|e| DocumentError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    /// Parse a document from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        serde_yaml::from_str(text).map_err(|e| DocumentError::Parse {
            format: "YAML",
            reason: e.to_string(),
        })
    }

    /// Load a document from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = read_file(path)?;
        let document = if is_yaml(path) {
            Self::from_yaml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            paths = document.paths.len(),
            schemas = document.components.schemas.len(),
            "loaded document"
        );
        Ok(document)
    }
}

/// Load a JSON instance from a `.json`, `.yaml` or `.yml` file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if is_yaml(path) {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| DocumentError::Parse {
                format: "YAML",
                reason: e.to_string(),
            })?;
        yaml_to_json_value(&yaml)
    } else {
        serde_json::from_str(&content).map_err(|e| DocumentError::Parse {
            format: "JSON",
            reason: e.to_string(),
        })
    }
}

fn read_file(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Convert a YAML value tree into the JSON value model.
///
/// Tags are dropped and the tagged value kept. Scalar mapping keys become
/// their string form. Values with no JSON counterpart (non-finite floats,
/// sequence or mapping keys) fail with [`DocumentError::Parse`] naming the
/// key path where they occur.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, DocumentError> {
    YamlPath::default().convert(yaml)
}

/// Keys and indexes from the YAML root to the value being converted.
#[derive(Default)]
struct YamlPath(Vec<String>);

impl YamlPath {
    fn convert(&mut self, yaml: &serde_yaml::Value) -> Result<Value, DocumentError> {
        use serde_yaml::Value as Yaml;

        Ok(match yaml {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(*b),
            Yaml::String(s) => Value::String(s.clone()),
            Yaml::Number(n) => self.number(n)?,
            Yaml::Tagged(tagged) => self.convert(&tagged.value)?,
            Yaml::Sequence(items) => {
                let mut array = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.0.push(format!("[{i}]"));
                    array.push(self.convert(item)?);
                    self.0.pop();
                }
                Value::Array(array)
            }
            Yaml::Mapping(mapping) => {
                let mut object = serde_json::Map::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = match key {
                        Yaml::String(s) => s.clone(),
                        Yaml::Number(n) => n.to_string(),
                        Yaml::Bool(b) => b.to_string(),
                        _ => return Err(self.error("mapping keys must be scalars")),
                    };
                    self.0.push(format!(".{key}"));
                    let value = self.convert(value)?;
                    self.0.pop();
                    object.insert(key, value);
                }
                Value::Object(object)
            }
        })
    }

    fn number(&self, n: &serde_yaml::Number) -> Result<Value, DocumentError> {
        let number = if let Some(i) = n.as_i64() {
            Some(serde_json::Number::from(i))
        } else if let Some(u) = n.as_u64() {
            Some(serde_json::Number::from(u))
        } else {
            n.as_f64().and_then(serde_json::Number::from_f64)
        };
        number
            .map(Value::Number)
            .ok_or_else(|| self.error(&format!("{n} has no JSON number form")))
    }

    fn error(&self, problem: &str) -> DocumentError {
        let at = if self.0.is_empty() {
            ".".to_string()
        } else {
            self.0.concat().trim_start_matches('.').to_string()
        };
        DocumentError::Parse {
            format: "YAML",
            reason: format!("{problem} at {at}"),
        }
    }
}
