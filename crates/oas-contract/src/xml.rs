//! XML request bodies.
//!
//! A JSON object body becomes one root element with a child element per
//! property. Array properties repeat their element once per item, nested
//! objects nest, `null` properties are left out and scalars become escaped
//! text. Property names must be valid XML element names.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use crate::error::ContractError;

/// Root element name used when the body schema names no component.
pub(crate) const DEFAULT_ROOT: &str = "root";

/// Encode `body` under a `root` element.
pub(crate) fn encode(
    media_type: &str,
    root: &str,
    body: &Value,
) -> Result<Vec<u8>, ContractError> {
    let mut encoder = Encoder {
        media_type,
        writer: Writer::new(Vec::new()),
    };
    let fields = body
        .as_object()
        .ok_or_else(|| encoder.invalid("XML bodies must be JSON objects".to_string()))?;

    encoder.start(root)?;
    for (name, value) in fields {
        encoder.field(name, value)?;
    }
    encoder.end(root)?;
    Ok(encoder.writer.into_inner())
}

struct Encoder<'m> {
    media_type: &'m str,
    writer: Writer<Vec<u8>>,
}

impl Encoder<'_> {
    fn invalid(&self, reason: String) -> ContractError {
        ContractError::RequestBody {
            media_type: self.media_type.to_string(),
            reason,
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), ContractError> {
        self.writer
            .write_event(event)
            .map_err(|e| self.invalid(e.to_string()))
    }

    fn start(&mut self, name: &str) -> Result<(), ContractError> {
        if !is_element_name(name) {
            return Err(self.invalid(format!("'{name}' is not a valid XML element name")));
        }
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), ContractError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn field(&mut self, name: &str, value: &Value) -> Result<(), ContractError> {
        match value {
            Value::Null => Ok(()),
            Value::Array(items) => {
                for item in items {
                    if item.is_array() {
                        return Err(self.invalid(format!("'{name}' holds nested arrays")));
                    }
                    self.field(name, item)?;
                }
                Ok(())
            }
            Value::Object(fields) => {
                self.start(name)?;
                for (child, value) in fields {
                    self.field(child, value)?;
                }
                self.end(name)
            }
            Value::String(s) => self.text_element(name, s),
            Value::Number(n) => self.text_element(name, &n.to_string()),
            Value::Bool(b) => self.text_element(name, if *b { "true" } else { "false" }),
        }
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), ContractError> {
        self.start(name)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }
}

/// A conservative XML `Name`: ASCII letters, digits, `_`, `-` and `.`,
/// starting with a letter or `_`, and not reserved by a leading `xml`.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("xml"))
}
