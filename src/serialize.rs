//! Serializers for cleaned data: JSON and XML.
//!
//! `render_json` / `render_xml` require the node to carry initial data. A
//! node without it was never populated, and serializing it is a caller bug,
//! so the call fails with [`FormError::ValueRequired`] before any serializer
//! runs.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use crate::error::{FormError, Result};
use crate::tree::{ElementId, FormTree};

/// Turns a cleaned-data mapping into text.
pub trait Serializer {
    fn serialize(&self, data: &Value) -> Result<String>;
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// JSON output via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer {
    /// Indent the output.
    pub pretty: bool,
}

impl JsonSerializer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Serializer for JsonSerializer {
    fn serialize(&self, data: &Value) -> Result<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        result.map_err(|e| FormError::Serialize(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// XML
// ---------------------------------------------------------------------------

/// XML output via `quick-xml`.
///
/// Object keys become elements, arrays become repeated sibling elements with
/// the same name, scalars become escaped text and `null` an empty element.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlSerializer {
    /// Indent nested elements by this many spaces; `0` writes one line.
    pub indent: usize,
}

impl XmlSerializer {
    pub fn indented(indent: usize) -> Self {
        Self { indent }
    }
}

impl Serializer for XmlSerializer {
    fn serialize(&self, data: &Value) -> Result<String> {
        let mut writer = if self.indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', self.indent)
        } else {
            Writer::new(Vec::new())
        };
        match data {
            Value::Object(map) => {
                for (name, value) in map {
                    write_element(&mut writer, name, value)?;
                }
            }
            other => {
                return Err(FormError::Serialize(format!(
                    "XML needs a mapping at the top level, got {other}"
                )))
            }
        }
        String::from_utf8(writer.into_inner()).map_err(|e| FormError::Serialize(e.to_string()))
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => emit(writer, Event::Empty(BytesStart::new(name))),
        Value::Array(items) => {
            for item in items {
                write_element(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for (child, value) in map {
                write_element(writer, child, value)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::String(s) => write_text(writer, name, s),
        Value::Number(n) => write_text(writer, name, &n.to_string()),
        Value::Bool(b) => write_text(writer, name, &b.to_string()),
    }
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| FormError::Serialize(e.to_string()))
}

// ---------------------------------------------------------------------------
// FormTree entry points
// ---------------------------------------------------------------------------

impl FormTree {
    /// Serialize `id`'s cleaned data with `serializer`.
    ///
    /// Fails with [`FormError::ValueRequired`] when the node has no initial
    /// data.
    pub fn render_with(&mut self, id: ElementId, serializer: &dyn Serializer) -> Result<String> {
        let node = self.node(id)?;
        if node.initial_data.is_empty() {
            return Err(FormError::ValueRequired {
                name: node.name.clone(),
            });
        }
        let data = self.cleaned_data(id)?;
        serializer.serialize(&data)
    }

    /// Compact JSON of `id`'s cleaned data.
    pub fn render_json(&mut self, id: ElementId) -> Result<String> {
        self.render_with(id, &JsonSerializer::default())
    }

    /// Single-line XML of `id`'s cleaned data.
    pub fn render_xml(&mut self, id: ElementId) -> Result<String> {
        self.render_with(id, &XmlSerializer::default())
    }
}
