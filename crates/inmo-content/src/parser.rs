//! Lenient parser from stored strings to [`StructuredContent`]
//!
//! The stored value is untrusted. Each raw part is checked field by field and
//! skipped when malformed; nothing in this module returns an error or panics.
//! A string that does not decode to `{"type":"structured","parts":[...]}` is
//! legacy plain text and parses to `None`.
//!
//! Only the shape is checked here. Whether a variable path or placeholder
//! names a catalog property is the validator's concern.

use crate::model::{ContentPart, IterationPart, StructuredContent, TextPart, VariablePart};
use inmo_catalog::is_collection_entity;
use serde_json::{Map, Value};

/// Reason a raw part was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartRejection {
    /// Element is not a JSON object
    #[error("part is not an object")]
    NotAnObject,

    /// `type` is missing or not a string
    #[error("part has no type tag")]
    MissingType,

    /// `type` names no known part kind
    #[error("unknown part type: '{0}'")]
    UnknownType(String),

    /// A field is missing or has the wrong JSON type
    #[error("{part_type} part has invalid field '{field}'")]
    InvalidField {
        /// Declared part type
        part_type: &'static str,
        /// Offending field
        field: &'static str,
    },

    /// Variable path is empty or whitespace
    #[error("variable part has a blank path")]
    BlankPath,

    /// Iteration entity is not a collection entity
    #[error("iteration over unsupported entity '{0}'")]
    UnsupportedEntity(String),
}

/// Check if a decoded value has the structured-content shape
#[must_use]
pub fn is_structured_representation(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some("structured")
        && value.get("parts").is_some_and(Value::is_array)
}

/// Check if a stored string is structured content
#[must_use]
pub fn is_structured_content(raw: &str) -> bool {
    decode(raw).is_some_and(|value| is_structured_representation(&value))
}

/// Parse a single raw part
///
/// # Errors
/// Returns the reason the part would be skipped.
pub fn parse_content_part(raw: &Value) -> Result<ContentPart, PartRejection> {
    let obj = raw.as_object().ok_or(PartRejection::NotAnObject)?;
    let tag = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(PartRejection::MissingType)?;

    match tag {
        "text" => {
            let content = string_field(obj, "text", "content")?;
            Ok(TextPart::new(content).into())
        }
        "variable" => {
            let path = string_field(obj, "variable", "path")?;
            if path.trim().is_empty() {
                return Err(PartRejection::BlankPath);
            }
            Ok(VariablePart::new(path).into())
        }
        "iteration" => parse_iteration(obj).map(ContentPart::from),
        other => Err(PartRejection::UnknownType(other.to_string())),
    }
}

fn parse_iteration(obj: &Map<String, Value>) -> Result<IterationPart, PartRejection> {
    let entity = string_field(obj, "iteration", "entity")?;
    let template = string_field(obj, "iteration", "template")?;
    let separator = string_field(obj, "iteration", "separator")?;
    let last_separator = string_field(obj, "iteration", "lastSeparator")?;
    let add_period = obj
        .get("addPeriod")
        .and_then(Value::as_bool)
        .ok_or(PartRejection::InvalidField {
            part_type: "iteration",
            field: "addPeriod",
        })?;

    if !is_collection_entity(entity) {
        return Err(PartRejection::UnsupportedEntity(entity.to_string()));
    }

    Ok(IterationPart {
        entity: entity.to_string(),
        template: template.to_string(),
        separator: separator.to_string(),
        last_separator: last_separator.to_string(),
        add_period,
    })
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    part_type: &'static str,
    field: &'static str,
) -> Result<&'a str, PartRejection> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or(PartRejection::InvalidField { part_type, field })
}

/// Parse raw parts, keeping only the well-formed ones in order
#[must_use]
pub fn parse_content_parts(raw_parts: &[Value]) -> Vec<ContentPart> {
    raw_parts
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match parse_content_part(raw) {
            Ok(part) => Some(part),
            Err(reason) => {
                tracing::debug!(index, %reason, "skipping malformed content part");
                None
            }
        })
        .collect()
}

/// Parse an already-decoded value
///
/// Returns `None` unless the value has the structured-content shape.
#[must_use]
pub fn parse_structured_value(value: &Value) -> Option<StructuredContent> {
    if !is_structured_representation(value) {
        return None;
    }
    let raw_parts = value.get("parts").and_then(Value::as_array)?;
    Some(StructuredContent::new(parse_content_parts(raw_parts)))
}

/// Parse a stored string into structured content
///
/// Returns `None` for legacy plain text, undecodable input, or JSON with a
/// different top-level shape.
#[must_use]
pub fn parse_structured_content(raw: &str) -> Option<StructuredContent> {
    decode(raw).and_then(|value| parse_structured_value(&value))
}

fn decode(raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}
