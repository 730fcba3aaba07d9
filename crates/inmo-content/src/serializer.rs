//! Serialization of structured content for persistence
//!
//! Output is compact JSON with the tag first and parts in order, so that
//! [`parse_structured_content`](crate::parser::parse_structured_content)
//! reproduces the value exactly.

use crate::error::SerializeError;
use crate::model::StructuredContent;

/// Serialize content to its stored string form
///
/// # Errors
/// Returns [`SerializeError::Encode`] if the encoder fails, which does not
/// happen for values built from this crate's types.
pub fn serialize_structured_content(content: &StructuredContent) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(content)?)
}

/// Serialize content to an indented string, for display
///
/// # Errors
/// Same as [`serialize_structured_content`].
pub fn serialize_structured_content_pretty(
    content: &StructuredContent,
) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentPart, IterationPart};
    use crate::parser::parse_structured_content;
    use inmo_catalog::CollectionEntity;
    use pretty_assertions::assert_eq;

    #[test]
    fn compact_output_is_stable() {
        let content = StructuredContent::new(vec![
            ContentPart::text("Inquilinos: "),
            IterationPart::new(CollectionEntity::Inquilinos, "{{nombre}}").into(),
        ]);

        assert_eq!(
            serialize_structured_content(&content).unwrap(),
            r#"{"type":"structured","parts":[{"type":"text","content":"Inquilinos: "},{"type":"iteration","entity":"inquilinos","template":"{{nombre}}","separator":", ","lastSeparator":" y ","addPeriod":true}]}"#
        );
    }

    #[test]
    fn empty_content_serializes() {
        let content = StructuredContent::default();
        assert_eq!(
            serialize_structured_content(&content).unwrap(),
            r#"{"type":"structured","parts":[]}"#
        );
    }

    #[test]
    fn pretty_output_parses_back() {
        let content = StructuredContent::new(vec![
            ContentPart::text("Calle: "),
            ContentPart::variable("propiedad.direccion"),
        ]);
        let pretty = serialize_structured_content_pretty(&content).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(parse_structured_content(&pretty), Some(content));
    }

    #[test]
    fn escapes_special_characters() {
        let content = StructuredContent::new(vec![ContentPart::text("\"comillas\" y \\barras\n")]);
        let raw = serialize_structured_content(&content).unwrap();
        assert_eq!(parse_structured_content(&raw), Some(content));
    }
}
