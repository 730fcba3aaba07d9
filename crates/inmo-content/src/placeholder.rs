//! `{{name}}` placeholders inside iteration templates
//!
//! This grammar is smaller than variable paths: the entity is
//! fixed by the iteration, so a placeholder carries only a property name made
//! of ASCII word characters. `{{propiedad.direccion}}` is not a placeholder.

use inmo_catalog::entity_properties;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid"));

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A placeholder found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Property name between the braces
    pub name: &'a str,
    /// Byte range of the whole `{{name}}` token
    pub span: Range<usize>,
}

/// All placeholders in order of appearance
#[must_use]
pub fn placeholders(template: &str) -> Vec<Placeholder<'_>> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Placeholder {
                name: name.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Placeholder names in order of appearance
#[must_use]
pub fn placeholder_names(template: &str) -> Vec<&str> {
    placeholders(template).into_iter().map(|p| p.name).collect()
}

/// Byte offset of an unclosed `{{` before the cursor
///
/// Returns `None` when the cursor is not inside an open placeholder, which
/// is when the property suggestions should be hidden.
#[must_use]
pub fn open_placeholder_at(text: &str, cursor: usize) -> Option<usize> {
    let before = text.get(..cursor)?;
    let start = before.rfind(OPEN)?;
    if before[start + OPEN.len()..].contains(CLOSE) {
        return None;
    }
    Some(start)
}

/// Replace the partial placeholder between `start` and `cursor` with `{{property}}`
///
/// Returns the new text and the cursor position just past the closing braces.
/// Offsets that are out of range or not on a char boundary leave the text
/// unchanged.
#[must_use]
pub fn insert_placeholder(text: &str, start: usize, cursor: usize, property: &str) -> (String, usize) {
    let (Some(before), Some(after)) = (text.get(..start), text.get(cursor..)) else {
        return (text.to_string(), cursor.min(text.len()));
    };
    if start > cursor {
        return (text.to_string(), cursor);
    }

    let token = format!("{}{}{}", OPEN, property, CLOSE);
    let new_cursor = before.len() + token.len();
    (format!("{before}{token}{after}"), new_cursor)
}

/// Properties of an iteration entity whose key starts with `prefix`
///
/// Accepts the plural collection name.
#[must_use]
pub fn suggestions(entity: &str, prefix: &str) -> Vec<(&'static str, &'static str)> {
    entity_properties(entity)
        .map(|props| {
            props
                .iter()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(key, label)| (*key, *label))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_placeholders_with_spans() {
        let found = placeholders("{{nombre}} (DNI: {{dni}})");
        assert_eq!(
            found,
            vec![
                Placeholder { name: "nombre", span: 0..10 },
                Placeholder { name: "dni", span: 17..24 },
            ]
        );
    }

    #[test]
    fn ignores_dotted_and_spaced_names() {
        assert!(placeholder_names("{{propiedad.direccion}}").is_empty());
        assert!(placeholder_names("{{ nombre }}").is_empty());
        assert!(placeholder_names("{nombre}").is_empty());
        assert_eq!(placeholder_names("{{{nombre}}}"), vec!["nombre"]);
    }

    #[test]
    fn word_characters_are_ascii() {
        assert!(placeholder_names("{{dirección}}").is_empty());
        assert_eq!(placeholder_names("{{dni_2}}"), vec!["dni_2"]);
    }

    #[test]
    fn open_placeholder_detection() {
        assert_eq!(open_placeholder_at("Sr. {{nom", 9), Some(4));
        assert_eq!(open_placeholder_at("Sr. {{nombre}} ", 15), None);
        assert_eq!(open_placeholder_at("{{a}} y {{", 10), Some(8));
        assert_eq!(open_placeholder_at("sin llaves", 5), None);
        assert_eq!(open_placeholder_at("abc", 10), None);
    }

    #[test]
    fn insert_completes_partial_placeholder() {
        let text = "Sr. {{nom, DNI";
        let (new_text, cursor) = insert_placeholder(text, 4, 9, "nombre");
        assert_eq!(new_text, "Sr. {{nombre}}, DNI");
        assert_eq!(cursor, 14);
        assert_eq!(&new_text[..cursor], "Sr. {{nombre}}");
    }

    #[test]
    fn insert_with_bad_offsets_is_noop() {
        let (text, cursor) = insert_placeholder("abc", 2, 1, "dni");
        assert_eq!(text, "abc");
        assert_eq!(cursor, 1);

        let (text, _) = insert_placeholder("abc", 1, 10, "dni");
        assert_eq!(text, "abc");
    }

    #[test]
    fn suggestions_filter_by_prefix() {
        assert_eq!(
            suggestions("propietarios", "d"),
            vec![("dni", "DNI"), ("domicilio", "Domicilio")]
        );
        assert_eq!(suggestions("inquilinos", "").len(), 3);
        assert!(suggestions("vendedores", "").is_empty());
    }
}
