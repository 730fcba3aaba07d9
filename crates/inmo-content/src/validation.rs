//! Validation of structured content against the entity catalog
//!
//! Validation never short-circuits: every problem in every part is
//! collected so an editor can flag all of them at once. Part positions in
//! issues are 1-indexed.
//!
//! Two entry points share the same rules:
//! - [`validate_structured_content`] for typed values
//! - [`validate_json`] for decoded but untrusted data, which additionally
//!   checks the JSON type of every field
//!
//! Content with nothing to render passes both. The persistence gates,
//! [`validate_for_submission`] and [`validate_stored`], also reject it.

use crate::model::{ContentPart, IterationPart, StructuredContent};
use crate::parser::is_structured_representation;
use crate::placeholder::placeholder_names;
use inmo_catalog::{entity_properties, is_collection_entity, is_valid_property};
use serde_json::Value;

/// A single validation problem
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// Root tag is not `structured`
    #[error("content must have type 'structured'")]
    NotStructured,

    /// Root has no `parts` array
    #[error("content must have a parts array")]
    MissingParts,

    /// Nothing would be rendered
    #[error("content must contain non-blank text, a variable or an iteration")]
    NoSemanticContent,

    /// Part is not an object
    #[error("part {part}: must be an object")]
    NotAnObject {
        /// 1-indexed position
        part: usize,
    },

    /// Part type tag is missing or unknown
    #[error("part {part}: unknown part type '{part_type}'")]
    UnknownPartType {
        /// 1-indexed position
        part: usize,
        /// Tag found, empty if missing
        part_type: String,
    },

    /// Variable path is malformed or names no catalog property
    #[error("part {part}: path '{path}' is invalid")]
    InvalidPath {
        /// 1-indexed position
        part: usize,
        /// Offending path
        path: String,
    },

    /// Iteration entity is not a collection entity
    #[error("part {part}: entity '{entity}' is not valid for iteration")]
    InvalidEntity {
        /// 1-indexed position
        part: usize,
        /// Offending entity
        entity: String,
    },

    /// Iteration template is blank
    #[error("part {part}: iteration template cannot be empty")]
    EmptyTemplate {
        /// 1-indexed position
        part: usize,
    },

    /// Template placeholder names no property of the iteration entity
    #[error("part {part}: property '{property}' is not valid for entity '{entity}'")]
    InvalidPlaceholder {
        /// 1-indexed position
        part: usize,
        /// Iteration entity
        entity: String,
        /// Placeholder name
        property: String,
    },

    /// Field missing or of the wrong JSON type
    #[error("part {part}: {field} must be a {expected}")]
    FieldType {
        /// 1-indexed position
        part: usize,
        /// Field name as encoded
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },
}

impl ValidationIssue {
    /// 1-indexed part position, `None` for content-level issues
    #[must_use]
    pub fn part(&self) -> Option<usize> {
        match self {
            Self::NotStructured | Self::MissingParts | Self::NoSemanticContent => None,
            Self::NotAnObject { part }
            | Self::UnknownPartType { part, .. }
            | Self::InvalidPath { part, .. }
            | Self::InvalidEntity { part, .. }
            | Self::EmptyTemplate { part }
            | Self::InvalidPlaceholder { part, .. }
            | Self::FieldType { part, .. } => Some(*part),
        }
    }
}

/// Outcome of validating one content value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// True iff `errors` is empty
    pub valid: bool,
    /// Every problem found, in part order
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Build report from collected issues
    #[must_use]
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Check if content is acceptable
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Human-readable messages
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Issues concerning one part (1-indexed)
    pub fn issues_for_part(&self, part: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().filter(move |issue| issue.part() == Some(part))
    }
}

/// Check a variable path of the form `entity.property`
///
/// The path must have exactly two non-empty segments and the property must
/// be declared for the entity.
#[must_use]
pub fn validate_variable_path(path: &str) -> bool {
    let mut segments = path.split('.');
    match (segments.next(), segments.next(), segments.next()) {
        (Some(entity), Some(property), None) if !entity.is_empty() && !property.is_empty() => {
            is_valid_property(entity, property)
        }
        _ => false,
    }
}

/// Validate typed structured content
#[must_use]
pub fn validate_structured_content(content: &StructuredContent) -> ValidationReport {
    let mut issues = Vec::new();

    for (index, part) in content.parts.iter().enumerate() {
        let number = index + 1;
        match part {
            ContentPart::Text(_) => {}
            ContentPart::Variable(variable) => check_variable(number, &variable.path, &mut issues),
            ContentPart::Iteration(iteration) => check_iteration(number, iteration, &mut issues),
        }
    }

    ValidationReport::from_issues(issues)
}

/// Validate decoded, untyped data
///
/// Applies the same rules as [`validate_structured_content`] plus JSON type
/// checks for the root and every part field.
#[must_use]
pub fn validate_json(value: &Value) -> ValidationReport {
    let (issues, _) = check_json(value);
    ValidationReport::from_issues(issues)
}

/// Validate typed content about to be persisted
///
/// Same as [`validate_structured_content`], and the content must render
/// something.
#[must_use]
pub fn validate_for_submission(content: &StructuredContent) -> ValidationReport {
    let mut report = validate_structured_content(content);
    if !content.has_semantic_content() {
        report.errors.push(ValidationIssue::NoSemanticContent);
        report.valid = false;
    }
    report
}

/// Validate a stored body before it is persisted
///
/// Every part of the raw JSON is checked, including parts the lenient
/// parser would drop, and the content must render something. Returns `None`
/// for legacy plain text, which is not validated.
#[must_use]
pub fn validate_stored(raw: &str) -> Option<ValidationReport> {
    let value = serde_json::from_str::<Value>(raw)
        .ok()
        .filter(is_structured_representation)?;

    let (mut issues, has_semantic_content) = check_json(&value);
    if !has_semantic_content {
        issues.push(ValidationIssue::NoSemanticContent);
    }
    Some(ValidationReport::from_issues(issues))
}

/// Issues in a raw value, and whether any part has semantic content
fn check_json(value: &Value) -> (Vec<ValidationIssue>, bool) {
    let mut issues = Vec::new();

    if value.get("type").and_then(Value::as_str) != Some("structured") {
        issues.push(ValidationIssue::NotStructured);
    }

    let Some(parts) = value.get("parts").and_then(Value::as_array) else {
        issues.push(ValidationIssue::MissingParts);
        return (issues, false);
    };

    let mut has_semantic_content = false;
    for (index, raw) in parts.iter().enumerate() {
        has_semantic_content |= check_raw_part(index + 1, raw, &mut issues);
    }
    (issues, has_semantic_content)
}

fn check_variable(part: usize, path: &str, issues: &mut Vec<ValidationIssue>) {
    if !validate_variable_path(path) {
        issues.push(ValidationIssue::InvalidPath {
            part,
            path: path.to_string(),
        });
    }
}

fn check_iteration(part: usize, iteration: &IterationPart, issues: &mut Vec<ValidationIssue>) {
    check_iteration_entity(part, &iteration.entity, issues);
    check_template(part, &iteration.entity, &iteration.template, issues);
}

fn check_iteration_entity(part: usize, entity: &str, issues: &mut Vec<ValidationIssue>) {
    if !is_collection_entity(entity) {
        issues.push(ValidationIssue::InvalidEntity {
            part,
            entity: entity.to_string(),
        });
    }
}

fn check_template(part: usize, entity: &str, template: &str, issues: &mut Vec<ValidationIssue>) {
    if template.trim().is_empty() {
        issues.push(ValidationIssue::EmptyTemplate { part });
        return;
    }

    // Unknown entity already reported; nothing to check names against
    if entity_properties(entity).is_none() {
        return;
    }

    for name in placeholder_names(template) {
        if !is_valid_property(entity, name) {
            issues.push(ValidationIssue::InvalidPlaceholder {
                part,
                entity: entity.to_string(),
                property: name.to_string(),
            });
        }
    }
}

/// Check one raw part, returning whether it has semantic content
fn check_raw_part(part: usize, raw: &Value, issues: &mut Vec<ValidationIssue>) -> bool {
    let Some(obj) = raw.as_object() else {
        issues.push(ValidationIssue::NotAnObject { part });
        return false;
    };

    let field_type = |field: &'static str, expected: &'static str| ValidationIssue::FieldType {
        part,
        field,
        expected,
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("text") => match obj.get("content").and_then(Value::as_str) {
            Some(content) => !content.trim().is_empty(),
            None => {
                issues.push(field_type("content", "string"));
                false
            }
        },
        Some("variable") => {
            match obj.get("path").and_then(Value::as_str) {
                Some(path) => check_variable(part, path, issues),
                None => issues.push(field_type("path", "string")),
            }
            true
        }
        Some("iteration") => {
            let entity = obj.get("entity").and_then(Value::as_str);
            match entity {
                Some(entity) => check_iteration_entity(part, entity, issues),
                None => issues.push(field_type("entity", "string")),
            }
            match obj.get("template").and_then(Value::as_str) {
                Some(template) => check_template(part, entity.unwrap_or_default(), template, issues),
                None => issues.push(field_type("template", "string")),
            }
            if !obj.get("separator").is_some_and(Value::is_string) {
                issues.push(field_type("separator", "string"));
            }
            if !obj.get("lastSeparator").is_some_and(Value::is_string) {
                issues.push(field_type("lastSeparator", "string"));
            }
            if !obj.get("addPeriod").is_some_and(Value::is_boolean) {
                issues.push(field_type("addPeriod", "boolean"));
            }
            true
        }
        other => {
            issues.push(ValidationIssue::UnknownPartType {
                part,
                part_type: other.unwrap_or_default().to_string(),
            });
            false
        }
    }
}
