//! Structured clause content model
//!
//! A clause body is an ordered list of [`ContentPart`]s. Order is rendering
//! order. The external encoding is a JSON object:
//!
//! ```text
//! {"type":"structured","parts":[
//!     {"type":"text","content":"Entre "},
//!     {"type":"iteration","entity":"propietarios","template":"{{nombre}}",
//!      "separator":", ","lastSeparator":" y ","addPeriod":false},
//!     {"type":"text","content":" y "},
//!     {"type":"variable","path":"propiedad.direccion"}
//! ]}
//! ```

use crate::placeholder::{self, Placeholder};
use inmo_catalog::CollectionEntity;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Separator between consecutive iteration items
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Separator before the last iteration item
pub const DEFAULT_LAST_SEPARATOR: &str = " y ";

/// Iteration blocks end with a period unless told otherwise
pub const DEFAULT_ADD_PERIOD: bool = true;

/// Discriminant of a content part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentPartType {
    /// Literal prose
    Text,
    /// Single `entity.property` binding
    Variable,
    /// Repeating block over a collection entity
    Iteration,
}

impl ContentPartType {
    /// Tag used in the external encoding
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Variable => "variable",
            Self::Iteration => "iteration",
        }
    }
}

impl Display for ContentPartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// Prose, possibly empty
    pub content: String,
}

impl TextPart {
    /// Create text part
    #[inline]
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Empty text part, used as a separator around variables and iterations
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if the content is empty or whitespace only
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Variable bound to a single scalar value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariablePart {
    /// `entity.property`, e.g. `propiedad.direccion`
    pub path: String,
}

impl VariablePart {
    /// Create variable part
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Create from entity and property names
    #[inline]
    #[must_use]
    pub fn from_segments(entity: &str, property: &str) -> Self {
        Self::new(format!("{}.{}", entity, property))
    }

    /// Split the path into `(entity, property)` if it has exactly one dot
    #[must_use]
    pub fn segments(&self) -> Option<(&str, &str)> {
        let (entity, property) = self.path.split_once('.')?;
        if property.contains('.') {
            return None;
        }
        Some((entity, property))
    }
}

/// Repeating block rendered once per member of a collection entity
///
/// `entity` is kept as the raw name so that values with an unknown entity
/// can still be represented and reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationPart {
    /// Collection entity name (`propietarios` or `inquilinos`)
    pub entity: String,
    /// Per-item template with `{{property}}` placeholders
    pub template: String,
    /// Joins consecutive items
    pub separator: String,
    /// Joins the last two items
    pub last_separator: String,
    /// Append a period after the joined list
    pub add_period: bool,
}

impl IterationPart {
    /// Create iteration with default separators
    #[must_use]
    pub fn new(entity: CollectionEntity, template: impl Into<String>) -> Self {
        Self {
            entity: entity.as_str().to_string(),
            template: template.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            last_separator: DEFAULT_LAST_SEPARATOR.to_string(),
            add_period: DEFAULT_ADD_PERIOD,
        }
    }

    /// Start a builder that normalizes input the way the iteration dialog does
    #[inline]
    #[must_use]
    pub fn builder(entity: CollectionEntity) -> IterationBuilder {
        IterationBuilder::new(entity)
    }

    /// With separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// With last separator
    #[inline]
    #[must_use]
    pub fn with_last_separator(mut self, last_separator: impl Into<String>) -> Self {
        self.last_separator = last_separator.into();
        self
    }

    /// With terminal period flag
    #[inline]
    #[must_use]
    pub fn with_add_period(mut self, add_period: bool) -> Self {
        self.add_period = add_period;
        self
    }

    /// Typed collection entity, if the name is one
    #[inline]
    #[must_use]
    pub fn collection(&self) -> Option<CollectionEntity> {
        CollectionEntity::from_name(&self.entity)
    }

    /// Placeholders used in the template
    #[inline]
    #[must_use]
    pub fn placeholders(&self) -> Vec<Placeholder<'_>> {
        placeholder::placeholders(&self.template)
    }

    /// Template shortened to `max` characters for previews
    #[must_use]
    pub fn template_preview(&self, max: usize) -> String {
        match self.template.char_indices().nth(max) {
            Some((cut, _)) => format!("{}...", &self.template[..cut]),
            None => self.template.clone(),
        }
    }
}

/// Builder for [`IterationPart`]
///
/// Trims the template. A separator that is blank after trimming falls back
/// to its default; any other separator is kept verbatim.
#[derive(Debug, Clone)]
pub struct IterationBuilder {
    entity: CollectionEntity,
    template: String,
    separator: Option<String>,
    last_separator: Option<String>,
    add_period: bool,
}

impl IterationBuilder {
    /// New builder for the entity
    #[must_use]
    pub fn new(entity: CollectionEntity) -> Self {
        Self {
            entity,
            template: String::new(),
            separator: None,
            last_separator: None,
            add_period: DEFAULT_ADD_PERIOD,
        }
    }

    /// Set the template
    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Set the separator
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Set the last separator
    #[must_use]
    pub fn last_separator(mut self, last_separator: impl Into<String>) -> Self {
        self.last_separator = Some(last_separator.into());
        self
    }

    /// Set the terminal period flag
    #[must_use]
    pub fn add_period(mut self, add_period: bool) -> Self {
        self.add_period = add_period;
        self
    }

    /// Build the part
    #[must_use]
    pub fn build(self) -> IterationPart {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        IterationPart {
            entity: self.entity.as_str().to_string(),
            template: self.template.trim().to_string(),
            separator: or_default(self.separator, DEFAULT_SEPARATOR),
            last_separator: or_default(self.last_separator, DEFAULT_LAST_SEPARATOR),
            add_period: self.add_period,
        }
    }
}

/// One unit of structured content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Literal text
    Text(TextPart),
    /// `entity.property` binding
    Variable(VariablePart),
    /// Repeating block
    Iteration(IterationPart),
}

impl ContentPart {
    /// Text part from content
    #[inline]
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(TextPart::new(content))
    }

    /// Variable part from path
    #[inline]
    #[must_use]
    pub fn variable(path: impl Into<String>) -> Self {
        Self::Variable(VariablePart::new(path))
    }

    /// Discriminant
    #[inline]
    #[must_use]
    pub fn part_type(&self) -> ContentPartType {
        match self {
            Self::Text(_) => ContentPartType::Text,
            Self::Variable(_) => ContentPartType::Variable,
            Self::Iteration(_) => ContentPartType::Iteration,
        }
    }

    /// Check if text part
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Check if variable part
    #[inline]
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Check if iteration part
    #[inline]
    #[must_use]
    pub fn is_iteration(&self) -> bool {
        matches!(self, Self::Iteration(_))
    }

    /// Text part, if this is one
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&TextPart> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Iteration part, if this is one
    #[inline]
    #[must_use]
    pub fn as_iteration(&self) -> Option<&IterationPart> {
        match self {
            Self::Iteration(iteration) => Some(iteration),
            _ => None,
        }
    }

    /// True for a text part with blank content
    #[inline]
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        self.as_text().is_some_and(TextPart::is_blank)
    }

    /// True if the part contributes something when rendered
    ///
    /// Variables and iterations always do; text only when non-blank.
    #[inline]
    #[must_use]
    pub fn has_semantic_content(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_blank(),
            Self::Variable(_) | Self::Iteration(_) => true,
        }
    }
}

impl From<TextPart> for ContentPart {
    fn from(part: TextPart) -> Self {
        Self::Text(part)
    }
}

impl From<VariablePart> for ContentPart {
    fn from(part: VariablePart) -> Self {
        Self::Variable(part)
    }
}

impl From<IterationPart> for ContentPart {
    fn from(part: IterationPart) -> Self {
        Self::Iteration(part)
    }
}

/// Tag of the root object, always `"structured"`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuredTag {
    /// The only tag
    #[default]
    Structured,
}

/// Root value persisted per clause
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    #[serde(rename = "type")]
    tag: StructuredTag,
    /// Parts in rendering order
    pub parts: Vec<ContentPart>,
}

impl StructuredContent {
    /// Create from parts
    #[inline]
    #[must_use]
    pub fn new(parts: Vec<ContentPart>) -> Self {
        Self {
            tag: StructuredTag::Structured,
            parts,
        }
    }

    /// Root tag
    #[inline]
    #[must_use]
    pub fn tag(&self) -> StructuredTag {
        self.tag
    }

    /// Number of parts
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if there are no parts
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True if at least one part has semantic content
    #[inline]
    #[must_use]
    pub fn has_semantic_content(&self) -> bool {
        self.parts.iter().any(ContentPart::has_semantic_content)
    }

    /// Iterator over the parts
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ContentPart> {
        self.parts.iter()
    }
}

impl FromIterator<ContentPart> for StructuredContent {
    fn from_iter<I: IntoIterator<Item = ContentPart>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Stored body format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Legacy free text
    Plain,
    /// Structured JSON content
    Structured,
}

impl ContentFormat {
    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Structured => "structured",
        }
    }
}

impl Display for ContentFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
