//! Stored body format detection
//!
//! Clause bodies written before structured content existed are free text.
//! Anything that does not parse as structured content is treated as such and
//! never enters the structured pipeline.

use crate::error::SerializeError;
use crate::model::{ContentFormat, StructuredContent};
use crate::parser::{is_structured_content, parse_structured_content};
use crate::serializer::serialize_structured_content;
use crate::validation::{validate_structured_content, ValidationReport};

/// Decide whether a stored body is structured or plain
#[must_use]
pub fn detect_content_format(raw: &str) -> ContentFormat {
    let format = if is_structured_content(raw) {
        ContentFormat::Structured
    } else {
        ContentFormat::Plain
    };
    tracing::debug!(%format, len = raw.len(), "detected clause body format");
    format
}

/// A clause body in either format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseBody {
    /// Legacy free text, stored verbatim
    Plain(String),
    /// Parsed structured content
    Structured(StructuredContent),
}

impl ClauseBody {
    /// Classify and parse a stored body
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match parse_structured_content(raw) {
            Some(content) => Self::Structured(content),
            None => Self::Plain(raw.to_string()),
        }
    }

    /// Body format
    #[inline]
    #[must_use]
    pub fn format(&self) -> ContentFormat {
        match self {
            Self::Plain(_) => ContentFormat::Plain,
            Self::Structured(_) => ContentFormat::Structured,
        }
    }

    /// Structured content, if any
    #[inline]
    #[must_use]
    pub fn as_structured(&self) -> Option<&StructuredContent> {
        match self {
            Self::Structured(content) => Some(content),
            Self::Plain(_) => None,
        }
    }

    /// Validate structured content; plain text always passes
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        match self {
            Self::Structured(content) => validate_structured_content(content),
            Self::Plain(_) => ValidationReport::from_issues(Vec::new()),
        }
    }

    /// String to persist
    ///
    /// # Errors
    /// Returns [`SerializeError`] if structured content fails to encode.
    pub fn to_stored(&self) -> Result<String, SerializeError> {
        match self {
            Self::Plain(text) => Ok(text.clone()),
            Self::Structured(content) => serialize_structured_content(content),
        }
    }
}

impl From<StructuredContent> for ClauseBody {
    fn from(content: StructuredContent) -> Self {
        Self::Structured(content)
    }
}
