//! Error types for structured content
//!
//! Parsing never fails (malformed input is a classification signal) and
//! validation reports problems as data, so errors only cover:
//! - Serialize operations (content → stored string)
//! - Authoring session edits that address a missing or mismatched part
//! - Submitting a session whose content does not validate

use crate::model::ContentPartType;
use crate::validation::ValidationReport;

/// Errors during serialization
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Underlying JSON encoder failed
    #[error("failed to serialize structured content: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from authoring session edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// No part at the index
    #[error("no part at index {index} (content has {len} parts)")]
    OutOfBounds {
        /// Requested index
        index: usize,
        /// Current number of parts
        len: usize,
    },

    /// Part at the index has a different type than the edit expects
    #[error("part {index} is a {actual} part, expected {expected}")]
    KindMismatch {
        /// Requested index
        index: usize,
        /// Kind the edit operates on
        expected: ContentPartType,
        /// Kind found at the index
        actual: ContentPartType,
    },
}

impl EditError {
    /// Create out-of-bounds error
    #[inline]
    #[must_use]
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }
}

/// Errors when submitting authored content
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Content failed validation; the session stays rejected until the next edit
    #[error("content has {} validation error(s)", .0.errors.len())]
    Rejected(ValidationReport),

    /// Content could not be serialized
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}
