//! Error types for clause templates
//!
//! - Submission checks on title, category and content
//! - Configuration loading

use inmo_content::ValidationReport;
use std::path::PathBuf;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Draft or revision rejected
    #[error("submission rejected: {0}")]
    Submission(#[from] SubmissionError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for this crate
pub type CoreResult<T> = Result<T, CoreError>;

/// Reasons a clause draft or revision is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Title missing or blank
    #[error("title is required")]
    MissingTitle,

    /// Title over the configured limit
    #[error("title is {len} characters long (max {max})")]
    TitleTooLong {
        /// Length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Content missing or blank
    #[error("content is required")]
    MissingContent,

    /// Content over the configured limit
    #[error("content is {len} characters long (max {max})")]
    ContentTooLong {
        /// Length in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Category label not recognized
    #[error("unknown clause category: '{0}'")]
    UnknownCategory(String),

    /// Structured content failed validation
    #[error("content has {} validation error(s)", .0.errors.len())]
    InvalidContent(ValidationReport),
}

impl SubmissionError {
    /// Every message to show the author
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::InvalidContent(report) => report.messages(),
            other => vec![other.to_string()],
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid TOML for this config
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
