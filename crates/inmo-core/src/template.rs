//! Clause templates and the checks applied on submission
//!
//! A draft becomes a [`ClauseTemplate`] only if:
//! - the title is non-blank and within `max_title_length`
//! - the category is one of [`ClauseCategory::ALL`]
//! - the content is non-blank and within `max_content_length`
//! - structured content passes validation
//!
//! Structured content is checked part by part on the raw JSON, so parts the
//! lenient parser would drop still reject the draft. Plain text content skips
//! validation. Title and content are stored trimmed.
//!
//! Lengths are counted in UTF-16 code units, the unit the clause editor
//! enforces its limits in.

use crate::category::ClauseCategory;
use crate::config::ClauseConfig;
use crate::error::SubmissionError;
use chrono::{DateTime, Utc};
use inmo_content::{validate_stored, ClauseBody, ContentFormat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unsaved clause as submitted by an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseDraft {
    /// Clause title
    pub title: String,
    /// Category label
    pub category: String,
    /// Stored body, structured or plain
    pub content: String,
}

impl ClauseDraft {
    /// Create new draft
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            content: content.into(),
        }
    }
}

/// Persisted clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseTemplate {
    /// Unique ID
    pub id: Uuid,
    /// Trimmed title
    pub title: String,
    /// Category
    pub category: ClauseCategory,
    /// Trimmed stored body
    pub content: String,
    /// Author
    pub creator_id: Uuid,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last revision time
    pub updated_at: DateTime<Utc>,
}

impl ClauseTemplate {
    /// Check a draft and build the template
    ///
    /// # Errors
    /// Returns the first failed check. Validation failures carry every issue.
    pub fn create(
        draft: ClauseDraft,
        creator_id: Uuid,
        config: &ClauseConfig,
    ) -> Result<Self, SubmissionError> {
        let (title, category, content) = match check_draft(&draft, config) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(errors = e.messages().len(), "clause draft rejected: {}", e);
                return Err(e);
            }
        };

        let now = Utc::now();
        let template = Self {
            id: Uuid::new_v4(),
            title,
            category,
            content,
            creator_id,
            created_at: now,
            updated_at: now,
        };
        tracing::info!(id = %template.id, category = %template.category, "clause template created");
        Ok(template)
    }

    /// Replace the body wholesale
    ///
    /// The new content goes through the same checks as on creation. On
    /// failure the template is left untouched.
    ///
    /// # Errors
    /// Same content errors as [`create`](Self::create).
    pub fn revise(&mut self, content: &str, config: &ClauseConfig) -> Result<(), SubmissionError> {
        match check_content(content, config) {
            Ok(content) => {
                self.content = content;
                self.updated_at = Utc::now();
                tracing::info!(id = %self.id, "clause template revised");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %self.id, errors = e.messages().len(), "clause revision rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Parsed body
    #[must_use]
    pub fn body(&self) -> ClauseBody {
        ClauseBody::from_stored(&self.content)
    }

    /// Format of the stored body
    #[must_use]
    pub fn format(&self) -> ContentFormat {
        self.body().format()
    }
}

fn check_draft(
    draft: &ClauseDraft,
    config: &ClauseConfig,
) -> Result<(String, ClauseCategory, String), SubmissionError> {
    let title = check_title(&draft.title, config)?;
    let category = draft.category.parse::<ClauseCategory>()?;
    let content = check_content(&draft.content, config)?;
    Ok((title, category, content))
}

fn check_title(title: &str, config: &ClauseConfig) -> Result<String, SubmissionError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SubmissionError::MissingTitle);
    }
    let len = utf16_len(title);
    if len > config.max_title_length {
        return Err(SubmissionError::TitleTooLong {
            len,
            max: config.max_title_length,
        });
    }
    Ok(title.to_string())
}

fn check_content(content: &str, config: &ClauseConfig) -> Result<String, SubmissionError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(SubmissionError::MissingContent);
    }
    let len = utf16_len(content);
    if len > config.max_content_length {
        return Err(SubmissionError::ContentTooLong {
            len,
            max: config.max_content_length,
        });
    }

    if let Some(report) = validate_stored(content) {
        if !report.valid {
            return Err(SubmissionError::InvalidContent(report));
        }
    }
    Ok(content.to_string())
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
