//! Clause submission settings

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits applied when a clause is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseConfig {
    /// Maximum title length in characters
    pub max_title_length: usize,
    /// Maximum stored content length in characters
    pub max_content_length: usize,
}

impl ClauseConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max title length
    #[inline]
    #[must_use]
    pub fn with_max_title_length(mut self, max: usize) -> Self {
        self.max_title_length = max;
        self
    }

    /// With max content length
    #[inline]
    #[must_use]
    pub fn with_max_content_length(mut self, max: usize) -> Self {
        self.max_content_length = max;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError`] on malformed TOML or zero limits.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded clause configuration");
        Ok(config)
    }

    /// Check limits are usable
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if any limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_title_length == 0 {
            return Err(ConfigError::Invalid("max_title_length must be positive".into()));
        }
        if self.max_content_length == 0 {
            return Err(ConfigError::Invalid("max_content_length must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClauseConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_content_length: 50_000,
        }
    }
}
