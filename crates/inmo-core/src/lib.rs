//! Inmo Clause Templates
//!
//! Clause records built on top of `inmo-content`:
//! - Categories used to group clauses
//! - Draft submission checks
//! - Body revision with last-write-wins semantics
//! - Limits loaded from TOML
//!
//! # Example
//!
//! ```rust
//! use inmo_core::{ClauseConfig, ClauseDraft, ClauseTemplate};
//! use uuid::Uuid;
//!
//! let draft = ClauseDraft::new("Pago mensual", "Pago", "El inquilino pagará $500.");
//! let template = ClauseTemplate::create(draft, Uuid::new_v4(), &ClauseConfig::default()).unwrap();
//! assert_eq!(template.category.label(), "Pago");
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod config;
pub mod error;
pub mod template;

// Re-exports
pub use category::ClauseCategory;
pub use config::ClauseConfig;
pub use error::{ConfigError, CoreError, CoreResult, SubmissionError};
pub use template::{ClauseDraft, ClauseTemplate};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for clause templates
    pub use crate::{ClauseCategory, ClauseConfig, ClauseDraft, ClauseTemplate, SubmissionError};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
