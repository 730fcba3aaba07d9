//! Inmo Structured Clause Content
//!
//! Contract clause bodies composed of literal text, variable references and
//! iteration blocks over collection entities.
//!
//! # Pipeline
//!
//! ```text
//! stored string ─► detect ─► parse (lenient) ─► edit ─► validate ─► serialize ─► stored string
//!                    │
//!                    └─► plain text (legacy, passed through untouched)
//! ```
//!
//! - [`parser`] never fails: malformed parts are dropped, non-structured
//!   input is plain text
//! - [`validation`] collects every issue instead of stopping at the first
//! - [`serializer`] output parses back to the same value
//! - [`editor`] enforces the authoring rules and the submit state machine
//!
//! # Example
//!
//! ```rust
//! use inmo_content::{
//!     parse_structured_content, serialize_structured_content, validate_structured_content,
//!     ContentPart, StructuredContent,
//! };
//!
//! let content = StructuredContent::new(vec![
//!     ContentPart::text("Ubicado en "),
//!     ContentPart::variable("propiedad.direccion"),
//! ]);
//! assert!(validate_structured_content(&content).valid);
//!
//! let stored = serialize_structured_content(&content).unwrap();
//! assert_eq!(parse_structured_content(&stored), Some(content));
//! ```

#![warn(missing_docs)]

pub mod editor;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod placeholder;
pub mod serializer;
pub mod validation;

// Re-exports
pub use editor::{AuthoringSession, SessionState};
pub use error::{EditError, SerializeError, SubmitError};
pub use format::{detect_content_format, ClauseBody};
pub use model::{
    ContentFormat, ContentPart, ContentPartType, IterationBuilder, IterationPart,
    StructuredContent, StructuredTag, TextPart, VariablePart, DEFAULT_ADD_PERIOD,
    DEFAULT_LAST_SEPARATOR, DEFAULT_SEPARATOR,
};
pub use parser::{
    is_structured_content, is_structured_representation, parse_content_part, parse_content_parts,
    parse_structured_content, parse_structured_value, PartRejection,
};
pub use placeholder::{
    insert_placeholder, open_placeholder_at, placeholder_names, placeholders, suggestions,
    Placeholder,
};
pub use serializer::{serialize_structured_content, serialize_structured_content_pretty};
pub use validation::{
    validate_for_submission, validate_json, validate_stored, validate_structured_content,
    validate_variable_path, ValidationIssue, ValidationReport,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with clause content
    pub use crate::{
        detect_content_format, parse_structured_content, serialize_structured_content,
        validate_structured_content, AuthoringSession, ClauseBody, ContentFormat, ContentPart,
        IterationPart, StructuredContent, ValidationReport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
