//! Inmo Entity Catalog
//!
//! Static registry of the entities a clause may reference, their properties
//! and the labels shown to clause authors.
//!
//! # Overview
//!
//! - **Singular entities** (`propiedad`, `propietario`, `inquilino`) bind
//!   variable paths such as `propiedad.direccion`
//! - **Collection entities** (`propietarios`, `inquilinos`) are the only
//!   ones an iteration block may repeat over
//!
//! Lookups accept plural names: a single trailing `s` is stripped before the
//! table is consulted.
//!
//! # Example
//!
//! ```rust
//! use inmo_catalog::{entity_properties, is_valid_property, property_label};
//!
//! assert!(is_valid_property("propiedad", "direccion"));
//! assert_eq!(property_label("inquilinos", "dni"), Some("DNI"));
//! assert_eq!(entity_properties("inquilinos"), entity_properties("inquilino"));
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod collection;

// Re-exports
pub use catalog::{
    available_variables, collection_entities_with_labels, entity_label, entity_properties,
    is_valid_entity, is_valid_property, normalize_entity, property_label, variable_display_text,
    PropertyMap, VariableOption,
};
pub use collection::{is_collection_entity, CollectionEntity, UnknownCollection};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog lookups
    pub use crate::{
        entity_properties, is_collection_entity, is_valid_entity, is_valid_property,
        property_label, CollectionEntity,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
