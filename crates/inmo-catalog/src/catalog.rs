//! Entity and property table
//!
//! The table is built once on first use and never mutated afterwards.
//! Every lookup normalizes the entity name with [`normalize_entity`], so the
//! plural collection names resolve to their singular entries.

use crate::collection::CollectionEntity;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Property key → display label, in declaration order
pub type PropertyMap = IndexMap<&'static str, &'static str>;

/// Singular entity → (display label, properties)
static ENTITIES: Lazy<IndexMap<&'static str, (&'static str, PropertyMap)>> = Lazy::new(|| {
    let mut entities = IndexMap::new();
    entities.insert(
        "propietario",
        (
            "Propietario",
            PropertyMap::from([("nombre", "Nombre"), ("dni", "DNI"), ("domicilio", "Domicilio")]),
        ),
    );
    entities.insert(
        "inquilino",
        (
            "Inquilino",
            PropertyMap::from([("nombre", "Nombre"), ("dni", "DNI"), ("domicilio", "Domicilio")]),
        ),
    );
    entities.insert(
        "propiedad",
        (
            "Propiedad",
            PropertyMap::from([
                ("direccion", "Dirección"),
                ("ambientes", "Ambientes"),
                ("superficie", "Superficie"),
            ]),
        ),
    );
    entities
});

/// Normalize an entity name for lookup
///
/// Lowercases and strips one trailing `s`. Entities whose singular form
/// ends in `s`, or whose plural is not formed by adding `s`, do not
/// resolve through this rule.
#[must_use]
pub fn normalize_entity(entity: &str) -> String {
    let lower = entity.to_lowercase();
    match lower.strip_suffix('s') {
        Some(singular) => singular.to_string(),
        None => lower,
    }
}

/// Properties declared for an entity (singular or plural name)
#[must_use]
pub fn entity_properties(entity: &str) -> Option<&'static PropertyMap> {
    ENTITIES
        .get(normalize_entity(entity).as_str())
        .map(|(_, properties)| properties)
}

/// Check if an entity exists (singular or plural name)
#[inline]
#[must_use]
pub fn is_valid_entity(entity: &str) -> bool {
    entity_properties(entity).is_some()
}

/// Check if a property is declared for an entity
#[must_use]
pub fn is_valid_property(entity: &str, property: &str) -> bool {
    entity_properties(entity).is_some_and(|props| props.contains_key(property))
}

/// Display label of a property
#[must_use]
pub fn property_label(entity: &str, property: &str) -> Option<&'static str> {
    entity_properties(entity).and_then(|props| props.get(property).copied())
}

/// Singular display label of an entity
#[must_use]
pub fn entity_label(entity: &str) -> Option<&'static str> {
    ENTITIES
        .get(normalize_entity(entity).as_str())
        .map(|(label, _)| *label)
}

/// Iteration-eligible entities with their labels
#[must_use]
pub fn collection_entities_with_labels() -> IndexMap<&'static str, &'static str> {
    CollectionEntity::ALL
        .into_iter()
        .map(|e| (e.as_str(), e.label()))
        .collect()
}

/// Text shown for a variable path, e.g. `Propiedad: Dirección`
///
/// Falls back to the raw path when it does not resolve.
#[must_use]
pub fn variable_display_text(path: &str) -> String {
    let Some((entity, property)) = path.split_once('.') else {
        return path.to_string();
    };

    match (entity_label(entity), property_label(entity, property)) {
        (Some(entity_label), Some(property_label)) => {
            format!("{}: {}", entity_label, property_label)
        }
        _ => path.to_string(),
    }
}

/// A variable path an author can insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableOption {
    /// Path in `entity.property` form
    pub path: String,
    /// Singular entity label
    pub entity_label: &'static str,
    /// Property label
    pub property_label: &'static str,
}

/// Every insertable variable path
///
/// `propiedad.*` first, then each collection entity under its singular name.
#[must_use]
pub fn available_variables() -> Vec<VariableOption> {
    let singulars = std::iter::once("propiedad")
        .chain(CollectionEntity::ALL.into_iter().map(|e| e.singular()));

    singulars
        .filter_map(|entity| ENTITIES.get(entity).map(|entry| (entity, entry)))
        .flat_map(|(entity, (entity_label, properties))| {
            let entity_label: &'static str = *entity_label;
            properties.iter().map(move |(property, property_label)| VariableOption {
                path: format!("{}.{}", entity, property),
                entity_label,
                property_label: *property_label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plural_and_singular_resolve_to_same_map() {
        assert_eq!(entity_properties("inquilinos"), entity_properties("inquilino"));
        assert_eq!(entity_properties("propietarios"), entity_properties("propietario"));
        assert!(entity_properties("inquilino").is_some());
    }

    #[test]
    fn unknown_entity_is_absent() {
        assert!(entity_properties("vendedores").is_none());
        assert!(!is_valid_entity("vendedor"));
        assert!(!is_valid_property("vendedor", "nombre"));
        assert_eq!(property_label("vendedor", "nombre"), None);
    }

    #[test]
    fn normalization_strips_one_trailing_s() {
        assert_eq!(normalize_entity("Inquilinos"), "inquilino");
        assert_eq!(normalize_entity("propiedad"), "propiedad");
        assert_eq!(normalize_entity("propiedadss"), "propiedads");
        assert_eq!(normalize_entity(""), "");
    }

    #[test]
    fn property_checks() {
        assert!(is_valid_property("propiedad", "direccion"));
        assert!(is_valid_property("propietarios", "dni"));
        assert!(!is_valid_property("propiedad", "inexistente"));
        assert!(!is_valid_property("propietario", "telefono"));
    }

    #[test]
    fn labels() {
        assert_eq!(property_label("propiedad", "direccion"), Some("Dirección"));
        assert_eq!(entity_label("inquilinos"), Some("Inquilino"));
        assert_eq!(entity_label("propiedad"), Some("Propiedad"));
    }

    #[test]
    fn properties_keep_declaration_order() {
        let keys: Vec<_> = entity_properties("propietario").unwrap().keys().copied().collect();
        assert_eq!(keys, vec!["nombre", "dni", "domicilio"]);
    }

    #[test]
    fn collection_labels_only_list_collections() {
        let labels = collection_entities_with_labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("propietarios"), Some(&"Propietarios"));
        assert_eq!(labels.get("inquilinos"), Some(&"Inquilinos"));
        assert!(!labels.contains_key("propiedad"));
    }

    #[test]
    fn display_text_for_variables() {
        assert_eq!(variable_display_text("propiedad.direccion"), "Propiedad: Dirección");
        assert_eq!(variable_display_text("inquilino.dni"), "Inquilino: DNI");
        assert_eq!(variable_display_text("propiedad.color"), "propiedad.color");
        assert_eq!(variable_display_text("propiedad"), "propiedad");
    }

    #[test]
    fn available_variables_order() {
        let paths: Vec<_> = available_variables().into_iter().map(|v| v.path).collect();
        assert_eq!(
            paths,
            vec![
                "propiedad.direccion",
                "propiedad.ambientes",
                "propiedad.superficie",
                "propietario.nombre",
                "propietario.dni",
                "propietario.domicilio",
                "inquilino.nombre",
                "inquilino.dni",
                "inquilino.domicilio",
            ]
        );
    }
}
