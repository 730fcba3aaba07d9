//! Testing utilities for the Inmo workspace
//!
//! Shared clause fixtures and raw JSON builders.

#![allow(missing_docs)]

use inmo_catalog::CollectionEntity;
use inmo_content::{ContentPart, IterationPart, StructuredContent};
use serde_json::{json, Value};

pub fn property_address() -> ContentPart {
    ContentPart::variable("propiedad.direccion")
}

pub fn owners_iteration() -> IterationPart {
    IterationPart::new(CollectionEntity::Propietarios, "{{nombre}} (DNI {{dni}})")
        .with_last_separator(" y ")
        .with_add_period(false)
}

pub fn tenants_iteration() -> IterationPart {
    IterationPart::new(CollectionEntity::Inquilinos, "{{nombre}}")
}

/// Opening clause naming the owners and the property
pub fn sample_content() -> StructuredContent {
    StructuredContent::new(vec![
        ContentPart::text("Entre "),
        owners_iteration().into(),
        ContentPart::text(", propietarios del inmueble ubicado en "),
        property_address(),
        ContentPart::text(", y "),
        tenants_iteration().into(),
        ContentPart::text(""),
    ])
}

pub fn sample_stored() -> String {
    raw_content(vec![
        json!({"type": "text", "content": "Entre "}),
        raw_iteration("propietarios", "{{nombre}} (DNI {{dni}})"),
        json!({"type": "text", "content": ", propietarios del inmueble ubicado en "}),
        raw_variable("propiedad.direccion"),
    ])
    .to_string()
}

pub fn raw_content(parts: Vec<Value>) -> Value {
    json!({"type": "structured", "parts": parts})
}

pub fn raw_text(content: &str) -> Value {
    json!({"type": "text", "content": content})
}

pub fn raw_variable(path: &str) -> Value {
    json!({"type": "variable", "path": path})
}

pub fn raw_iteration(entity: &str, template: &str) -> Value {
    json!({
        "type": "iteration",
        "entity": entity,
        "template": template,
        "separator": ", ",
        "lastSeparator": " y ",
        "addPeriod": true
    })
}

pub fn stored(parts: Vec<Value>) -> String {
    raw_content(parts).to_string()
}
