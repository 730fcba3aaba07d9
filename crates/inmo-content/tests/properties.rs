use inmo_catalog::entity_properties;
use inmo_content::{
    detect_content_format, parse_content_parts, parse_structured_content,
    serialize_structured_content, validate_structured_content, validate_variable_path,
    AuthoringSession, ClauseBody, ContentFormat, ContentPart, IterationPart, StructuredContent,
};
use inmo_test_utils::{
    raw_iteration, raw_text, raw_variable, sample_content, sample_stored, stored,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn iteration(entity: &str, template: &str) -> StructuredContent {
    StructuredContent::new(vec![ContentPart::Iteration(IterationPart {
        entity: entity.to_string(),
        template: template.to_string(),
        separator: ", ".to_string(),
        last_separator: " y ".to_string(),
        add_period: true,
    })])
}

#[test]
fn sample_round_trips() {
    let content = sample_content();
    let raw = serialize_structured_content(&content).unwrap();
    assert_eq!(parse_structured_content(&raw), Some(content));
}

#[test]
fn format_detection() {
    assert_eq!(
        detect_content_format(r#"{"type":"structured","parts":[]}"#),
        ContentFormat::Structured
    );
    assert_eq!(detect_content_format("El inquilino pagará $500"), ContentFormat::Plain);
    assert_eq!(detect_content_format(r#"{"foo":"bar"}"#), ContentFormat::Plain);
}

#[test]
fn malformed_parts_are_dropped() {
    let parts = parse_content_parts(&[
        json!({"type": "text", "content": "ok"}),
        json!({"type": "bogus"}),
        json!({"type": "variable", "path": ""}),
    ]);
    assert_eq!(parts, vec![ContentPart::text("ok")]);
}

#[test]
fn rejects_unknown_iteration_entity() {
    let report = validate_structured_content(&iteration("vendedores", "{{nombre}}"));
    assert!(!report.valid);
    assert!(report.messages().iter().any(|m| m.contains("vendedores")));
}

#[test]
fn rejects_undeclared_placeholder() {
    let report = validate_structured_content(&iteration("propietarios", "{{telefono}}"));
    assert!(!report.valid);
    assert!(report.messages().iter().any(|m| m.contains("telefono")));
}

#[test]
fn accepts_valid_iteration() {
    let report = validate_structured_content(&iteration("inquilinos", "{{nombre}} (DNI: {{dni}})"));
    assert!(report.valid);
    assert!(report.errors.is_empty());
}

#[test]
fn variable_path_contract() {
    assert!(validate_variable_path("propiedad.direccion"));
    assert!(!validate_variable_path("propiedad"));
    assert!(!validate_variable_path("propiedad.inexistente"));
}

#[test]
fn plural_entities_share_properties() {
    assert_eq!(entity_properties("inquilinos"), entity_properties("inquilino"));
    assert!(entity_properties("inquilinos").is_some());
}

#[test]
fn stored_fixture_is_valid_structured() {
    let body = ClauseBody::from_stored(&sample_stored());
    assert_eq!(body.format(), ContentFormat::Structured);
    assert!(body.validate().valid);
}

#[test]
fn parse_keeps_good_parts_around_bad_ones() {
    let raw = stored(vec![
        raw_text("Locadores: "),
        raw_iteration("vendedores", "{{nombre}}"),
        raw_iteration("propietarios", "{{nombre}}"),
        json!(42),
        raw_variable("propiedad.direccion"),
    ]);
    let content = parse_structured_content(&raw).unwrap();
    assert_eq!(content.len(), 3);
    assert!(validate_structured_content(&content).valid);
}

#[test]
fn session_output_parses_back() {
    let mut session = AuthoringSession::from_content(sample_content());
    session.insert_variable("propiedad.superficie");
    let stored = session.submit().unwrap();

    let reopened = AuthoringSession::from_stored(&stored);
    assert_eq!(reopened.parts(), session.parts());
}
