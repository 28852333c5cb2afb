//! Integration tests for the public API

use diagramsmith::prelude::*;
use diagramsmith::{generate, ConnectionKind, ElementKind};

#[test]
fn test_generate_sequence_mermaid() {
    let diagram = generate(
        "User sends login request to System. System returns token to User.",
        "sequence",
        "mermaid",
    )
    .unwrap();
    assert_eq!(diagram.diagram_type, DiagramType::Sequence);
    assert_eq!(diagram.output_format, DiagramFormat::Mermaid);
    assert!(diagram.code.starts_with("sequenceDiagram"));
    assert!(diagram.code.contains("actor actor_user as User"));
    assert!(diagram.code.contains("participant actor_system as System"));
}

#[test]
fn test_generate_is_case_insensitive() {
    let diagram = generate("1. Receive order. 2. Ship it.", "FlowChart", "MERMAID").unwrap();
    assert_eq!(diagram.diagram_type, DiagramType::Flowchart);
}

#[test]
fn test_generate_python_flowchart() {
    let diagram = generate("1. Receive order. 2. Ship it.", "flowchart", "python_diagrams").unwrap();
    assert!(diagram
        .code
        .starts_with("from diagrams import Diagram\nfrom diagrams.programming.flowchart import"));
    assert!(diagram.code.contains("start = StartEnd(\"Start\")"));
    assert!(diagram.code.contains("step_1 = Action(\"Receive order.\")"));
    assert!(diagram.code.contains("step_2 >> finish"));
}

#[test]
fn test_extract_then_emit() {
    let spec = SequenceExtractor::new()
        .extract("User sends login request to System. System returns token to User.")
        .unwrap();
    assert_eq!(spec.diagram_type, DiagramType::Sequence);
    assert!(spec.element_count() >= 2);

    let code = SequenceEmitter::new()
        .emit(&spec, DiagramFormat::Plantuml, &RenderConfig::default())
        .unwrap();
    assert!(code.starts_with("@startuml"));
    assert!(code.trim_end().ends_with("@enduml"));
}

#[test]
fn test_emitter_rejects_unsupported_format() {
    let spec = FlowchartExtractor::new().extract("1. Open. 2. Close.").unwrap();
    let result = FlowchartEmitter::new().emit(&spec, DiagramFormat::Plantuml, &RenderConfig::default());
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiagramError>(),
        Some(DiagramError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_emitter_rejects_spec_of_another_type() {
    let spec = ClassExtractor::new().extract("User has name.").unwrap();
    let err = SequenceEmitter::new()
        .emit(&spec, DiagramFormat::Mermaid, &RenderConfig::default())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DiagramError>(),
        Some(DiagramError::RenderError { .. })
    ));
}

#[test]
fn test_class_extractor_relationships() {
    let spec = ClassExtractor::new()
        .extract("Classes: User, Order. User has many Order.")
        .unwrap();
    let labels: Vec<&str> = spec.elements().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["User", "Order"]);
    assert!(spec.elements().iter().all(|e| e.kind == ElementKind::Class));

    let relationship = &spec.connections()[0];
    assert_eq!(relationship.from, "class_user");
    assert_eq!(relationship.to, "class_order");
    assert_eq!(relationship.kind, ConnectionKind::Composition);
    assert_eq!(relationship.properties.multiplicity(), Some("*"));
}

#[test]
fn test_direction_reaches_emitter() {
    let service = DiagramService::with_config(
        ExtractionLimits::default(),
        RenderConfig::with_direction(Direction::LeftRight),
    );
    let diagram = service
        .generate("1. Receive order. 2. Ship it.", "flowchart", "mermaid", None)
        .unwrap();
    assert!(diagram.code.contains("flowchart LR"));
}

#[test]
fn test_title_override() {
    let service = DiagramService::new();
    let diagram = service
        .generate("1. Receive order. 2. Ship it.", "flowchart", "mermaid", Some("Fulfilment"))
        .unwrap();
    assert_eq!(diagram.title, "Fulfilment");
    assert!(diagram.code.contains("title: Fulfilment"));
}

#[test]
fn test_blank_title_keeps_extracted_one() {
    let service = DiagramService::new();
    let diagram = service
        .generate("1. Receive order. 2. Ship it.", "flowchart", "mermaid", Some("   "))
        .unwrap();
    assert_eq!(diagram.title, "Process Flow");
}

#[test]
fn test_response_envelope_success() {
    let service = DiagramService::new();
    let response = GenerateResponse::from_result(service.generate(
        "Classes: User, Order. User has many Order.",
        "class",
        "plantuml",
        None,
    ));
    assert!(response.is_success());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["diagram_type"], "class");
    assert_eq!(json["output_format"], "plantuml");
    assert_eq!(json["metadata"]["elements_count"], 2);
    assert_eq!(json["metadata"]["parsed_from"], "natural_language");
    assert_eq!(json["spec"]["connections"], 1);
}

#[test]
fn test_response_envelope_unsupported_format() {
    let service = DiagramService::new();
    let response = GenerateResponse::from_result(service.generate("1. Go.", "flowchart", "plantuml", None));
    assert!(!response.is_success());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json["error"],
        "Format 'plantuml' not supported for flowchart diagrams"
    );
    assert_eq!(
        json["supported_formats"],
        serde_json::json!(["mermaid", "python_diagrams"])
    );
    assert!(json.get("success").is_none());
}

#[test]
fn test_spec_serializes_model() {
    let spec = FlowchartExtractor::new().extract("1. Open. 2. Close.").unwrap();
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["diagram_type"], "flowchart");
    assert_eq!(json["elements"][0]["id"], "start");
    assert_eq!(json["elements"][0]["kind"], "start");
    assert_eq!(json["metadata"]["total_steps"], 2);
}
