//! End-to-end scenarios: one description per diagram type, checked at
//! both the extracted model and the rendered source.

use diagramsmith::prelude::*;
use diagramsmith::{ActorType, ConnectionKind, ElementKind};

const LOGIN: &str =
    "User sends login request to System. System validates credentials. System returns token to User.";
const ORDER_FLOW: &str = "1. Receive order. 2. Check inventory. 3. Process payment.";
const SHOP: &str = "User has name and email. User creates Order. Order contains Product.";

#[test]
fn sequence_actors_and_ordered_messages() {
    let spec = SequenceExtractor::new().extract(LOGIN).unwrap();

    let user = spec.element("actor_user").unwrap();
    assert_eq!(user.label, "User");
    assert_eq!(user.properties.actor_type(), Some(ActorType::Person));
    let system = spec.element("actor_system").unwrap();
    assert_eq!(system.properties.actor_type(), Some(ActorType::System));

    let orders: Vec<u32> = spec
        .connections()
        .iter()
        .filter_map(|c| c.properties.order())
        .collect();
    assert!(orders.len() >= 2);
    assert!(orders.windows(2).all(|w| w[0] < w[1]));

    let first = &spec.connections()[0];
    assert_eq!((first.from.as_str(), first.to.as_str()), ("actor_user", "actor_system"));
    let reply = &spec.connections()[1];
    assert_eq!(reply.kind, ConnectionKind::Return);
    assert_eq!(reply.label.as_deref(), Some("Return token"));
}

#[test]
fn sequence_mermaid_declares_before_messages() {
    let code = generate_code(LOGIN, "sequence", "mermaid");
    let lines: Vec<&str> = code.lines().map(str::trim).collect();

    let last_declaration = lines
        .iter()
        .rposition(|l| l.starts_with("actor ") || l.starts_with("participant "))
        .unwrap();
    let first_message = lines.iter().position(|l| l.contains("actor_user->>")).unwrap();
    assert!(last_declaration < first_message);

    assert!(lines.contains(&"actor actor_user as User"));
    assert!(lines.contains(&"participant actor_system as System"));
    assert!(code.contains("actor_system-->actor_user: Return token"));
}

#[test]
fn flowchart_numbered_chain() {
    let spec = FlowchartExtractor::new().extract(ORDER_FLOW).unwrap();

    let kinds: Vec<ElementKind> = spec.elements().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Start,
            ElementKind::Process,
            ElementKind::Process,
            ElementKind::Process,
            ElementKind::End,
        ]
    );
    let labels: Vec<&str> = spec.elements()[1..4].iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Receive order.", "Check inventory.", "Process payment."]);

    let edges: Vec<(&str, &str)> = spec
        .connections()
        .iter()
        .map(|c| (c.from.as_str(), c.to.as_str()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("start", "step_1"),
            ("step_1", "step_2"),
            ("step_2", "step_3"),
            ("step_3", "finish"),
        ]
    );
    assert!(spec.dangling_connections().is_empty());
}

#[test]
fn flowchart_mermaid_shapes() {
    let code = generate_code(ORDER_FLOW, "flowchart", "mermaid");
    assert!(code.contains("flowchart TD"));
    assert!(code.contains("start([\"Start\"])"));
    assert!(code.contains("step_2[\"Check inventory.\"]"));
    assert!(code.contains("finish([\"End\"])"));
    assert!(code.contains("step_3 --> finish"));
    assert!(!code.contains('{'));
}

#[test]
fn flowchart_decision_branches_from_tail() {
    let text = "1. Take payment\n2. If payment succeeds then ship";
    let spec = FlowchartExtractor::new().extract(text).unwrap();
    let decision = spec.element("decision_1").unwrap();
    assert_eq!(decision.kind, ElementKind::Decision);
    assert_eq!(decision.label, "payment succeeds");
    assert!(spec
        .connections()
        .iter()
        .any(|c| c.from == "step_2" && c.to == "decision_1"));
}

#[test]
fn class_names_and_composition() {
    let spec = ClassExtractor::new().extract(SHOP).unwrap();

    let labels: Vec<&str> = spec.elements().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["User", "Order", "Product"]);

    let user_order = spec
        .connections()
        .iter()
        .find(|c| c.from == "class_user" && c.to == "class_order")
        .unwrap();
    assert_eq!(user_order.kind, ConnectionKind::Composition);

    let (attributes, _) = spec
        .element("class_user")
        .unwrap()
        .properties
        .class_members()
        .unwrap();
    assert!(attributes.iter().any(|a| a == "name"));
    assert!(attributes.iter().any(|a| a == "email"));
}

#[test]
fn class_mermaid_arrow_points_from_target() {
    let code = generate_code(SHOP, "class", "mermaid");
    assert!(code.contains("classDiagram"));
    assert!(code.contains("    class User {"));
    assert!(code.contains("        +email"));
    assert!(code.contains("Order *-- User"));
    assert!(code.contains("Product *-- Order"));
}

#[test]
fn class_plantuml_matches_mermaid_arrows() {
    let code = generate_code(SHOP, "class", "plantuml");
    assert!(code.starts_with("@startuml"));
    assert!(code.contains("class User {"));
    assert!(code.contains("Order *-- User"));
}

#[test]
fn generation_is_deterministic() {
    for (text, diagram_type) in [(LOGIN, "sequence"), (ORDER_FLOW, "flowchart"), (SHOP, "class")] {
        for format in ["mermaid", "python_diagrams"] {
            assert_eq!(
                generate_code(text, diagram_type, format),
                generate_code(text, diagram_type, format)
            );
        }
    }
}

#[test]
fn format_matrix() {
    let service = DiagramService::new();
    let matrix = service.supported_types_and_formats();
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix[&DiagramType::Flowchart].len(), 2);
    assert_eq!(matrix[&DiagramType::Sequence].len(), 3);
    assert_eq!(matrix[&DiagramType::Class].len(), 3);

    for (diagram_type, formats) in &matrix {
        for format in formats {
            let text = match diagram_type {
                DiagramType::Sequence => LOGIN,
                DiagramType::Flowchart => ORDER_FLOW,
                _ => SHOP,
            };
            let diagram = service
                .generate(text, diagram_type.as_str(), format.as_str(), None)
                .unwrap();
            assert!(!diagram.code.is_empty());
        }
    }
}

#[test]
fn dangling_connections_are_skipped_and_reported() {
    let mut spec = DiagramSpec::new(DiagramType::Flowchart, "Broken", "");
    spec.add_element(DiagramElement::new("a", "A", ElementKind::Process))
        .unwrap();
    spec.add_connection(DiagramConnection::new("a", "ghost"));

    let code = FlowchartEmitter::new()
        .emit(&spec, DiagramFormat::Mermaid, &RenderConfig::default())
        .unwrap();
    assert!(!code.contains("ghost"));
    assert_eq!(spec.diagnostics().len(), 1);
}

#[test]
fn duplicate_element_ids_are_rejected() {
    let mut spec = DiagramSpec::new(DiagramType::Class, "Dupes", "");
    spec.add_element(DiagramElement::new("class_user", "User", ElementKind::Class))
        .unwrap();
    let err = spec
        .add_element(DiagramElement::new("class_user", "User", ElementKind::Class))
        .unwrap_err();
    assert!(matches!(err, DiagramError::DuplicateElement { .. }));
}

fn generate_code(text: &str, diagram_type: &str, format: &str) -> String {
    diagramsmith::generate(text, diagram_type, format).unwrap().code
}
