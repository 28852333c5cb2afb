//! Tests for core error types

use diagramsmith::core::{DiagramError, DiagramFormat, DiagramType};
use diagramsmith::generate;

#[test]
fn test_invalid_input() {
    let error = DiagramError::invalid_input("Unknown output format: 'png'");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Invalid input"));
    assert!(error_msg.contains("png"));
    assert!(error.is_user_error());
}

#[test]
fn test_unsupported_format_message() {
    let error = DiagramError::unsupported_format(
        DiagramType::Sequence,
        DiagramFormat::Svg,
        vec![DiagramFormat::Mermaid],
    );
    assert_eq!(
        error.to_string(),
        "Format 'svg' not supported for sequence diagrams"
    );
}

#[test]
fn test_extraction_error() {
    let error = DiagramError::extraction_error("no sentences");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Extraction error"));
    assert!(error_msg.contains("no sentences"));
    assert!(!error.is_user_error());
}

#[test]
fn test_render_error() {
    let error = DiagramError::render_error("Render failed");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("Render error"));
    assert!(error_msg.contains("Render failed"));
}

#[test]
fn test_internal_error() {
    let error = DiagramError::internal("boom");
    assert_eq!(error.to_string(), "Failed to generate diagram: boom");
}

#[test]
fn test_error_debug() {
    let error = DiagramError::duplicate_element("step_1");
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("DuplicateElement"));
}

#[test]
fn test_unknown_type_is_invalid_input() {
    let err = generate("User sends data to Server.", "venn", "mermaid").unwrap_err();
    match err {
        DiagramError::InvalidInput {
            message,
            valid_diagram_types,
            valid_formats,
        } => {
            assert!(message.contains("venn"));
            assert!(valid_diagram_types.contains(&"sequence"));
            assert!(valid_formats.contains(&"python_diagrams"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unimplemented_type_is_invalid_input() {
    let err = generate("Project plan for Q3.", "gantt", "mermaid").unwrap_err();
    assert!(matches!(err, DiagramError::InvalidInput { .. }));
    assert!(err.to_string().contains("Unsupported diagram type: gantt"));
}

#[test]
fn test_unsupported_pairing_lists_alternatives() {
    let err = generate("1. Start. 2. Stop.", "flowchart", "plantuml").unwrap_err();
    match err {
        DiagramError::UnsupportedFormat { supported, .. } => {
            assert!(supported.contains(&DiagramFormat::Mermaid));
            assert!(supported.contains(&DiagramFormat::PythonDiagrams));
            assert!(!supported.contains(&DiagramFormat::Plantuml));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
