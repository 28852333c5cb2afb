//! End-to-end tests against the built binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_diagramsmith"))
        .args(args)
        .env("DIAGRAMSMITH_LOG_LEVEL", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn diagramsmith");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_generate_sequence_from_stdin() {
    let output = run(
        &["generate", "-t", "sequence", "-f", "mermaid"],
        "User sends login request to System. System returns token to User.",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("sequenceDiagram\n"));
    assert!(stdout.contains("actor_user->>actor_system: Login request"));
    assert!(stdout.ends_with('\n'));
}

#[test]
fn test_generate_plantuml_class() {
    let output = run(
        &["generate", "--type", "CLASS", "--format", "PlantUML", "-i", "-"],
        "Classes: User, Order. User has many Order.",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("@startuml"));
    assert!(stdout.trim_end().ends_with("@enduml"));
}

#[test]
fn test_unsupported_format_exits_with_error() {
    let output = run(
        &["generate", "-t", "flowchart", "-f", "plantuml"],
        "1. Receive order.",
    );
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Format 'plantuml' not supported for flowchart diagrams"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unimplemented_type_json_envelope() {
    let output = run(&["generate", "-t", "gantt", "--json"], "Plan the release.");
    assert_eq!(output.status.code(), Some(1));

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["error"], "Unsupported diagram type: gantt");
    assert!(body["supported_diagram_types"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("gantt")));
}

#[test]
fn test_generate_json_success() {
    let output = run(
        &["generate", "-t", "flowchart", "--json", "--title", "Orders"],
        "1. Receive order. 2. Ship order.",
    );
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["title"], "Orders");
    assert_eq!(body["metadata"]["elements_count"], 4);
}

#[test]
fn test_formats_json() {
    let output = run(&["formats", "--json"], "");
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        body["sequence"],
        serde_json::json!(["mermaid", "plantuml", "python_diagrams"])
    );
    assert_eq!(body["flowchart"], serde_json::json!(["mermaid", "python_diagrams"]));
    assert!(body.get("gantt").is_none());
}

#[test]
fn test_recommend_json() {
    let output = run(
        &["recommend", "--json"],
        "An online store with login and checkout for 5k users",
    );
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["analysis"]["application_type"], "e_commerce");
    assert_eq!(body["analysis"]["scale"], "medium");
    assert!(!body["matches"].as_array().unwrap().is_empty());
}

#[test]
fn test_missing_input_file() {
    let output = run(&["generate", "-i", "/nonexistent/notes.txt"], "");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read input file"));
}

#[test]
fn test_log_level_flag_overrides_environment() {
    let output = run(
        &["--log-level", "debug", "--log-format", "json", "generate", "-t", "flowchart"],
        "1. Receive order. 2. Ship order.",
    );
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Read input"));
    assert!(stderr.contains("Generated diagram"));
    assert!(String::from_utf8(output.stdout).unwrap().starts_with("flowchart TD"));
}
