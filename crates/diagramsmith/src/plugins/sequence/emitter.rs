//! Sequence diagram emitter
//!
//! Renders actors and ordered messages as Mermaid, PlantUML or Python
//! `diagrams` source.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, span, Level};

use crate::core::{
    python_identifier, python_string, renderable_connections, sanitize_label, ActorType,
    ConnectionKind, DiagramConnection, DiagramFormat, DiagramSpec, DiagramType, ElementKind,
    Emitter, RenderConfig, RenderFn,
};

static RENDERERS: &[(DiagramFormat, RenderFn)] = &[
    (DiagramFormat::Mermaid, render_mermaid),
    (DiagramFormat::Plantuml, render_plantuml),
    (DiagramFormat::PythonDiagrams, render_python),
];

/// Renderable messages sorted by `order`, ties kept in spec order
fn ordered_messages(spec: &DiagramSpec) -> Vec<&DiagramConnection> {
    let mut messages = renderable_connections(spec);
    messages.sort_by_key(|c| c.properties.order().unwrap_or(0));
    messages
}

fn actor_type_of(spec: &DiagramSpec, id: &str) -> ActorType {
    spec.element(id)
        .and_then(|e| e.properties.actor_type())
        .unwrap_or(ActorType::System)
}

fn message_label(connection: &DiagramConnection) -> String {
    connection
        .label
        .as_deref()
        .map(|l| sanitize_label(l, false))
        .unwrap_or_default()
}

fn mermaid_arrow(connection: &DiagramConnection) -> &'static str {
    match connection.kind {
        ConnectionKind::Async => "-))",
        ConnectionKind::Return => "-->",
        _ if connection.properties.activation() => "->>+",
        _ => "->>",
    }
}

fn plantuml_arrow(kind: ConnectionKind) -> &'static str {
    match kind {
        ConnectionKind::Async => "->>",
        ConnectionKind::Return => "-->",
        ConnectionKind::Create => "->*",
        _ => "->",
    }
}

/// Render as a Mermaid `sequenceDiagram`
pub fn render_mermaid(spec: &DiagramSpec, _config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "sequenceDiagram".to_string(),
        format!("    title {}", sanitize_label(&spec.title, false)),
        String::new(),
    ];

    for element in spec.elements().iter().filter(|e| e.kind == ElementKind::Actor) {
        let keyword = match actor_type_of(spec, &element.id) {
            ActorType::Person => "actor",
            _ => "participant",
        };
        lines.push(format!(
            "    {} {} as {}",
            keyword,
            element.id,
            sanitize_label(&element.label, false)
        ));
    }
    lines.push(String::new());

    for message in ordered_messages(spec) {
        lines.push(format!(
            "    {}{}{}: {}",
            message.from,
            mermaid_arrow(message),
            message.to,
            message_label(message)
        ));
    }

    Ok(lines.join("\n"))
}

/// Render as a PlantUML sequence diagram
pub fn render_plantuml(spec: &DiagramSpec, _config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "@startuml".to_string(),
        format!("title {}", sanitize_label(&spec.title, false)),
        String::new(),
    ];

    for element in spec.elements().iter().filter(|e| e.kind == ElementKind::Actor) {
        let keyword = match actor_type_of(spec, &element.id) {
            ActorType::Person => "actor",
            ActorType::Database => "database",
            ActorType::System => "participant",
        };
        lines.push(format!(
            "{} \"{}\" as {}",
            keyword,
            sanitize_label(&element.label, false),
            element.id
        ));
    }
    lines.push(String::new());

    for message in ordered_messages(spec) {
        lines.push(format!(
            "{} {} {}: {}",
            message.from,
            plantuml_arrow(message.kind),
            message.to,
            message_label(message)
        ));
        if message.properties.activation() {
            lines.push(format!("activate {}", message.to));
        }
    }

    lines.push(String::new());
    lines.push("@enduml".to_string());
    Ok(lines.join("\n"))
}

/// Render as Python `diagrams` code, one blank node per actor
pub fn render_python(spec: &DiagramSpec, config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "from diagrams import Diagram, Edge".to_string(),
        "from diagrams.generic.blank import Blank".to_string(),
        String::new(),
        format!(
            "with Diagram(\"{}\", show=False, direction=\"{}\"):",
            python_string(&spec.title),
            config.direction.as_graphviz()
        ),
    ];

    let mut vars: HashMap<&str, String> = HashMap::new();
    for element in spec.elements().iter().filter(|e| e.kind == ElementKind::Actor) {
        let var = python_identifier(element.id.trim_start_matches("actor_"));
        lines.push(format!(
            "    {} = Blank(\"{}\")",
            var,
            python_string(&element.label)
        ));
        vars.insert(element.id.as_str(), var);
    }
    lines.push(String::new());

    for message in ordered_messages(spec) {
        let (Some(from), Some(to)) = (vars.get(message.from.as_str()), vars.get(message.to.as_str()))
        else {
            debug!(from = %message.from, to = %message.to, "Skipping message between non-actors");
            continue;
        };
        lines.push(format!(
            "    {} >> Edge(label=\"{}\") >> {}",
            from,
            python_string(message.label.as_deref().unwrap_or_default()),
            to
        ));
    }

    Ok(lines.join("\n"))
}

/// Sequence diagram emitter
pub struct SequenceEmitter;

impl SequenceEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Render with tracing, as the service does
    pub fn render(&self, spec: &DiagramSpec, format: DiagramFormat, config: &RenderConfig) -> Result<String> {
        let render_span = span!(Level::INFO, "emit_sequence", %format, messages = spec.connection_count());
        let _enter = render_span.enter();
        self.emit(spec, format, config)
    }
}

impl Default for SequenceEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for SequenceEmitter {
    fn diagram_type(&self) -> DiagramType {
        DiagramType::Sequence
    }

    fn renderers(&self) -> &'static [(DiagramFormat, RenderFn)] {
        RENDERERS
    }

    fn name(&self) -> &'static str {
        "sequence"
    }
}
