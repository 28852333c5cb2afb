//! Class diagram emitter
//!
//! Mermaid `classDiagram`, PlantUML class diagrams and Python `diagrams`
//! placeholder code.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{span, Level};

use crate::core::{
    python_identifier, python_string, renderable_connections, sanitize_label, ConnectionKind,
    DiagramConnection, DiagramElement, DiagramFormat, DiagramSpec, DiagramType, ElementKind,
    Emitter, RenderConfig, RenderFn,
};

static RENDERERS: &[(DiagramFormat, RenderFn)] = &[
    (DiagramFormat::Mermaid, render_mermaid),
    (DiagramFormat::Plantuml, render_plantuml),
    (DiagramFormat::PythonDiagrams, render_python),
];

/// Relationship arrow, shared by Mermaid and PlantUML
fn notation(kind: ConnectionKind) -> &'static str {
    match kind {
        ConnectionKind::Inheritance => "<|--",
        ConnectionKind::Composition => "*--",
        ConnectionKind::Aggregation => "o--",
        ConnectionKind::Dependency => "..>",
        _ => "--",
    }
}

fn classes(spec: &DiagramSpec) -> impl Iterator<Item = &DiagramElement> {
    spec.elements().iter().filter(|e| e.kind == ElementKind::Class)
}

fn class_label(spec: &DiagramSpec, id: &str) -> String {
    spec.element(id)
        .map(|e| sanitize_label(&e.label, false))
        .unwrap_or_else(|| id.trim_start_matches("class_").to_string())
}

/// `To "mult" arrow From`: the target sits left of the arrow
fn relationship_line(spec: &DiagramSpec, connection: &DiagramConnection) -> String {
    let to = class_label(spec, &connection.to);
    let from = class_label(spec, &connection.from);
    match connection.properties.multiplicity() {
        Some(multiplicity) => format!(
            "{} \"{}\" {} {}",
            to,
            sanitize_label(multiplicity, false),
            notation(connection.kind),
            from
        ),
        None => format!("{} {} {}", to, notation(connection.kind), from),
    }
}

fn members(element: &DiagramElement) -> (&[String], &[String]) {
    element.properties.class_members().unwrap_or_default()
}

/// Render as a Mermaid `classDiagram`, title in front matter
pub fn render_mermaid(spec: &DiagramSpec, _config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "---".to_string(),
        format!("title: {}", sanitize_label(&spec.title, false)),
        "---".to_string(),
        "classDiagram".to_string(),
    ];

    for element in classes(spec) {
        let name = sanitize_label(&element.label, false);
        let (attributes, methods) = members(element);
        let stereotypes = element.properties.stereotypes();
        if attributes.is_empty() && methods.is_empty() && stereotypes.is_empty() {
            lines.push(format!("    class {}", name));
        } else {
            lines.push(format!("    class {} {{", name));
            for stereotype in stereotypes {
                lines.push(format!("        <<{}>>", sanitize_label(stereotype, false)));
            }
            for member in attributes.iter().chain(methods) {
                lines.push(format!("        +{}", sanitize_label(member, false)));
            }
            lines.push("    }".to_string());
        }
        lines.push(String::new());
    }

    for connection in renderable_connections(spec) {
        lines.push(format!("    {}", relationship_line(spec, connection)));
    }

    Ok(lines.join("\n"))
}

/// Render as a PlantUML class diagram
pub fn render_plantuml(spec: &DiagramSpec, _config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "@startuml".to_string(),
        format!("title {}", sanitize_label(&spec.title, false)),
        String::new(),
    ];

    for element in classes(spec) {
        let (attributes, methods) = members(element);
        let stereotypes: String = element
            .properties
            .stereotypes()
            .iter()
            .map(|s| format!(" <<{}>>", sanitize_label(s, false)))
            .collect();
        lines.push(format!(
            "class {}{} {{",
            sanitize_label(&element.label, false),
            stereotypes
        ));
        for attribute in attributes {
            lines.push(format!("  +{}", sanitize_label(attribute, false)));
        }
        lines.push("  --".to_string());
        for method in methods {
            lines.push(format!("  +{}", sanitize_label(method, false)));
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    for connection in renderable_connections(spec) {
        lines.push(relationship_line(spec, connection));
    }

    lines.push(String::new());
    lines.push("@enduml".to_string());
    Ok(lines.join("\n"))
}

/// Render as Python `diagrams` code, one blank node per class
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
    for element in classes(spec) {
        let var = python_identifier(element.id.trim_start_matches("class_"));
        lines.push(format!(
            "    {} = Blank(\"{}\")",
            var,
            python_string(&element.label)
        ));
        vars.insert(element.id.as_str(), var);
    }
    lines.push(String::new());

    for connection in renderable_connections(spec) {
        let (Some(from), Some(to)) = (vars.get(connection.from.as_str()), vars.get(connection.to.as_str()))
        else {
            continue;
        };
        lines.push(format!(
            "    {} >> Edge(label=\"{}\") >> {}",
            from,
            connection.kind.as_str(),
            to
        ));
    }

    Ok(lines.join("\n"))
}

/// Class diagram emitter
pub struct ClassEmitter;

impl ClassEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, spec: &DiagramSpec, format: DiagramFormat, config: &RenderConfig) -> Result<String> {
        let render_span = span!(Level::INFO, "emit_class", %format, classes = spec.element_count());
        let _enter = render_span.enter();
        self.emit(spec, format, config)
    }
}

impl Default for ClassEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for ClassEmitter {
    fn diagram_type(&self) -> DiagramType {
        DiagramType::Class
    }

    fn renderers(&self) -> &'static [(DiagramFormat, RenderFn)] {
        RENDERERS
    }

    fn name(&self) -> &'static str {
        "class"
    }
}
