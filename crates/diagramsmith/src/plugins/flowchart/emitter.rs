//! Flowchart emitter
//!
//! Mermaid `flowchart` source and Python `diagrams` flowchart code.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{span, Level};

use crate::core::{
    python_identifier, python_string, renderable_connections, sanitize_label, DiagramFormat,
    DiagramSpec, DiagramType, ElementKind, Emitter, RenderConfig, RenderFn,
};

static RENDERERS: &[(DiagramFormat, RenderFn)] = &[
    (DiagramFormat::Mermaid, render_mermaid),
    (DiagramFormat::PythonDiagrams, render_python),
];

/// Opening and closing brackets for a node shape
fn mermaid_shape(kind: ElementKind) -> (&'static str, &'static str) {
    match kind {
        ElementKind::Start | ElementKind::End => ("([", "])"),
        ElementKind::Decision => ("{", "}"),
        ElementKind::Data => ("[(", ")]"),
        ElementKind::Connector => ("((", "))"),
        _ => ("[", "]"),
    }
}

/// Render as a Mermaid `flowchart`, title in front matter
pub fn render_mermaid(spec: &DiagramSpec, config: &RenderConfig) -> Result<String> {
    let mut lines = vec![
        "---".to_string(),
        format!("title: {}", sanitize_label(&spec.title, false)),
        "---".to_string(),
        format!("flowchart {}", config.direction),
    ];

    for element in spec.elements() {
        let (open, close) = mermaid_shape(element.kind);
        lines.push(format!(
            "    {}{}\"{}\"{}",
            element.id,
            open,
            sanitize_label(&element.label, false),
            close
        ));
    }
    lines.push(String::new());

    for connection in renderable_connections(spec) {
        match connection.label.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(label) => lines.push(format!(
                "    {} --> |{}| {}",
                connection.from,
                sanitize_label(label, true),
                connection.to
            )),
            None => lines.push(format!("    {} --> {}", connection.from, connection.to)),
        }
    }

    Ok(lines.join("\n"))
}

fn python_node(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Start | ElementKind::End => "StartEnd",
        ElementKind::Decision => "Decision",
        _ => "Action",
    }
}

/// Render as Python `diagrams` flowchart code
pub fn render_python(spec: &DiagramSpec, config: &RenderConfig) -> Result<String> {
    let connections = renderable_connections(spec);
    let labeled = connections.iter().any(|c| c.label.is_some());

    let mut lines = vec![
        if labeled {
            "from diagrams import Diagram, Edge".to_string()
        } else {
            "from diagrams import Diagram".to_string()
        },
        "from diagrams.programming.flowchart import Action, Decision, StartEnd".to_string(),
        String::new(),
        format!(
            "with Diagram(\"{}\", show=False, direction=\"{}\"):",
            python_string(&spec.title),
            config.direction.as_graphviz()
        ),
    ];

    let mut vars: HashMap<&str, String> = HashMap::new();
    for element in spec.elements() {
        let var = python_identifier(&element.id);
        lines.push(format!(
            "    {} = {}(\"{}\")",
            var,
            python_node(element.kind),
            python_string(&element.label)
        ));
        vars.insert(element.id.as_str(), var);
    }
    lines.push(String::new());

    for connection in connections {
        let (Some(from), Some(to)) = (vars.get(connection.from.as_str()), vars.get(connection.to.as_str()))
        else {
            continue;
        };
        match &connection.label {
            Some(label) => lines.push(format!(
                "    {} >> Edge(label=\"{}\") >> {}",
                from,
                python_string(label),
                to
            )),
            None => lines.push(format!("    {} >> {}", from, to)),
        }
    }

    Ok(lines.join("\n"))
}

/// Flowchart emitter
pub struct FlowchartEmitter;

impl FlowchartEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, spec: &DiagramSpec, format: DiagramFormat, config: &RenderConfig) -> Result<String> {
        let render_span = span!(Level::INFO, "emit_flowchart", %format, nodes = spec.element_count());
        let _enter = render_span.enter();
        self.emit(spec, format, config)
    }
}

impl Default for FlowchartEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for FlowchartEmitter {
    fn diagram_type(&self) -> DiagramType {
        DiagramType::Flowchart
    }

    fn renderers(&self) -> &'static [(DiagramFormat, RenderFn)] {
        RENDERERS
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagramConnection, DiagramElement, Direction, Extractor};
    use crate::plugins::flowchart::FlowchartExtractor;

    const NUMBERED: &str = "1. Receive order. 2. Check inventory. 3. Process payment.";

    #[test]
    fn test_mermaid_numbered_process() {
        let spec = FlowchartExtractor::new().extract(NUMBERED).unwrap();
        let out = render_mermaid(&spec, &RenderConfig::default()).unwrap();
        let expected = [
            "---",
            "title: Process Flow",
            "---",
            "flowchart TD",
            "    start([\"Start\"])",
            "    step_1[\"Receive order.\"]",
            "    step_2[\"Check inventory.\"]",
            "    step_3[\"Process payment.\"]",
            "    finish([\"End\"])",
            "",
            "    start --> step_1",
            "    step_1 --> step_2",
            "    step_2 --> step_3",
            "    step_3 --> finish",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_mermaid_shapes_and_edge_labels() {
        let mut spec = DiagramSpec::new(DiagramType::Flowchart, "Shapes", "");
        spec.add_element(DiagramElement::new("q", "Ok?", ElementKind::Decision))
            .unwrap();
        spec.add_element(DiagramElement::new("d", "Rows", ElementKind::Data))
            .unwrap();
        spec.add_element(DiagramElement::new("c", "A", ElementKind::Connector))
            .unwrap();
        spec.add_connection(DiagramConnection::new("q", "d").with_label("yes|no"));
        spec.add_connection(DiagramConnection::new("d", "missing"));

        let config = RenderConfig::with_direction(Direction::LeftRight);
        let out = render_mermaid(&spec, &config).unwrap();
        assert!(out.contains("flowchart LR"));
        assert!(out.contains("    q{\"Ok?\"}"));
        assert!(out.contains("    d[(\"Rows\")]"));
        assert!(out.contains("    c((\"A\"))"));
        assert!(out.contains("    q --> |yes/no| d"));
        assert!(!out.contains("missing"));
    }

    #[test]
    fn test_python_flowchart() {
        let spec = FlowchartExtractor::new().extract(NUMBERED).unwrap();
        let out = render_python(&spec, &RenderConfig::default()).unwrap();
        assert!(out.starts_with(
            "from diagrams import Diagram\n\
             from diagrams.programming.flowchart import Action, Decision, StartEnd\n"
        ));
        assert!(out.contains("with Diagram(\"Process Flow\", show=False, direction=\"TB\"):"));
        assert!(out.contains("    start = StartEnd(\"Start\")"));
        assert!(out.contains("    step_2 = Action(\"Check inventory.\")"));
        assert!(out.contains("    finish = StartEnd(\"End\")"));
        assert!(out.contains("    step_3 >> finish"));
    }

    #[test]
    fn test_python_labels_use_edge() {
        let mut spec = DiagramSpec::new(DiagramType::Flowchart, "T", "");
        spec.add_element(DiagramElement::new("1st", "One", ElementKind::Process))
            .unwrap();
        spec.add_element(DiagramElement::new("if", "Two", ElementKind::Decision))
            .unwrap();
        spec.add_connection(DiagramConnection::new("1st", "if").with_label("go"));
        let out = render_python(&spec, &RenderConfig::default()).unwrap();
        assert!(out.starts_with("from diagrams import Diagram, Edge\n"));
        assert!(out.contains("    _1st = Action(\"One\")"));
        assert!(out.contains("    _if = Decision(\"Two\")"));
        assert!(out.contains("    _1st >> Edge(label=\"go\") >> _if"));
    }

    #[test]
    fn test_no_plantuml() {
        let emitter = FlowchartEmitter::new();
        assert_eq!(
            emitter.supported_formats(),
            vec![DiagramFormat::Mermaid, DiagramFormat::PythonDiagrams]
        );
        let spec = DiagramSpec::new(DiagramType::Flowchart, "T", "");
        assert!(emitter
            .emit(&spec, DiagramFormat::Plantuml, &RenderConfig::default())
            .is_err());
    }
}
