//! Flowchart plugin
//!
//! Turns a step-by-step process description into a flowchart: a start node,
//! one process node per step, decision nodes hanging off the last step, and
//! an end node.

mod emitter;
mod extractor;

pub use emitter::{render_mermaid, render_python, FlowchartEmitter};
pub use extractor::{FlowchartExtractor, END_ID, START_ID};

use crate::core::{Diagram, DiagramType, ExtractionLimits};

/// Flowchart diagram implementation
pub struct FlowchartDiagram;

impl Diagram for FlowchartDiagram {
    type Extractor = FlowchartExtractor;
    type Emitter = FlowchartEmitter;

    fn create_extractor(limits: ExtractionLimits) -> Self::Extractor {
        FlowchartExtractor::with_limits(limits)
    }

    fn create_emitter() -> Self::Emitter {
        FlowchartEmitter::new()
    }

    fn diagram_type() -> DiagramType {
        DiagramType::Flowchart
    }

    fn name() -> &'static str {
        "flowchart"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
