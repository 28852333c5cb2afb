//! Class diagram plugin
//!
//! Builds a domain model (classes, attributes, methods and relationships)
//! from sentences like "User has name and email. Order contains Product."

mod emitter;
mod extractor;
mod model;

pub use emitter::{render_mermaid, render_plantuml, render_python, ClassEmitter};
pub use extractor::ClassExtractor;
pub use model::{class_id, ClassDef, Relationship};

use crate::core::{Diagram, DiagramType, ExtractionLimits};

/// Class diagram implementation
pub struct ClassDiagram;

impl Diagram for ClassDiagram {
    type Extractor = ClassExtractor;
    type Emitter = ClassEmitter;

    fn create_extractor(limits: ExtractionLimits) -> Self::Extractor {
        ClassExtractor::with_limits(limits)
    }

    fn create_emitter() -> Self::Emitter {
        ClassEmitter::new()
    }

    fn diagram_type() -> DiagramType {
        DiagramType::Class
    }

    fn name() -> &'static str {
        "class"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
