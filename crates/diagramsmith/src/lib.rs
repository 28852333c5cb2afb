//! Diagramsmith - Turn plain-English descriptions into diagram source
//!
//! A library that reads a short natural-language description of a system,
//! extracts a diagram model from it with ordered regex heuristics, and emits
//! Mermaid, PlantUML or Python `diagrams` source.
//!
//! # Quick Start
//!
//! ```rust
//! use diagramsmith::generate;
//!
//! let diagram = generate(
//!     "User sends login request to System. System returns token to User.",
//!     "sequence",
//!     "mermaid",
//! )
//! .unwrap();
//! assert!(diagram.code.starts_with("sequenceDiagram"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use diagramsmith::prelude::*;
//!
//! let extractor = ClassExtractor::new();
//! let spec = extractor
//!     .extract("Classes: User, Order. User has many Order.")
//!     .unwrap();
//! assert_eq!(spec.element_count(), 2);
//!
//! let code = render_class_plantuml(&spec, &RenderConfig::default()).unwrap();
//! assert!(code.starts_with("@startuml"));
//! ```

pub mod core;
pub mod patterns;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Diagram, DiagramConnection, DiagramElement, DiagramError, DiagramFormat, DiagramSpec,
        DiagramType, Direction, Emitter, ExtractionLimits, Extractor, RenderConfig,
    };
    pub use crate::plugins::class::{
        render_plantuml as render_class_plantuml, ClassEmitter, ClassExtractor,
    };
    pub use crate::plugins::flowchart::{FlowchartEmitter, FlowchartExtractor};
    pub use crate::plugins::sequence::{SequenceEmitter, SequenceExtractor};
    pub use crate::plugins::{DiagramService, GenerateResponse, GeneratedDiagram};
}

/// Generate diagram source with default limits and layout
///
/// This is the simplest entry point. Diagram type and format names are
/// matched case-insensitively (`"sequence"`, `"Flowchart"`, `"python_diagrams"`).
///
/// # Example
/// ```rust
/// use diagramsmith::generate;
///
/// let diagram = generate("1. Open the box. 2. Remove the manual.", "flowchart", "mermaid").unwrap();
/// assert!(diagram.code.contains("Open the box"));
///
/// let err = generate("anything", "flowchart", "plantuml").unwrap_err();
/// assert_eq!(err.to_string(), "Format 'plantuml' not supported for flowchart diagrams");
/// ```
pub fn generate(
    description: &str,
    diagram_type: &str,
    format: &str,
) -> Result<plugins::GeneratedDiagram, DiagramError> {
    plugins::DiagramService::new().generate(description, diagram_type, format, None)
}
