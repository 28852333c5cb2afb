//! Core diagram trait for all diagram kinds
//!
//! Each diagram kind bundles an extractor with its paired emitter.

use super::{DiagramType, Emitter, ExtractionLimits, Extractor};

/// Core trait for diagram kinds
///
/// # Example
/// ```
/// use diagramsmith::core::{Diagram, DiagramType};
/// use diagramsmith::plugins::sequence::SequenceDiagram;
///
/// assert_eq!(SequenceDiagram::diagram_type(), DiagramType::Sequence);
/// assert_eq!(SequenceDiagram::name(), "sequence");
/// ```
pub trait Diagram: Send + Sync {
    /// The extractor type for this diagram
    type Extractor: Extractor + 'static;

    /// The emitter type for this diagram
    type Emitter: Emitter + 'static;

    /// Create a new extractor instance
    fn create_extractor(limits: ExtractionLimits) -> Self::Extractor;

    /// Create a new emitter instance
    fn create_emitter() -> Self::Emitter;

    /// The diagram kind this bundle handles
    fn diagram_type() -> DiagramType;

    /// Get the name of this diagram type
    fn name() -> &'static str;

    /// Get the version of this diagram type
    fn version() -> &'static str;
}
