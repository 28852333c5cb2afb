//! Core extractor trait
//!
//! An extractor turns one free-text description into a fresh [`DiagramSpec`]
//! for a single diagram kind.

use anyhow::Result;

use super::{DiagramSpec, DiagramType};

/// Core trait for natural-language extractors
///
/// # Example
/// ```
/// use diagramsmith::core::Extractor;
/// use diagramsmith::plugins::flowchart::FlowchartExtractor;
///
/// let extractor = FlowchartExtractor::new();
/// let spec = extractor.extract("1. Receive order. 2. Ship it.").unwrap();
/// assert_eq!(spec.element_count(), 4);
/// ```
pub trait Extractor: Send + Sync {
    /// Build a diagram spec from a description
    fn extract(&self, description: &str) -> Result<DiagramSpec>;

    /// The diagram kind this extractor produces
    fn diagram_type(&self) -> DiagramType;

    /// Get the name of this extractor
    fn name(&self) -> &'static str;

    /// Get the version of this extractor
    fn version(&self) -> &'static str;
}
