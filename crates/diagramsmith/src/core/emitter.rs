//! Core emitter trait
//!
//! An emitter renders a [`DiagramSpec`] into notation source text. Each
//! emitter publishes a static table of `(format, render function)` pairs; the
//! service merges those tables into its `(diagram type, format)` dispatch.

use anyhow::Result;
use tracing::debug;

use super::{
    DiagramConnection, DiagramError, DiagramFormat, DiagramSpec, DiagramType, RenderConfig,
};

/// A rendering function for one notation
pub type RenderFn = fn(&DiagramSpec, &RenderConfig) -> Result<String>;

/// Core trait for notation emitters
///
/// # Example
/// ```
/// use diagramsmith::core::{DiagramFormat, Emitter};
/// use diagramsmith::plugins::flowchart::FlowchartEmitter;
///
/// let emitter = FlowchartEmitter::new();
/// assert!(emitter.supports(DiagramFormat::Mermaid));
/// assert!(!emitter.supports(DiagramFormat::Plantuml));
/// ```
pub trait Emitter: Send + Sync {
    /// The diagram kind this emitter understands
    fn diagram_type(&self) -> DiagramType;

    /// Render functions keyed by output format, in preference order
    fn renderers(&self) -> &'static [(DiagramFormat, RenderFn)];

    /// Get the name of this emitter
    fn name(&self) -> &'static str;

    /// Formats this emitter can produce
    fn supported_formats(&self) -> Vec<DiagramFormat> {
        self.renderers().iter().map(|(format, _)| *format).collect()
    }

    fn supports(&self, format: DiagramFormat) -> bool {
        self.renderer(format).is_some()
    }

    fn renderer(&self, format: DiagramFormat) -> Option<RenderFn> {
        self.renderers()
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, render)| *render)
    }

    /// Render `spec` in `format`
    fn emit(&self, spec: &DiagramSpec, format: DiagramFormat, config: &RenderConfig) -> Result<String> {
        if spec.diagram_type != self.diagram_type() {
            return Err(DiagramError::render_error(format!(
                "{} cannot render a {} diagram",
                self.name(),
                spec.diagram_type
            ))
            .into());
        }
        match self.renderer(format) {
            Some(render) => render(spec, config),
            None => Err(DiagramError::unsupported_format(
                self.diagram_type(),
                format,
                self.supported_formats(),
            )
            .into()),
        }
    }
}

/// Connections whose endpoints both exist, in spec order
///
/// Dangling connections are left out of every rendering and logged here.
pub fn renderable_connections(spec: &DiagramSpec) -> Vec<&DiagramConnection> {
    spec.connections()
        .iter()
        .filter(|c| {
            let ok = spec.has_element(&c.from) && spec.has_element(&c.to);
            if !ok {
                debug!(from = %c.from, to = %c.to, "Skipping dangling connection");
            }
            ok
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiagramElement, ElementKind};

    fn render_count(spec: &DiagramSpec, _config: &RenderConfig) -> Result<String> {
        Ok(spec.element_count().to_string())
    }

    static RENDERERS: &[(DiagramFormat, RenderFn)] = &[(DiagramFormat::Mermaid, render_count)];

    struct CountEmitter;

    impl Emitter for CountEmitter {
        fn diagram_type(&self) -> DiagramType {
            DiagramType::Flowchart
        }

        fn renderers(&self) -> &'static [(DiagramFormat, RenderFn)] {
            RENDERERS
        }

        fn name(&self) -> &'static str {
            "count"
        }
    }

    #[test]
    fn test_emit_dispatches_by_format() {
        let spec = DiagramSpec::new(DiagramType::Flowchart, "T", "");
        let emitter = CountEmitter;
        assert_eq!(emitter.supported_formats(), vec![DiagramFormat::Mermaid]);
        assert_eq!(
            emitter
                .emit(&spec, DiagramFormat::Mermaid, &RenderConfig::default())
                .unwrap(),
            "0"
        );
        let err = emitter
            .emit(&spec, DiagramFormat::Plantuml, &RenderConfig::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Format 'plantuml' not supported for flowchart diagrams"
        );
        assert!(err.downcast_ref::<DiagramError>().unwrap().is_user_error());
    }

    #[test]
    fn test_emit_rejects_other_diagram_types() {
        let spec = DiagramSpec::new(DiagramType::Class, "T", "");
        let err = CountEmitter
            .emit(&spec, DiagramFormat::Mermaid, &RenderConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Render error: count cannot render a class diagram");
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::RenderError { .. })
        ));
    }

    #[test]
    fn test_renderable_connections_skip_dangling() {
        let mut spec = DiagramSpec::new(DiagramType::Flowchart, "T", "");
        spec.add_element(DiagramElement::new("a", "A", ElementKind::Process))
            .unwrap();
        spec.add_element(DiagramElement::new("b", "B", ElementKind::Process))
            .unwrap();
        spec.add_connection(DiagramConnection::new("a", "ghost"));
        spec.add_connection(DiagramConnection::new("a", "b"));
        let kept = renderable_connections(&spec);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].to, "b");
    }
}
