//! Diagram service coordinating extraction and emission
//!
//! The service owns one extractor per implemented diagram type and a
//! dispatch table keyed by `(diagram type, output format)`. It is the only
//! layer that catches failures: everything below it returns errors, and a
//! panic in an extractor or emitter is turned into [`DiagramError::Internal`].

use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    Diagram, DiagramError, DiagramFormat, DiagramSpec, DiagramType, Emitter, ExtractionLimits,
    Extractor, RenderConfig, RenderFn, PARSED_FROM_NATURAL_LANGUAGE,
};
use crate::plugins::class::ClassDiagram;
use crate::plugins::flowchart::FlowchartDiagram;
use crate::plugins::sequence::SequenceDiagram;

/// A rendered diagram with its bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDiagram {
    pub diagram_type: DiagramType,
    pub output_format: DiagramFormat,
    pub title: String,
    pub code: String,
    pub element_count: usize,
    pub connection_count: usize,
    /// Metadata written by the extractor
    pub metadata: BTreeMap<String, Value>,
    /// Non-fatal findings, one per dangling connection
    pub warnings: Vec<String>,
}

/// Coordinates extractors and emitters behind a string-keyed API
pub struct DiagramService {
    extractors: BTreeMap<DiagramType, Box<dyn Extractor>>,
    renderers: BTreeMap<(DiagramType, DiagramFormat), RenderFn>,
    formats: BTreeMap<DiagramType, Vec<DiagramFormat>>,
    render_config: RenderConfig,
}

impl DiagramService {
    /// Service with every implemented diagram type and default tunables
    pub fn new() -> Self {
        Self::with_config(ExtractionLimits::default(), RenderConfig::default())
    }

    pub fn with_config(limits: ExtractionLimits, render_config: RenderConfig) -> Self {
        let mut service = Self::empty(render_config);
        service.register::<SequenceDiagram>(limits);
        service.register::<FlowchartDiagram>(limits);
        service.register::<ClassDiagram>(limits);
        service
    }

    /// Service with no diagram types registered
    pub fn empty(render_config: RenderConfig) -> Self {
        Self {
            extractors: BTreeMap::new(),
            renderers: BTreeMap::new(),
            formats: BTreeMap::new(),
            render_config,
        }
    }

    /// Add a diagram kind's extractor and renderers
    pub fn register<D: Diagram>(&mut self, limits: ExtractionLimits) {
        let diagram_type = D::diagram_type();
        let emitter = D::create_emitter();
        for (format, render) in emitter.renderers() {
            self.renderers.insert((diagram_type, *format), *render);
        }
        self.formats
            .insert(diagram_type, emitter.supported_formats());
        self.extractors
            .insert(diagram_type, Box::new(D::create_extractor(limits)));
        debug!(diagram = D::name(), version = D::version(), "Registered diagram type");
    }

    /// Diagram types with an extractor
    pub fn implemented_types(&self) -> Vec<DiagramType> {
        self.extractors.keys().copied().collect()
    }

    /// Formats available for `diagram_type`, in the emitter's order
    pub fn supported_formats(&self, diagram_type: DiagramType) -> Vec<DiagramFormat> {
        self.formats.get(&diagram_type).cloned().unwrap_or_default()
    }

    /// The full type/format matrix
    pub fn supported_types_and_formats(&self) -> BTreeMap<DiagramType, Vec<DiagramFormat>> {
        self.formats.clone()
    }

    fn extractor(&self, diagram_type: DiagramType) -> Result<&dyn Extractor, DiagramError> {
        self.extractors
            .get(&diagram_type)
            .map(|e| e.as_ref())
            .ok_or_else(|| {
                DiagramError::invalid_input(format!("Unsupported diagram type: {}", diagram_type))
            })
    }

    /// Run only the extractor and return the intermediate spec
    pub fn extract(&self, description: &str, diagram_type: &str) -> Result<DiagramSpec, DiagramError> {
        let diagram_type: DiagramType = diagram_type.parse()?;
        let extractor = self.extractor(diagram_type)?;
        guarded(|| extractor.extract(description))
    }

    /// Translate `description` into `format_name` source for `type_name`
    ///
    /// # Example
    /// ```
    /// use diagramsmith::plugins::DiagramService;
    ///
    /// let service = DiagramService::new();
    /// let diagram = service
    ///     .generate("1. Receive order. 2. Ship it.", "flowchart", "mermaid", None)
    ///     .unwrap();
    /// assert!(diagram.code.contains("flowchart TD"));
    /// assert_eq!(diagram.element_count, 4);
    /// ```
    pub fn generate(
        &self,
        description: &str,
        type_name: &str,
        format_name: &str,
        title: Option<&str>,
    ) -> Result<GeneratedDiagram, DiagramError> {
        let generate_span = span!(
            Level::INFO,
            "generate_diagram",
            diagram_type = type_name,
            format = format_name,
            input_len = description.len()
        );
        let _enter = generate_span.enter();

        let diagram_type: DiagramType = type_name.parse()?;
        let format: DiagramFormat = format_name.parse()?;
        let extractor = self.extractor(diagram_type)?;
        let render = self
            .renderers
            .get(&(diagram_type, format))
            .copied()
            .ok_or_else(|| {
                DiagramError::unsupported_format(
                    diagram_type,
                    format,
                    self.supported_formats(diagram_type),
                )
            })?;

        let mut spec = guarded(|| extractor.extract(description))?;
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            spec.title = title.to_string();
        }

        let config = self.render_config;
        let code = guarded(|| render(&spec, &config))?;

        let warnings = spec.diagnostics();
        for warning in &warnings {
            warn!(%diagram_type, "{}", warning);
        }

        info!(
            %diagram_type,
            %format,
            elements = spec.element_count(),
            connections = spec.connection_count(),
            "Diagram generated"
        );
        Ok(GeneratedDiagram {
            diagram_type,
            output_format: format,
            title: spec.title.clone(),
            code,
            element_count: spec.element_count(),
            connection_count: spec.connection_count(),
            metadata: spec.metadata,
            warnings,
        })
    }
}

impl Default for DiagramService {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a pipeline stage, mapping errors and panics to internal failures
fn guarded<T>(stage: impl FnOnce() -> anyhow::Result<T>) -> Result<T, DiagramError> {
    match catch_unwind(AssertUnwindSafe(stage)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            warn!(error = %err, "Pipeline stage failed");
            Err(match err.downcast::<DiagramError>() {
                Ok(diagram_error) if diagram_error.is_user_error() => diagram_error,
                Ok(diagram_error) => DiagramError::internal(diagram_error.to_string()),
                Err(other) => DiagramError::internal(other.to_string()),
            })
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            warn!(%message, "Pipeline stage panicked");
            Err(DiagramError::internal(message))
        }
    }
}

/// Counts and metadata reported with a successful generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMetadata {
    pub elements_count: usize,
    pub connections_count: usize,
    pub parsed_from: &'static str,
}

/// Spec summary reported with a successful generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecSummary {
    pub elements: usize,
    pub connections: usize,
    pub diagram_metadata: BTreeMap<String, Value>,
}

/// JSON envelope for a generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerateResponse {
    Success {
        success: bool,
        diagram_type: DiagramType,
        output_format: DiagramFormat,
        title: String,
        diagram_code: String,
        metadata: ResponseMetadata,
        spec: SpecSummary,
        warnings: Vec<String>,
    },
    UnsupportedFormat {
        error: String,
        supported_formats: Vec<DiagramFormat>,
    },
    InvalidInput {
        error: String,
        supported_diagram_types: Vec<&'static str>,
        supported_formats: Vec<&'static str>,
    },
    Failure {
        error: String,
    },
}

impl GenerateResponse {
    pub fn from_result(result: Result<GeneratedDiagram, DiagramError>) -> Self {
        match result {
            Ok(diagram) => GenerateResponse::Success {
                success: true,
                diagram_type: diagram.diagram_type,
                output_format: diagram.output_format,
                title: diagram.title,
                diagram_code: diagram.code,
                metadata: ResponseMetadata {
                    elements_count: diagram.element_count,
                    connections_count: diagram.connection_count,
                    parsed_from: PARSED_FROM_NATURAL_LANGUAGE,
                },
                spec: SpecSummary {
                    elements: diagram.element_count,
                    connections: diagram.connection_count,
                    diagram_metadata: diagram.metadata,
                },
                warnings: diagram.warnings,
            },
            Err(error) => {
                let message = error.to_string();
                match error {
                    DiagramError::UnsupportedFormat { supported, .. } => {
                        GenerateResponse::UnsupportedFormat {
                            error: message,
                            supported_formats: supported,
                        }
                    }
                    DiagramError::InvalidInput {
                        message: detail,
                        valid_diagram_types,
                        valid_formats,
                    } => GenerateResponse::InvalidInput {
                        error: detail,
                        supported_diagram_types: valid_diagram_types,
                        supported_formats: valid_formats,
                    },
                    DiagramError::Internal { .. } => GenerateResponse::Failure { error: message },
                    _ => GenerateResponse::Failure {
                        error: DiagramError::internal(message).to_string(),
                    },
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerateResponse::Success { .. })
    }
}
