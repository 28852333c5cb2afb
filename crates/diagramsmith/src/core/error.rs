//! Core error types for diagram generation
//!
//! Errors fall into two camps: the caller selected something that does not
//! exist or is not supported (actionable, carries the alternatives), and
//! something broke inside the pipeline (generic, carries a diagnostic).

use thiserror::Error;

use super::{DiagramFormat, DiagramType};

/// Core error types for diagram generation
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        valid_diagram_types: Vec<&'static str>,
        valid_formats: Vec<&'static str>,
    },

    #[error("Format '{format}' not supported for {diagram_type} diagrams")]
    UnsupportedFormat {
        diagram_type: DiagramType,
        format: DiagramFormat,
        supported: Vec<DiagramFormat>,
    },

    #[error("Duplicate element id: {id}")]
    DuplicateElement { id: String },

    #[error("Extraction error: {message}")]
    ExtractionError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Failed to generate diagram: {message}")]
    Internal { message: String },
}

impl DiagramError {
    /// Create an invalid-input error listing every diagram type and format
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            valid_diagram_types: DiagramType::names(),
            valid_formats: DiagramFormat::names(),
        }
    }

    /// Create an unsupported-format error for one diagram type
    pub fn unsupported_format(
        diagram_type: DiagramType,
        format: DiagramFormat,
        supported: Vec<DiagramFormat>,
    ) -> Self {
        Self::UnsupportedFormat {
            diagram_type,
            format,
            supported,
        }
    }

    /// Create a new duplicate element error
    pub fn duplicate_element(id: impl Into<String>) -> Self {
        Self::DuplicateElement { id: id.into() }
    }

    /// Create a new extraction error
    pub fn extraction_error(message: impl Into<String>) -> Self {
        Self::ExtractionError {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true when the caller picked something unknown or unsupported
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DiagramError::InvalidInput { .. } | DiagramError::UnsupportedFormat { .. }
        )
    }
}
