//! Diagram kinds and the service that dispatches between them
//!
//! Each diagram kind pairs an extractor with an emitter and implements the
//! core traits. [`DiagramService`] registers the implemented kinds and
//! routes requests by diagram type and output format.

pub mod class;
pub mod flowchart;
pub mod sequence;
pub mod service;

pub use class::{ClassDiagram, ClassEmitter, ClassExtractor};
pub use flowchart::{FlowchartDiagram, FlowchartEmitter, FlowchartExtractor};
pub use sequence::{SequenceDiagram, SequenceEmitter, SequenceExtractor};
pub use service::{DiagramService, GenerateResponse, GeneratedDiagram};
