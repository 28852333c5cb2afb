//! Sequence diagram plugin
//!
//! Turns an account of who talks to whom into a UML sequence diagram.
//!
//! ```text
//! User sends login request to System. System returns token to User.
//! ```
//! becomes
//! ```text
//! sequenceDiagram
//!     actor actor_user as User
//!     participant actor_system as System
//!     actor_user->>actor_system: Login request
//!     actor_system-->actor_user: Return token
//! ```

mod emitter;
mod extractor;
mod model;

pub use emitter::{render_mermaid, render_plantuml, render_python, SequenceEmitter};
pub use extractor::{actor_rules, message_rules, MessageHandler, SequenceExtractor};
pub use model::{Actor, Message, RawMessage};

use crate::core::{Diagram, DiagramType, ExtractionLimits};

/// Sequence diagram implementation
pub struct SequenceDiagram;

impl Diagram for SequenceDiagram {
    type Extractor = SequenceExtractor;
    type Emitter = SequenceEmitter;

    fn create_extractor(limits: ExtractionLimits) -> Self::Extractor {
        SequenceExtractor::with_limits(limits)
    }

    fn create_emitter() -> Self::Emitter {
        SequenceEmitter::new()
    }

    fn diagram_type() -> DiagramType {
        DiagramType::Sequence
    }

    fn name() -> &'static str {
        "sequence"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
