//! Core abstractions for diagram generation
//!
//! This module defines the shared model, the traits every diagram kind
//! implements, and the ambient pieces (errors, logging, limits) they use.

mod config;
mod diagram;
mod emitter;
mod error;
mod extractor;
pub mod logging;
mod model;
pub mod rules;
mod text;
mod types;

pub use config::*;
pub use diagram::*;
pub use emitter::*;
pub use error::*;
pub use extractor::*;
pub use logging::*;
pub use model::*;
pub use text::*;
pub use types::*;
