//! Tunables for extraction and emission

use super::Direction;

/// Upper bounds applied by the extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionLimits {
    pub max_actors: usize,
    pub max_messages: usize,
    pub max_steps: usize,
    pub max_decisions: usize,
    pub max_classes: usize,
    /// Entities inferred when no explicit class phrasing is present
    pub max_inferred_entities: usize,
    pub max_attributes: usize,
    pub max_methods: usize,
    pub max_relationships: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_actors: 8,
            max_messages: 15,
            max_steps: 10,
            max_decisions: 3,
            max_classes: 8,
            max_inferred_entities: 5,
            max_attributes: 6,
            max_methods: 6,
            max_relationships: 10,
        }
    }
}

/// Options consulted by the emitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Layout direction for notations that support one
    pub direction: Direction,
}

impl RenderConfig {
    pub fn with_direction(direction: Direction) -> Self {
        Self { direction }
    }
}
