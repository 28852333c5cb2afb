//! Architecture pattern recommendation
//!
//! A requirements text is profiled by [`RequirementAnalyzer`], then the
//! [`PatternMatcher`] scores every pattern in a [`PatternCatalog`] against the
//! profile and returns the best fits with reasons, concerns and estimates.
//!
//! ```rust
//! use diagramsmith::patterns::{recommend, MatchConstraints};
//!
//! let recommendation = recommend(
//!     "An API backend for a mobile app with push notifications",
//!     &MatchConstraints::default(),
//! )
//! .unwrap();
//! assert!(!recommendation.matches.is_empty());
//! ```

pub mod analyzer;
pub mod catalog;
pub mod matcher;

pub use analyzer::{
    ApplicationType, BusinessConstraints, Complexity, Experience, FunctionalRequirement,
    Maintenance, PerformanceTargets, RequirementAnalysis, RequirementAnalyzer, ScaleLevel,
    SecurityLevel, TechnicalConstraints, TimeToMarket,
};
pub use catalog::{
    ArchitecturePattern, CostLevel, Maturity, PatternCatalog, PatternCategory, SetupSpeed,
};
pub use matcher::{
    FitBreakdown, MatchConstraints, MatchWeights, PatternMatch, PatternMatcher, MATCH_THRESHOLD,
    MAX_MATCHES,
};

use anyhow::Result;
use serde::Serialize;

/// Analysis plus the ranked matches drawn from it
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub analysis: RequirementAnalysis,
    pub matches: Vec<PatternMatch>,
}

/// Analyze `requirements` and rank the built-in catalog against them
pub fn recommend(requirements: &str, constraints: &MatchConstraints) -> Result<Recommendation> {
    let analysis = RequirementAnalyzer::new().analyze(requirements)?;
    let matches = PatternMatcher::default().recommend(&analysis, constraints);
    Ok(Recommendation { analysis, matches })
}
