//! Built-in architecture patterns

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::analyzer::{ApplicationType, Complexity, ScaleLevel, SecurityLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    ThreeTier,
    Serverless,
    Microservices,
    Monolithic,
}

impl PatternCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternCategory::ThreeTier => "three_tier",
            PatternCategory::Serverless => "serverless",
            PatternCategory::Microservices => "microservices",
            PatternCategory::Monolithic => "monolithic",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Maturity {
    Experimental,
    Emerging,
    Mature,
    IndustryStandard,
}

impl Maturity {
    /// Confidence adjustment for recommending a pattern this settled
    pub fn confidence_bonus(&self) -> f64 {
        match self {
            Maturity::Experimental => -0.2,
            Maturity::Emerging => -0.1,
            Maturity::Mature => 0.1,
            Maturity::IndustryStandard => 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl CostLevel {
    /// Baseline monthly spend in USD at small scale
    pub fn base_monthly_cost(&self) -> f64 {
        match self {
            CostLevel::VeryLow => 50.0,
            CostLevel::Low => 200.0,
            CostLevel::Medium => 500.0,
            CostLevel::High => 2_000.0,
            CostLevel::VeryHigh => 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupSpeed {
    Fast,
    Medium,
    Long,
}

/// One reusable architecture and what it is good at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitecturePattern {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PatternCategory,
    pub complexity: Complexity,
    pub maturity: Maturity,
    /// Capability name to support score in `0.0..=1.0`
    pub capabilities: BTreeMap<&'static str, f64>,
    pub providers: Vec<&'static str>,
    pub compatible_technologies: Vec<&'static str>,
    pub supported_scales: Vec<ScaleLevel>,
    pub security_level: SecurityLevel,
    pub encryption: bool,
    pub cost_level: CostLevel,
    pub setup_speed: SetupSpeed,
    pub timeline_weeks: u32,
    pub effort_weeks: u32,
    pub response_time_ms: u32,
    /// Availability as a fraction, e.g. `0.999`
    pub availability: f64,
    /// Application types the pattern suits; empty means any
    pub suitable_for: Vec<ApplicationType>,
}

impl ArchitecturePattern {
    pub fn capability(&self, name: &str) -> Option<f64> {
        self.capabilities.get(name).copied()
    }

    pub fn supports_scale(&self, scale: ScaleLevel) -> bool {
        self.supported_scales.contains(&scale)
    }

    pub fn auto_scales(&self) -> bool {
        self.capabilities.contains_key("auto_scaling")
    }

    pub fn suits(&self, app_type: ApplicationType) -> bool {
        self.suitable_for.is_empty() || self.suitable_for.contains(&app_type)
    }

    fn three_tier() -> Self {
        Self {
            id: "three_tier",
            name: "3-Tier Web Application",
            description: "Traditional web application with presentation, business logic and data layers",
            category: PatternCategory::ThreeTier,
            complexity: Complexity::Moderate,
            maturity: Maturity::IndustryStandard,
            capabilities: BTreeMap::from([
                ("authentication", 0.9),
                ("user_management", 0.8),
                ("database", 1.0),
                ("persistence", 0.9),
                ("storage", 0.7),
                ("cdn", 0.7),
                ("search_engine", 0.5),
                ("email", 0.5),
                ("monitoring", 0.6),
                ("payment_gateway", 0.7),
                ("load_balancing", 0.8),
                ("caching", 0.7),
            ]),
            providers: vec!["aws", "azure", "gcp", "on_premises"],
            compatible_technologies: vec!["python", "java", "node.js", "react", "angular", "docker"],
            supported_scales: vec![ScaleLevel::Small, ScaleLevel::Medium, ScaleLevel::Large],
            security_level: SecurityLevel::High,
            encryption: true,
            cost_level: CostLevel::Medium,
            setup_speed: SetupSpeed::Medium,
            timeline_weeks: 8,
            effort_weeks: 6,
            response_time_ms: 200,
            availability: 0.999,
            suitable_for: vec![
                ApplicationType::WebApplication,
                ApplicationType::ECommerce,
                ApplicationType::ContentManagement,
                ApplicationType::Fintech,
                ApplicationType::Healthcare,
            ],
        }
    }

    fn serverless() -> Self {
        Self {
            id: "serverless",
            name: "Serverless Architecture",
            description: "Event-driven architecture using cloud functions without server management",
            category: PatternCategory::Serverless,
            complexity: Complexity::Simple,
            maturity: Maturity::Mature,
            capabilities: BTreeMap::from([
                ("auto_scaling", 1.0),
                ("event_driven", 1.0),
                ("streaming", 0.7),
                ("real_time", 0.7),
                ("object_storage", 0.9),
                ("storage", 0.8),
                ("database", 0.8),
                ("authentication", 0.8),
                ("messaging", 0.9),
                ("notifications", 0.9),
                ("push", 0.9),
                ("analytics", 0.7),
                ("tracking", 0.7),
            ]),
            providers: vec!["aws", "azure", "gcp"],
            compatible_technologies: vec!["python", "node.js", "java"],
            supported_scales: vec![ScaleLevel::Small, ScaleLevel::Medium, ScaleLevel::Large],
            security_level: SecurityLevel::High,
            encryption: true,
            cost_level: CostLevel::Low,
            setup_speed: SetupSpeed::Fast,
            timeline_weeks: 3,
            effort_weeks: 2,
            response_time_ms: 100,
            availability: 0.999,
            suitable_for: vec![
                ApplicationType::ApiService,
                ApplicationType::MobileApp,
                ApplicationType::Iot,
                ApplicationType::DataAnalytics,
                ApplicationType::WebApplication,
                ApplicationType::SocialMedia,
            ],
        }
    }

    fn microservices() -> Self {
        Self {
            id: "microservices",
            name: "Microservices Architecture",
            description: "Distributed architecture with independent, loosely coupled services",
            category: PatternCategory::Microservices,
            complexity: Complexity::Complex,
            maturity: Maturity::Mature,
            capabilities: BTreeMap::from([
                ("authentication", 0.9),
                ("identity_management", 0.9),
                ("database", 0.9),
                ("persistence", 0.9),
                ("object_storage", 0.8),
                ("websockets", 0.8),
                ("streaming", 0.9),
                ("event_driven", 0.9),
                ("search_engine", 0.9),
                ("indexing", 0.9),
                ("messaging", 1.0),
                ("notifications", 0.9),
                ("analytics", 0.8),
                ("metrics", 0.9),
                ("payment_gateway", 0.9),
                ("billing", 0.8),
            ]),
            providers: vec!["aws", "azure", "gcp", "kubernetes"],
            compatible_technologies: vec!["kubernetes", "docker", "java", "node.js", "python"],
            supported_scales: vec![ScaleLevel::Medium, ScaleLevel::Large, ScaleLevel::Enterprise],
            security_level: SecurityLevel::Critical,
            encryption: true,
            cost_level: CostLevel::High,
            setup_speed: SetupSpeed::Long,
            timeline_weeks: 16,
            effort_weeks: 12,
            response_time_ms: 150,
            availability: 0.9999,
            suitable_for: Vec::new(),
        }
    }

    fn monolith() -> Self {
        Self {
            id: "monolith",
            name: "Modular Monolith",
            description: "Single deployable application with internal module boundaries",
            category: PatternCategory::Monolithic,
            complexity: Complexity::Simple,
            maturity: Maturity::IndustryStandard,
            capabilities: BTreeMap::from([
                ("authentication", 0.8),
                ("user_management", 0.8),
                ("database", 1.0),
                ("persistence", 1.0),
                ("file_storage", 0.6),
                ("search_engine", 0.5),
                ("email", 0.6),
                ("monitoring", 0.5),
                ("payment_gateway", 0.6),
            ]),
            providers: vec!["aws", "azure", "gcp", "on_premises"],
            compatible_technologies: vec!["python", "java", "node.js", "react", "angular", "docker"],
            supported_scales: vec![ScaleLevel::Small, ScaleLevel::Medium],
            security_level: SecurityLevel::Standard,
            encryption: false,
            cost_level: CostLevel::Low,
            setup_speed: SetupSpeed::Fast,
            timeline_weeks: 4,
            effort_weeks: 3,
            response_time_ms: 100,
            availability: 0.99,
            suitable_for: vec![
                ApplicationType::WebApplication,
                ApplicationType::ContentManagement,
                ApplicationType::ECommerce,
                ApplicationType::ApiService,
            ],
        }
    }
}

/// The set of patterns the matcher chooses from
#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternCatalog {
    patterns: Vec<ArchitecturePattern>,
}

impl PatternCatalog {
    pub fn new(patterns: Vec<ArchitecturePattern>) -> Self {
        Self { patterns }
    }

    /// Three-tier, serverless, microservices and monolith
    pub fn builtin() -> Self {
        Self::new(vec![
            ArchitecturePattern::three_tier(),
            ArchitecturePattern::serverless(),
            ArchitecturePattern::microservices(),
            ArchitecturePattern::monolith(),
        ])
    }

    /// Add a pattern, replacing any with the same id
    pub fn register(&mut self, pattern: ArchitecturePattern) {
        self.patterns.retain(|p| p.id != pattern.id);
        self.patterns.push(pattern);
    }

    pub fn get(&self, id: &str) -> Option<&ArchitecturePattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    pub fn patterns(&self) -> &[ArchitecturePattern] {
        &self.patterns
    }

    pub fn by_category(&self, category: PatternCategory) -> Vec<&ArchitecturePattern> {
        self.patterns.iter().filter(|p| p.category == category).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PatternCatalog::builtin();
        let ids: Vec<_> = catalog.patterns().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["three_tier", "serverless", "microservices", "monolith"]);
        for pattern in catalog.patterns() {
            assert!(!pattern.supported_scales.is_empty(), "{}", pattern.id);
            assert!(pattern
                .capabilities
                .values()
                .all(|score| (0.0..=1.0).contains(score)));
        }
    }

    #[test]
    fn test_pattern_queries() {
        let catalog = PatternCatalog::builtin();
        let serverless = catalog.get("serverless").unwrap();
        assert!(serverless.auto_scales());
        assert!(!serverless.supports_scale(ScaleLevel::Enterprise));
        assert_eq!(serverless.capability("event_driven"), Some(1.0));
        assert_eq!(serverless.capability("billing"), None);

        let microservices = catalog.get("microservices").unwrap();
        assert!(microservices.suits(ApplicationType::Healthcare));
        assert!(!catalog.get("monolith").unwrap().suits(ApplicationType::Iot));
    }

    #[test]
    fn test_register_replaces_by_id() {
        let mut catalog = PatternCatalog::builtin();
        let mut cheaper = catalog.get("microservices").unwrap().clone();
        cheaper.cost_level = CostLevel::Medium;
        catalog.register(cheaper);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get("microservices").unwrap().cost_level, CostLevel::Medium);
        assert_eq!(catalog.by_category(PatternCategory::Microservices).len(), 1);
    }

    #[test]
    fn test_cost_levels() {
        assert_eq!(CostLevel::Low.base_monthly_cost(), 200.0);
        assert!(Maturity::IndustryStandard.confidence_bonus() > Maturity::Mature.confidence_bonus());
    }
}
