//! Pattern scoring and ranking
//!
//! Every catalog pattern that survives the compatibility filter gets five
//! fit scores (functional, technical, scale, security, complexity) which are
//! combined with fixed weights. Matches at or below the threshold are dropped,
//! business-constraint boosts are applied, and the best five are returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, trace, Level};

use super::analyzer::{
    Complexity, Experience, RequirementAnalysis, ScaleLevel, SecurityLevel, TimeToMarket,
};
use super::catalog::{ArchitecturePattern, CostLevel, PatternCatalog, PatternCategory, SetupSpeed};

/// Matches scoring at or below this are not recommended
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Number of recommendations returned
pub const MAX_MATCHES: usize = 5;

/// Capabilities a pattern may advertise for each functional requirement
const CAPABILITY_MAP: &[(&str, &[&str])] = &[
    ("user_authentication", &["authentication", "identity_management", "user_management"]),
    ("data_storage", &["database", "storage", "persistence"]),
    ("file_upload", &["object_storage", "file_storage", "cdn"]),
    ("real_time", &["websockets", "streaming", "event_driven", "real_time"]),
    ("search", &["search_engine", "indexing", "elasticsearch"]),
    ("notifications", &["messaging", "notifications", "email", "push"]),
    ("analytics", &["analytics", "monitoring", "tracking", "metrics"]),
    ("payment", &["payment_gateway", "billing", "financial"]),
];

/// Caller-imposed limits on what may be recommended
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchConstraints {
    /// Upper bound on the pattern's baseline monthly cost in USD
    pub max_monthly_cost: Option<f64>,
    pub max_timeline_weeks: Option<u32>,
}

/// Relative weight of each fit dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchWeights {
    pub functional: f64,
    pub technical: f64,
    pub scale: f64,
    pub security: f64,
    pub complexity: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            functional: 0.3,
            technical: 0.25,
            scale: 0.2,
            security: 0.15,
            complexity: 0.1,
        }
    }
}

/// Per-dimension fit, each in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitBreakdown {
    pub functional: f64,
    pub technical: f64,
    pub scale: f64,
    pub security: f64,
    pub complexity: f64,
}

impl FitBreakdown {
    fn weighted(&self, weights: &MatchWeights) -> f64 {
        self.functional * weights.functional
            + self.technical * weights.technical
            + self.scale * weights.scale
            + self.security * weights.security
            + self.complexity * weights.complexity
    }
}

/// One recommended pattern with its explanation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub pattern_id: &'static str,
    pub pattern_name: &'static str,
    pub category: PatternCategory,
    pub match_score: f64,
    pub confidence: f64,
    pub fit: FitBreakdown,
    pub reasons: Vec<String>,
    pub concerns: Vec<String>,
    pub pros: Vec<&'static str>,
    pub cons: Vec<&'static str>,
    pub estimated_cost: String,
    pub implementation_effort: &'static str,
}

/// Ranks catalog patterns against an analysis
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    catalog: PatternCatalog,
    weights: MatchWeights,
}

impl PatternMatcher {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self {
            catalog,
            weights: MatchWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: MatchWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Best matches first, at most [`MAX_MATCHES`]
    pub fn recommend(
        &self,
        analysis: &RequirementAnalysis,
        constraints: &MatchConstraints,
    ) -> Vec<PatternMatch> {
        let match_span = span!(
            Level::INFO,
            "recommend_patterns",
            application_type = %analysis.application_type,
            catalog = self.catalog.len()
        );
        let _enter = match_span.enter();

        let compatible: Vec<&ArchitecturePattern> = self
            .catalog
            .patterns()
            .iter()
            .filter(|p| is_compatible(p, analysis, constraints))
            .collect();
        debug!(compatible = compatible.len(), "Filtered catalog");

        let mut matches: Vec<PatternMatch> = compatible
            .into_iter()
            .map(|p| self.score(p, analysis))
            .filter(|m| m.match_score > MATCH_THRESHOLD)
            .collect();

        for m in &mut matches {
            if let Some(pattern) = self.catalog.get(m.pattern_id) {
                m.match_score *= boost(pattern, analysis);
            }
        }
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(MAX_MATCHES);

        info!(matches = matches.len(), "Pattern recommendation complete");
        matches
    }

    /// Score one pattern without filtering or boosting
    pub fn score(&self, pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> PatternMatch {
        let fit = FitBreakdown {
            functional: functional_fit(pattern, analysis),
            technical: technical_fit(pattern, analysis),
            scale: scale_fit(pattern, analysis.scale),
            security: security_fit(pattern, analysis.security),
            complexity: complexity_fit(pattern, analysis),
        };
        let match_score = fit.weighted(&self.weights);
        trace!(pattern = pattern.id, score = match_score, ?fit, "Scored pattern");

        let (pros, cons) = pros_and_cons(pattern, analysis);
        PatternMatch {
            pattern_id: pattern.id,
            pattern_name: pattern.name,
            category: pattern.category,
            match_score,
            confidence: confidence(pattern, analysis),
            fit,
            reasons: reasons(pattern, analysis, &fit),
            concerns: concerns(pattern, analysis),
            pros,
            cons,
            estimated_cost: estimated_cost(pattern, analysis.scale),
            implementation_effort: implementation_effort(pattern, analysis),
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(PatternCatalog::builtin())
    }
}

fn is_compatible(
    pattern: &ArchitecturePattern,
    analysis: &RequirementAnalysis,
    constraints: &MatchConstraints,
) -> bool {
    if !(pattern.supports_scale(analysis.scale) || pattern.auto_scales()) {
        trace!(pattern = pattern.id, "Rejected on scale");
        return false;
    }
    if pattern.security_level < analysis.security {
        trace!(pattern = pattern.id, "Rejected on security");
        return false;
    }
    if constraints
        .max_monthly_cost
        .is_some_and(|max| pattern.cost_level.base_monthly_cost() > max)
    {
        trace!(pattern = pattern.id, "Rejected on cost");
        return false;
    }
    if constraints
        .max_timeline_weeks
        .is_some_and(|max| pattern.timeline_weeks > max)
    {
        trace!(pattern = pattern.id, "Rejected on timeline");
        return false;
    }
    pattern.suits(analysis.application_type)
}

/// Confidence-weighted mean of the best capability score per requirement
fn functional_fit(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> f64 {
    if analysis.functional.is_empty() {
        return 0.5;
    }

    let (total, weight) = analysis.functional.iter().fold((0.0, 0.0), |(total, weight), req| {
        let best = CAPABILITY_MAP
            .iter()
            .find(|(requirement, _)| *requirement == req.capability)
            .map(|(_, capabilities)| {
                capabilities
                    .iter()
                    .filter_map(|c| pattern.capability(c))
                    .fold(0.0, f64::max)
            })
            .unwrap_or(0.0);
        (total + best * req.confidence, weight + req.confidence)
    });

    if weight > 0.0 {
        total / weight
    } else {
        0.5
    }
}

/// Mean over whichever technical factors the analysis states
fn technical_fit(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> f64 {
    let mut factors = Vec::new();

    if let Some(cloud) = analysis.technical.preferred_cloud {
        factors.push(if pattern.providers.contains(&cloud) {
            1.0
        } else if pattern.providers.contains(&"multi_cloud") {
            0.8
        } else {
            0.3
        });
    }

    let stack = &analysis.technical.existing_stack;
    if !stack.is_empty() {
        let compatible = stack
            .iter()
            .filter(|tech| pattern.compatible_technologies.contains(tech))
            .count();
        factors.push(compatible as f64 / stack.len() as f64);
    }

    if let Some(target_ms) = analysis.performance.response_time_ms {
        factors.push(if pattern.response_time_ms <= target_ms { 1.0 } else { 0.5 });
    }

    if let Some(percent) = analysis.performance.availability {
        factors.push(if percent / 100.0 <= pattern.availability { 1.0 } else { 0.6 });
    }

    if factors.is_empty() {
        0.8
    } else {
        factors.iter().sum::<f64>() / factors.len() as f64
    }
}

fn scale_fit(pattern: &ArchitecturePattern, scale: ScaleLevel) -> f64 {
    if pattern.supports_scale(scale) {
        return 1.0;
    }
    if pattern.auto_scales() {
        return 0.9;
    }
    pattern
        .supported_scales
        .iter()
        .map(|s| s.rank().abs_diff(scale.rank()))
        .min()
        .map(|distance| (1.0 - distance as f64 * 0.2).max(0.3))
        .unwrap_or(0.5)
}

fn security_fit(pattern: &ArchitecturePattern, security: SecurityLevel) -> f64 {
    if pattern.security_level >= security {
        1.0
    } else {
        let gap = security.rank() - pattern.security_level.rank();
        (1.0 - gap as f64 * 0.3).max(0.2)
    }
}

/// Experienced teams tolerate more complexity than the requirements call for
fn complexity_fit(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> f64 {
    let required = analysis.complexity.rank();
    let offered = pattern.complexity.rank();
    let tolerance = match analysis.experience() {
        Experience::Beginner => 0.8,
        Experience::Intermediate => 1.0,
        Experience::Expert => 1.2,
    };
    if offered as f64 <= required as f64 * tolerance {
        1.0
    } else {
        let excess = offered.saturating_sub(required);
        (1.0 - excess as f64 * 0.2).max(0.3)
    }
}

fn confidence(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> f64 {
    let mut confidence = 0.8 + pattern.maturity.confidence_bonus();
    if analysis.functional.len() >= 3 {
        confidence += 0.1;
    }
    if analysis.technical.preferred_cloud.is_some() {
        confidence += 0.1;
    }
    confidence.clamp(0.3, 1.0)
}

fn is_approachable(pattern: &ArchitecturePattern) -> bool {
    matches!(pattern.complexity, Complexity::Simple | Complexity::Moderate)
}

fn reasons(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis, fit: &FitBreakdown) -> Vec<String> {
    let mut reasons = Vec::new();

    if pattern.suitable_for.contains(&analysis.application_type) {
        reasons.push(format!("Well suited to {} applications", analysis.application_type));
    }
    if fit.functional >= 0.8 {
        reasons.push("Supports all key functional requirements".to_string());
    } else if fit.functional >= 0.6 {
        reasons.push("Supports most functional requirements".to_string());
    }
    if fit.scale >= 0.9 {
        reasons.push(format!("Excellent for {} scale applications", analysis.scale));
    }
    if fit.security >= 0.9 {
        reasons.push(format!("Meets {} security requirements", analysis.security));
    }
    if let Some(cloud) = analysis.technical.preferred_cloud {
        if pattern.providers.contains(&cloud) {
            reasons.push(format!("Native support for {}", cloud.to_uppercase()));
        }
    }
    if analysis.performance.response_time_ms.is_some() && fit.technical >= 0.8 {
        reasons.push("Meets response time requirements".to_string());
    }
    if analysis.business.experience == Some(Experience::Beginner) && is_approachable(pattern) {
        reasons.push("Appropriate complexity for team experience level".to_string());
    }

    reasons
}

fn concerns(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> Vec<String> {
    let mut concerns = Vec::new();

    if analysis.business.experience == Some(Experience::Beginner) && !is_approachable(pattern) {
        concerns.push("Pattern may be complex for beginner team".to_string());
    }
    if analysis.technical.budget_conscious
        && matches!(pattern.cost_level, CostLevel::High | CostLevel::VeryHigh)
    {
        concerns.push("Higher cost pattern for budget-conscious requirements".to_string());
    }
    if analysis.business.time_to_market == Some(TimeToMarket::Urgent)
        && pattern.setup_speed == SetupSpeed::Long
    {
        concerns.push("Longer setup time may impact urgent timeline".to_string());
    }
    if analysis.scale == ScaleLevel::Enterprise && !pattern.supports_scale(ScaleLevel::Enterprise) {
        concerns.push("May need modifications for enterprise scale".to_string());
    }
    if let [only] = pattern.providers.as_slice() {
        if analysis.technical.preferred_cloud != Some("multi_cloud") {
            concerns.push(format!("Creates vendor lock-in with {}", only));
        }
    }

    concerns
}

fn pros_and_cons(
    pattern: &ArchitecturePattern,
    analysis: &RequirementAnalysis,
) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut pros = Vec::new();
    let mut cons = Vec::new();
    let small = matches!(analysis.scale, ScaleLevel::Small | ScaleLevel::Medium);

    match pattern.category {
        PatternCategory::Serverless => {
            pros.extend(["No server management", "Pay-per-use pricing", "Auto-scaling"]);
            if small {
                pros.push("Cost-effective for variable workloads");
            } else {
                cons.push("Can be expensive at high scale");
            }
        }
        PatternCategory::Microservices => {
            pros.extend(["Independent deployments", "Technology diversity", "Team scalability"]);
            if small {
                cons.push("May be overkill for smaller applications");
            } else {
                pros.push("Excellent for large teams and complex applications");
            }
        }
        PatternCategory::Monolithic => {
            pros.extend(["Simple deployment", "Easy debugging", "Good performance"]);
            if small {
                pros.push("Perfect for smaller teams and applications");
            } else {
                cons.push("Scaling challenges for large applications");
            }
        }
        PatternCategory::ThreeTier => {
            pros.extend(["Clear separation of concerns", "Widely understood layering"]);
            if !small {
                cons.push("Tiers scale as whole units");
            }
        }
    }

    if analysis.security >= SecurityLevel::High {
        if pattern.encryption {
            pros.push("Built-in encryption and security");
        } else {
            cons.push("May need additional security hardening");
        }
    }

    if analysis.technical.budget_conscious {
        match pattern.cost_level {
            CostLevel::VeryLow | CostLevel::Low => pros.push("Cost-effective solution"),
            CostLevel::High | CostLevel::VeryHigh => cons.push("Higher operational costs"),
            CostLevel::Medium => {}
        }
    }

    (pros, cons)
}

/// Multiplier for patterns that fit the business constraints
fn boost(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> f64 {
    let mut factor = 1.0;
    if analysis.business.time_to_market == Some(TimeToMarket::Urgent)
        && pattern.setup_speed == SetupSpeed::Fast
    {
        factor *= 1.1;
    }
    if analysis.technical.budget_conscious
        && matches!(pattern.cost_level, CostLevel::VeryLow | CostLevel::Low)
    {
        factor *= 1.1;
    }
    if analysis.business.experience == Some(Experience::Beginner) && is_approachable(pattern) {
        factor *= 1.05;
    }
    factor
}

/// Monthly cost at the analysed scale
fn estimated_cost(pattern: &ArchitecturePattern, scale: ScaleLevel) -> String {
    let multiplier = match scale {
        ScaleLevel::Small => 1.0,
        ScaleLevel::Medium => 3.0,
        ScaleLevel::Large => 10.0,
        ScaleLevel::Enterprise => 50.0,
    };
    let cost = pattern.cost_level.base_monthly_cost() * multiplier;
    if cost < 1_000.0 {
        format!("${}/month", cost as u64)
    } else {
        format!("${:.1}K/month", cost / 1_000.0)
    }
}

fn implementation_effort(pattern: &ArchitecturePattern, analysis: &RequirementAnalysis) -> &'static str {
    let complexity = match analysis.complexity {
        Complexity::Simple => 0.8,
        Complexity::Moderate => 1.0,
        Complexity::Complex => 1.5,
        Complexity::VeryComplex => 2.0,
    };
    let experience = match analysis.experience() {
        Experience::Beginner => 1.5,
        Experience::Intermediate => 1.0,
        Experience::Expert => 0.8,
    };
    let weeks = (pattern.effort_weeks as f64 * complexity * experience) as u32;
    match weeks {
        0..=2 => "1-2 weeks",
        3..=4 => "2-4 weeks",
        5..=8 => "1-2 months",
        9..=16 => "2-4 months",
        _ => "4+ months",
    }
}
