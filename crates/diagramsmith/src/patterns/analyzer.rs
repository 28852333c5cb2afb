//! Requirement analysis
//!
//! Turns a free-text description of a system into the structured profile the
//! pattern matcher scores against: application type, scale, security level,
//! performance targets, functional capabilities, and technical and business
//! constraints. Everything is keyword and regex driven over a normalized
//! lower-case copy of the text.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, span, Level};

use crate::core::rules::{compiled, group, load, RuleSet, StaticPattern, StaticRules};

/// Expected user base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleLevel {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl ScaleLevel {
    pub fn all() -> &'static [ScaleLevel] {
        &[
            ScaleLevel::Small,
            ScaleLevel::Medium,
            ScaleLevel::Large,
            ScaleLevel::Enterprise,
        ]
    }

    /// 1 for small through 4 for enterprise
    pub fn rank(&self) -> u32 {
        match self {
            ScaleLevel::Small => 1,
            ScaleLevel::Medium => 2,
            ScaleLevel::Large => 3,
            ScaleLevel::Enterprise => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleLevel::Small => "small",
            ScaleLevel::Medium => "medium",
            ScaleLevel::Large => "large",
            ScaleLevel::Enterprise => "enterprise",
        }
    }

    fn from_user_count(users: u64) -> Self {
        match users {
            n if n >= 1_000_000 => ScaleLevel::Enterprise,
            n if n >= 100_000 => ScaleLevel::Large,
            n if n >= 1_000 => ScaleLevel::Medium,
            _ => ScaleLevel::Small,
        }
    }
}

impl fmt::Display for ScaleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Required security posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Basic,
    Standard,
    High,
    Critical,
}

impl SecurityLevel {
    /// 1 for basic through 4 for critical
    pub fn rank(&self) -> u32 {
        match self {
            SecurityLevel::Basic => 1,
            SecurityLevel::Standard => 2,
            SecurityLevel::High => 3,
            SecurityLevel::Critical => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Basic => "basic",
            SecurityLevel::Standard => "standard",
            SecurityLevel::High => "high",
            SecurityLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complexity band, used both for requirements and for catalog patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl Complexity {
    pub fn rank(&self) -> u32 {
        match self {
            Complexity::Simple => 1,
            Complexity::Moderate => 2,
            Complexity::Complex => 3,
            Complexity::VeryComplex => 4,
        }
    }

    fn from_score(score: u32) -> Self {
        match score {
            0..=3 => Complexity::Simple,
            4..=6 => Complexity::Moderate,
            7..=9 => Complexity::Complex,
            _ => Complexity::VeryComplex,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
            Complexity::VeryComplex => "very_complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Broad kind of application being described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    ECommerce,
    SocialMedia,
    ContentManagement,
    Fintech,
    Healthcare,
    Iot,
    DataAnalytics,
    ApiService,
    MobileApp,
    WebApplication,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::ECommerce => "e_commerce",
            ApplicationType::SocialMedia => "social_media",
            ApplicationType::ContentManagement => "content_management",
            ApplicationType::Fintech => "fintech",
            ApplicationType::Healthcare => "healthcare",
            ApplicationType::Iot => "iot",
            ApplicationType::DataAnalytics => "data_analytics",
            ApplicationType::ApiService => "api_service",
            ApplicationType::MobileApp => "mobile_app",
            ApplicationType::WebApplication => "web_application",
        }
    }

    fn base_services(&self) -> &'static [&'static str] {
        match self {
            ApplicationType::WebApplication => &["load_balancer", "compute", "database", "cdn"],
            ApplicationType::ApiService => &["api_gateway", "compute", "database"],
            ApplicationType::MobileApp => {
                &["api_gateway", "compute", "database", "push_notifications"]
            }
            ApplicationType::ECommerce => {
                &["load_balancer", "compute", "database", "cdn", "payment_gateway"]
            }
            ApplicationType::DataAnalytics => {
                &["data_warehouse", "compute", "visualization", "storage"]
            }
            ApplicationType::Iot => {
                &["message_queue", "stream_processing", "database", "compute"]
            }
            _ => &["compute", "database"],
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application types with their signature phrase and supporting keywords
const APPLICATION_KEYWORDS: &[(ApplicationType, &str, &[&str])] = &[
    (
        ApplicationType::ECommerce,
        "e-commerce",
        &["ecommerce", "online store", "shopping", "marketplace", "cart", "checkout", "payment", "product catalog", "inventory"],
    ),
    (
        ApplicationType::SocialMedia,
        "social media",
        &["social network", "chat", "messaging", "feed", "posts", "followers", "likes", "comments", "sharing"],
    ),
    (
        ApplicationType::ContentManagement,
        "content management",
        &["cms", "blog", "articles", "publishing", "editorial", "content creation", "website builder"],
    ),
    (
        ApplicationType::Fintech,
        "fintech",
        &["banking", "financial", "trading", "investment", "payment processing", "cryptocurrency", "lending", "insurance"],
    ),
    (
        ApplicationType::Healthcare,
        "healthcare",
        &["medical", "patient", "hospital", "clinic", "telemedicine", "health records", "appointment"],
    ),
    (
        ApplicationType::Iot,
        "iot",
        &["internet of things", "sensors", "devices", "telemetry", "monitoring", "smart home", "industrial"],
    ),
    (
        ApplicationType::DataAnalytics,
        "data analytics",
        &["analytics", "dashboard", "reporting", "bi", "business intelligence", "data visualization", "metrics", "kpi"],
    ),
    (
        ApplicationType::ApiService,
        "api service",
        &["api", "microservice", "backend", "service", "integration", "webhook", "rest api", "graphql"],
    ),
    (
        ApplicationType::MobileApp,
        "mobile app",
        &["ios", "android", "mobile backend", "push notifications", "mobile first", "responsive"],
    ),
    (
        ApplicationType::WebApplication,
        "web application",
        &["web app", "website", "portal", "dashboard", "spa", "single page application"],
    ),
];

const SCALE_KEYWORDS: &[(ScaleLevel, &[&str])] = &[
    (
        ScaleLevel::Enterprise,
        &["enterprise", "large scale", "millions of users", "global", "high volume", "fortune 500"],
    ),
    (
        ScaleLevel::Large,
        &["large", "thousands of users", "high traffic", "scalable", "production ready", "commercial"],
    ),
    (
        ScaleLevel::Medium,
        &["medium", "hundreds of users", "growing", "startup", "moderate traffic", "regional"],
    ),
    (
        ScaleLevel::Small,
        &["small", "prototype", "mvp", "personal project", "demo", "proof of concept", "internal tool"],
    ),
];

const SECURITY_KEYWORDS: &[(SecurityLevel, &[&str])] = &[
    (
        SecurityLevel::Critical,
        &["hipaa", "pci dss", "sox", "government", "classified", "high security", "critical security", "zero trust"],
    ),
    (
        SecurityLevel::High,
        &["gdpr", "compliance", "audit", "financial data", "personal data", "encrypted", "secure", "authentication", "authorization"],
    ),
    (
        SecurityLevel::Standard,
        &["login", "user accounts", "password", "https", "ssl", "basic security", "user management"],
    ),
    (
        SecurityLevel::Basic,
        &["simple", "basic", "internal", "prototype", "demo"],
    ),
];

/// Capability name, trigger keywords, implications
const CAPABILITY_KEYWORDS: &[(&str, &[&str], &[&str])] = &[
    (
        "user_authentication",
        &["login", "signup", "authentication", "user accounts", "register"],
        &["Need identity provider", "Session management", "Password security"],
    ),
    (
        "data_storage",
        &["database", "store data", "persist", "save information"],
        &["Database design needed", "Backup strategy", "Data modeling"],
    ),
    (
        "file_upload",
        &["upload files", "file storage", "images", "documents"],
        &["Object storage needed", "File validation", "CDN for delivery"],
    ),
    (
        "real_time",
        &["real-time", "live updates", "websockets", "instant"],
        &["WebSocket support", "Event streaming", "Low latency"],
    ),
    (
        "search",
        &["search", "find", "filter", "query"],
        &["Search engine", "Indexing strategy", "Search UX"],
    ),
    (
        "notifications",
        &["notifications", "alerts", "email", "push notifications"],
        &["Notification service", "Message queuing", "User preferences"],
    ),
    (
        "analytics",
        &["analytics", "tracking", "metrics", "reporting"],
        &["Event tracking", "Data warehouse", "Visualization tools"],
    ),
    (
        "payment",
        &["payment", "billing", "subscription", "checkout"],
        &["Payment gateway", "PCI compliance", "Invoice management"],
    ),
];

const CLOUD_KEYWORDS: &[(&str, &[&str])] = &[
    ("aws", &["aws", "amazon web services"]),
    ("azure", &["azure", "microsoft azure"]),
    ("gcp", &["gcp", "google cloud", "google cloud platform"]),
    ("multi_cloud", &["multi-cloud", "multiple clouds", "cloud agnostic"]),
];

const BUDGET_KEYWORDS: &[&str] = &["cheap", "cost-effective", "budget", "low cost", "minimal cost"];
const STACK_KEYWORDS: &[&str] = &["kubernetes", "docker", "node.js", "python", "java", "react", "angular"];
const COMPLIANCE_KEYWORDS: &[&str] = &["gdpr", "hipaa", "pci dss", "sox", "iso 27001"];
const GEOGRAPHY_KEYWORDS: &[&str] = &["europe", "eu", "asia", "us", "global", "multi-region"];

const EXPERIENCE_KEYWORDS: &[(Experience, &[&str])] = &[
    (Experience::Beginner, &["new to cloud", "learning", "beginner", "first time"]),
    (Experience::Intermediate, &["some experience", "familiar with"]),
    (Experience::Expert, &["experienced", "expert", "advanced", "senior team"]),
];

static NON_TEXT: StaticPattern =
    LazyLock::new(|| Regex::new(r"[^\w\s\-.,!?%]"));

static USER_COUNT_RULES: StaticRules<u64> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("millions", r"(\d+)\s*(?:m|million)\s*users?\b", 1_000_000),
        ("thousands", r"(\d+)\s*(?:k|thousand)\s*users?\b", 1_000),
        ("plain", r"(\d+)\s*users?\b", 1),
    ])
});

/// Payload converts the captured number to milliseconds
static RESPONSE_TIME_RULES: StaticRules<u32> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("millis", r"(\d+)\s*(?:ms|milliseconds?)\b", 1),
        ("seconds_response", r"(\d+)\s*(?:s|seconds?)\s*response", 1000),
        ("under_seconds", r"(?:under|less than)\s*(\d+)\s*seconds?\b", 1000),
    ])
});

static AVAILABILITY: StaticPattern =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%\s*(?:uptime|availability)"));
static NINES: StaticPattern =
    LazyLock::new(|| Regex::new(r"\b(\d)\s*nines\b"));
static CONCURRENT_USERS: StaticPattern =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(?:concurrent|simultaneous)\s*users?"));
static DEADLINE: StaticPattern =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(weeks?|months?)\s*(?:to launch|deadline)"));
static URGENT: StaticPattern =
    LazyLock::new(|| Regex::new(r"\b(?:quick(?:ly)?|fast|rapid(?:ly)?|asap)\b"));
static MVP: StaticPattern =
    LazyLock::new(|| Regex::new(r"\b(?:mvp|minimum viable product)\b"));

fn pattern(re: &'static StaticPattern) -> Result<&'static Regex> {
    compiled(re, "analyzer")
}

/// Whether `phrase` occurs in `text` on word boundaries
fn mentions(text: &str, phrase: &str) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(phrase).any(|(start, _)| {
        let end = start + phrase.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

fn mentions_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| mentions(text, p))
}

/// One capability the described system needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionalRequirement {
    pub capability: &'static str,
    pub description: String,
    pub keyword: &'static str,
    pub confidence: f64,
    pub implications: Vec<&'static str>,
}

/// Measurable targets found in the text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceTargets {
    pub response_time_ms: Option<u32>,
    /// Availability as a percentage, e.g. `99.9`
    pub availability: Option<f64>,
    pub concurrent_users: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TechnicalConstraints {
    pub preferred_cloud: Option<&'static str>,
    pub budget_conscious: bool,
    pub existing_stack: Vec<&'static str>,
    pub compliance: Vec<&'static str>,
    pub geography: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeToMarket {
    Urgent,
    MvpFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Maintenance {
    LowMaintenance,
    FullControl,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BusinessConstraints {
    pub time_to_market: Option<TimeToMarket>,
    /// Launch deadline in weeks, when one is stated
    pub deadline_weeks: Option<u32>,
    pub experience: Option<Experience>,
    pub maintenance: Option<Maintenance>,
}

/// Structured profile of a requirements text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementAnalysis {
    pub raw_input: String,
    pub application_type: ApplicationType,
    pub scale: ScaleLevel,
    pub security: SecurityLevel,
    pub performance: PerformanceTargets,
    pub functional: Vec<FunctionalRequirement>,
    pub technical: TechnicalConstraints,
    pub business: BusinessConstraints,
    pub suggested_services: Vec<&'static str>,
    pub complexity: Complexity,
    pub estimated_timeline: String,
    pub budget_range: String,
}

impl RequirementAnalysis {
    /// Team experience, assuming intermediate when not stated
    pub fn experience(&self) -> Experience {
        self.business.experience.unwrap_or(Experience::Intermediate)
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.functional.iter().any(|r| r.capability == capability)
    }
}

/// Keyword-driven requirement analyzer
#[derive(Debug, Clone, Default)]
pub struct RequirementAnalyzer;

impl RequirementAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, requirements: &str) -> Result<RequirementAnalysis> {
        let analyze_span = span!(Level::INFO, "analyze_requirements", input_len = requirements.len());
        let _enter = analyze_span.enter();

        let text = normalize(requirements)?;
        let application_type = application_type(&text);
        let scale = scale_level(&text)?;
        let security = security_level(&text);
        let performance = performance_targets(&text)?;
        let functional = functional_requirements(&text);
        let technical = technical_constraints(&text);
        let business = business_constraints(&text)?;
        let suggested_services = suggested_services(&text, application_type);
        let complexity = complexity(&functional, &technical, scale);

        debug!(
            capabilities = functional.len(),
            services = suggested_services.len(),
            %complexity,
            "Requirements profiled"
        );
        info!(%application_type, %scale, %security, "Requirement analysis complete");

        Ok(RequirementAnalysis {
            raw_input: requirements.to_string(),
            application_type,
            scale,
            security,
            performance,
            functional,
            technical,
            business,
            suggested_services,
            complexity,
            estimated_timeline: estimate_timeline(complexity, scale),
            budget_range: estimate_budget(complexity, scale),
        })
    }
}

/// Lower-case, drop stray symbols, collapse whitespace
fn normalize(text: &str) -> Result<String> {
    let lowered = text.to_lowercase();
    let cleaned = pattern(&NON_TEXT)?.replace_all(&lowered, " ");
    Ok(cleaned.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Highest keyword score wins; the signature phrase counts three
fn application_type(text: &str) -> ApplicationType {
    let mut best = (ApplicationType::WebApplication, 0);
    for (app_type, phrase, keywords) in APPLICATION_KEYWORDS {
        let mut score = if mentions(text, phrase) { 3 } else { 0 };
        score += keywords.iter().filter(|k| mentions(text, k)).count();
        if score > best.1 {
            best = (*app_type, score);
        }
    }
    best.0
}

/// Explicit user counts win over scale keywords
fn scale_level(text: &str) -> Result<ScaleLevel> {
    let rules = load(&USER_COUNT_RULES, "user count")?;
    let counted = rules.rules().iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        let n: u64 = group(&caps, 1)?.parse().ok()?;
        Some(n.saturating_mul(rule.payload))
    });
    if let Some(users) = counted {
        return Ok(ScaleLevel::from_user_count(users));
    }

    Ok(SCALE_KEYWORDS
        .iter()
        .find(|(_, keywords)| mentions_any(text, keywords))
        .map(|(level, _)| *level)
        .unwrap_or(ScaleLevel::Medium))
}

fn security_level(text: &str) -> SecurityLevel {
    SECURITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| mentions_any(text, keywords))
        .map(|(level, _)| *level)
        .unwrap_or(SecurityLevel::Standard)
}

fn performance_targets(text: &str) -> Result<PerformanceTargets> {
    let response_time_ms = load(&RESPONSE_TIME_RULES, "response time")?
        .rules()
        .iter()
        .find_map(|rule| {
            let caps = rule.pattern.captures(text)?;
            let n: u32 = group(&caps, 1)?.parse().ok()?;
            Some(n.saturating_mul(rule.payload))
        });

    let availability = match pattern(&AVAILABILITY)?.captures(text) {
        Some(caps) => group(&caps, 1).and_then(|n| n.parse::<f64>().ok()),
        None => pattern(&NINES)?
            .captures(text)
            .and_then(|caps| group(&caps, 1))
            .and_then(|n| n.parse::<i32>().ok())
            .map(|nines| 100.0 - 10f64.powi(2 - nines)),
    };

    let concurrent_users = pattern(&CONCURRENT_USERS)?
        .captures(text)
        .and_then(|caps| group(&caps, 1))
        .and_then(|n| n.parse().ok());

    Ok(PerformanceTargets {
        response_time_ms,
        availability,
        concurrent_users,
    })
}

/// At most one requirement per capability, tagged with its first keyword hit
fn functional_requirements(text: &str) -> Vec<FunctionalRequirement> {
    CAPABILITY_KEYWORDS
        .iter()
        .filter_map(|(capability, keywords, implications)| {
            let keyword = keywords.iter().copied().find(|k| mentions(text, k))?;
            Some(FunctionalRequirement {
                capability: *capability,
                description: format!("Application needs {}", capability.replace('_', " ")),
                keyword,
                confidence: 0.8,
                implications: implications.to_vec(),
            })
        })
        .collect()
}

fn technical_constraints(text: &str) -> TechnicalConstraints {
    let found = |keywords: &[&'static str]| -> Vec<&'static str> {
        keywords.iter().copied().filter(|k| mentions(text, k)).collect()
    };

    TechnicalConstraints {
        // Later providers override earlier ones, so "multi-cloud" beats a named cloud
        preferred_cloud: CLOUD_KEYWORDS
            .iter()
            .filter(|(_, keywords)| mentions_any(text, keywords))
            .map(|(cloud, _)| *cloud)
            .last(),
        budget_conscious: mentions_any(text, BUDGET_KEYWORDS),
        existing_stack: found(STACK_KEYWORDS),
        compliance: found(COMPLIANCE_KEYWORDS),
        geography: found(GEOGRAPHY_KEYWORDS),
    }
}

fn business_constraints(text: &str) -> Result<BusinessConstraints> {
    let deadline_weeks = pattern(&DEADLINE)?.captures(text).and_then(|caps| {
        let n: u32 = group(&caps, 1)?.parse().ok()?;
        let unit = group(&caps, 2)?;
        Some(if unit.starts_with("month") { n.saturating_mul(4) } else { n })
    });

    let time_to_market = if deadline_weeks.is_some() || pattern(&URGENT)?.is_match(text) {
        Some(TimeToMarket::Urgent)
    } else if pattern(&MVP)?.is_match(text) {
        Some(TimeToMarket::MvpFocused)
    } else {
        None
    };

    let experience = EXPERIENCE_KEYWORDS
        .iter()
        .find(|(_, keywords)| mentions_any(text, keywords))
        .map(|(level, _)| *level);

    let maintenance = if mentions_any(text, &["managed", "serverless", "low maintenance"]) {
        Some(Maintenance::LowMaintenance)
    } else if mentions_any(text, &["full control", "custom", "on-premises"]) {
        Some(Maintenance::FullControl)
    } else {
        None
    };

    Ok(BusinessConstraints {
        time_to_market,
        deadline_weeks,
        experience,
        maintenance,
    })
}

/// Base services for the application type plus requirement-driven extras, sorted
fn suggested_services(text: &str, app_type: ApplicationType) -> Vec<&'static str> {
    let mut services: BTreeSet<&'static str> = app_type.base_services().iter().copied().collect();
    let extras: &[(&[&str], &'static str)] = &[
        (&["file", "files", "upload"], "object_storage"),
        (&["search"], "search_engine"),
        (&["real-time", "websocket", "websockets"], "message_queue"),
        (&["notification", "notifications", "email"], "notification_service"),
        (&["analytics", "tracking"], "analytics_service"),
    ];
    for &(keywords, service) in extras {
        if mentions_any(text, keywords) {
            services.insert(service);
        }
    }
    services.into_iter().collect()
}

fn complexity(
    functional: &[FunctionalRequirement],
    technical: &TechnicalConstraints,
    scale: ScaleLevel,
) -> Complexity {
    let mut score = scale.rank() + functional.len() as u32;
    if !technical.compliance.is_empty() {
        score += 2;
    }
    if !technical.geography.is_empty() {
        score += 1;
    }
    Complexity::from_score(score)
}

fn scale_multiplier(scale: ScaleLevel) -> f64 {
    match scale {
        ScaleLevel::Small => 1.0,
        ScaleLevel::Medium => 1.2,
        ScaleLevel::Large => 1.5,
        ScaleLevel::Enterprise => 2.0,
    }
}

fn estimate_timeline(complexity: Complexity, scale: ScaleLevel) -> String {
    let base_weeks = match complexity {
        Complexity::Simple => 2.0,
        Complexity::Moderate => 6.0,
        Complexity::Complex => 12.0,
        Complexity::VeryComplex => 24.0,
    };
    let weeks = (base_weeks * scale_multiplier(scale)) as u32;
    match weeks {
        0..=4 => format!("{} weeks", weeks),
        5..=12 => format!("{} months", weeks / 4),
        _ => format!("{} quarters", weeks / 12),
    }
}

/// Monthly infrastructure spend band
fn estimate_budget(complexity: Complexity, scale: ScaleLevel) -> String {
    let base = match complexity {
        Complexity::Simple => 100,
        Complexity::Moderate => 500,
        Complexity::Complex => 2_000,
        Complexity::VeryComplex => 10_000,
    };
    let multiplier = match scale {
        ScaleLevel::Small => 1,
        ScaleLevel::Medium => 2,
        ScaleLevel::Large => 5,
        ScaleLevel::Enterprise => 20,
    };
    let cost = base * multiplier;
    match cost {
        0..=999 => format!("${}-{}/month", cost, cost * 2),
        1_000..=4_999 => format!("${}K-{}K/month", cost / 1_000, cost * 2 / 1_000),
        _ => format!("${}K+/month", cost / 1_000),
    }
}
