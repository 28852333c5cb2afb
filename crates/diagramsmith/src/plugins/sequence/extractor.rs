//! Sequence diagram extractor
//!
//! Finds actors and the messages they exchange in a plain-English account of
//! an interaction.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Captures;
use tracing::{debug, span, trace, Level};

use super::model::{
    Actor, Message, RawMessage, CONTEXT_RADIUS, DATABASE_KEYWORDS, NON_ACTOR_WORDS,
    PERSON_KEYWORDS, SYSTEM_KEYWORDS,
};
use crate::core::rules::{group, load, RuleSet, StaticRules};
use crate::core::{
    capitalize, title_case, ActorType, ConnectionKind, DiagramSpec, DiagramType,
    ExtractionLimits, Extractor, PARSED_FROM_NATURAL_LANGUAGE,
};

/// Turns the captures of one message rule into a phrased message
pub type MessageHandler = fn(&Captures<'_>) -> Option<RawMessage>;

static ACTOR_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            "person_role_then_name",
            r"(?i)\b(?:user|customer|client|person|admin)\s+((?-i:[A-Z])\w*)",
            (),
        ),
        (
            "system_role_then_name",
            r"(?i)\b(?:system|service|api|server|database|app)\s+((?-i:[A-Z])\w*)",
            (),
        ),
        (
            "name_then_system_role",
            r"(?i)\b(\w+)\s+(?:system|service|api|server|database)\b",
            (),
        ),
        (
            "interaction_subject",
            r"(?i)\b(?:the\s+)?(\w+)\s+(?:sends|receives|calls|requests)\b",
            (),
        ),
        (
            "intent_subject",
            r"(?i)\b(?:when\s+)?(\w+)\s+(?:wants|tries|needs)\s+to\b",
            (),
        ),
    ])
});

// Endpoint slots take an optional trailing role noun ("Billing service");
// resolution then matches on the distinctive word.
static MESSAGE_RULES: StaticRules<(ConnectionKind, MessageHandler)> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            "request",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:sends|calls|requests|asks)\s+(?:the\s+)?([^.\n]+?)\s+(?:to|for|from)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)",
            (ConnectionKind::Sync, request as MessageHandler),
        ),
        (
            "return",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:(?:receives|gets|obtains)\s+(?:the\s+)?([^.\n]+?)\s+from|(?:returns|responds\s+with)\s+(?:the\s+)?([^.\n]+?)\s+to)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)",
            (ConnectionKind::Return, reply as MessageHandler),
        ),
        (
            "notify",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:notifies|alerts|informs)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:about|that|of)\s+([^.\n]+)",
            (ConnectionKind::Async, notify as MessageHandler),
        ),
        (
            "create",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:creates|generates|produces)\s+(?:an?\s+|the\s+)?([^.\n]+?)\s+(?:in|for)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)",
            (ConnectionKind::Create, create as MessageHandler),
        ),
        (
            "authenticate",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:authenticates|logs\s+in|signs\s+in)(?:\s+(?:to|with|into)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?))?",
            (ConnectionKind::Sync, authenticate as MessageHandler),
        ),
        (
            "validate",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:validates|verifies|checks)\s+(?:the\s+)?([^.\n]+?)(?:\s+(?:with|against|via)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?))?\s*(?:[.\n]|$)",
            (ConnectionKind::Sync, validate as MessageHandler),
        ),
        (
            "store",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:stores|saves|persists)\s+(?:the\s+)?([^.\n]+?)\s+(?:in|to|into)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)",
            (ConnectionKind::Sync, store as MessageHandler),
        ),
        (
            "query",
            r"(?i)\b(\w+(?:\s+(?:service|system|server|api|app|database|db))?)\s+(?:queries|searches|looks\s+up)\s+(?:the\s+)?([^.\n]+?)\s+(?:in|from)\s+(?:the\s+)?(\w+(?:\s+(?:service|system|server|api|app|database|db))?)",
            (ConnectionKind::Sync, query as MessageHandler),
        ),
    ])
});

static TITLE_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("labelled", r"(?i)(?:title|sequence|process):\s*([^\n]+)", ()),
        (
            "leading_noun",
            r"(?i)^(.+?)\s+(?:sequence|process|workflow|flow)\b",
            (),
        ),
        ("process_phrase", r"(?i)(?:the\s+)?(.+?)\s+process\b", ()),
    ])
});

const DEFAULT_TITLE: &str = "Sequence Diagram";

/// Longest first sentence that is still used as a title
const MAX_SENTENCE_TITLE: usize = 50;

fn request(caps: &Captures<'_>) -> Option<RawMessage> {
    Some(RawMessage::new(
        group(caps, 1)?,
        group(caps, 3)?,
        capitalize(&group(caps, 2)?),
    ))
}

fn reply(caps: &Captures<'_>) -> Option<RawMessage> {
    let subject = group(caps, 1)?;
    let other = group(caps, 4)?;
    match (group(caps, 2), group(caps, 3)) {
        // "A receives X from B": B answers A
        (Some(payload), _) => Some(RawMessage::new(
            other,
            subject,
            capitalize(&format!("Return {}", payload)),
        )),
        (None, Some(payload)) => Some(RawMessage::new(
            subject,
            other,
            capitalize(&format!("Return {}", payload)),
        )),
        (None, None) => None,
    }
}

fn notify(caps: &Captures<'_>) -> Option<RawMessage> {
    Some(RawMessage::new(
        group(caps, 1)?,
        group(caps, 2)?,
        capitalize(&group(caps, 3)?),
    ))
}

fn create(caps: &Captures<'_>) -> Option<RawMessage> {
    Some(RawMessage::new(
        group(caps, 1)?,
        group(caps, 3)?,
        capitalize(&format!("Create {}", group(caps, 2)?)),
    ))
}

fn authenticate(caps: &Captures<'_>) -> Option<RawMessage> {
    let target = group(caps, 2).unwrap_or_else(|| "system".to_string());
    Some(RawMessage::new(group(caps, 1)?, target, "Authenticate"))
}

fn validate(caps: &Captures<'_>) -> Option<RawMessage> {
    let subject = group(caps, 2)?;
    let target = group(caps, 3).unwrap_or_else(|| subject.clone());
    Some(RawMessage::new(
        group(caps, 1)?,
        target,
        capitalize(&format!("Validate {}", subject)),
    ))
}

fn store(caps: &Captures<'_>) -> Option<RawMessage> {
    Some(RawMessage::new(
        group(caps, 1)?,
        group(caps, 3)?,
        capitalize(&format!("Store {}", group(caps, 2)?)),
    ))
}

fn query(caps: &Captures<'_>) -> Option<RawMessage> {
    Some(RawMessage::new(
        group(caps, 1)?,
        group(caps, 3)?,
        capitalize(&format!("Query {}", group(caps, 2)?)),
    ))
}

/// The ordered message rules, for callers that want to inspect coverage
pub fn message_rules() -> Result<&'static RuleSet<(ConnectionKind, MessageHandler)>> {
    load(&MESSAGE_RULES, "message")
}

/// The ordered actor rules
pub fn actor_rules() -> Result<&'static RuleSet<()>> {
    load(&ACTOR_RULES, "actor")
}

fn keyword_type(text: &str) -> Option<ActorType> {
    if PERSON_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(ActorType::Person)
    } else if DATABASE_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(ActorType::Database)
    } else if SYSTEM_KEYWORDS.iter().any(|k| text.contains(k)) {
        Some(ActorType::System)
    } else {
        None
    }
}

/// Slice of `text` reaching `radius` bytes either side of `start..start+len`
fn context_window(text: &str, start: usize, len: usize, radius: usize) -> &str {
    let mut lo = start.saturating_sub(radius);
    while !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (start + len + radius).min(text.len());
    while !text.is_char_boundary(hi) {
        hi += 1;
    }
    &text[lo..hi]
}

/// Classify by the name, then by the words around its first mention
fn classify_actor(key: &str, lower_text: &str) -> ActorType {
    if let Some(actor_type) = keyword_type(key) {
        return actor_type;
    }
    lower_text
        .find(key)
        .and_then(|pos| keyword_type(context_window(lower_text, pos, key.len(), CONTEXT_RADIUS)))
        .unwrap_or(ActorType::System)
}

/// Exact name match first, then containment either way
fn resolve_actor<'a>(name: &str, actors: &'a [Actor]) -> Option<&'a Actor> {
    let key = name.to_lowercase();
    actors.iter().find(|a| a.key == key).or_else(|| {
        if key.chars().count() <= 2 {
            return None;
        }
        actors
            .iter()
            .find(|a| a.key.contains(&key) || key.contains(&a.key))
    })
}

/// Sequence diagram extractor
pub struct SequenceExtractor {
    limits: ExtractionLimits,
}

impl SequenceExtractor {
    pub fn new() -> Self {
        Self::with_limits(ExtractionLimits::default())
    }

    pub fn with_limits(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    /// Actors in discovery order, with a person and a system guaranteed
    pub fn extract_actors(&self, text: &str) -> Result<Vec<Actor>> {
        let rules = actor_rules()?;
        let lower = text.to_lowercase();
        let mut actors: Vec<Actor> = Vec::new();

        for (rule, caps) in rules.matches(text) {
            let Some(name) = group(&caps, 1) else {
                continue;
            };
            let key = name.to_lowercase();
            if key.chars().count() <= 2
                || NON_ACTOR_WORDS.contains(&key.as_str())
                || actors.iter().any(|a| a.key == key)
            {
                continue;
            }
            let actor_type = classify_actor(&key, &lower);
            trace!(rule = rule.name, actor = %key, %actor_type, "Found actor");
            actors.push(Actor::new(key, actor_type));
        }

        if !actors.iter().any(|a| a.actor_type == ActorType::Person) {
            actors.insert(0, Actor::new("user", ActorType::Person));
        }
        if !actors.iter().any(|a| a.actor_type == ActorType::System) {
            actors.push(Actor::new("system", ActorType::System));
        }
        actors.truncate(self.limits.max_actors);
        Ok(actors)
    }

    /// Messages between known actors, numbered in rule order
    pub fn extract_messages(&self, text: &str, actors: &[Actor]) -> Result<Vec<Message>> {
        let rules = message_rules()?;
        let mut messages = Vec::new();
        let mut order = 0u32;

        for (rule, caps) in rules.matches(text) {
            if messages.len() >= self.limits.max_messages {
                break;
            }
            let (kind, handler) = rule.payload;
            let Some(raw) = handler(&caps) else {
                continue;
            };
            let (Some(from), Some(to)) = (
                resolve_actor(&raw.from, actors),
                resolve_actor(&raw.to, actors),
            ) else {
                trace!(rule = rule.name, from = %raw.from, to = %raw.to, "Unresolved message endpoint");
                continue;
            };
            if from.key == to.key {
                continue;
            }
            order += 1;
            messages.push(Message {
                from: from.id(),
                to: to.id(),
                label: raw.label,
                kind,
                order,
            });
        }
        Ok(messages)
    }

    pub fn extract_title(&self, text: &str) -> Result<String> {
        let rules = load(&TITLE_RULES, "title")?;
        if let Some(title) = rules.first_capture(text) {
            return Ok(title_case(&title));
        }
        let sentence = text.split('.').next().unwrap_or_default().trim();
        if !sentence.is_empty() && sentence.chars().count() < MAX_SENTENCE_TITLE {
            Ok(title_case(sentence))
        } else {
            Ok(DEFAULT_TITLE.to_string())
        }
    }
}

impl Default for SequenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for SequenceExtractor {
    fn extract(&self, description: &str) -> Result<DiagramSpec> {
        let extract_span = span!(Level::INFO, "extract_sequence", input_len = description.len());
        let _enter = extract_span.enter();

        let actors = self.extract_actors(description)?;
        let messages = self.extract_messages(description, &actors)?;
        let title = self.extract_title(description)?;

        let mut spec = DiagramSpec::new(DiagramType::Sequence, title, description);
        for actor in &actors {
            spec.add_element(actor.to_element())?;
        }
        for message in &messages {
            spec.add_connection(message.to_connection());
        }
        spec.set_metadata("total_actors", actors.len());
        spec.set_metadata("total_messages", messages.len());
        spec.set_metadata("parsed_from", PARSED_FROM_NATURAL_LANGUAGE);

        debug!(
            actor_count = actors.len(),
            message_count = messages.len(),
            "Sequence extraction completed"
        );
        Ok(spec)
    }

    fn diagram_type(&self) -> DiagramType {
        DiagramType::Sequence
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = "User sends login request to System. System validates credentials. \
                         System returns token to User.";

    fn keys(actors: &[Actor]) -> Vec<(&str, ActorType)> {
        actors.iter().map(|a| (a.key.as_str(), a.actor_type)).collect()
    }

    #[test]
    fn test_rule_tables_compile() {
        assert_eq!(actor_rules().unwrap().len(), 5);
        assert_eq!(message_rules().unwrap().len(), 8);
    }

    #[test]
    fn test_login_actors() {
        let actors = SequenceExtractor::new().extract_actors(LOGIN).unwrap();
        assert_eq!(
            keys(&actors),
            vec![("user", ActorType::Person), ("system", ActorType::System)]
        );
    }

    #[test]
    fn test_login_messages() {
        let extractor = SequenceExtractor::new();
        let actors = extractor.extract_actors(LOGIN).unwrap();
        let messages = extractor.extract_messages(LOGIN, &actors).unwrap();
        assert_eq!(messages.len(), 2);

        assert_eq!(messages[0].from, "actor_user");
        assert_eq!(messages[0].to, "actor_system");
        assert_eq!(messages[0].label, "Login request");
        assert_eq!(messages[0].kind, ConnectionKind::Sync);
        assert_eq!(messages[0].order, 1);

        assert_eq!(messages[1].from, "actor_system");
        assert_eq!(messages[1].to, "actor_user");
        assert_eq!(messages[1].label, "Return token");
        assert_eq!(messages[1].kind, ConnectionKind::Return);
        assert_eq!(messages[1].order, 2);
    }

    #[test]
    fn test_person_is_synthesized_at_front() {
        let actors = SequenceExtractor::new()
            .extract_actors("Payment service calls Ledger service.")
            .unwrap();
        assert_eq!(actors[0].key, "user");
        assert_eq!(actors[0].actor_type, ActorType::Person);
        assert!(actors.iter().any(|a| a.key == "payment"));
    }

    #[test]
    fn test_context_window_classifies_database() {
        let actors = SequenceExtractor::new()
            .extract_actors("The orders database keeps history. Customer Alice sends cart to Shop.")
            .unwrap();
        let orders = actors.iter().find(|a| a.key == "orders").unwrap();
        assert_eq!(orders.actor_type, ActorType::Database);
        let alice = actors.iter().find(|a| a.key == "alice").unwrap();
        assert_eq!(alice.actor_type, ActorType::Person);
    }

    #[test]
    fn test_actor_cap_applies_after_synthesis() {
        let limits = ExtractionLimits {
            max_actors: 2,
            ..ExtractionLimits::default()
        };
        let actors = SequenceExtractor::with_limits(limits)
            .extract_actors("Alpha sends x to Beta. Gamma sends y to Delta.")
            .unwrap();
        assert_eq!(actors.len(), 2);
        assert_eq!(actors[0].key, "user");
    }

    #[test]
    fn test_receive_reverses_direction() {
        let extractor = SequenceExtractor::new();
        let text = "Customer receives receipt from Billing service.";
        let actors = extractor.extract_actors(text).unwrap();
        let messages = extractor.extract_messages(text, &actors).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "actor_billing");
        assert_eq!(messages[0].to, "actor_customer");
        assert_eq!(messages[0].label, "Return receipt");
    }

    #[test]
    fn test_order_follows_rule_list_not_text_position() {
        let extractor = SequenceExtractor::new();
        let text = "System returns page to User. User sends click to System.";
        let actors = extractor.extract_actors(text).unwrap();
        let messages = extractor.extract_messages(text, &actors).unwrap();
        assert_eq!(messages[0].kind, ConnectionKind::Sync);
        assert_eq!(messages[0].order, 1);
        assert_eq!(messages[1].kind, ConnectionKind::Return);
        assert_eq!(messages[1].order, 2);
    }

    #[test]
    fn test_authenticate_defaults_to_system() {
        let extractor = SequenceExtractor::new();
        let text = "User logs in.";
        let actors = extractor.extract_actors(text).unwrap();
        let messages = extractor.extract_messages(text, &actors).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].to, "actor_system");
        assert_eq!(messages[0].label, "Authenticate");
    }

    #[test]
    fn test_notify_is_async() {
        let extractor = SequenceExtractor::new();
        let text = "Notification service notifies the User about shipment.";
        let actors = extractor.extract_actors(text).unwrap();
        let messages = extractor.extract_messages(text, &actors).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "actor_notification");
        assert_eq!(messages[0].to, "actor_user");
        assert_eq!(messages[0].kind, ConnectionKind::Async);
        assert_eq!(messages[0].label, "Shipment");
    }

    #[test]
    fn test_role_noun_endpoints_resolve() {
        let extractor = SequenceExtractor::new();
        let text = "Checkout service stores the order in Orders database.";
        let actors = extractor.extract_actors(text).unwrap();
        let orders = actors.iter().find(|a| a.key == "orders").unwrap();
        assert_eq!(orders.actor_type, ActorType::Database);
        let messages = extractor.extract_messages(text, &actors).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].from, "actor_checkout");
        assert_eq!(messages[0].to, "actor_orders");
        assert_eq!(messages[0].label, "Store order");
    }

    #[test]
    fn test_lowercase_words_after_role_nouns_are_not_names() {
        let actors = SequenceExtractor::new()
            .extract_actors("The database keeps history. Customer Alice pays.")
            .unwrap();
        assert!(actors.iter().all(|a| a.key != "keeps"));
        assert!(actors.iter().any(|a| a.key == "alice"));
    }

    #[test]
    fn test_self_messages_are_dropped() {
        let extractor = SequenceExtractor::new();
        let text = "System sends ping to System.";
        let actors = extractor.extract_actors(text).unwrap();
        assert!(extractor.extract_messages(text, &actors).unwrap().is_empty());
    }

    #[test]
    fn test_message_cap() {
        let limits = ExtractionLimits {
            max_messages: 1,
            ..ExtractionLimits::default()
        };
        let extractor = SequenceExtractor::with_limits(limits);
        let actors = extractor.extract_actors(LOGIN).unwrap();
        assert_eq!(extractor.extract_messages(LOGIN, &actors).unwrap().len(), 1);
    }

    #[test]
    fn test_titles() {
        let extractor = SequenceExtractor::new();
        assert_eq!(
            extractor.extract_title("Title: checkout flow\nUser pays.").unwrap(),
            "Checkout Flow"
        );
        assert_eq!(
            extractor.extract_title("Order fulfilment workflow with many steps").unwrap(),
            "Order Fulfilment"
        );
        assert_eq!(
            extractor.extract_title(LOGIN).unwrap(),
            "User Sends Login Request To System"
        );
        assert_eq!(extractor.extract_title("").unwrap(), "Sequence Diagram");
        let long = "a".repeat(60);
        assert_eq!(extractor.extract_title(&long).unwrap(), "Sequence Diagram");
    }

    #[test]
    fn test_extract_builds_spec() {
        let spec = SequenceExtractor::new().extract(LOGIN).unwrap();
        assert_eq!(spec.diagram_type, DiagramType::Sequence);
        assert_eq!(spec.description, LOGIN);
        assert_eq!(spec.element_count(), 2);
        assert_eq!(spec.connection_count(), 2);
        assert_eq!(spec.metadata["total_actors"], 2);
        assert_eq!(spec.metadata["total_messages"], 2);
        assert_eq!(spec.metadata["parsed_from"], "natural_language");
    }
}
