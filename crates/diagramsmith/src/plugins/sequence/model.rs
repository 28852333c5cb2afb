//! Sequence diagram vocabulary and working types
//!
//! Actors and messages are collected here before being folded into a
//! [`DiagramSpec`](crate::core::DiagramSpec).

use crate::core::{
    title_case, ActorType, ConnectionKind, DiagramConnection, DiagramElement, ElementKind,
    ElementProperties,
};

/// Name fragments that mark an actor as a person
pub const PERSON_KEYWORDS: &[&str] = &["user", "customer", "client", "person", "admin", "operator"];

/// Name fragments that mark an actor as a system
pub const SYSTEM_KEYWORDS: &[&str] = &["system", "service", "api", "server", "app", "application"];

/// Name fragments that mark an actor as a data store
pub const DATABASE_KEYWORDS: &[&str] = &["database", "db", "storage", "repository"];

/// Tokens that can sit in an actor slot but never name an actor
pub const NON_ACTOR_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "into", "onto", "that", "this", "then", "than", "when",
    "while", "which", "who", "also", "its", "their", "back", "sends", "send", "receives",
    "calls", "requests", "asks", "gets", "obtains", "returns", "responds", "validates",
    "verifies", "checks", "notifies", "alerts", "informs", "creates", "generates", "produces",
    "stores", "saves", "persists", "queries", "searches", "looks", "authenticates", "logs",
    "signs", "wants", "tries", "needs", "has", "have", "is", "are", "was", "will", "can",
    "should", "must",
];

/// Characters of context inspected on each side of an actor name
pub const CONTEXT_RADIUS: usize = 20;

/// A participant discovered in the description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Lower-cased name used for matching
    pub key: String,
    pub actor_type: ActorType,
}

impl Actor {
    pub fn new(key: impl Into<String>, actor_type: ActorType) -> Self {
        Self {
            key: key.into().to_lowercase(),
            actor_type,
        }
    }

    pub fn id(&self) -> String {
        format!("actor_{}", self.key)
    }

    pub fn label(&self) -> String {
        title_case(&self.key)
    }

    pub fn to_element(&self) -> DiagramElement {
        DiagramElement::new(self.id(), self.label(), ElementKind::Actor).with_properties(
            ElementProperties::Actor {
                actor_type: self.actor_type,
            },
        )
    }
}

/// A message with resolved endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub label: String,
    pub kind: ConnectionKind,
    pub order: u32,
}

impl Message {
    pub fn to_connection(&self) -> DiagramConnection {
        DiagramConnection::message(&self.from, &self.to, &self.label, self.kind, self.order)
    }
}

/// A message as phrased in the text, before actor resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl RawMessage {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}
