//! Shared intermediate representation
//!
//! Every extractor produces a [`DiagramSpec`] and every emitter reads one.
//! Extractor-specific data rides on closed payload enums
//! ([`ElementProperties`], [`ConnectionProperties`]) instead of open maps.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use super::{ActorType, ConnectionKind, DiagramError, DiagramType, ElementKind};

/// Provenance recorded under the `parsed_from` metadata key
pub const PARSED_FROM_NATURAL_LANGUAGE: &str = "natural_language";

/// Per-element payload, one variant per diagram family
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementProperties {
    #[default]
    None,
    Actor {
        actor_type: ActorType,
    },
    Class {
        attributes: Vec<String>,
        methods: Vec<String>,
        stereotypes: Vec<String>,
    },
}

impl ElementProperties {
    /// Actor type, if this is an actor payload
    pub fn actor_type(&self) -> Option<ActorType> {
        match self {
            ElementProperties::Actor { actor_type } => Some(*actor_type),
            _ => None,
        }
    }

    /// Attributes and methods, if this is a class payload
    pub fn class_members(&self) -> Option<(&[String], &[String])> {
        match self {
            ElementProperties::Class {
                attributes,
                methods,
                ..
            } => Some((attributes, methods)),
            _ => None,
        }
    }

    /// Stereotype names without guillemets; empty for non-class payloads
    pub fn stereotypes(&self) -> &[String] {
        match self {
            ElementProperties::Class { stereotypes, .. } => stereotypes,
            _ => &[],
        }
    }
}

/// A node in a diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramElement {
    /// Unique identifier within a spec
    pub id: String,
    /// Display text
    pub label: String,
    pub kind: ElementKind,
    pub properties: ElementProperties,
    /// Rendering hints
    pub style: BTreeMap<String, String>,
}

impl DiagramElement {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            properties: ElementProperties::None,
            style: BTreeMap::new(),
        }
    }

    pub fn with_properties(mut self, properties: ElementProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// Per-connection payload
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectionProperties {
    #[default]
    None,
    /// Sequence message ordering
    Message { order: u32, activation: bool },
    /// Class relationship cardinality
    Relationship { multiplicity: Option<String> },
}

impl ConnectionProperties {
    /// Message order, if this is a message payload
    pub fn order(&self) -> Option<u32> {
        match self {
            ConnectionProperties::Message { order, .. } => Some(*order),
            _ => None,
        }
    }

    pub fn activation(&self) -> bool {
        matches!(
            self,
            ConnectionProperties::Message {
                activation: true,
                ..
            }
        )
    }

    pub fn multiplicity(&self) -> Option<&str> {
        match self {
            ConnectionProperties::Relationship { multiplicity } => multiplicity.as_deref(),
            _ => None,
        }
    }
}

/// A directed, optionally labeled edge between two elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramConnection {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub kind: ConnectionKind,
    pub properties: ConnectionProperties,
}

impl DiagramConnection {
    /// Create an unlabeled flow edge
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            kind: ConnectionKind::Flow,
            properties: ConnectionProperties::None,
        }
    }

    /// Create an ordered sequence message
    pub fn message(
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
        kind: ConnectionKind,
        order: u32,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
            kind,
            properties: ConnectionProperties::Message {
                order,
                activation: false,
            },
        }
    }

    /// Create a class relationship
    pub fn relationship(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: ConnectionKind,
        multiplicity: Option<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            kind,
            properties: ConnectionProperties::Relationship { multiplicity },
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_activation(mut self, activation: bool) -> Self {
        if let ConnectionProperties::Message { order, .. } = self.properties {
            self.properties = ConnectionProperties::Message { order, activation };
        }
        self
    }
}

/// The complete parse result for one description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramSpec {
    pub diagram_type: DiagramType,
    pub title: String,
    /// Original input, kept for traceability
    pub description: String,
    elements: Vec<DiagramElement>,
    connections: Vec<DiagramConnection>,
    pub metadata: BTreeMap<String, Value>,
    pub style_config: BTreeMap<String, String>,
}

impl DiagramSpec {
    pub fn new(
        diagram_type: DiagramType,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            diagram_type,
            title: title.into(),
            description: description.into(),
            elements: Vec::new(),
            connections: Vec::new(),
            metadata: BTreeMap::new(),
            style_config: BTreeMap::new(),
        }
    }

    /// Append an element; ids must be unique
    pub fn add_element(&mut self, element: DiagramElement) -> Result<(), DiagramError> {
        if self.has_element(&element.id) {
            return Err(DiagramError::duplicate_element(element.id));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Append a connection. Endpoints are not checked here; emitters skip
    /// connections whose endpoints are missing.
    pub fn add_connection(&mut self, connection: DiagramConnection) {
        self.connections.push(connection);
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn elements(&self) -> &[DiagramElement] {
        &self.elements
    }

    pub fn connections(&self) -> &[DiagramConnection] {
        &self.connections
    }

    pub fn element(&self, id: &str) -> Option<&DiagramElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections with at least one endpoint missing from the element set
    pub fn dangling_connections(&self) -> Vec<&DiagramConnection> {
        let ids: HashSet<&str> = self.elements.iter().map(|e| e.id.as_str()).collect();
        self.connections
            .iter()
            .filter(|c| !ids.contains(c.from.as_str()) || !ids.contains(c.to.as_str()))
            .collect()
    }

    /// Human-readable note for each dangling connection
    pub fn diagnostics(&self) -> Vec<String> {
        self.dangling_connections()
            .into_iter()
            .map(|c| {
                let missing = if self.has_element(&c.from) { &c.to } else { &c.from };
                format!(
                    "connection {} -> {} references unknown element '{}'",
                    c.from, c.to, missing
                )
            })
            .collect()
    }
}
