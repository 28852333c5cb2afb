//! Core type definitions for diagram generation
//!
//! This module contains the closed vocabularies shared by every extractor and
//! emitter: diagram kinds, output notations, flow direction, and the tags used
//! on elements and connections.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::DiagramError;

/// Normalize an enum name typed by a user: trimmed, lower-case, `-` as `_`
fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase().replace('-', "_")
}

/// Kinds of diagram a description can be turned into
///
/// Only [`DiagramType::Sequence`], [`DiagramType::Flowchart`] and
/// [`DiagramType::Class`] have extractors; the others are recognized so that
/// callers get a precise "not implemented" answer instead of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramType {
    Architecture,
    Sequence,
    Flowchart,
    Class,
    Network,
    Deployment,
    Component,
    StateMachine,
    Gantt,
    Mindmap,
}

impl DiagramType {
    /// Every diagram type in declaration order
    pub fn all() -> &'static [DiagramType] {
        &[
            DiagramType::Architecture,
            DiagramType::Sequence,
            DiagramType::Flowchart,
            DiagramType::Class,
            DiagramType::Network,
            DiagramType::Deployment,
            DiagramType::Component,
            DiagramType::StateMachine,
            DiagramType::Gantt,
            DiagramType::Mindmap,
        ]
    }

    /// Wire name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramType::Architecture => "architecture",
            DiagramType::Sequence => "sequence",
            DiagramType::Flowchart => "flowchart",
            DiagramType::Class => "class",
            DiagramType::Network => "network",
            DiagramType::Deployment => "deployment",
            DiagramType::Component => "component",
            DiagramType::StateMachine => "state_machine",
            DiagramType::Gantt => "gantt",
            DiagramType::Mindmap => "mindmap",
        }
    }

    /// Wire names of every diagram type
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(DiagramType::as_str).collect()
    }
}

impl FromStr for DiagramType {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| {
                DiagramError::invalid_input(format!("Unknown diagram type: '{}'", s.trim()))
            })
    }
}

impl fmt::Display for DiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output notations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramFormat {
    /// Python source for the `diagrams` library
    PythonDiagrams,
    /// Mermaid markup
    Mermaid,
    /// PlantUML markup
    Plantuml,
    /// Graphviz DOT
    Graphviz,
    /// D2 markup
    D2,
    /// Rendered SVG
    Svg,
    /// Plain text art
    Ascii,
}

impl DiagramFormat {
    /// Every format in declaration order
    pub fn all() -> &'static [DiagramFormat] {
        &[
            DiagramFormat::PythonDiagrams,
            DiagramFormat::Mermaid,
            DiagramFormat::Plantuml,
            DiagramFormat::Graphviz,
            DiagramFormat::D2,
            DiagramFormat::Svg,
            DiagramFormat::Ascii,
        ]
    }

    /// Wire name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramFormat::PythonDiagrams => "python_diagrams",
            DiagramFormat::Mermaid => "mermaid",
            DiagramFormat::Plantuml => "plantuml",
            DiagramFormat::Graphviz => "graphviz",
            DiagramFormat::D2 => "d2",
            DiagramFormat::Svg => "svg",
            DiagramFormat::Ascii => "ascii",
        }
    }

    /// Wire names of every format
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(DiagramFormat::as_str).collect()
    }
}

impl FromStr for DiagramFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| {
                DiagramError::invalid_input(format!("Unknown output format: '{}'", s.trim()))
            })
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flow direction for the diagram layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub enum Direction {
    /// Top to bottom (TD or TB)
    #[default]
    TopDown,
    /// Left to right (LR)
    LeftRight,
    /// Right to left (RL)
    RightLeft,
    /// Bottom to top (BT)
    BottomUp,
}

impl Direction {
    /// Parse direction from mermaid syntax (TD, TB, LR, RL, BT)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TD" | "TB" => Some(Direction::TopDown),
            "LR" => Some(Direction::LeftRight),
            "RL" => Some(Direction::RightLeft),
            "BT" => Some(Direction::BottomUp),
            _ => None,
        }
    }

    /// Direction keyword understood by the Python `diagrams` library and Graphviz
    pub fn as_graphviz(&self) -> &'static str {
        match self {
            Direction::TopDown => "TB",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
            Direction::BottomUp => "BT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TopDown => write!(f, "TD"),
            Direction::LeftRight => write!(f, "LR"),
            Direction::RightLeft => write!(f, "RL"),
            Direction::BottomUp => write!(f, "BT"),
        }
    }
}

/// Role of an element inside a diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Actor,
    Start,
    End,
    Process,
    Decision,
    Data,
    Connector,
    Class,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Actor => "actor",
            ElementKind::Start => "start",
            ElementKind::End => "end",
            ElementKind::Process => "process",
            ElementKind::Decision => "decision",
            ElementKind::Data => "data",
            ElementKind::Connector => "connector",
            ElementKind::Class => "class",
        };
        write!(f, "{}", name)
    }
}

/// Semantics of a connection
///
/// Message kinds belong to sequence diagrams, relationship kinds to class
/// diagrams, and [`ConnectionKind::Flow`] to flowcharts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    Sync,
    Async,
    Return,
    Create,
    #[default]
    Flow,
    Inheritance,
    Composition,
    Aggregation,
    Association,
    Dependency,
}

impl ConnectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionKind::Sync => "sync",
            ConnectionKind::Async => "async",
            ConnectionKind::Return => "return",
            ConnectionKind::Create => "create",
            ConnectionKind::Flow => "flow",
            ConnectionKind::Inheritance => "inheritance",
            ConnectionKind::Composition => "composition",
            ConnectionKind::Aggregation => "aggregation",
            ConnectionKind::Association => "association",
            ConnectionKind::Dependency => "dependency",
        }
    }

    /// Returns true for the class-diagram relationship kinds
    pub fn is_relationship(&self) -> bool {
        matches!(
            self,
            ConnectionKind::Inheritance
                | ConnectionKind::Composition
                | ConnectionKind::Aggregation
                | ConnectionKind::Association
                | ConnectionKind::Dependency
        )
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of participant in an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Person,
    System,
    Database,
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorType::Person => write!(f, "person"),
            ActorType::System => write!(f, "system"),
            ActorType::Database => write!(f, "database"),
        }
    }
}
