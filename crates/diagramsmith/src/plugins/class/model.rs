//! Class diagram working types and vocabulary

use crate::core::{
    title_case, ConnectionKind, DiagramConnection, DiagramElement, ElementKind,
    ElementProperties,
};

/// Words that can sit in a class-name slot but never name a class
pub const NON_CLASS_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "these", "those", "which", "who", "also",
    "each", "every", "there", "then", "one", "its", "their", "diagram", "what", "class",
    "model", "entity",
];

/// Nouns promoted to classes when nothing is declared explicitly
pub const COMMON_ENTITIES: &[&str] = &[
    "user", "customer", "product", "order", "payment", "account", "service", "item", "record",
];

/// Attributes every class whose name contains the key gets
pub const DEFAULT_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("user", &["id", "name", "email", "created_at"]),
    ("product", &["id", "name", "price", "description"]),
    ("order", &["id", "status", "total", "created_at"]),
];

/// Method prefix and the verb forms that select it
pub const METHOD_VERBS: &[(&str, &[&str])] = &[
    (
        "create",
        &[
            "create", "creates", "created", "creating", "add", "adds", "added", "adding",
            "insert", "inserts", "inserted", "inserting",
        ],
    ),
    (
        "update",
        &[
            "update", "updates", "updated", "updating", "modify", "modifies", "modified",
            "modifying", "change", "changes", "changed", "changing",
        ],
    ),
    (
        "delete",
        &[
            "delete", "deletes", "deleted", "deleting", "remove", "removes", "removed",
            "removing",
        ],
    ),
    (
        "get",
        &[
            "get", "gets", "getting", "find", "finds", "finding", "search", "searches",
            "searching",
        ],
    ),
];

/// A class with its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Capitalized display name
    pub name: String,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
    pub stereotypes: Vec<String>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
            stereotypes: Vec::new(),
        }
    }

    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn id(&self) -> String {
        class_id(&self.name)
    }

    pub fn to_element(&self) -> DiagramElement {
        DiagramElement::new(self.id(), &self.name, ElementKind::Class).with_properties(
            ElementProperties::Class {
                attributes: self.attributes.clone(),
                methods: self.methods.clone(),
                stereotypes: self.stereotypes.clone(),
            },
        )
    }
}

/// Element id for a class name
pub fn class_id(name: &str) -> String {
    format!("class_{}", name.to_lowercase())
}

/// A relationship between two extracted classes, by lower-cased name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: ConnectionKind,
    pub multiplicity: Option<String>,
}

impl Relationship {
    pub fn label(&self) -> String {
        title_case(self.kind.as_str())
    }

    pub fn to_connection(&self) -> DiagramConnection {
        DiagramConnection::relationship(
            class_id(&self.from),
            class_id(&self.to),
            self.kind,
            self.multiplicity.clone(),
        )
        .with_label(self.label())
    }
}
