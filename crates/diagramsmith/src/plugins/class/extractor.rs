//! Class diagram extractor
//!
//! Picks out class names, their attributes and methods, and the
//! relationships between them from a domain description.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::{debug, span, trace, Level};

use super::model::{
    ClassDef, Relationship, COMMON_ENTITIES, DEFAULT_ATTRIBUTES, METHOD_VERBS, NON_CLASS_WORDS,
};
use crate::core::rules::{compiled, group, load, RuleSet, StaticPattern, StaticRules};
use crate::core::{
    capitalize, snake_case, title_case, ConnectionKind, DiagramError, DiagramSpec, DiagramType,
    ExtractionLimits, Extractor, PARSED_FROM_NATURAL_LANGUAGE,
};

static CLASS_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("class_keyword", r"(?i)\bclass\s+(\w+)", ()),
        ("entity_keyword", r"(?i)\bentity\s+(\w+)", ()),
        ("model_keyword", r"(?i)\bmodel\s+(\w+)", ()),
        ("interface_keyword", r"(?i)\binterface\s+(\w+)", ()),
        (
            "article_kind",
            r"(?i)\ban?\s+(\w+)\s+(?:class|entity|object)\b",
            (),
        ),
        (
            "owner",
            r"(?i)\b(\w+)\s+(?:has|contains|includes|manages)\b(?:\s+(?:(?:an?|many|the)\s+)?((?-i:[A-Z])\w*))?",
            (),
        ),
    ])
});

static ENTITY_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("capitalized", r"\b([A-Z]\w+)\b", ()),
        (
            "common_noun",
            &format!(r"(?i)\b({})\b", COMMON_ENTITIES.join("|")),
            (),
        ),
    ])
});

static RELATIONSHIP_RULES: StaticRules<ConnectionKind> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            "inheritance",
            r"(?i)\b(?P<from>\w+)\s+(?:inherits\s+from|extends|is\s+an?)\s+(?P<to>\w+)",
            ConnectionKind::Inheritance,
        ),
        (
            "composition",
            r"(?i)\b(?P<from>\w+)\s+(?:has|contains|owns|creates)\s+(?:(?P<quantity>an?|many)\s+)?(?P<to>\w+)",
            ConnectionKind::Composition,
        ),
        (
            "dependency",
            r"(?i)\b(?P<from>\w+)\s+(?:uses|depends\s+on|relies\s+on)\s+(?P<to>\w+)",
            ConnectionKind::Dependency,
        ),
        (
            "association",
            r"(?i)\b(?P<from>\w+)\s+(?:is\s+associated\s+with|relates\s+to)\s+(?P<to>\w+)",
            ConnectionKind::Association,
        ),
        (
            "aggregation",
            r"(?i)\b(?P<from>\w+)\s+(?:aggregates|includes)\s+(?P<to>\w+)",
            ConnectionKind::Aggregation,
        ),
    ])
});

static TITLE_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            "labelled",
            r"(?i)\b(?:class diagram|domain model|entity model):\s*([^\n]+)",
            (),
        ),
        (
            "leading_noun",
            r"(?i)^([^.:\n]+?)\s+(?:class diagram|domain model|entity model)\b",
            (),
        ),
        ("model_for", r"(?i)\b(?:model|classes) for\s+([^.\n]+)", ()),
    ])
});

static LIST_SEPARATOR: StaticPattern =
    LazyLock::new(|| Regex::new(r"(?i)\s*,\s*(?:(?:and|or)\s+)?|\s+(?:and|or)\s+"));

/// Attribute phrase templates; `{c}` is the escaped class name
const ATTRIBUTE_TEMPLATES: &[&str] = &[
    r"(?i)\b{c}\s+has\s+(?:an?\s+)?(\w[\w \t,]*)",
    r"(?i)\b{c}\s+contains\s+(\w[\w \t,]*)",
    r"(?i)\b{c}\b[^.\n]*?\b(?:with|having)\s+(\w[\w \t,]*)",
    r"(?i)\b(\w+)\s+(?:of|in)\s+(?:the\s+)?{c}\b",
];

/// Method phrase templates; the flag says whether a known verb is required
const METHOD_TEMPLATES: &[(&str, bool)] = &[
    (r"(?i)\b{c}\s+(?:can|should|will|must)\s+(\w+(?:[ \t]+\w+)*)", false),
    (r"(?i)(\w+(?:[ \t]+\w+)*)[ \t]+(?:the[ \t]+)?{c}\b", true),
    (r"(?i)\b{c}\b[^.\n]*?\b(?:to|for)\s+(\w+(?:[ \t]+\w+)*)", true),
];

/// Stereotype phrase templates; group 1 is the keyword
const STEREOTYPE_TEMPLATES: &[&str] = &[
    r"(?i)\b{c}\s+is\s+(?:an?\s+)?(abstract|interface|enum)\b",
    r"(?i)\b(abstract|interface|enum)\s+(?:class\s+)?{c}\b",
];

/// Leading words dropped from attribute phrases
const QUANTIFIERS: &[&str] = &["a", "an", "the", "many", "some", "multiple", "several"];

const DEFAULT_TITLE: &str = "Class Diagram";

/// Longest attribute or method phrase considered, in characters (exclusive)
const MAX_MEMBER_PHRASE: usize = 30;

fn template(pattern: &str, class_name: &str) -> Result<Regex> {
    Regex::new(&pattern.replace("{c}", &regex::escape(class_name))).map_err(|e| {
        let message = format!("member pattern for {} failed to compile: {}", class_name, e);
        DiagramError::extraction_error(message).into()
    })
}

fn is_class_word(word: &str) -> bool {
    word.chars().count() > 2 && !NON_CLASS_WORDS.contains(&word)
}

/// Turn a verb phrase into a `prefix_noun()` method name
fn method_name(phrase: &str, class_key: &str, require_verb: bool) -> Option<String> {
    let tokens: Vec<String> = phrase.split_whitespace().map(str::to_lowercase).collect();
    let last = tokens.last()?;
    let joined = tokens.join("_");
    if ["get_", "set_", "is_", "has_"]
        .iter()
        .any(|p| joined.starts_with(p))
    {
        return Some(format!("{}()", joined));
    }

    let verb = METHOD_VERBS
        .iter()
        .find(|(_, forms)| tokens.iter().any(|t| forms.contains(&t.as_str())));
    match verb {
        Some((prefix, forms)) => {
            let noun = if forms.contains(&last.as_str()) {
                class_key
            } else {
                last.as_str()
            };
            Some(format!("{}_{}()", prefix, noun))
        }
        None if require_verb => None,
        None => Some(format!("{}()", joined)),
    }
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.contains(&item) {
        list.push(item);
    }
}

/// Class diagram extractor
pub struct ClassExtractor {
    limits: ExtractionLimits,
}

impl ClassExtractor {
    pub fn new() -> Self {
        Self::with_limits(ExtractionLimits::default())
    }

    pub fn with_limits(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    /// Capitalized class names in discovery order
    pub fn extract_class_names(&self, text: &str) -> Result<Vec<String>> {
        let rules = load(&CLASS_RULES, "class")?;
        let mut names: Vec<String> = Vec::new();

        for (rule, caps) in rules.matches(text) {
            for i in 1..caps.len() {
                let Some(word) = group(&caps, i) else {
                    continue;
                };
                let name = capitalize(&word);
                if is_class_word(&name.to_lowercase()) && !names.contains(&name) {
                    trace!(rule = rule.name, class = %name, "Found class");
                    names.push(name);
                }
            }
        }

        if names.is_empty() {
            names = self.infer_entities(text)?;
        }
        names.truncate(self.limits.max_classes);
        Ok(names)
    }

    /// Capitalized words, then common domain nouns
    fn infer_entities(&self, text: &str) -> Result<Vec<String>> {
        let rules = load(&ENTITY_RULES, "entity")?;
        let mut names: Vec<String> = Vec::new();
        for (_, caps) in rules.matches(text) {
            let Some(word) = group(&caps, 1) else {
                continue;
            };
            let name = capitalize(&word);
            if is_class_word(&name.to_lowercase()) && !names.contains(&name) {
                names.push(name);
            }
        }
        names.truncate(self.limits.max_inferred_entities);
        debug!(count = names.len(), "Inferred domain entities");
        Ok(names)
    }

    /// Attributes of `class_name`, excluding names of other classes
    pub fn extract_attributes(
        &self,
        class_name: &str,
        text: &str,
        class_names: &[String],
    ) -> Result<Vec<String>> {
        let separator = compiled(&LIST_SEPARATOR, "list separator")?;
        let class_key = class_name.to_lowercase();
        let is_class = |word: &str| {
            class_names.iter().any(|c| {
                let c = c.to_lowercase();
                word == c || word.strip_suffix('s') == Some(c.as_str())
            })
        };

        let mut attributes = Vec::new();
        for pattern in ATTRIBUTE_TEMPLATES {
            let re = template(pattern, class_name)?;
            for caps in re.captures_iter(text) {
                let Some(phrase) = group(&caps, 1) else {
                    continue;
                };
                for piece in separator.split(&phrase) {
                    let words: Vec<&str> = piece
                        .split_whitespace()
                        .skip_while(|w| QUANTIFIERS.contains(&w.to_lowercase().as_str()))
                        .collect();
                    let attribute = snake_case(&words.join(" "));
                    if attribute.is_empty()
                        || attribute.chars().count() >= MAX_MEMBER_PHRASE
                        || attribute == class_key
                        || is_class(&attribute)
                    {
                        continue;
                    }
                    push_unique(&mut attributes, attribute);
                }
            }
        }

        if let Some((_, defaults)) = DEFAULT_ATTRIBUTES
            .iter()
            .find(|(key, _)| class_key.contains(key))
        {
            for attribute in *defaults {
                push_unique(&mut attributes, attribute.to_string());
            }
        }
        attributes.truncate(self.limits.max_attributes);
        Ok(attributes)
    }

    /// Methods of `class_name` from capability and action phrasing
    pub fn extract_methods(&self, class_name: &str, text: &str) -> Result<Vec<String>> {
        let class_key = class_name.to_lowercase();
        let mut methods = Vec::new();
        for (pattern, require_verb) in METHOD_TEMPLATES {
            let re = template(pattern, class_name)?;
            for caps in re.captures_iter(text) {
                let Some(phrase) = group(&caps, 1) else {
                    continue;
                };
                if phrase.chars().count() >= MAX_MEMBER_PHRASE {
                    continue;
                }
                if let Some(name) = method_name(&phrase, &class_key, *require_verb) {
                    push_unique(&mut methods, name);
                }
            }
        }
        methods.truncate(self.limits.max_methods);
        Ok(methods)
    }

    /// Stereotypes of `class_name`: `abstract`, `interface` or `enumeration`
    pub fn extract_stereotypes(&self, class_name: &str, text: &str) -> Result<Vec<String>> {
        let mut stereotypes = Vec::new();
        for pattern in STEREOTYPE_TEMPLATES {
            let re = template(pattern, class_name)?;
            for caps in re.captures_iter(text) {
                let Some(keyword) = group(&caps, 1) else {
                    continue;
                };
                let stereotype = match keyword.to_lowercase().as_str() {
                    "enum" => "enumeration".to_string(),
                    other => other.to_string(),
                };
                push_unique(&mut stereotypes, stereotype);
            }
        }
        Ok(stereotypes)
    }

    /// Classes with members filled in
    pub fn extract_classes(&self, text: &str) -> Result<Vec<ClassDef>> {
        let names = self.extract_class_names(text)?;
        names
            .iter()
            .map(|name| -> Result<ClassDef> {
                let mut class = ClassDef::new(name);
                class.attributes = self.extract_attributes(name, text, &names)?;
                class.methods = self.extract_methods(name, text)?;
                class.stereotypes = self.extract_stereotypes(name, text)?;
                Ok(class)
            })
            .collect()
    }

    /// Relationships whose ends are both extracted classes
    pub fn extract_relationships(&self, text: &str, classes: &[ClassDef]) -> Result<Vec<Relationship>> {
        let rules = load(&RELATIONSHIP_RULES, "relationship")?;
        let keys: Vec<String> = classes.iter().map(ClassDef::key).collect();
        let mut relationships: Vec<Relationship> = Vec::new();

        for (rule, caps) in rules.matches(text) {
            if relationships.len() >= self.limits.max_relationships {
                break;
            }
            let (Some(from), Some(to)) = (caps.name("from"), caps.name("to")) else {
                continue;
            };
            let from = from.as_str().to_lowercase();
            let to = to.as_str().to_lowercase();
            if !keys.contains(&from) || !keys.contains(&to) {
                continue;
            }
            let multiplicity = caps
                .name("quantity")
                .filter(|q| q.as_str().eq_ignore_ascii_case("many"))
                .map(|_| "*".to_string());
            let relationship = Relationship {
                from,
                to,
                kind: rule.payload,
                multiplicity,
            };
            if !relationships
                .iter()
                .any(|r| r.from == relationship.from && r.to == relationship.to && r.kind == relationship.kind)
            {
                trace!(rule = rule.name, from = %relationship.from, to = %relationship.to, "Found relationship");
                relationships.push(relationship);
            }
        }
        Ok(relationships)
    }

    pub fn extract_title(&self, text: &str) -> Result<String> {
        let rules = load(&TITLE_RULES, "title")?;
        Ok(rules
            .first_capture(text)
            .map(|t| title_case(&t))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()))
    }
}

impl Default for ClassExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ClassExtractor {
    fn extract(&self, description: &str) -> Result<DiagramSpec> {
        let extract_span = span!(Level::INFO, "extract_class", input_len = description.len());
        let _enter = extract_span.enter();

        let classes = self.extract_classes(description)?;
        let relationships = self.extract_relationships(description, &classes)?;
        let title = self.extract_title(description)?;

        let mut spec = DiagramSpec::new(DiagramType::Class, title, description);
        for class in &classes {
            spec.add_element(class.to_element())?;
        }
        for relationship in &relationships {
            spec.add_connection(relationship.to_connection());
        }
        spec.set_metadata("total_classes", classes.len());
        spec.set_metadata("total_relationships", relationships.len());
        spec.set_metadata("parsed_from", PARSED_FROM_NATURAL_LANGUAGE);

        debug!(
            class_count = classes.len(),
            relationship_count = relationships.len(),
            "Class extraction completed"
        );
        Ok(spec)
    }

    fn diagram_type(&self) -> DiagramType {
        DiagramType::Class
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
