//! Ordered regex rule tables
//!
//! Extraction heuristics are kept as data: an ordered list of named patterns,
//! each carrying a payload (a type tag, a handler function, or both). Rules
//! are evaluated in list order, and within a rule in match order, which is
//! what gives messages and relationships their deterministic ordering.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::DiagramError;

/// A rule table compiled on first use
pub type StaticRules<T> = LazyLock<Result<RuleSet<T>, regex::Error>>;

/// A single pattern compiled on first use
pub type StaticPattern = LazyLock<Result<Regex, regex::Error>>;

/// Borrow a compiled static table, turning a compile failure into an error
pub fn load<T>(rules: &'static StaticRules<T>, table: &str) -> anyhow::Result<&'static RuleSet<T>> {
    rules.as_ref().map_err(|e| {
        DiagramError::extraction_error(format!("{} rule table failed to compile: {}", table, e))
            .into()
    })
}

/// Borrow a compiled static pattern, turning a compile failure into an error
pub fn compiled(pattern: &'static StaticPattern, name: &str) -> anyhow::Result<&'static Regex> {
    pattern.as_ref().map_err(|e| {
        DiagramError::extraction_error(format!("{} pattern failed to compile: {}", name, e))
            .into()
    })
}

/// One named pattern with its payload
#[derive(Debug, Clone)]
pub struct Rule<T> {
    pub name: &'static str,
    pub pattern: Regex,
    pub payload: T,
}

/// Ordered list of rules
#[derive(Debug, Clone)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T: Clone> RuleSet<T> {
    /// Compile `(name, pattern, payload)` triples in order
    pub fn compile(specs: &[(&'static str, &str, T)]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(|(name, pattern, payload)| {
                Ok(Rule {
                    name: *name,
                    pattern: Regex::new(pattern)?,
                    payload: payload.clone(),
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }
}

impl<T> RuleSet<T> {
    pub fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every match of every rule: rule order first, then position in `text`
    pub fn matches<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (&'a Rule<T>, Captures<'a>)> + 'a {
        self.rules.iter().flat_map(move |rule| {
            rule.pattern
                .captures_iter(text)
                .map(move |caps| (rule, caps))
        })
    }

    /// Group 1 of the first match of the first rule yielding a non-blank one
    pub fn first_capture(&self, text: &str) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule.pattern.captures(text).and_then(|caps| group(&caps, 1)))
    }
}

/// Text of capture group `i`, trimmed; `None` when absent or blank
pub fn group(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
