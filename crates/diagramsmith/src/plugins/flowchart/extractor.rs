//! Flowchart extractor
//!
//! Reads a process description as numbered steps, sequencing cues or
//! subject-verb clauses, plus up to a few decision points.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::{debug, span, trace, Level};

use crate::core::rules::{compiled, group, load, RuleSet, StaticPattern, StaticRules};
use crate::core::{
    capitalize, title_case, DiagramConnection, DiagramElement, DiagramSpec, DiagramType,
    ElementKind, ExtractionLimits, Extractor, PARSED_FROM_NATURAL_LANGUAGE,
};

/// Id of the synthesized entry node
pub const START_ID: &str = "start";
/// Id of the synthesized exit node (`end` is reserved in Mermaid)
pub const END_ID: &str = "finish";

const DEFAULT_TITLE: &str = "Process Flow";

static NUMBER_MARKER: StaticPattern =
    LazyLock::new(|| Regex::new(r"\d+[.)]"));

/// Sequencing cues; the payload ends the step early, otherwise it runs to
/// the end of the line
static CUE_RULES: StaticRules<Option<Regex>> = LazyLock::new(cue_rules);

fn cue_rules() -> Result<RuleSet<Option<Regex>>, regex::Error> {
    RuleSet::compile(&[
        (
            "first",
            r"(?i)\b(?:first|1st)\b,?\s*",
            Some(Regex::new(r"(?i)\b(?:second|then|next)\b")?),
        ),
        (
            "second",
            r"(?i)\b(?:second|2nd|then|next)\b,?\s*",
            Some(Regex::new(r"(?i)\b(?:third|then|next|finally)\b")?),
        ),
        (
            "third",
            r"(?i)\b(?:third|3rd|then|next)\b,?\s*",
            Some(Regex::new(r"(?i)\b(?:fourth|then|next|finally)\b")?),
        ),
        ("last", r"(?i)\b(?:finally|lastly|last)\b,?\s*", None),
    ])
}

static CLAUSE_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[(
        "subject_clause",
        r"(?im)^[ \t]*(?:the[ \t]+)?(?:user|system|process|we)[ \t]+([a-z][\w \t]*?)[.!]?[ \t]*$",
        (),
    )])
});

static DECISION_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        ("if_then", r"(?i)\bif\s+(.+?)\s*(?:\bthen\b|,)", ()),
        (
            "check_whether",
            r"(?i)\b(?:check|verify|determine)\s+(?:if|whether)\s+([^.?\n]+)",
            (),
        ),
        (
            "yes_no",
            r"(?i)([^.?\n]+?)\s*\?\s*(?:yes|no|true|false)\b",
            (),
        ),
        ("when_while", r"(?i)\b(?:when|while)\s+([^.\n]+)", ()),
    ])
});

static TITLE_RULES: StaticRules<()> = LazyLock::new(|| {
    RuleSet::compile(&[
        (
            "labelled",
            r"(?i)\b(?:process|workflow|procedure):\s*([^\n]+)",
            (),
        ),
        (
            "leading_noun",
            r"(?i)^([^.:\n]+?)\s+(?:process|workflow|procedure)\b",
            (),
        ),
        ("how_to", r"(?i)\b(?:how to|steps to)\s+([^.\n]+)", ()),
    ])
});

/// Shortest cue step kept, in characters (exclusive)
const MIN_CUE_STEP: usize = 3;
/// Clause step bounds (exclusive)
const CLAUSE_STEP_BOUNDS: (usize, usize) = (5, 100);
/// Decision question bounds (exclusive)
const QUESTION_BOUNDS: (usize, usize) = (5, 80);

fn within(text: &str, (lo, hi): (usize, usize)) -> bool {
    let len = text.chars().count();
    len > lo && len < hi
}

/// Byte offset of the first newline at or after `from`, or the text length
fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map_or(text.len(), |i| from + i)
}

/// Flowchart extractor
pub struct FlowchartExtractor {
    limits: ExtractionLimits,
}

impl FlowchartExtractor {
    pub fn new() -> Self {
        Self::with_limits(ExtractionLimits::default())
    }

    pub fn with_limits(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    /// Process steps, from the first strategy that finds any
    pub fn extract_steps(&self, text: &str) -> Result<Vec<String>> {
        let mut steps = self.numbered_steps(text)?;
        if steps.is_empty() {
            steps = self.cue_steps(text)?;
        }
        if steps.is_empty() {
            steps = self.clause_steps(text)?;
        }
        steps.truncate(self.limits.max_steps);
        Ok(steps)
    }

    /// `1. text` / `2) text`: each step runs to the next marker or line end
    fn numbered_steps(&self, text: &str) -> Result<Vec<String>> {
        let marker = compiled(&NUMBER_MARKER, "number marker")?;
        let markers: Vec<_> = marker.find_iter(text).collect();

        let mut steps = Vec::new();
        for (i, m) in markers.iter().enumerate() {
            let next = markers.get(i + 1).map_or(text.len(), |n| n.start());
            let end = line_end(text, m.end()).min(next);
            let step = text[m.end()..end].trim();
            if !step.is_empty() {
                steps.push(step.to_string());
            }
        }
        Ok(steps)
    }

    /// Ordinal cues ("first", "then", "finally"), deduplicated
    fn cue_steps(&self, text: &str) -> Result<Vec<String>> {
        let rules = load(&CUE_RULES, "cue")?;
        let mut steps: Vec<String> = Vec::new();

        for rule in rules.rules() {
            let mut pos = 0;
            while let Some(cue) = rule.pattern.find_at(text, pos) {
                let mut end = line_end(text, cue.end());
                if let Some(stop) = &rule.payload {
                    if let Some(found) = stop.find_at(text, cue.end()) {
                        end = end.min(found.start());
                    }
                }
                let step = text[cue.end()..end].trim().trim_end_matches(',').trim_end();
                if step.chars().count() > MIN_CUE_STEP && !steps.iter().any(|s| s == step) {
                    trace!(rule = rule.name, step, "Found cue step");
                    steps.push(step.to_string());
                }
                pos = end.max(cue.end());
                if pos >= text.len() {
                    break;
                }
            }
        }
        Ok(steps)
    }

    /// Lines opening with user/system/process/we
    fn clause_steps(&self, text: &str) -> Result<Vec<String>> {
        let rules = load(&CLAUSE_RULES, "clause")?;
        Ok(rules
            .matches(text)
            .filter_map(|(_, caps)| group(&caps, 1))
            .filter(|step| within(step, CLAUSE_STEP_BOUNDS))
            .map(|step| capitalize(&step))
            .collect())
    }

    /// Decision questions in rule order
    pub fn extract_decisions(&self, text: &str) -> Result<Vec<String>> {
        let rules = load(&DECISION_RULES, "decision")?;
        let mut decisions: Vec<String> = Vec::new();
        for (rule, caps) in rules.matches(text) {
            let Some(question) = group(&caps, 1) else {
                continue;
            };
            if within(&question, QUESTION_BOUNDS) && !decisions.contains(&question) {
                trace!(rule = rule.name, question = %question, "Found decision");
                decisions.push(question);
            }
        }
        decisions.truncate(self.limits.max_decisions);
        Ok(decisions)
    }

    pub fn extract_title(&self, text: &str) -> Result<String> {
        let rules = load(&TITLE_RULES, "title")?;
        Ok(rules
            .first_capture(text)
            .map(|t| title_case(&t))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()))
    }
}

impl Default for FlowchartExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for FlowchartExtractor {
    fn extract(&self, description: &str) -> Result<DiagramSpec> {
        let extract_span = span!(Level::INFO, "extract_flowchart", input_len = description.len());
        let _enter = extract_span.enter();

        let steps = self.extract_steps(description)?;
        let decisions = self.extract_decisions(description)?;
        let title = self.extract_title(description)?;

        let mut spec = DiagramSpec::new(DiagramType::Flowchart, title, description);
        spec.add_element(DiagramElement::new(START_ID, "Start", ElementKind::Start))?;

        let mut tail = START_ID.to_string();
        for (i, step) in steps.iter().enumerate() {
            let id = format!("step_{}", i + 1);
            spec.add_element(DiagramElement::new(&id, step, ElementKind::Process))?;
            spec.add_connection(DiagramConnection::new(&tail, &id));
            tail = id;
        }

        // Decisions hang off the tail of the step chain, not off each other
        for (i, question) in decisions.iter().enumerate() {
            let id = format!("decision_{}", i + 1);
            spec.add_element(DiagramElement::new(&id, question, ElementKind::Decision))?;
            spec.add_connection(DiagramConnection::new(&tail, &id));
        }

        spec.add_element(DiagramElement::new(END_ID, "End", ElementKind::End))?;
        spec.add_connection(DiagramConnection::new(&tail, END_ID));

        spec.set_metadata("total_steps", steps.len());
        spec.set_metadata("total_decisions", decisions.len());
        spec.set_metadata("parsed_from", PARSED_FROM_NATURAL_LANGUAGE);

        debug!(
            step_count = steps.len(),
            decision_count = decisions.len(),
            "Flowchart extraction completed"
        );
        Ok(spec)
    }

    fn diagram_type(&self) -> DiagramType {
        DiagramType::Flowchart
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERED: &str = "1. Receive order. 2. Check inventory. 3. Process payment.";

    #[test]
    fn test_numbered_steps() {
        let steps = FlowchartExtractor::new().extract_steps(NUMBERED).unwrap();
        assert_eq!(
            steps,
            vec!["Receive order.", "Check inventory.", "Process payment."]
        );
    }

    #[test]
    fn test_numbered_steps_on_lines() {
        let text = "1) Open the app\n2) Sign in\nthen wait";
        let steps = FlowchartExtractor::new().extract_steps(text).unwrap();
        assert_eq!(steps, vec!["Open the app", "Sign in"]);
    }

    #[test]
    fn test_cue_steps() {
        let text = "First, receive the order, then check inventory, then ship it. \
                    Finally, notify the customer.";
        let steps = FlowchartExtractor::new().extract_steps(text).unwrap();
        assert_eq!(
            steps,
            vec![
                "receive the order",
                "check inventory",
                "ship it.",
                "notify the customer."
            ]
        );
    }

    #[test]
    fn test_clause_steps() {
        let text = "The user opens the form\nSystem validates input.\nWe ok";
        let steps = FlowchartExtractor::new().extract_steps(text).unwrap();
        assert_eq!(steps, vec!["Opens the form", "Validates input"]);
    }

    #[test]
    fn test_step_cap() {
        let text: String = (1..=12).map(|i| format!("{}. Step number {}\n", i, i)).collect();
        let steps = FlowchartExtractor::new().extract_steps(&text).unwrap();
        assert_eq!(steps.len(), 10);
    }

    #[test]
    fn test_decisions() {
        let extractor = FlowchartExtractor::new();
        let text = "If payment succeeds then ship. Check whether stock is available.";
        assert_eq!(
            extractor.extract_decisions(text).unwrap(),
            vec!["payment succeeds", "stock is available"]
        );
        assert!(extractor.extract_decisions(NUMBERED).unwrap().is_empty());
        assert!(extractor.extract_decisions("if ok, go").unwrap().is_empty());
    }

    #[test]
    fn test_yes_no_decision() {
        let decisions = FlowchartExtractor::new()
            .extract_decisions("Ship it. Is the card valid? yes")
            .unwrap();
        assert_eq!(decisions, vec!["Is the card valid"]);
    }

    #[test]
    fn test_decision_cap() {
        let text = "if aaaaaa then x. if bbbbbb then x. if cccccc then x. if dddddd then x.";
        let decisions = FlowchartExtractor::new().extract_decisions(text).unwrap();
        assert_eq!(decisions.len(), 3);
    }

    #[test]
    fn test_titles() {
        let extractor = FlowchartExtractor::new();
        assert_eq!(
            extractor.extract_title("Workflow: order intake\n1. a").unwrap(),
            "Order Intake"
        );
        assert_eq!(
            extractor.extract_title("Refund process for stores").unwrap(),
            "Refund"
        );
        assert_eq!(
            extractor.extract_title("Here is how to bake bread.").unwrap(),
            "Bake Bread"
        );
        assert_eq!(extractor.extract_title(NUMBERED).unwrap(), "Process Flow");
    }

    #[test]
    fn test_extract_builds_chain() {
        let spec = FlowchartExtractor::new().extract(NUMBERED).unwrap();
        let ids: Vec<_> = spec.elements().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "step_1", "step_2", "step_3", "finish"]);
        let edges: Vec<_> = spec
            .connections()
            .iter()
            .map(|c| (c.from.as_str(), c.to.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("start", "step_1"),
                ("step_1", "step_2"),
                ("step_2", "step_3"),
                ("step_3", "finish")
            ]
        );
        assert_eq!(spec.metadata["total_steps"], 3);
        assert_eq!(spec.metadata["total_decisions"], 0);
    }

    #[test]
    fn test_decisions_attach_to_tail() {
        let spec = FlowchartExtractor::new()
            .extract("1. Take payment\n2. If payment succeeds then ship")
            .unwrap();
        let decision = spec.element("decision_1").unwrap();
        assert_eq!(decision.kind, ElementKind::Decision);
        assert!(spec
            .connections()
            .iter()
            .any(|c| c.from == "step_2" && c.to == "decision_1"));
        assert!(spec
            .connections()
            .iter()
            .any(|c| c.from == "step_2" && c.to == "finish"));
    }

    #[test]
    fn test_empty_description() {
        let spec = FlowchartExtractor::new().extract("").unwrap();
        assert_eq!(spec.element_count(), 2);
        assert_eq!(spec.connections()[0].from, "start");
        assert_eq!(spec.connections()[0].to, "finish");
        assert_eq!(spec.title, "Process Flow");
    }
}
