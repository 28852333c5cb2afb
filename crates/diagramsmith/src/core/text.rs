//! Shared text utilities for diagram generation
//!
//! Label sanitizing for embedding text in notation syntax, plus the small
//! casing and identifier helpers the extractors and emitters share.

/// Make a label safe to embed in diagram notation.
///
/// Double quotes become single quotes, CR/LF become spaces, whitespace runs
/// collapse to one space and the result is trimmed. With `pipe_wrapped` set,
/// `|` becomes `/` so the label can sit between edge-label pipes.
///
/// # Example
/// ```
/// use diagramsmith::core::sanitize_label;
///
/// assert_eq!(sanitize_label("say \"hi\"\n  now", false), "say 'hi' now");
/// assert_eq!(sanitize_label("yes|no", true), "yes/no");
/// ```
pub fn sanitize_label(label: &str, pipe_wrapped: bool) -> String {
    let replaced: String = label
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '|' if pipe_wrapped => '/',
            '\n' | '\r' => ' ',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Lower-case words joined by underscores
pub fn snake_case(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Turn an element id into a valid Python variable name
pub fn python_identifier(s: &str) -> String {
    let mut ident: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty()
        || ident.starts_with(|c: char| c.is_ascii_digit())
        || PYTHON_KEYWORDS.contains(&ident.as_str())
    {
        ident.insert(0, '_');
    }
    ident
}

/// Body of a double-quoted Python string literal
pub fn python_string(s: &str) -> String {
    sanitize_label(s, false).replace('\\', "\\\\")
}
