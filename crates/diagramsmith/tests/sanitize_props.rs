//! Property tests for label sanitizing

use diagramsmith::core::{python_identifier, python_string, sanitize_label};
use proptest::prelude::*;

fn check_label_is_single_line(label: &str, pipe_wrapped: bool) -> Result<(), TestCaseError> {
    let clean = sanitize_label(label, pipe_wrapped);
    prop_assert!(!clean.contains('"'));
    prop_assert!(!clean.contains('\n'));
    prop_assert!(!clean.contains('\r'));
    prop_assert!(!clean.contains("  "));
    prop_assert_eq!(clean.trim(), clean.as_str());
    if pipe_wrapped {
        prop_assert!(!clean.contains('|'));
    }
    Ok(())
}

/// Free text mixed with the characters the notations choke on
fn label() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "(?s).{0,8}",
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\"".to_string()),
            Just("|".to_string()),
            Just("  ".to_string()),
        ],
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn sanitized_labels_are_single_line(label in label(), pipe_wrapped in any::<bool>()) {
        check_label_is_single_line(&label, pipe_wrapped)?;
    }

    #[test]
    fn sanitizing_is_idempotent(label in label(), pipe_wrapped in any::<bool>()) {
        let once = sanitize_label(&label, pipe_wrapped);
        prop_assert_eq!(sanitize_label(&once, pipe_wrapped), once);
    }

    #[test]
    fn multi_line_labels_collapse(lines in prop::collection::vec("[a-z]{1,6}", 2..5)) {
        let clean = sanitize_label(&lines.join("\r\n"), false);
        prop_assert_eq!(clean, lines.join(" "));
    }

    #[test]
    fn plain_words_pass_through(words in prop::collection::vec("[a-zA-Z0-9]{1,8}", 0..6)) {
        let label = words.join(" ");
        prop_assert_eq!(sanitize_label(&label, true), label);
    }

    #[test]
    fn python_strings_never_end_in_a_lone_backslash(label in "(?s).{0,32}") {
        let body = python_string(&label);
        let trailing = body.chars().rev().take_while(|c| *c == '\\').count();
        prop_assert_eq!(trailing % 2, 0);
        prop_assert!(!body.contains('"'));
    }

    #[test]
    fn python_identifiers_are_valid(id in "[a-z0-9_ -]{0,16}") {
        let ident = python_identifier(&id);
        prop_assert!(!ident.is_empty());
        prop_assert!(ident.chars().all(|c| c.is_alphanumeric() || c == '_'));
        prop_assert!(!ident.starts_with(|c: char| c.is_ascii_digit()));
    }
}
