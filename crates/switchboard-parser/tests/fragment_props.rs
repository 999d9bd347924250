// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for fragment splitting and classification.

use proptest::prelude::*;
use serde_json::json;
use switchboard_parser::{classify_fragment, split_fragments, Outcome};

/// One piece of a generated reply: a serialized JSON object or a text line.
#[derive(Debug, Clone)]
enum Piece {
    Object(String),
    Line(String),
}

fn object_piece() -> impl Strategy<Value = Piece> {
    (
        prop_oneof![Just("direct"), Just("transfer"), Just("to_human_agent"), Just("other")],
        // Braces, quotes, backslashes and newlines inside values must not split.
        "[a-z{}\"\\\\\n ]{0,16}",
        proptest::option::of("[a-z{} ]{0,8}"),
    )
        .prop_map(|(action, response, summary)| {
            let mut value = json!({ "action": action, "response": response });
            if let Some(summary) = summary {
                value["summary"] = json!(summary);
            }
            Piece::Object(value.to_string())
        })
}

fn line_piece() -> impl Strategy<Value = Piece> {
    "[a-zA-Z0-9 .,!?]{0,24}".prop_map(Piece::Line)
}

fn reply() -> impl Strategy<Value = Vec<Piece>> {
    prop::collection::vec(prop_oneof![object_piece(), line_piece()], 0..8)
}

/// Join pieces the way the backend does: objects may be glued together,
/// text lines always sit on their own line.
fn render(pieces: &[Piece], glue_objects: bool) -> (String, Vec<String>) {
    let mut raw = String::new();
    let mut expected = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Object(text) => {
                if !glue_objects {
                    raw.push('\n');
                }
                raw.push_str(text);
                expected.push(text.clone());
            }
            Piece::Line(text) => {
                raw.push('\n');
                raw.push_str(text);
                raw.push_str("\r\n");
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    expected.push(trimmed.to_string());
                }
            }
        }
    }
    (raw, expected)
}

proptest! {
    #[test]
    fn objects_and_lines_split_back_into_pieces(pieces in reply(), glue in any::<bool>()) {
        let (raw, expected) = render(&pieces, glue);
        prop_assert_eq!(split_fragments(&raw), expected);
    }

    #[test]
    fn fragments_are_never_blank(raw in "\\PC{0,64}") {
        for fragment in split_fragments(&raw) {
            prop_assert!(!fragment.trim().is_empty());
            prop_assert_eq!(fragment.trim(), fragment.as_str());
        }
    }

    #[test]
    fn object_characters_are_preserved(pieces in reply()) {
        let (raw, _) = render(&pieces, true);
        let joined: String = split_fragments(&raw).concat();
        let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(strip(&joined), strip(&raw));
    }

    #[test]
    fn every_fragment_classifies(raw in "\\PC{0,64}") {
        for fragment in split_fragments(&raw) {
            let first = classify_fragment(&fragment);
            prop_assert!(!first.is_empty());
            prop_assert!(first.len() <= 2);
            prop_assert_eq!(&first, &classify_fragment(&fragment));
            if first.len() == 2 {
                prop_assert!(matches!(first[1], Outcome::TransferSummary(_)));
            }
        }
    }
}
