//! Property-based tests for text preservation
//!
//! Every text node of a BoxNote paragraph must come back as exactly one run with the same
//! text after the trip through markup, whatever characters it holds and whatever inline
//! mark wraps it.

use boxnote_babel::ir::nodes::Block;
use boxnote_babel::{convert, ConvertOptions, Layout, NoImages};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Single-spaced words, including characters markup has to escape
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9&<>\"'.!?;:-]{1,12}( [a-zA-Z0-9&<>\"'.!?;:-]{1,12}){0,3}"
}

fn mark_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("strong")),
        Just(Some("em")),
        Just(Some("underline")),
    ]
}

fn paragraph(text: &str, mark: Option<&str>) -> Value {
    let marks: Vec<Value> = mark.iter().map(|kind| json!({"type": kind})).collect();
    json!({
        "type": "paragraph",
        "content": [{"type": "text", "text": text, "marks": marks}]
    })
}

#[test]
fn test_outer_spaces_and_newlines_in_text() {
    let content = vec![
        paragraph(" two  spaces\n and more ", None),
        paragraph("\n  after newline\n", Some("strong")),
    ];
    let source = json!({"doc": {"content": content}}).to_string();

    let doc = convert(&source, &ConvertOptions::new("spaces"), &Layout::default(), &NoImages)
        .unwrap();

    // Newline-bounded edges go, spaces before the first character survive as one space.
    assert_eq!(doc.texts(), vec![" two spaces and more ", " after newline"]);
}

proptest! {
    #[test]
    fn text_survives_the_round_trip(
        paragraphs in prop::collection::vec((text_strategy(), mark_strategy()), 1..6)
    ) {
        let content: Vec<Value> = paragraphs
            .iter()
            .map(|(text, mark)| paragraph(text, *mark))
            .collect();
        let source = json!({"doc": {"content": content}}).to_string();

        let doc = convert(&source, &ConvertOptions::new("prop"), &Layout::default(), &NoImages)
            .unwrap();

        let expected: Vec<String> = paragraphs.iter().map(|(text, _)| text.clone()).collect();
        prop_assert_eq!(doc.texts(), expected);
        prop_assert_eq!(doc.blocks.len(), paragraphs.len());

        for (block, (_, mark)) in doc.blocks.iter().zip(&paragraphs) {
            let run = match block {
                Block::Paragraph(p) => p.runs().next().cloned(),
                _ => None,
            };
            prop_assert!(run.is_some());
            let format = run.map(|run| run.format).unwrap_or_default();
            prop_assert_eq!(format.bold, *mark == Some("strong"));
            prop_assert_eq!(format.italic, *mark == Some("em"));
            prop_assert_eq!(format.underline, *mark == Some("underline"));
        }
    }
}
