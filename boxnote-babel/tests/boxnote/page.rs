use crate::common::fixture;
use boxnote_babel::formats::boxnote::{to_fragments, ConvertOptions};
use boxnote_babel::{boxnote_to_html, ConvertError, NoImages};

#[test]
fn test_meeting_fragments() {
    let fragments =
        to_fragments(&fixture("meeting.boxnote"), &ConvertOptions::new("Weekly"), &NoImages)
            .expect("fixture should walk");

    // Nothing empty is ever recorded; the empty paragraph is elided entirely.
    assert!(fragments.iter().all(|fragment| !fragment.is_empty()));

    insta::assert_snapshot!(fragments.concat(), @r###"<h1><span>Weekly sync</span></h1><p style="text-align: left"><span>Owner: </span><span><strong>Dana</strong></span></p><p style="text-align: center"><span>Agenda</span></p><ul><li><span>Budget</span></li><li><span>Hiring</span></li></ul><ul style="list-style-type:none"><li><input type="checkbox" checked>[X] <span>Send notes</span></li></ul><table><tr><td colspan="1" rowspan="1" colwidth=""><span>Q1</span></td><td colspan="1" rowspan="1" colwidth=""><span>Q2</span></td></tr></table><hr><p style="text-align: left"><span>See </span><span><a href="https://example.com">docs</a></span></p>"###);
}

#[test]
fn test_page_is_wrapped_and_titled() {
    let html = boxnote_to_html(
        &fixture("meeting.boxnote"),
        &ConvertOptions::new("Q3 <planning>"),
        &NoImages,
    )
    .unwrap();

    assert!(html.starts_with("<!DOCTYPE html><html><style type=\"text/css\">\n"));
    assert!(html.contains("<title>Q3 &lt;planning&gt;</title></head><body><h1>"));
    assert!(html.ends_with("</a></span></p></body></html>"));
}

#[test]
fn test_missing_type_reports_path() {
    let err = boxnote_to_html(
        &fixture("missing_type.boxnote"),
        &ConvertOptions::new("Broken"),
        &NoImages,
    )
    .unwrap_err();

    assert!(matches!(err, ConvertError::MalformedDocument(_)));
    assert_eq!(
        err.to_string(),
        "Invalid BoxNote content: doc.content[1].content[0]: no type field"
    );
}

#[test]
fn test_check_list_item_without_checked_is_fatal() {
    let source = r#"{"doc": {"content": [
        {"type": "paragraph", "content": [{"type": "text", "text": "before"}]},
        {"type": "check_list", "content": [{"type": "check_list_item", "content": []}]}
    ]}}"#;
    let err = boxnote_to_html(source, &ConvertOptions::new("t"), &NoImages).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid BoxNote content: doc.content[1].content[0]: check_list_item without attrs.checked"
    );
}

#[test]
fn test_non_json_input() {
    let err = boxnote_to_html("{not json", &ConvertOptions::new("t"), &NoImages).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidJson(_)));
}
