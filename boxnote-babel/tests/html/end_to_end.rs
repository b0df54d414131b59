use crate::common::fixture;
use boxnote_babel::formats::treeviz::to_treeviz_str;
use boxnote_babel::ir::nodes::{Alignment, Block, Inches, Inline};
use boxnote_babel::{convert, ConvertOptions, FsImageResolver, Layout, NoImages};
use std::fs;

#[test]
fn test_meeting_document_structure() {
    let doc = convert(
        &fixture("meeting.boxnote"),
        &ConvertOptions::new("Weekly"),
        &Layout::default(),
        &NoImages,
    )
    .expect("fixture should convert");

    assert_eq!(doc.blocks.len(), 9);

    match &doc.blocks[0] {
        Block::Heading(heading) => {
            assert_eq!(heading.level, 1);
            assert_eq!(heading.paragraph.text(), "Weekly sync");
        }
        other => panic!("expected heading, got {other:?}"),
    }

    let owner = doc.blocks[1].paragraph().unwrap();
    let runs: Vec<_> = owner.runs().collect();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Owner: ");
    assert!(!runs[0].format.bold);
    assert_eq!(runs[1].text, "Dana");
    assert!(runs[1].format.bold);

    let agenda = doc.blocks[2].paragraph().unwrap();
    assert_eq!(agenda.alignment, Alignment::Center);

    let budget = doc.blocks[3].paragraph().unwrap();
    assert_eq!(budget.style.as_deref(), Some("List Bullet"));
    assert_eq!(budget.left_indent, Some(Inches(0.5)));
    assert_eq!(budget.text(), "Budget");

    // Closing a list breaks its last item.
    let hiring = doc.blocks[4].paragraph().unwrap();
    assert_eq!(hiring.inlines.last(), Some(&Inline::Break));

    let task = doc.blocks[5].paragraph().unwrap();
    assert_eq!(task.text(), "[X] Send notes\n");

    match &doc.blocks[6] {
        Block::Table(table) => {
            assert_eq!((table.rows, table.cols), (1, 2));
            let q2 = table.cell(0, 1).unwrap().blocks[0].paragraph().unwrap();
            assert_eq!(q2.text(), "Q2");
        }
        other => panic!("expected table, got {other:?}"),
    }

    let rule = doc.blocks[7].paragraph().unwrap();
    assert!(rule.border_bottom.is_some());
    assert!(!rule.is_empty());

    let link = doc.blocks[8].paragraph().unwrap();
    match &link.inlines[1] {
        Inline::Hyperlink(hyperlink) => {
            assert_eq!(hyperlink.target, "https://example.com");
            assert_eq!(hyperlink.text, "docs");
            assert!(hyperlink.format.underline);
        }
        other => panic!("expected hyperlink, got {other:?}"),
    }
}

#[test]
fn test_meeting_texts_survive_in_order() {
    let doc = convert(
        &fixture("meeting.boxnote"),
        &ConvertOptions::new("Weekly"),
        &Layout::default(),
        &NoImages,
    )
    .unwrap();

    assert_eq!(
        doc.texts(),
        vec![
            "Weekly sync",
            "Owner: ",
            "Dana",
            "Agenda",
            "Budget",
            "Hiring",
            "[X] ",
            "Send notes",
            "Q1",
            "Q2",
            "See ",
            "docs",
        ]
    );
}

#[test]
fn test_meeting_tree() {
    let doc = convert(
        &fixture("meeting.boxnote"),
        &ConvertOptions::new("Weekly"),
        &Layout::default(),
        &NoImages,
    )
    .unwrap();

    insta::assert_snapshot!(to_treeviz_str(&doc), @r###"
    ⧉ Document (9 blocks)
    ├─ § h1 Weekly sync
    │ └─ ◦ Weekly sync
    ├─ ¶ Owner: Dana
    │ ├─ ◦ Owner:
    │ └─ ◦ Dana
    ├─ ¶ Agenda
    │ └─ ◦ Agenda
    ├─ ¶ [List Bullet] Budget
    │ └─ ◦ Budget
    ├─ ¶ [List Bullet] Hiring
    │ ├─ ◦ Hiring
    │ └─ ↵ break
    ├─ ¶ [List Bullet] [X] Send notes
    │ ├─ ◦ [X]
    │ ├─ ◦ Send notes
    │ └─ ↵ break
    ├─ ☰ 1x2 table
    │ ├─ ▫ (0,0)
    │ │ └─ ¶ Q1
    │ │   └─ ◦ Q1
    │ └─ ▫ (0,1)
    │   └─ ¶ Q2
    │     └─ ◦ Q2
    ├─ ¶ (rule)
    └─ ¶ See docs
      ├─ ◦ See
      └─ ⊕ docs → https://example.com
    "###);
}

#[test]
fn test_images_resolve_against_the_workdir() {
    let workdir = tempfile::tempdir().unwrap();
    let image_dir = workdir.path().join("Box Notes Images").join("Report Images");
    fs::create_dir_all(&image_dir).unwrap();
    fs::write(image_dir.join("chart.png"), b"png").unwrap();

    let mut options = ConvertOptions::new("Report");
    options.workdir = workdir.path().to_path_buf();
    let resolver = FsImageResolver::new(workdir.path());

    let doc = convert(
        &fixture("image.boxnote"),
        &options,
        &Layout::default(),
        &resolver,
    )
    .unwrap();

    // The missing image is omitted without failing the conversion.
    assert_eq!(doc.blocks.len(), 2);
    assert_eq!(doc.blocks[0].paragraph().unwrap().text(), "Diagram:");
    match &doc.blocks[1] {
        Block::Image(image) => {
            let expected = image_dir.join("chart.png");
            assert_eq!(image.source, expected.to_string_lossy());
        }
        other => panic!("expected image, got {other:?}"),
    }
}
