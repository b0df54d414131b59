//! Tag-stream parser (document builder)
//!
//! A single pass over the tag stream that rebuilds the rich document model. The builder is a
//! pushdown automaton: inline spans, list kinds and open tags are stacked, and everything a
//! run looks like is derived from that context when its text arrives.
//!
//! Tables are the one construct handled out of band. When a `<table>` starts, the table
//! sub-builder consumes the whole table from the DOM, and the builder enters a skip region
//! that swallows the table's markup up to the matching `</table>`. The region is a single
//! `{tag, remaining}` slot: `remaining` counts the tables nested inside, whose end tags must
//! not end the region.
//!
//! A few behaviors that are easy to miss:
//! - the current paragraph survives its own end tag; text after `</p>` lands in it
//! - closing a list removes the last matching list kind, not the top of the stack
//! - text outside any paragraph opens an implicit one
//! - `<a href>` text becomes a hyperlink; no other formatting applies to it

use super::dom::prepare;
use super::style::{parse_color, parse_declarations, parse_font_size, parse_margin_px};
use super::table::{build_table, collect_tables, ensure_paragraph, TableSource};
use super::tokens::{tokenize, TagEvent};
use super::Layout;
use crate::error::ConvertError;
use crate::images::ImageResolver;
use crate::ir::nodes::{
    Alignment, Block, Border, Document, Heading, Highlight, Hyperlink, Image, Inches, Inline,
    Paragraph, Rgb, Run, RunFormat,
};
use log::{debug, trace, warn};
use std::collections::HashMap;

type Attributes = HashMap<String, String>;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const LINK_COLOR: Rgb = Rgb(0x00, 0x00, 0xEE);
const MONOSPACE_FONT: &str = "Courier";
const SHADING_FONT_SIZE: u32 = 11;

/// Where the built blocks will live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Root,
    Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    fn from_tag(tag: &str) -> Option<ListKind> {
        match tag {
            "ul" => Some(ListKind::Bullet),
            "ol" => Some(ListKind::Ordered),
            _ => None,
        }
    }

    fn style(&self) -> &'static str {
        match self {
            ListKind::Bullet => "List Bullet",
            ListKind::Ordered => "List Number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SkipRegion {
    tag: String,
    remaining: usize,
}

/// Parse markup into a document. Leading empty paragraphs are dropped.
pub fn parse_markup(
    markup: &str,
    layout: &Layout,
    images: &dyn ImageResolver,
) -> Result<Document, ConvertError> {
    let blocks = build(markup, layout, images, Container::Root)?;
    let mut doc = Document { blocks };
    doc.remove_leading_empty_paragraphs();
    Ok(doc)
}

/// Parse a table cell's markup into the cell's own blocks.
///
/// The result always holds at least one paragraph. Headings become plain paragraphs.
pub fn parse_cell_markup(
    markup: &str,
    layout: &Layout,
    images: &dyn ImageResolver,
) -> Result<Vec<Block>, ConvertError> {
    let mut blocks = build(markup, layout, images, Container::Cell)?;
    ensure_paragraph(&mut blocks);
    Ok(blocks)
}

/// The tag stream the builder consumes for `markup`.
pub fn markup_events(markup: &str) -> Result<Vec<TagEvent>, ConvertError> {
    Ok(tokenize(&prepare(markup)?.markup))
}

fn build(
    markup: &str,
    layout: &Layout,
    images: &dyn ImageResolver,
    container: Container,
) -> Result<Vec<Block>, ConvertError> {
    let prepared = prepare(markup)?;
    let tables = collect_tables(&prepared.document);
    let mut builder = DocumentBuilder::new(layout, images, container, tables);
    for event in tokenize(&prepared.markup) {
        builder.feed(event)?;
    }
    Ok(builder.blocks)
}

struct DocumentBuilder<'a> {
    layout: &'a Layout,
    images: &'a dyn ImageResolver,
    container: Container,
    blocks: Vec<Block>,
    /// Index into `blocks` of the paragraph receiving text
    paragraph: Option<usize>,
    open_tags: HashMap<String, Attributes>,
    spans: Vec<Attributes>,
    lists: Vec<ListKind>,
    blockquote: bool,
    skip: Option<SkipRegion>,
    in_style: bool,
    tables: Vec<TableSource>,
    table_index: usize,
}

impl<'a> DocumentBuilder<'a> {
    fn new(
        layout: &'a Layout,
        images: &'a dyn ImageResolver,
        container: Container,
        tables: Vec<TableSource>,
    ) -> Self {
        DocumentBuilder {
            layout,
            images,
            container,
            blocks: Vec::new(),
            paragraph: None,
            open_tags: HashMap::new(),
            spans: Vec::new(),
            lists: Vec::new(),
            blockquote: false,
            skip: None,
            in_style: false,
            tables,
            table_index: 0,
        }
    }

    fn feed(&mut self, event: TagEvent) -> Result<(), ConvertError> {
        match event {
            TagEvent::Start { name, attrs } => self.start_tag(&name, attrs.into_iter().collect()),
            TagEvent::End { name } => {
                self.end_tag(&name);
                Ok(())
            }
            TagEvent::Text(text) => {
                self.text(&text);
                Ok(())
            }
        }
    }

    fn start_tag(&mut self, tag: &str, attrs: Attributes) -> Result<(), ConvertError> {
        if self.skip.is_some() {
            return Ok(());
        }
        trace!("start <{tag}>");

        match tag {
            "head" => {
                self.skip = Some(SkipRegion {
                    tag: tag.to_string(),
                    remaining: 0,
                });
                return Ok(());
            }
            "body" => return Ok(()),
            "style" => {
                self.in_style = true;
                return Ok(());
            }
            "span" | "mark" => {
                self.spans.push(attrs);
                return Ok(());
            }
            "br" => {
                self.push_inline(Inline::Break);
                return Ok(());
            }
            _ => {}
        }
        if let Some(kind) = ListKind::from_tag(tag) {
            self.lists.push(kind);
            return Ok(());
        }

        if !VOID_TAGS.contains(&tag) {
            self.open_tags.insert(tag.to_string(), attrs.clone());
        }

        match tag {
            "p" | "pre" => {
                let paragraph = self.body_paragraph();
                self.push_paragraph(Block::Paragraph(paragraph));
            }
            "li" => self.start_list_item(),
            "hr" => {
                let rule = Paragraph {
                    border_bottom: Some(Border::default()),
                    ..Default::default()
                };
                self.push_paragraph(Block::Paragraph(rule));
            }
            "img" => {
                self.add_image(&attrs);
                return Ok(());
            }
            "table" => {
                self.add_table()?;
                return Ok(());
            }
            "blockquote" => {
                self.blockquote = true;
                return Ok(());
            }
            _ => {
                if let Some(level) = heading_level(tag) {
                    self.start_heading(level);
                }
            }
        }

        if let Some(style) = attrs.get("style") {
            if let Some(index) = self.paragraph {
                if let Some(paragraph) = self.blocks[index].paragraph_mut() {
                    apply_paragraph_style(paragraph, style, self.layout);
                }
            }
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: &str) {
        if let Some(skip) = &mut self.skip {
            if skip.tag != tag {
                return;
            }
            if skip.remaining > 0 {
                skip.remaining -= 1;
                return;
            }
            self.skip = None;
            self.paragraph = None;
        }
        trace!("end </{tag}>");

        match tag {
            "style" => {
                self.in_style = false;
                return;
            }
            "span" | "mark" => {
                if self.spans.pop().is_some() {
                    return;
                }
            }
            "table" => {
                self.table_index += 1;
                self.paragraph = None;
            }
            "blockquote" => self.blockquote = false,
            _ => {}
        }
        if let Some(kind) = ListKind::from_tag(tag) {
            if let Some(pos) = self.lists.iter().rposition(|open| *open == kind) {
                self.lists.remove(pos);
            }
            if let Some(index) = self.paragraph {
                if let Some(paragraph) = self.blocks[index].paragraph_mut() {
                    paragraph.inlines.push(Inline::Break);
                }
            }
            return;
        }
        self.open_tags.remove(tag);
    }

    fn text(&mut self, data: &str) {
        if self.skip.is_some() || self.in_style {
            return;
        }
        let text = if self.open_tags.contains_key("pre") {
            data.to_string()
        } else {
            normalize_whitespace(data)
        };
        if text.is_empty() || (self.paragraph.is_none() && text.trim().is_empty()) {
            return;
        }

        let href = self
            .open_tags
            .get("a")
            .and_then(|attrs| attrs.get("href"))
            .cloned();
        let inline = match href {
            Some(target) => Inline::Hyperlink(Hyperlink {
                target,
                text,
                format: RunFormat {
                    color: Some(LINK_COLOR),
                    underline: true,
                    ..Default::default()
                },
            }),
            None => Inline::Run(Run::new(text, self.run_format())),
        };
        self.push_inline(inline);
    }

    fn run_format(&self) -> RunFormat {
        let mut format = RunFormat::default();
        for tag in self.open_tags.keys() {
            match tag.as_str() {
                "b" | "strong" | "th" => format.bold = true,
                "em" | "i" => format.italic = true,
                "u" => format.underline = true,
                "s" => format.strike = true,
                "sup" => format.superscript = true,
                "sub" => format.subscript = true,
                _ => {}
            }
            if tag == "code" || tag == "pre" {
                format.font = Some(MONOSPACE_FONT.to_string());
            }
            if tag == "code" {
                format.highlight = Some(Highlight::Gray25);
            }
        }
        for span in &self.spans {
            if let Some(style) = span.get("style") {
                apply_run_style(&mut format, style);
            }
        }
        format
    }

    /// Append to the active paragraph, opening an implicit one when none is active.
    fn push_inline(&mut self, inline: Inline) {
        let active = self
            .paragraph
            .and_then(|index| self.blocks.get_mut(index))
            .and_then(Block::paragraph_mut);
        if let Some(paragraph) = active {
            paragraph.inlines.push(inline);
            return;
        }
        let mut paragraph = self.body_paragraph();
        paragraph.inlines.push(inline);
        self.push_paragraph(Block::Paragraph(paragraph));
    }

    fn push_paragraph(&mut self, block: Block) {
        self.paragraph = Some(self.blocks.len());
        self.blocks.push(block);
    }

    fn body_paragraph(&self) -> Paragraph {
        let mut paragraph = Paragraph::with_style(self.layout.paragraph_style.clone());
        if self.blockquote {
            paragraph.left_indent = Some(Inches(self.layout.blockquote_indent));
            paragraph.line_spacing = Some(1.0);
        }
        paragraph
    }

    fn start_list_item(&mut self) {
        let depth = self.lists.len();
        let kind = self.lists.last().copied().unwrap_or(ListKind::Bullet);
        let indent = (depth as f32 * self.layout.list_indent).min(self.layout.max_indent);
        let paragraph = Paragraph {
            style: Some(kind.style().to_string()),
            left_indent: Some(Inches(indent)),
            line_spacing: Some(1.0),
            ..Default::default()
        };
        self.push_paragraph(Block::Paragraph(paragraph));
    }

    fn start_heading(&mut self, level: u8) {
        let block = match self.container {
            Container::Root => Block::Heading(Heading {
                level,
                paragraph: Paragraph::default(),
            }),
            Container::Cell => Block::Paragraph(Paragraph::default()),
        };
        self.push_paragraph(block);
    }

    fn add_image(&mut self, attrs: &Attributes) {
        let src = attrs.get("src").map(String::as_str).unwrap_or_default();
        let located = Some(src)
            .filter(|src| !src.is_empty())
            .and_then(|src| self.images.locate(src));
        match located {
            Some(source) => self.blocks.push(Block::Image(Image { source })),
            None => debug!("image '{src}' not located, omitted"),
        }
    }

    fn add_table(&mut self) -> Result<(), ConvertError> {
        let nested = match self.tables.get(self.table_index) {
            Some(source) => {
                let table = build_table(source, self.layout, self.images)?;
                self.blocks.push(Block::Table(table));
                source.nested
            }
            None => {
                warn!("no parsed table #{} for <table> tag", self.table_index);
                0
            }
        };
        self.skip = Some(SkipRegion {
            tag: "table".to_string(),
            remaining: nested,
        });
        Ok(())
    }
}

/// `h<n>` to its level, clamped to 9. The number must start with 1-9.
fn heading_level(tag: &str) -> Option<u8> {
    let digits = tag.strip_prefix('h')?;
    if !digits.starts_with(|c: char| ('1'..='9').contains(&c))
        || !digits.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    let level = digits.parse::<u32>().map_or(9, |n| n.min(9));
    Some(level as u8)
}

/// Strip newline-bounded leading/trailing whitespace, then collapse whitespace runs.
fn normalize_whitespace(data: &str) -> String {
    let mut text = data;

    let leading = text.len() - text.trim_start().len();
    if let Some(newline) = text[..leading].rfind('\n') {
        text = &text[newline + 1..];
    }
    let body_end = text.trim_end().len();
    if let Some(newline) = text[body_end..].find('\n') {
        text = &text[..body_end + newline];
    }

    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn apply_paragraph_style(paragraph: &mut Paragraph, style: &str, layout: &Layout) {
    let declarations = parse_declarations(style);
    if let Some(alignment) = declarations
        .get("text-align")
        .and_then(|value| Alignment::from_css(value))
    {
        paragraph.alignment = alignment;
    }
    if let Some(px) = declarations
        .get("margin-left")
        .and_then(|value| parse_margin_px(value))
    {
        let indent = ((px / 10) as f32 * layout.indent_step).min(layout.max_indent);
        paragraph.left_indent = Some(Inches(indent));
    }
}

fn apply_run_style(format: &mut RunFormat, style: &str) {
    let declarations = parse_declarations(style);
    if let Some(color) = declarations.get("color") {
        format.color = Some(parse_color(color));
    }
    if let Some(size) = declarations
        .get("font-size")
        .and_then(|value| parse_font_size(value))
    {
        format.size = Some(size);
    }
    if let Some(background) = declarations.get("background-color") {
        format.shading = Some(parse_color(background));
        format.size.get_or_insert(SHADING_FONT_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::NoImages;

    fn parse(markup: &str) -> Document {
        parse_markup(markup, &Layout::default(), &NoImages).unwrap()
    }

    fn paragraphs(doc: &Document) -> Vec<&Paragraph> {
        doc.blocks.iter().filter_map(Block::paragraph).collect()
    }

    #[test]
    fn test_whitespace_normalization() {
        assert_eq!(normalize_whitespace("  \n  hello   world \n  "), " hello world ");
        assert_eq!(normalize_whitespace("\nhello\n"), "hello");
        assert_eq!(normalize_whitespace("  hello  "), " hello ");
        assert_eq!(normalize_whitespace("a\n\nb"), "a b");
        assert_eq!(normalize_whitespace("\n\n"), "");
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h9"), Some(9));
        assert_eq!(heading_level("h12"), Some(9));
        assert_eq!(heading_level("h0"), None);
        assert_eq!(heading_level("h1x"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("head"), None);
    }

    #[test]
    fn test_bold_paragraph() {
        let doc = parse(r#"<p style="text-align: left"><span><strong>Hi</strong></span></p>"#);
        assert_eq!(doc.blocks.len(), 1);
        let paragraph = doc.blocks[0].paragraph().unwrap();
        let runs: Vec<&Run> = paragraph.runs().collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "Hi");
        assert!(runs[0].format.bold);
        assert_eq!(paragraph.alignment, Alignment::Left);
    }

    #[test]
    fn test_alignment_and_margin() {
        let doc = parse(concat!(
            r#"<p style="text-align: center">c</p>"#,
            r#"<p style="text-align: middle">m</p>"#,
            r#"<p style="margin-left: 45px">i</p>"#,
            r#"<p style="margin-left: 900px">cap</p>"#
        ));
        let paras = paragraphs(&doc);
        assert_eq!(paras[0].alignment, Alignment::Center);
        assert_eq!(paras[1].alignment, Alignment::Left);
        assert_eq!(paras[2].left_indent, Some(Inches(1.0)));
        assert_eq!(paras[3].left_indent, Some(Inches(5.5)));
    }

    #[test]
    fn test_list_indent_by_depth() {
        let doc = parse(concat!(
            "<ul><li>one<ol><li>two",
            "<ul><li>three</li></ul>",
            "</li></ol></li></ul>"
        ));
        let items: Vec<&Paragraph> = paragraphs(&doc)
            .into_iter()
            .filter(|p| p.style.is_some())
            .collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].style.as_deref(), Some("List Bullet"));
        assert_eq!(items[0].left_indent, Some(Inches(0.5)));
        assert_eq!(items[1].style.as_deref(), Some("List Number"));
        assert_eq!(items[1].left_indent, Some(Inches(1.0)));
        assert_eq!(items[2].left_indent, Some(Inches(1.5)));
    }

    #[test]
    fn test_list_indent_is_capped() {
        let markup = format!("{}<li>deep</li>{}", "<ul>".repeat(20), "</ul>".repeat(20));
        let doc = parse(&markup);
        let item = paragraphs(&doc)[0];
        assert_eq!(item.left_indent, Some(Inches(5.5)));
    }

    #[test]
    fn test_list_end_appends_break() {
        let doc = parse("<ul><li>a</li></ul>");
        let item = paragraphs(&doc)[0];
        assert_eq!(item.inlines.last(), Some(&Inline::Break));
    }

    #[test]
    fn test_list_end_removes_last_matching_kind() {
        let layout = Layout::default();
        let mut builder = DocumentBuilder::new(&layout, &NoImages, Container::Root, Vec::new());
        let events = [
            TagEvent::start("ul", &[]),
            TagEvent::start("ol", &[]),
            TagEvent::start("ul", &[]),
            TagEvent::start("li", &[]),
            TagEvent::text("a"),
            TagEvent::end("li"),
            // Removes the ordered list under the innermost bullet list.
            TagEvent::end("ol"),
            TagEvent::start("li", &[]),
            TagEvent::text("b"),
            TagEvent::end("li"),
        ];
        for event in events {
            builder.feed(event).unwrap();
        }
        assert_eq!(builder.lists, vec![ListKind::Bullet, ListKind::Bullet]);

        let items: Vec<&Paragraph> = builder.blocks.iter().filter_map(Block::paragraph).collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].style.as_deref(), Some("List Bullet"));
        assert_eq!(items[0].left_indent, Some(Inches(1.5)));
        assert_eq!(items[0].inlines.last(), Some(&Inline::Break));
        assert_eq!(items[1].style.as_deref(), Some("List Bullet"));
        assert_eq!(items[1].left_indent, Some(Inches(1.0)));
        assert_eq!(items[1].text(), "b");
    }

    #[test]
    fn test_deep_nesting_parses() {
        let depth = 20_000;
        let markup = format!(
            "{}<p>deep</p><table><tr><td>cell</td></tr></table>{}",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let doc = parse(&markup);
        assert_eq!(doc.texts(), vec!["deep", "cell"]);
        assert!(matches!(doc.blocks[1], Block::Table(_)));
    }

    #[test]
    fn test_inline_formatting() {
        let doc = parse(concat!(
            "<p><em>i</em><u>u</u><s>s</s><sup>p</sup><sub>b</sub>",
            "<code>c</code></p><pre>  keep   spaces</pre>"
        ));
        let paras = paragraphs(&doc);
        let runs: Vec<&Run> = paras[0].runs().collect();
        assert!(runs[0].format.italic);
        assert!(runs[1].format.underline);
        assert!(runs[2].format.strike);
        assert!(runs[3].format.superscript);
        assert!(runs[4].format.subscript);
        assert_eq!(runs[5].format.font.as_deref(), Some("Courier"));
        assert_eq!(runs[5].format.highlight, Some(Highlight::Gray25));

        let pre: Vec<&Run> = paras[1].runs().collect();
        assert_eq!(pre[0].text, "  keep   spaces");
        assert_eq!(pre[0].format.font.as_deref(), Some("Courier"));
        assert_eq!(pre[0].format.highlight, None);
    }

    #[test]
    fn test_span_styles() {
        let doc = parse(concat!(
            r#"<p><span style="color: #ff0000"><span style="font-size: 1.5em">big red</span></span>"#,
            r#"<mark style="background-color:rgb(255,255,0)">marked</mark></p>"#
        ));
        let runs: Vec<&Run> = paragraphs(&doc)[0].runs().collect();
        assert_eq!(runs[0].format.color, Some(Rgb(255, 0, 0)));
        assert_eq!(runs[0].format.size, Some(18));
        assert_eq!(runs[1].format.shading, Some(Rgb(255, 255, 0)));
        assert_eq!(runs[1].format.size, Some(11));
    }

    #[test]
    fn test_hyperlink() {
        let doc = parse(r#"<p>see <a href="https://example.com"><strong>here</strong></a></p>"#);
        let paragraph = paragraphs(&doc)[0];
        match &paragraph.inlines[1] {
            Inline::Hyperlink(link) => {
                assert_eq!(link.target, "https://example.com");
                assert_eq!(link.text, "here");
                assert!(link.format.underline);
                assert_eq!(link.format.color, Some(Rgb(0, 0, 0xEE)));
                assert!(!link.format.bold);
            }
            other => panic!("expected hyperlink, got {other:?}"),
        }
    }

    #[test]
    fn test_anchor_without_href_is_plain_text() {
        let doc = parse("<p><a>plain</a></p>");
        assert!(matches!(paragraphs(&doc)[0].inlines[0], Inline::Run(_)));
    }

    #[test]
    fn test_blockquote_indent() {
        let doc = parse("<blockquote><p>quoted</p></blockquote><p>after</p>");
        let paras = paragraphs(&doc);
        assert_eq!(paras[0].left_indent, Some(Inches(0.5)));
        assert_eq!(paras[0].line_spacing, Some(1.0));
        assert_eq!(paras[1].left_indent, None);
    }

    #[test]
    fn test_headings_and_rules() {
        let doc = parse("<h2>Title</h2><hr><p>body</p>");
        match &doc.blocks[0] {
            Block::Heading(h) => {
                assert_eq!(h.level, 2);
                assert_eq!(h.paragraph.text(), "Title");
            }
            other => panic!("expected heading, got {other:?}"),
        }
        let rule = doc.blocks[1].paragraph().unwrap();
        assert_eq!(rule.border_bottom, Some(Border { size: 6, space: 1 }));
        assert!(rule.inlines.is_empty());
    }

    #[test]
    fn test_text_after_paragraph_end_joins_it() {
        let doc = parse("<p>a</p>b");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].paragraph().unwrap().text(), "ab");
    }

    #[test]
    fn test_break_opens_implicit_paragraph() {
        let doc = parse("x<br>y");
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].paragraph().unwrap().text(), "x\ny");
    }

    #[test]
    fn test_leading_empty_paragraphs_removed() {
        let doc = parse("<p></p><p></p><p>x</p><p></p>");
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].paragraph().unwrap().text(), "x");
    }

    #[test]
    fn test_head_and_style_are_ignored() {
        let doc = parse(concat!(
            "<!DOCTYPE html><html><style>p { color: red }</style>",
            "<head><title>T</title></head><body><p>x</p></body></html>"
        ));
        assert_eq!(doc.texts(), vec!["x"]);
    }

    #[test]
    fn test_tables_are_not_flattened() {
        let doc = parse(concat!(
            "<p>before</p>",
            "<table><tr><td>a<table><tr><td>n</td></tr></table></td><td>b</td></tr></table>",
            "<p>after</p>"
        ));
        assert_eq!(doc.blocks.len(), 3);
        let Block::Table(table) = &doc.blocks[1] else {
            panic!("expected table");
        };
        assert_eq!((table.rows, table.cols), (1, 2));
        assert_eq!(doc.texts(), vec!["before", "a", "n", "b", "after"]);
    }

    #[test]
    fn test_heading_in_cell_is_plain() {
        let blocks = parse_cell_markup("<h1>t</h1>", &Layout::default(), &NoImages).unwrap();
        assert!(matches!(blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_empty_cell_gets_paragraph() {
        let blocks = parse_cell_markup("", &Layout::default(), &NoImages).unwrap();
        assert_eq!(blocks, vec![Block::Paragraph(Paragraph::default())]);
    }

    #[test]
    fn test_images() {
        struct Accept;
        impl ImageResolver for Accept {
            fn resolve(
                &self,
                _attrs: &serde_json::Map<String, serde_json::Value>,
                _request: &crate::images::ImageRequest<'_>,
            ) -> Option<String> {
                None
            }
        }
        let markup = r#"<p>a</p><img src="pic.png"><p>b</p>"#;
        let doc = parse_markup(markup, &Layout::default(), &Accept).unwrap();
        assert_eq!(
            doc.blocks[1],
            Block::Image(Image {
                source: "pic.png".into()
            })
        );

        let doc = parse(markup);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.texts(), vec!["a", "b"]);
    }
}
