//! AST walker
//!
//! Depth-first descent over validated BoxNote nodes, appending markup fragments from the tag
//! mapping table. Inline marks follow the stacking rule: opens in source order, the escaped
//! text, closes in reverse order, so the output is well nested whatever the mark order.
//!
//! Block kinds that supply their own block semantics (list items, cells, checklist items,
//! callout boxes) walk their children with `ignore_paragraph` set: a paragraph directly inside
//! them contributes its inline content but no `<p>` wrapper.

use super::nodes::{Attrs, Node};
use crate::error::ConvertError;
use crate::formats::html::tags::{close_tag, escape_html, open_tag};
use crate::images::{ImageRequest, ImageResolver};
use log::{debug, trace};
use serde_json::Value;

/// Kinds rendered as open template, children, close template.
const WRAPPING_KINDS: &[&str] = &[
    "strong",
    "em",
    "underline",
    "strikethrough",
    "ordered_list",
    "bullet_list",
    "blockquote",
    "code_block",
    "check_list",
    "table",
    "table_row",
    "heading",
    "link",
    "font_size",
    "font_color",
    "horizontal_rule",
];

/// Kinds whose attrs feed their template and whose children skip paragraph wrappers.
const BLOCK_OWNER_KINDS: &[&str] = &["list_item", "table_cell", "table_header", "call_out_box"];

pub struct Walker<'a> {
    images: &'a dyn ImageResolver,
    request: ImageRequest<'a>,
    fragments: Vec<String>,
}

impl<'a> Walker<'a> {
    pub fn new(images: &'a dyn ImageResolver, request: ImageRequest<'a>) -> Self {
        Walker {
            images,
            request,
            fragments: Vec::new(),
        }
    }

    /// The emitted fragments, in order. Empty renderings are never recorded.
    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    pub fn walk(&mut self, nodes: &[Node], ignore_paragraph: bool) -> Result<(), ConvertError> {
        for node in nodes {
            self.walk_node(node, ignore_paragraph)?;
        }
        Ok(())
    }

    fn push(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    fn walk_node(&mut self, node: &Node, ignore_paragraph: bool) -> Result<(), ConvertError> {
        trace!("walk {} ({})", node.kind, node.path);
        match node.kind.as_str() {
            "paragraph" if ignore_paragraph => self.walk(&node.content, false)?,
            "paragraph" => self.walk_paragraph(node)?,
            "text" => self.walk_text(node),
            "check_list_item" => self.walk_check_list_item(node)?,
            kind if BLOCK_OWNER_KINDS.contains(&kind) => {
                self.push(open_tag(kind, &node.attrs));
                self.walk(&node.content, true)?;
                self.push(close_tag(kind, &node.attrs));
            }
            "image" => match self.images.resolve(&node.attrs, &self.request) {
                Some(src) => {
                    let mut params = Attrs::new();
                    params.insert("src".into(), Value::String(src));
                    self.push(open_tag("image", &params));
                }
                None => debug!("{}: image not resolved, omitted", node.path),
            },
            kind if WRAPPING_KINDS.contains(&kind) => {
                self.push(open_tag(kind, &node.attrs));
                self.walk(&node.content, false)?;
                self.push(close_tag(kind, &node.attrs));
            }
            kind => debug!("{}: unknown node kind '{kind}' skipped", node.path),
        }
        Ok(())
    }

    fn walk_paragraph(&mut self, node: &Node) -> Result<(), ConvertError> {
        let alignment = node
            .mark("alignment")
            .and_then(|mark| mark.attrs.get("alignment"))
            .cloned()
            .unwrap_or_else(|| Value::String("left".into()));
        let is_left = alignment.as_str() == Some("left");

        let mut params = Attrs::new();
        params.insert("alignment".into(), alignment);

        let start = self.fragments.len();
        self.push(open_tag("paragraph", &params));
        let body = self.fragments.len();
        self.walk(&node.content, false)?;

        if is_left && self.fragments.len() == body {
            // Content-less default paragraph
            self.fragments.truncate(start);
            return Ok(());
        }
        self.push(close_tag("paragraph", &params));
        Ok(())
    }

    fn walk_text(&mut self, node: &Node) {
        let no_attrs = Attrs::new();
        self.push(open_tag("text", &no_attrs));
        for mark in &node.marks {
            self.push(open_tag(&mark.kind, &mark.attrs));
        }
        self.push(escape_html(&node.text));
        for mark in node.marks.iter().rev() {
            self.push(close_tag(&mark.kind, &mark.attrs));
        }
        self.push(close_tag("text", &no_attrs));
    }

    fn walk_check_list_item(&mut self, node: &Node) -> Result<(), ConvertError> {
        let checked = node
            .attrs
            .get("checked")
            .map(is_truthy)
            .ok_or_else(|| ConvertError::malformed(&node.path, "check_list_item without attrs.checked"))?;

        let mut params = Attrs::new();
        let (flag, marker) = if checked { (" checked", "X") } else { ("", " ") };
        params.insert("checked".into(), Value::String(flag.into()));
        params.insert("marker".into(), Value::String(marker.into()));

        self.push(open_tag("check_list_item", &params));
        self.walk(&node.content, true)?;
        self.push(close_tag("check_list_item", &params));
        Ok(())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
