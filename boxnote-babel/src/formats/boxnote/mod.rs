//! BoxNote input format
//!
//! A BoxNote file is a JSON object whose `doc.content` holds a ProseMirror-style node tree:
//!
//! ```json
//! {"doc": {"content": [
//!     {"type": "paragraph", "content": [
//!         {"type": "text", "text": "Hi", "marks": [{"type": "strong"}]}
//!     ]}
//! ]}}
//! ```
//!
//! Conversion happens in three steps:
//! 1. decode the JSON and check for `doc` and `content` ([`parse_boxnote`])
//! 2. validate the tree into [`Node`]s ([`nodes`])
//! 3. walk it into markup fragments ([`walker`]) and wrap them in a full page ([`to_html`])
//!
//! Every structural error is raised before the first fragment is produced.

pub mod nodes;
pub mod walker;

use crate::error::ConvertError;
use crate::formats::html::tags::{base_stylesheet, escape_html};
use crate::images::{Credentials, ImageRequest, ImageResolver};
pub use nodes::{Attrs, Mark, Node};
use serde_json::Value;
use std::path::PathBuf;
pub use walker::Walker;

/// Per-document parameters of a BoxNote conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Page title; also names the image directory
    pub title: String,
    pub workdir: PathBuf,
    pub credentials: Credentials,
}

impl ConvertOptions {
    pub fn new(title: impl Into<String>) -> Self {
        ConvertOptions {
            title: title.into(),
            ..Default::default()
        }
    }

    fn request(&self) -> ImageRequest<'_> {
        ImageRequest {
            title: &self.title,
            workdir: &self.workdir,
            credentials: &self.credentials,
        }
    }
}

/// Decode a BoxNote document into its top-level nodes.
pub fn parse_boxnote(source: &str) -> Result<Vec<Node>, ConvertError> {
    let root: Value = serde_json::from_str(source)?;
    let doc = root
        .get("doc")
        .ok_or_else(|| ConvertError::MalformedDocument("no doc field".into()))?;
    let content = doc
        .get("content")
        .ok_or_else(|| ConvertError::MalformedDocument("no content field".into()))?;
    nodes::collect_nodes(content, "doc.content")
}

/// Walk a BoxNote document into its ordered body fragments.
pub fn to_fragments(
    source: &str,
    options: &ConvertOptions,
    images: &dyn ImageResolver,
) -> Result<Vec<String>, ConvertError> {
    let nodes = parse_boxnote(source)?;
    let mut walker = Walker::new(images, options.request());
    walker.walk(&nodes, false)?;
    Ok(walker.into_fragments())
}

/// Convert a BoxNote document into a complete HTML page.
pub fn to_html(
    source: &str,
    options: &ConvertOptions,
    images: &dyn ImageResolver,
) -> Result<String, ConvertError> {
    let fragments = to_fragments(source, options, images)?;
    let mut html = preamble(&options.title);
    for fragment in &fragments {
        html.push_str(fragment);
    }
    html.push_str(POSTAMBLE);
    Ok(html)
}

const POSTAMBLE: &str = "</body></html>";

fn preamble(title: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html>",
            "<style type=\"text/css\">\n{css}</style>",
            "<head><meta charset=\"UTF-8\"><title>{title}</title></head>",
            "<body>"
        ),
        css = base_stylesheet(),
        title = escape_html(title)
    )
}
