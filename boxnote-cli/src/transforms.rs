//! CLI-specific transforms
//!
//! This module defines the conversion targets and the inspect transforms available in the
//! CLI. Both run the same pipeline and differ only in where they stop.
//!
//! ## Pipeline
//!
//! 1. **Walking** - BoxNote JSON → HTML page
//!    - `markup`: the page itself
//!
//! 2. **Tokenizing** - HTML → tag stream
//!    - `events`: one start/end/text event per line
//!
//! 3. **Building** - tag stream → rich document model
//!    - `model-json`: JSON representation
//!    - `model-tag`: XML-like tag format
//!    - `model-treeviz`: Tree visualization with Unicode icons

use boxnote_babel::formats::html::markup_events;
use boxnote_babel::{
    boxnote_to_html, html_to_document, ConvertOptions, Document, ImageResolver, Layout,
    SerializedDocument, WriterRegistry,
};

/// Targets of the convert command
pub const OUTPUT_FORMATS: &[&str] = &["html", "json", "tag", "treeviz"];

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] =
    &["markup", "events", "model-json", "model-tag", "model-treeviz"];

/// Everything one conversion needs besides the target.
pub struct Job<'a> {
    pub source: &'a str,
    pub options: &'a ConvertOptions,
    pub layout: &'a Layout,
    pub images: &'a dyn ImageResolver,
}

impl Job<'_> {
    fn markup(&self) -> Result<String, String> {
        boxnote_to_html(self.source, self.options, self.images)
            .map_err(|e| format!("Conversion failed: {e}"))
    }

    fn document(&self) -> Result<Document, String> {
        let markup = self.markup()?;
        html_to_document(&markup, self.layout, self.images)
            .map_err(|e| format!("Conversion failed: {e}"))
    }
}

/// Format picked from an output file name, if its extension names one.
pub fn detect_format_from_filename(filename: &str) -> Option<String> {
    let extension = filename.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
        "html" | "htm" => Some("html".to_string()),
        "json" => Some("json".to_string()),
        _ => WriterRegistry::default().detect_writer_from_filename(filename),
    }
}

/// Run the full conversion to one of [`OUTPUT_FORMATS`].
pub fn convert(job: &Job<'_>, format: &str) -> Result<SerializedDocument, String> {
    match format {
        "html" => job.markup().map(SerializedDocument::Text),
        "json" => model_json(&job.document()?).map(SerializedDocument::Text),
        writer => {
            let registry = WriterRegistry::default();
            if !registry.has(writer) {
                return Err(format!(
                    "Unknown format '{writer}'. Available: {}",
                    OUTPUT_FORMATS.join(", ")
                ));
            }
            registry
                .write(&job.document()?, writer)
                .map_err(|e| format!("Serialization failed: {e}"))
        }
    }
}

/// Execute a named inspect transform.
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform(&job, "model-treeviz")?;
/// ```
pub fn execute_transform(job: &Job<'_>, transform_name: &str) -> Result<String, String> {
    match transform_name {
        "markup" => job.markup(),
        "events" => {
            let events = markup_events(&job.markup()?)
                .map_err(|e| format!("Transform failed: {e}"))?;
            Ok(events
                .iter()
                .map(|event| format!("{event}\n"))
                .collect::<String>())
        }
        "model-json" => model_json(&job.document()?),
        "model-tag" => write_text(&job.document()?, "tag"),
        "model-treeviz" => write_text(&job.document()?, "treeviz"),
        _ => Err(format!("Unknown transform: {transform_name}")),
    }
}

fn model_json(doc: &Document) -> Result<String, String> {
    serde_json::to_string_pretty(doc)
        .map(|json| json + "\n")
        .map_err(|e| format!("JSON serialization failed: {e}"))
}

fn write_text(doc: &Document, writer: &str) -> Result<String, String> {
    let output = WriterRegistry::default()
        .write(doc, writer)
        .map_err(|e| format!("Serialization failed: {e}"))?;
    String::from_utf8(output.into_bytes()).map_err(|e| format!("Non-text output: {e}"))
}
