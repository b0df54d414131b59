//! BoxNote conversion library
//!
//!     This crate converts BoxNote documents (a JSON node tree) into HTML markup, and markup
//!     into a rich document model (paragraphs, runs, tables, images) that a document writer
//!     serializes.
//!
//!     This is a pure lib, that is, it powers the boxnote cli but is shell agnostic: no code
//!     here prints to std streams or reads env vars. Everything a conversion needs (title,
//!     working directory, credentials, layout constants) is passed in explicitly.
//!
//! Architecture
//!
//!     BoxNote JSON ──walker──▶ markup fragments ──page──▶ HTML
//!                                                          │
//!                                                 tag-stream parser
//!                                                          ▼
//!                      DocumentWriter ◀──driver── rich document model
//!
//!     The walker is a depth-first descent over the node tree that emits markup through a
//!     declarative tag mapping table. The parser is a single-pass pushdown automaton over the
//!     tag stream; tables are handed to a sub-builder that re-enters the parser once per cell.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # ConvertError
//!     ├── images.rs               # ImageResolver trait and the filesystem resolver
//!     ├── writer.rs               # DocumentWriter trait and the model driver
//!     ├── registry.rs             # WriterRegistry for discovery and selection
//!     ├── ir
//!     │   └── nodes.rs            # Rich document model
//!     ├── formats
//!     │   ├── boxnote             # JSON input model and the AST walker
//!     │   ├── html                # Tag table, tokenizer, parser, table sub-builder
//!     │   ├── tag                 # XML-like model dump writer
//!     │   ├── treeviz             # Tree visualization writer
//!     │   └── icons.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── boxnote                 # walker and page output
//!     ├── html                    # parser, tables, end to end
//!     └── fixtures                # sample BoxNote documents
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.

pub mod error;
pub mod formats;
pub mod images;
pub mod ir;
pub mod registry;
pub mod writer;

pub use error::ConvertError;
pub use formats::boxnote::ConvertOptions;
pub use formats::html::Layout;
pub use images::{Credentials, FsImageResolver, ImageResolver, NoImages};
pub use ir::nodes::Document;
pub use registry::WriterRegistry;
pub use writer::{write_document, DocumentWriter, SerializedDocument};

/// Convert a BoxNote document into a complete HTML page.
pub fn boxnote_to_html(
    source: &str,
    options: &ConvertOptions,
    images: &dyn ImageResolver,
) -> Result<String, ConvertError> {
    formats::boxnote::to_html(source, options, images)
}

/// Rebuild a rich document from markup.
pub fn html_to_document(
    markup: &str,
    layout: &Layout,
    images: &dyn ImageResolver,
) -> Result<Document, ConvertError> {
    formats::html::parse_markup(markup, layout, images)
}

/// Convert a BoxNote document all the way to the rich document model.
///
/// Structural errors in the BoxNote input abort the conversion before any markup is parsed.
pub fn convert(
    source: &str,
    options: &ConvertOptions,
    layout: &Layout,
    images: &dyn ImageResolver,
) -> Result<Document, ConvertError> {
    let html = boxnote_to_html(source, options, images)?;
    html_to_document(&html, layout, images)
}
