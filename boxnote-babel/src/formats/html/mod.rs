//! Markup side of the conversion
//!
//! This module owns the markup vocabulary shared by both directions: the tag mapping table the
//! BoxNote walker renders with ([`tags`]), and the tag-stream parser that rebuilds a rich
//! document from markup ([`parser`], with [`table`] for grids).
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for both views of the markup:
//! - the tokenizer alone yields the flat tag stream the parser consumes
//! - the tree builder yields the DOM the table sub-builder needs for rows and cells
//!
//! Both handle malformed markup the way browsers do.
//!
//! # Element Mapping Table
//!
//! | Markup                    | Document model                                                   |
//! |---------------------------|------------------------------------------------------------------|
//! | `<p>`, `<pre>`            | Paragraph (blockquote indent when inside `<blockquote>`)         |
//! | `<li>`                    | Paragraph styled "List Bullet"/"List Number", indented by depth  |
//! | `<h1>`..`<h9>`            | Heading (plain paragraph inside a table cell)                    |
//! | `<hr>`                    | Paragraph with a bottom border                                   |
//! | `<br>`                    | Break                                                            |
//! | `<img src>`               | Image, when the resolver locates the source                      |
//! | `<table>`                 | Table, one sub-document per cell                                 |
//! | `<a href>`                | Hyperlink                                                        |
//! | `<b>`, `<strong>`, `<th>` | bold run                                                         |
//! | `<em>`, `<i>`             | italic run                                                       |
//! | `<u>`, `<s>`              | underlined / struck run                                          |
//! | `<sup>`, `<sub>`          | superscript / subscript run                                      |
//! | `<code>`                  | Courier run with gray highlight                                  |
//! | `<span>`, `<mark>`        | run color, size and shading from the `style` attribute           |
//!
//! Anything else is ignored, along with `<head>` and `<style>` content.

pub mod dom;
pub mod parser;
pub mod style;
pub mod table;
pub mod tags;
pub mod tokens;

pub use parser::{markup_events, parse_cell_markup, parse_markup};
pub use tags::base_stylesheet;
pub use tokens::TagEvent;

/// Layout constants applied while building paragraphs. Lengths are in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Indent per list nesting level
    pub list_indent: f32,
    pub blockquote_indent: f32,
    /// Indent per 10px of `margin-left`
    pub indent_step: f32,
    /// Cap for every computed indent
    pub max_indent: f32,
    pub table_style: Option<String>,
    pub paragraph_style: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            list_indent: 0.5,
            blockquote_indent: 0.5,
            indent_step: 0.25,
            max_indent: 5.5,
            table_style: None,
            paragraph_style: None,
        }
    }
}
