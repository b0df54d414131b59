//! Format implementations
//!
//! The BoxNote input side ([`boxnote`]), the markup side shared by both directions
//! ([`html`]), and the reference writers for the document model ([`tag`], [`treeviz`]).

pub mod boxnote;
pub mod html;
pub mod icons;
pub mod tag;
pub mod treeviz;

pub use boxnote::{to_html, ConvertOptions};
pub use html::{parse_markup, Layout};
pub use tag::TagWriter;
pub use treeviz::TreevizWriter;
