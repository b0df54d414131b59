//! XML-like tag dump of the document model
//!
//! Writes every contract call as a nested tag, two spaces of indentation per level.
//! Paragraph and run properties arrive after the element itself, so the latest element is
//! held back until the next call shows it is complete.
//!
//! ## Example
//!
//! ```text
//! <document>
//!   <paragraph align="center">
//!     <run bold="true">Hi</run>
//!     <break/>
//!   </paragraph>
//!   <table rows="1" cols="1">
//!     <cell row="0" col="0">
//!       <paragraph/>
//!     </cell>
//!   </table>
//!   <image source="a.png"/>
//! </document>
//! ```

use crate::error::ConvertError;
use crate::formats::html::tags::escape_html;
use crate::ir::nodes::{Alignment, Border, Highlight, Inches, RunFormat};
use crate::writer::{DocumentWriter, SerializedDocument};

struct Pending {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    /// Text content of a leaf element
    text: Option<String>,
}

#[derive(Default)]
pub struct TagWriter {
    out: String,
    open: Vec<&'static str>,
    pending: Option<Pending>,
}

fn attributes(attrs: &[(&'static str, String)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {key}=\"{}\"", escape_html(value)))
        .collect()
}

fn format_attributes(format: &RunFormat) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    let flags = [
        ("bold", format.bold),
        ("italic", format.italic),
        ("underline", format.underline),
        ("strike", format.strike),
        ("superscript", format.superscript),
        ("subscript", format.subscript),
    ];
    for (name, set) in flags {
        if set {
            attrs.push((name, "true".to_string()));
        }
    }
    if let Some(font) = &format.font {
        attrs.push(("font", font.clone()));
    }
    if let Some(color) = format.color {
        attrs.push(("color", format!("#{}", color.to_hex())));
    }
    if let Some(size) = format.size {
        attrs.push(("size", size.to_string()));
    }
    if let Some(Highlight::Gray25) = format.highlight {
        attrs.push(("highlight", "gray25".to_string()));
    }
    if let Some(shading) = format.shading {
        attrs.push(("shading", format!("#{}", shading.to_hex())));
    }
    attrs
}

impl TagWriter {
    fn indent(&self) -> String {
        "  ".repeat(self.open.len())
    }

    /// Write the held-back element. A container with no children is written self-closed.
    fn flush(&mut self, has_children: bool) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        let indent = self.indent();
        let attrs = attributes(&pending.attrs);
        match pending.text {
            Some(text) => self.out.push_str(&format!(
                "{indent}<{tag}{attrs}>{}</{tag}>\n",
                escape_html(&text),
                tag = pending.tag
            )),
            None if has_children => {
                self.out
                    .push_str(&format!("{indent}<{}{attrs}>\n", pending.tag));
                self.open.push(pending.tag);
            }
            None => self
                .out
                .push_str(&format!("{indent}<{}{attrs}/>\n", pending.tag)),
        }
    }

    fn close_top(&mut self) {
        if let Some(tag) = self.open.pop() {
            let indent = self.indent();
            self.out.push_str(&format!("{indent}</{tag}>\n"));
        }
    }

    /// Close open elements until one of `tags` is on top.
    fn close_to(&mut self, tags: &[&str]) -> Result<(), ConvertError> {
        self.flush(false);
        while let Some(top) = self.open.last() {
            if tags.contains(top) {
                return Ok(());
            }
            self.close_top();
        }
        Err(ConvertError::Writer(format!(
            "tag writer: no open {}",
            tags.join(" or ")
        )))
    }

    /// Flush into an open paragraph; fails when content arrives outside one.
    fn in_paragraph(&mut self) -> Result<(), ConvertError> {
        let leaf = self.pending.as_ref().is_some_and(|p| p.text.is_some());
        self.flush(!leaf);
        match self.open.last() {
            Some(&"paragraph") | Some(&"heading") => Ok(()),
            _ => Err(ConvertError::Writer(
                "tag writer: inline content outside a paragraph".into(),
            )),
        }
    }

    fn pending_attr(
        &mut self,
        tags: &[&str],
        attrs: Vec<(&'static str, String)>,
    ) -> Result<(), ConvertError> {
        match &mut self.pending {
            Some(pending) if tags.contains(&pending.tag) => {
                pending.attrs.extend(attrs);
                Ok(())
            }
            _ => Err(ConvertError::Writer(format!(
                "tag writer: no {} to set properties on",
                tags.join(" or ")
            ))),
        }
    }

    fn write_line(&mut self, line: &str) {
        let indent = self.indent();
        self.out.push_str(&format!("{indent}{line}\n"));
    }
}

impl DocumentWriter for TagWriter {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like tag dump of the document model"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tag", "xml"]
    }

    fn create_document(&mut self) -> Result<(), ConvertError> {
        *self = TagWriter::default();
        self.out.push_str("<document>\n");
        self.open.push("document");
        Ok(())
    }

    fn add_paragraph(&mut self, style: Option<&str>) -> Result<(), ConvertError> {
        self.close_to(&["document", "cell"])?;
        let attrs = style
            .map(|style| vec![("style", style.to_string())])
            .unwrap_or_default();
        self.pending = Some(Pending {
            tag: "paragraph",
            attrs,
            text: None,
        });
        Ok(())
    }

    fn add_heading(&mut self, level: u8) -> Result<(), ConvertError> {
        self.close_to(&["document", "cell"])?;
        self.pending = Some(Pending {
            tag: "heading",
            attrs: vec![("level", level.to_string())],
            text: None,
        });
        Ok(())
    }

    fn set_paragraph_alignment(&mut self, alignment: Alignment) -> Result<(), ConvertError> {
        self.pending_attr(
            &["paragraph", "heading"],
            vec![("align", alignment.as_str().to_string())],
        )
    }

    fn set_paragraph_indent(&mut self, indent: Inches) -> Result<(), ConvertError> {
        self.pending_attr(&["paragraph", "heading"], vec![("indent", indent.0.to_string())])
    }

    fn set_paragraph_spacing(&mut self, line_spacing: f32) -> Result<(), ConvertError> {
        self.pending_attr(
            &["paragraph", "heading"],
            vec![("spacing", line_spacing.to_string())],
        )
    }

    fn set_paragraph_border(&mut self, border: Border) -> Result<(), ConvertError> {
        self.pending_attr(
            &["paragraph", "heading"],
            vec![("border", format!("{}/{}", border.size, border.space))],
        )
    }

    fn add_run(&mut self, text: &str) -> Result<(), ConvertError> {
        self.in_paragraph()?;
        self.pending = Some(Pending {
            tag: "run",
            attrs: Vec::new(),
            text: Some(text.to_string()),
        });
        Ok(())
    }

    fn set_run_formatting(&mut self, format: &RunFormat) -> Result<(), ConvertError> {
        self.pending_attr(&["run"], format_attributes(format))
    }

    fn add_break(&mut self) -> Result<(), ConvertError> {
        self.in_paragraph()?;
        self.write_line("<break/>");
        Ok(())
    }

    fn add_hyperlink(
        &mut self,
        target: &str,
        text: &str,
        format: &RunFormat,
    ) -> Result<(), ConvertError> {
        self.in_paragraph()?;
        let mut attrs = vec![("target", target.to_string())];
        attrs.extend(format_attributes(format));
        self.pending = Some(Pending {
            tag: "link",
            attrs,
            text: Some(text.to_string()),
        });
        Ok(())
    }

    fn add_table(
        &mut self,
        rows: usize,
        cols: usize,
        style: Option<&str>,
    ) -> Result<(), ConvertError> {
        self.close_to(&["document", "cell"])?;
        let mut attrs = vec![("rows", rows.to_string()), ("cols", cols.to_string())];
        if let Some(style) = style {
            attrs.push(("style", style.to_string()));
        }
        self.write_line(&format!("<table{}>", attributes(&attrs)));
        self.open.push("table");
        Ok(())
    }

    fn begin_cell(&mut self, row: usize, col: usize) -> Result<(), ConvertError> {
        self.close_to(&["table"])?;
        self.write_line(&format!("<cell row=\"{row}\" col=\"{col}\">"));
        self.open.push("cell");
        Ok(())
    }

    fn end_cell(&mut self) -> Result<(), ConvertError> {
        self.close_to(&["cell"])?;
        self.close_top();
        Ok(())
    }

    fn end_table(&mut self) -> Result<(), ConvertError> {
        self.close_to(&["table"])?;
        self.close_top();
        Ok(())
    }

    fn add_image(&mut self, source: &str) -> Result<(), ConvertError> {
        self.close_to(&["document", "cell"])?;
        self.write_line(&format!(
            "<image{}/>",
            attributes(&[("source", source.to_string())])
        ));
        Ok(())
    }

    fn finish(&mut self) -> Result<SerializedDocument, ConvertError> {
        self.flush(false);
        while !self.open.is_empty() {
            self.close_top();
        }
        Ok(SerializedDocument::Text(std::mem::take(&mut self.out)))
    }
}
