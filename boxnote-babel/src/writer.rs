//! Document writer contract
//!
//! This module defines the [`DocumentWriter`] trait, the narrow interface through which a
//! finished [`Document`] is handed to a serializer, and [`write_document`], the driver that
//! walks the model in block order and issues the contract calls.
//!
//! The driver never knows what the writer produces. Office serialization lives outside this
//! crate; the writers shipped here (tag, treeviz) exist for inspection and testing.

use crate::error::ConvertError;
use crate::ir::nodes::{Alignment, Block, Border, Document, Inches, Inline, Paragraph, RunFormat};
use std::path::Path;

/// Serialized output produced by a [`DocumentWriter`].
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedDocument {
    /// UTF-8 text output (e.g., tag, treeviz)
    Text(String),
    /// Binary output (e.g., an office document archive)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }
}

/// Trait for document writers
///
/// Calls arrive in document order. Paragraph-level setters apply to the paragraph opened by
/// the latest `add_paragraph`/`add_heading`; `set_run_formatting` applies to the latest run.
/// Table content is delivered between `add_table` and `end_table`, one `begin_cell`/`end_cell`
/// pair per grid position in row-major order.
///
/// # Examples
///
/// ```ignore
/// let mut writer = TagWriter::default();
/// write_document(&doc, &mut writer)?;
/// writer.save(Path::new("out.tag"))?;
/// ```
pub trait DocumentWriter {
    /// The name of this writer (e.g., "tag", "treeviz")
    fn name(&self) -> &str;

    /// Optional description of this writer
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this writer, without the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Start a fresh document, discarding anything written before.
    fn create_document(&mut self) -> Result<(), ConvertError>;

    fn add_paragraph(&mut self, style: Option<&str>) -> Result<(), ConvertError>;

    fn add_heading(&mut self, level: u8) -> Result<(), ConvertError>;

    fn set_paragraph_alignment(&mut self, alignment: Alignment) -> Result<(), ConvertError>;

    fn set_paragraph_indent(&mut self, indent: Inches) -> Result<(), ConvertError>;

    fn set_paragraph_spacing(&mut self, _line_spacing: f32) -> Result<(), ConvertError> {
        Ok(())
    }

    fn set_paragraph_border(&mut self, _border: Border) -> Result<(), ConvertError> {
        Ok(())
    }

    fn add_run(&mut self, text: &str) -> Result<(), ConvertError>;

    fn set_run_formatting(&mut self, format: &RunFormat) -> Result<(), ConvertError>;

    /// Hard line break inside the current paragraph.
    fn add_break(&mut self) -> Result<(), ConvertError>;

    fn add_hyperlink(
        &mut self,
        target: &str,
        text: &str,
        format: &RunFormat,
    ) -> Result<(), ConvertError>;

    fn add_table(
        &mut self,
        rows: usize,
        cols: usize,
        style: Option<&str>,
    ) -> Result<(), ConvertError>;

    fn begin_cell(&mut self, row: usize, col: usize) -> Result<(), ConvertError>;

    fn end_cell(&mut self) -> Result<(), ConvertError> {
        Ok(())
    }

    fn end_table(&mut self) -> Result<(), ConvertError> {
        Ok(())
    }

    fn add_image(&mut self, source: &str) -> Result<(), ConvertError>;

    /// Produce the serialized document.
    fn finish(&mut self) -> Result<SerializedDocument, ConvertError>;

    /// Serialize and write the document to `destination`.
    fn save(&mut self, destination: &Path) -> Result<(), ConvertError> {
        let bytes = self.finish()?.into_bytes();
        std::fs::write(destination, bytes).map_err(|e| {
            ConvertError::Writer(format!("cannot write {}: {e}", destination.display()))
        })
    }
}

/// Drive `writer` over the whole document.
pub fn write_document(doc: &Document, writer: &mut dyn DocumentWriter) -> Result<(), ConvertError> {
    writer.create_document()?;
    write_blocks(&doc.blocks, writer)
}

fn write_blocks(blocks: &[Block], writer: &mut dyn DocumentWriter) -> Result<(), ConvertError> {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                writer.add_paragraph(paragraph.style.as_deref())?;
                write_paragraph(paragraph, writer)?;
            }
            Block::Heading(heading) => {
                writer.add_heading(heading.level)?;
                write_paragraph(&heading.paragraph, writer)?;
            }
            Block::Table(table) => {
                writer.add_table(table.rows, table.cols, table.style.as_deref())?;
                for (row, cells) in table.cells.iter().enumerate() {
                    for (col, cell) in cells.iter().enumerate() {
                        writer.begin_cell(row, col)?;
                        write_blocks(&cell.blocks, writer)?;
                        writer.end_cell()?;
                    }
                }
                writer.end_table()?;
            }
            Block::Image(image) => writer.add_image(&image.source)?,
        }
    }
    Ok(())
}

fn write_paragraph(
    paragraph: &Paragraph,
    writer: &mut dyn DocumentWriter,
) -> Result<(), ConvertError> {
    if paragraph.alignment != Alignment::Left {
        writer.set_paragraph_alignment(paragraph.alignment)?;
    }
    if let Some(indent) = paragraph.left_indent {
        writer.set_paragraph_indent(indent)?;
    }
    if let Some(spacing) = paragraph.line_spacing {
        writer.set_paragraph_spacing(spacing)?;
    }
    if let Some(border) = paragraph.border_bottom {
        writer.set_paragraph_border(border)?;
    }
    for inline in &paragraph.inlines {
        match inline {
            Inline::Run(run) => {
                writer.add_run(&run.text)?;
                if !run.format.is_plain() {
                    writer.set_run_formatting(&run.format)?;
                }
            }
            Inline::Hyperlink(link) => writer.add_hyperlink(&link.target, &link.text, &link.format)?,
            Inline::Break => writer.add_break()?,
        }
    }
    Ok(())
}
