//! Treeviz writer for the document model
//!
//! Treeviz is a visual representation of the model, one node per line:
//! <prefix><connector> <icon><space><label> (label trimmed, truncated to 30 characters)
//!
//! Example:
//!
//! ```text
//! ⧉ Document (3 blocks)
//! ├─ § h1 Title
//! │ └─ ◦ Title
//! ├─ ☰ 1x2 table
//! │ ├─ ▫ (0,0)
//! │ │ └─ ¶ a
//! │ │   └─ ◦ a
//! │ └─ ▫ (0,1)
//! │   └─ ¶ (empty)
//! └─ ▣ a.png
//! ```
//!
//! The writer rebuilds a [`Document`] from the contract calls and renders it on `finish`;
//! [`to_treeviz_str`] renders a model directly.

use super::icons::get_icon;
use crate::error::ConvertError;
use crate::ir::nodes::{
    Alignment, Block, Border, Document, Hyperlink, Inches, Inline, Paragraph, Run, RunFormat,
    Table,
};
use crate::writer::{DocumentWriter, SerializedDocument};

const LABEL_WIDTH: usize = 30;

fn truncate(label: &str) -> String {
    if label.chars().count() > LABEL_WIDTH {
        let head: String = label.chars().take(LABEL_WIDTH).collect();
        format!("{head}…")
    } else {
        label.to_string()
    }
}

fn paragraph_label(paragraph: &Paragraph) -> String {
    let text = paragraph.text().replace('\n', " ");
    let text = if !text.is_empty() {
        text
    } else if paragraph.border_bottom.is_some() {
        "(rule)".to_string()
    } else {
        "(empty)".to_string()
    };
    match &paragraph.style {
        Some(style) => format!("[{style}] {text}"),
        None => text,
    }
}

fn line(prefix: &str, is_last: bool, node_type: &str, label: &str) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node_type),
        truncate(label.trim())
    )
}

fn child_prefix(prefix: &str, is_last: bool) -> String {
    format!("{prefix}{}", if is_last { "  " } else { "│ " })
}

fn format_inlines(inlines: &[Inline], prefix: &str) -> String {
    let mut output = String::new();
    for (i, inline) in inlines.iter().enumerate() {
        let is_last = i == inlines.len() - 1;
        output.push_str(&match inline {
            Inline::Run(run) => line(prefix, is_last, "Run", &run.text),
            Inline::Hyperlink(link) => line(
                prefix,
                is_last,
                "Hyperlink",
                &format!("{} → {}", link.text, link.target),
            ),
            Inline::Break => line(prefix, is_last, "Break", "break"),
        });
    }
    output
}

fn format_block(block: &Block, prefix: &str, is_last: bool) -> String {
    let nested = child_prefix(prefix, is_last);
    match block {
        Block::Paragraph(paragraph) => {
            line(prefix, is_last, "Paragraph", &paragraph_label(paragraph))
                + &format_inlines(&paragraph.inlines, &nested)
        }
        Block::Heading(heading) => {
            let label = format!("h{} {}", heading.level, heading.paragraph.text());
            line(prefix, is_last, "Heading", &label)
                + &format_inlines(&heading.paragraph.inlines, &nested)
        }
        Block::Table(table) => {
            let mut output = line(
                prefix,
                is_last,
                "Table",
                &format!("{}x{} table", table.rows, table.cols),
            );
            let count = table.rows * table.cols;
            for (i, cell) in table.cells.iter().flatten().enumerate() {
                let cell_last = i + 1 == count;
                let (row, col) = (i / table.cols.max(1), i % table.cols.max(1));
                output.push_str(&line(&nested, cell_last, "Cell", &format!("({row},{col})")));
                output.push_str(&format_blocks(
                    &cell.blocks,
                    &child_prefix(&nested, cell_last),
                ));
            }
            output
        }
        Block::Image(image) => line(prefix, is_last, "Image", &image.source),
    }
}

fn format_blocks(blocks: &[Block], prefix: &str) -> String {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| format_block(block, prefix, i == blocks.len() - 1))
        .collect()
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let icon = get_icon("Document");
    format!("{icon} Document ({} blocks)\n", doc.blocks.len()) + &format_blocks(&doc.blocks, "")
}

/// A table under construction and the cell currently receiving blocks.
struct TableFrame {
    table: Table,
    cell: Option<(usize, usize)>,
}

#[derive(Default)]
pub struct TreevizWriter {
    doc: Document,
    tables: Vec<TableFrame>,
}

fn writer_error(msg: &str) -> ConvertError {
    ConvertError::Writer(format!("treeviz writer: {msg}"))
}

impl TreevizWriter {
    /// The block list new blocks go to: the open cell of the innermost table, or the document.
    fn blocks(&mut self) -> Result<&mut Vec<Block>, ConvertError> {
        match self.tables.last_mut() {
            Some(frame) => {
                let (row, col) = frame.cell.ok_or_else(|| writer_error("no open cell"))?;
                frame
                    .table
                    .cell_mut(row, col)
                    .map(|cell| &mut cell.blocks)
                    .ok_or_else(|| writer_error("cell outside the table grid"))
            }
            None => Ok(&mut self.doc.blocks),
        }
    }

    fn paragraph(&mut self) -> Result<&mut Paragraph, ConvertError> {
        self.blocks()?
            .last_mut()
            .and_then(Block::paragraph_mut)
            .ok_or_else(|| writer_error("no open paragraph"))
    }
}

impl DocumentWriter for TreevizWriter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn create_document(&mut self) -> Result<(), ConvertError> {
        *self = TreevizWriter::default();
        Ok(())
    }

    fn add_paragraph(&mut self, style: Option<&str>) -> Result<(), ConvertError> {
        let paragraph = Paragraph::with_style(style.map(str::to_string));
        self.blocks()?.push(Block::Paragraph(paragraph));
        Ok(())
    }

    fn add_heading(&mut self, level: u8) -> Result<(), ConvertError> {
        let heading = crate::ir::nodes::Heading {
            level,
            paragraph: Paragraph::default(),
        };
        self.blocks()?.push(Block::Heading(heading));
        Ok(())
    }

    fn set_paragraph_alignment(&mut self, alignment: Alignment) -> Result<(), ConvertError> {
        self.paragraph()?.alignment = alignment;
        Ok(())
    }

    fn set_paragraph_indent(&mut self, indent: Inches) -> Result<(), ConvertError> {
        self.paragraph()?.left_indent = Some(indent);
        Ok(())
    }

    fn set_paragraph_spacing(&mut self, line_spacing: f32) -> Result<(), ConvertError> {
        self.paragraph()?.line_spacing = Some(line_spacing);
        Ok(())
    }

    fn set_paragraph_border(&mut self, border: Border) -> Result<(), ConvertError> {
        self.paragraph()?.border_bottom = Some(border);
        Ok(())
    }

    fn add_run(&mut self, text: &str) -> Result<(), ConvertError> {
        self.paragraph()?
            .inlines
            .push(Inline::Run(Run::new(text, RunFormat::default())));
        Ok(())
    }

    fn set_run_formatting(&mut self, format: &RunFormat) -> Result<(), ConvertError> {
        match self.paragraph()?.inlines.last_mut() {
            Some(Inline::Run(run)) => {
                run.format = format.clone();
                Ok(())
            }
            _ => Err(writer_error("no run to format")),
        }
    }

    fn add_break(&mut self) -> Result<(), ConvertError> {
        self.paragraph()?.inlines.push(Inline::Break);
        Ok(())
    }

    fn add_hyperlink(
        &mut self,
        target: &str,
        text: &str,
        format: &RunFormat,
    ) -> Result<(), ConvertError> {
        self.paragraph()?.inlines.push(Inline::Hyperlink(Hyperlink {
            target: target.to_string(),
            text: text.to_string(),
            format: format.clone(),
        }));
        Ok(())
    }

    fn add_table(
        &mut self,
        rows: usize,
        cols: usize,
        style: Option<&str>,
    ) -> Result<(), ConvertError> {
        // Validates placement; the table is attached on end_table.
        self.blocks()?;
        self.tables.push(TableFrame {
            table: Table::new(rows, cols, style.map(str::to_string)),
            cell: None,
        });
        Ok(())
    }

    fn begin_cell(&mut self, row: usize, col: usize) -> Result<(), ConvertError> {
        let frame = self
            .tables
            .last_mut()
            .ok_or_else(|| writer_error("cell outside a table"))?;
        frame.cell = Some((row, col));
        Ok(())
    }

    fn end_cell(&mut self) -> Result<(), ConvertError> {
        let frame = self
            .tables
            .last_mut()
            .ok_or_else(|| writer_error("cell outside a table"))?;
        frame.cell = None;
        Ok(())
    }

    fn end_table(&mut self) -> Result<(), ConvertError> {
        let frame = self
            .tables
            .pop()
            .ok_or_else(|| writer_error("no open table"))?;
        self.blocks()?.push(Block::Table(frame.table));
        Ok(())
    }

    fn add_image(&mut self, source: &str) -> Result<(), ConvertError> {
        let image = crate::ir::nodes::Image {
            source: source.to_string(),
        };
        self.blocks()?.push(Block::Image(image));
        Ok(())
    }

    fn finish(&mut self) -> Result<SerializedDocument, ConvertError> {
        if !self.tables.is_empty() {
            return Err(writer_error("unterminated table"));
        }
        Ok(SerializedDocument::Text(to_treeviz_str(&self.doc)))
    }
}
