//! Table sub-builder
//!
//! Turns one logical table into a fixed rows × cols grid. The row count is the number of rows
//! directly owned by the table (including rows inside its own `thead`/`tbody`/`tfoot`); the
//! column count comes from the first row. Every cell's inner markup is parsed by a fresh
//! builder, so cells can hold any block content, further tables included.

use super::dom::{child_elements, count_descendants, inner_markup, is_element};
use super::parser::parse_cell_markup;
use super::Layout;
use crate::error::ConvertError;
use crate::images::ImageResolver;
use crate::ir::nodes::{Block, Paragraph, Table};
use log::warn;
use markup5ever_rcdom::Handle;

/// A table found in the DOM, with the number of tables nested anywhere inside it.
///
/// Holds the root of its tree: dropping the last handle to an rcdom root empties every
/// descendant, so the table element alone does not keep its rows.
#[derive(Clone)]
pub struct TableSource {
    pub element: Handle,
    pub nested: usize,
    root: Handle,
}

/// Outermost tables of a tree in document order. Nested tables are left to the cell parsers.
pub fn collect_tables(root: &Handle) -> Vec<TableSource> {
    let mut tables = Vec::new();
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if is_element(&node, "table") {
            tables.push(TableSource {
                nested: count_descendants(&node, "table"),
                element: node,
                root: root.clone(),
            });
        } else {
            stack.extend(node.children.borrow().iter().rev().cloned());
        }
    }
    tables
}

fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in child_elements(table, &["tr", "thead", "tbody", "tfoot"]) {
        if is_element(&child, "tr") {
            rows.push(child);
        } else {
            rows.extend(child_elements(&child, &["tr"]));
        }
    }
    rows
}

fn row_cells(row: &Handle) -> Vec<Handle> {
    child_elements(row, &["td", "th"])
}

/// Build the grid of one table.
pub fn build_table(
    source: &TableSource,
    layout: &Layout,
    images: &dyn ImageResolver,
) -> Result<Table, ConvertError> {
    let rows = table_rows(&source.element);
    let cols = rows.first().map(|row| row_cells(row).len()).unwrap_or(0);
    let mut table = Table::new(rows.len(), cols, layout.table_style.clone());

    for (r, row) in rows.iter().enumerate() {
        let cells = row_cells(row);
        if cells.len() > cols {
            warn!(
                "table row {r} has {} cells, first row has {cols}; extra cells dropped",
                cells.len()
            );
        }
        for (c, cell) in cells.iter().take(cols).enumerate() {
            let markup = inner_markup(cell)?;
            let markup = if is_element(cell, "th") {
                format!("<b>{markup}</b>")
            } else {
                markup
            };
            if let Some(slot) = table.cell_mut(r, c) {
                slot.blocks = parse_cell_markup(&markup, layout, images)?;
            }
        }
    }

    for cell in table.cells.iter_mut().flatten() {
        ensure_paragraph(&mut cell.blocks);
    }
    Ok(table)
}

/// A cell always carries at least one paragraph.
pub(crate) fn ensure_paragraph(blocks: &mut Vec<Block>) {
    let has_paragraph = blocks
        .iter()
        .any(|block| matches!(block, Block::Paragraph(_) | Block::Image(_)));
    if !has_paragraph {
        blocks.push(Block::Paragraph(Paragraph::default()));
    }
}
