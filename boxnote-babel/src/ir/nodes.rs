//! Core data structures for the rich document model.

use serde::Serialize;

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// A top-level (or table cell level) block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Heading(Heading),
    Table(Table),
    Image(Image),
}

/// Represents a paragraph of runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    /// Named paragraph style (e.g. "List Bullet")
    pub style: Option<String>,
    pub alignment: Alignment,
    pub left_indent: Option<Inches>,
    pub line_spacing: Option<f32>,
    pub border_bottom: Option<Border>,
    pub inlines: Vec<Inline>,
}

/// Represents a heading paragraph with a level in `1..=9`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub paragraph: Paragraph,
}

/// A fixed rows × cols grid; every cell holds its own block content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub rows: usize,
    pub cols: usize,
    pub style: Option<String>,
    pub cells: Vec<Vec<Cell>>,
}

/// Represents a table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    pub blocks: Vec<Block>,
}

/// Represents an embedded image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub source: String,
}

/// Inline content of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Run(Run),
    Hyperlink(Hyperlink),
    Break,
}

/// Represents a run of uniformly formatted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub text: String,
    pub format: RunFormat,
}

/// Represents an external hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperlink {
    pub target: String,
    pub text: String,
    pub format: RunFormat,
}

/// Character formatting of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub font: Option<String>,
    pub color: Option<Rgb>,
    /// Font size in points
    pub size: Option<u32>,
    pub highlight: Option<Highlight>,
    pub shading: Option<Rgb>,
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Highlight colors a run may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Gray25,
}

/// A length in inches.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Inches(pub f32);

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A single-line paragraph border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    /// Line width in eighths of a point
    pub size: u32,
    /// Distance from the text in points
    pub space: u32,
}

impl Default for Border {
    fn default() -> Self {
        Border { size: 6, space: 1 }
    }
}

impl Document {
    /// Removes content-empty paragraphs that precede the first non-empty block.
    pub fn remove_leading_empty_paragraphs(&mut self) {
        let leading = self
            .blocks
            .iter()
            .take_while(|block| matches!(block, Block::Paragraph(p) if p.is_empty()))
            .count();
        self.blocks.drain(..leading);
    }

    /// All text fragments in reading order, descending into table cells.
    pub fn texts(&self) -> Vec<String> {
        let mut texts = Vec::new();
        collect_texts(&self.blocks, &mut texts);
        texts
    }
}

fn collect_texts(blocks: &[Block], texts: &mut Vec<String>) {
    for block in blocks {
        match block {
            Block::Paragraph(p) => texts.extend(p.texts()),
            Block::Heading(h) => texts.extend(h.paragraph.texts()),
            Block::Table(table) => {
                for cell in table.cells.iter().flatten() {
                    collect_texts(&cell.blocks, texts);
                }
            }
            Block::Image(_) => {}
        }
    }
}

impl Block {
    pub fn paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Heading(h) => Some(&h.paragraph),
            _ => None,
        }
    }

    pub fn paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Heading(h) => Some(&mut h.paragraph),
            _ => None,
        }
    }
}

impl Paragraph {
    pub fn with_style(style: Option<String>) -> Self {
        Paragraph {
            style,
            ..Default::default()
        }
    }

    /// Concatenated text of all runs and hyperlinks; breaks become newlines.
    pub fn text(&self) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Run(run) => run.text.as_str(),
                Inline::Hyperlink(link) => link.text.as_str(),
                Inline::Break => "\n",
            })
            .collect()
    }

    fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run.text.clone()),
            Inline::Hyperlink(link) => Some(link.text.clone()),
            Inline::Break => None,
        })
    }

    /// True when the paragraph carries neither text nor a border decoration.
    pub fn is_empty(&self) -> bool {
        self.border_bottom.is_none() && self.text().is_empty()
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.inlines.iter().filter_map(|inline| match inline {
            Inline::Run(run) => Some(run),
            _ => None,
        })
    }
}

impl Table {
    /// Creates a grid of empty cells.
    pub fn new(rows: usize, cols: usize, style: Option<String>) -> Self {
        Table {
            rows,
            cols,
            style,
            cells: vec![vec![Cell::default(); cols]; rows],
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|cells| cells.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(row).and_then(|cells| cells.get_mut(col))
    }
}

impl Run {
    pub fn new(text: impl Into<String>, format: RunFormat) -> Self {
        Run {
            text: text.into(),
            format,
        }
    }
}

impl RunFormat {
    /// True when no formatting deviates from the defaults.
    pub fn is_plain(&self) -> bool {
        *self == RunFormat::default()
    }
}

impl Alignment {
    /// Maps a CSS `text-align` value; values without a counterpart yield `None`.
    pub fn from_css(value: &str) -> Option<Alignment> {
        match value {
            "center" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
