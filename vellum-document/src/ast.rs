//! Block and inline tree produced by the Markdown front end.
//!
//! The layout engine only reads this tree. Tables are kept in the raw form
//! the grid needs: rows of cells, each cell carrying its column index and
//! its span. A span of zero marks a placeholder covered by a spanning cell.

/// A parsed Markdown document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Iterate over every table in the document, including tables nested
    /// inside block quotes and list items.
    pub fn tables(&self) -> Vec<TableRef<'_>> {
        let mut out = Vec::new();
        collect_tables(&self.blocks, &mut out);
        out
    }
}

fn collect_tables<'a>(blocks: &'a [Block], out: &mut Vec<TableRef<'a>>) {
    for block in blocks {
        match block {
            Block::Table { column_alignments, rows } => out.push(TableRef {
                column_alignments,
                rows,
            }),
            Block::BlockQuote(children) => collect_tables(children, out),
            Block::List { items, .. } => {
                for item in items {
                    collect_tables(item, out);
                }
            }
            _ => {}
        }
    }
}

/// Borrowed view of a table block.
#[derive(Debug, Clone, Copy)]
pub struct TableRef<'a> {
    pub column_alignments: &'a [RawTableColumnAlignment],
    pub rows: &'a [RawTableRow],
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    BlockQuote(Vec<Block>),
    /// `start` is `Some` for ordered lists.
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    CodeBlock {
        info: Option<String>,
        content: String,
    },
    HtmlBlock(String),
    ThematicBreak,
    Table {
        column_alignments: Vec<RawTableColumnAlignment>,
        rows: Vec<RawTableRow>,
    },
}

/// An inline element.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Html(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        url: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        url: String,
        title: String,
        alt: Vec<Inline>,
    },
    SoftBreak,
    LineBreak,
}

impl Inline {
    /// Flatten a run of inlines into display text.
    ///
    /// Soft breaks collapse to a space, hard breaks to a newline.
    pub fn plain_text(inlines: &[Inline]) -> String {
        let mut out = String::new();
        for inline in inlines {
            inline.push_plain_text(&mut out);
        }
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) | Inline::Code(text) | Inline::Html(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. }
            | Inline::Image { alt: children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
            Inline::SoftBreak => out.push(' '),
            Inline::LineBreak => out.push('\n'),
        }
    }
}

/// Column alignment declared by a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawTableColumnAlignment {
    /// No colon in the delimiter row; the renderer picks the default.
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl From<pulldown_cmark::Alignment> for RawTableColumnAlignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

/// One row of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTableRow {
    /// True for the header row (always row 0 when present).
    pub is_header: bool,
    pub cells: Vec<RawTableCell>,
}

impl RawTableRow {
    pub fn new(cells: Vec<RawTableCell>) -> Self {
        Self { is_header: false, cells }
    }

    pub fn header(cells: Vec<RawTableCell>) -> Self {
        Self { is_header: true, cells }
    }
}

/// One cell of a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTableCell {
    pub column_index: usize,
    /// Columns covered by this cell. `0` marks a placeholder merged into a
    /// cell on its left.
    pub colspan: usize,
    /// Rows covered by this cell. `0` marks a placeholder merged into a cell
    /// above.
    pub rowspan: usize,
    pub content: Vec<Inline>,
}

impl RawTableCell {
    /// A 1x1 cell holding plain text.
    pub fn text(column_index: usize, text: impl Into<String>) -> Self {
        Self {
            column_index,
            colspan: 1,
            rowspan: 1,
            content: vec![Inline::Text(text.into())],
        }
    }

    /// Builder-style span override.
    pub fn with_span(mut self, colspan: usize, rowspan: usize) -> Self {
        self.colspan = colspan;
        self.rowspan = rowspan;
        self
    }

    /// Whether this slot is covered by another cell's span.
    pub fn is_placeholder(&self) -> bool {
        self.colspan == 0 || self.rowspan == 0
    }

    pub fn plain_text(&self) -> String {
        Inline::plain_text(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_flattens_nested_inlines() {
        let inlines = vec![
            Inline::Text("a ".into()),
            Inline::Strong(vec![Inline::Emphasis(vec![Inline::Text("b".into())])]),
            Inline::SoftBreak,
            Inline::Code("c()".into()),
            Inline::LineBreak,
            Inline::Link {
                url: "https://example.com".into(),
                title: String::new(),
                children: vec![Inline::Text("d".into())],
            },
        ];
        assert_eq!(Inline::plain_text(&inlines), "a b c()\nd");
    }

    #[test]
    fn placeholder_detection() {
        assert!(!RawTableCell::text(0, "x").is_placeholder());
        assert!(RawTableCell::text(1, "").with_span(0, 1).is_placeholder());
        assert!(RawTableCell::text(1, "").with_span(1, 0).is_placeholder());
    }

    #[test]
    fn tables_are_found_in_nested_blocks() {
        let table = Block::Table {
            column_alignments: vec![RawTableColumnAlignment::None],
            rows: vec![RawTableRow::header(vec![RawTableCell::text(0, "h")])],
        };
        let doc = Document::new(vec![
            Block::Paragraph(vec![Inline::Text("intro".into())]),
            Block::BlockQuote(vec![table.clone()]),
            Block::List {
                start: None,
                items: vec![vec![table]],
            },
        ]);
        assert_eq!(doc.tables().len(), 2);
    }
}
