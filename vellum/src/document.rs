//! Vertical document stack.
//!
//! Positions the blocks of a [`Document`] one below the other. Text blocks
//! are greedy word-wrapped to the available width; tables go through
//! [`TableView`]. Block quotes and list items indent their children.

use serde::Serialize;
use vellum_document::{Block, Document, Inline};

use crate::layout::length::{BLOCK_SPACING, Padding};
use crate::layout::text::TextMeasure;
use crate::primitives::{Point, Rect, Size};
use crate::table::style::TableStyle;
use crate::table::view::{TableLayout, TableView};

/// Width of the bar drawn left of quoted blocks.
const QUOTE_BAR_WIDTH: f32 = 3.0;
/// Gap between the quote bar and the quoted content.
const QUOTE_GAP: f32 = 8.0;
/// Space above and below a thematic break.
const RULE_MARGIN: f32 = 4.0;

/// What a run of text lines represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Paragraph,
    Heading { level: u8 },
    Code,
    Html,
    ListMarker,
}

/// One line of text at its baseline-free top-left origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub origin: Point,
    pub text: String,
}

/// A positioned block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockLayout {
    Text {
        role: TextRole,
        frame: Rect,
        /// Filled behind the text (code blocks).
        background: Option<Rect>,
        lines: Vec<TextLine>,
    },
    Rule {
        rect: Rect,
    },
    QuoteBar {
        rect: Rect,
    },
    Table(TableLayout),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLayout {
    pub size: Size,
    pub blocks: Vec<BlockLayout>,
}

impl DocumentLayout {
    pub fn tables(&self) -> impl Iterator<Item = &TableLayout> {
        self.blocks.iter().filter_map(|block| match block {
            BlockLayout::Table(table) => Some(table),
            _ => None,
        })
    }
}

/// Stacks document blocks vertically.
pub struct DocumentView<'a> {
    style: &'a TableStyle,
    measure: &'a dyn TextMeasure,
    table_scroll: f32,
    y: f32,
    placed_any: bool,
    suppress_gap: bool,
    out: Vec<BlockLayout>,
}

impl<'a> DocumentView<'a> {
    /// Lay `document` out in a column `width` wide starting at the origin.
    pub fn layout(
        document: &Document,
        style: &'a TableStyle,
        measure: &'a dyn TextMeasure,
        width: f32,
    ) -> DocumentLayout {
        Self::layout_scrolled(document, style, measure, width, 0.0)
    }

    /// Like [`DocumentView::layout`], with every table scrolled
    /// horizontally by `table_scroll` (clamped per table).
    pub fn layout_scrolled(
        document: &Document,
        style: &'a TableStyle,
        measure: &'a dyn TextMeasure,
        width: f32,
        table_scroll: f32,
    ) -> DocumentLayout {
        let mut view = DocumentView {
            style,
            measure,
            table_scroll,
            y: 0.0,
            placed_any: false,
            suppress_gap: false,
            out: Vec::new(),
        };
        view.blocks(&document.blocks, 0.0, width);
        tracing::debug!(blocks = view.out.len(), height = view.y, "laid out document");
        DocumentLayout {
            size: Size::new(width, view.y),
            blocks: view.out,
        }
    }

    /// Vertical gap before the next block, except at the very top and
    /// right after a list marker or quote start.
    fn gap(&mut self) {
        if self.placed_any && !self.suppress_gap {
            self.y += BLOCK_SPACING;
        }
        self.placed_any = true;
        self.suppress_gap = false;
    }

    fn blocks(&mut self, blocks: &[Block], x: f32, width: f32) {
        for block in blocks {
            self.block(block, x, width);
        }
    }

    fn block(&mut self, block: &Block, x: f32, width: f32) {
        match block {
            Block::Paragraph(content) => {
                self.text(TextRole::Paragraph, &Inline::plain_text(content), x, width, true);
            }
            Block::Heading { level, content } => {
                let role = TextRole::Heading { level: *level };
                self.text(role, &Inline::plain_text(content), x, width, true);
            }
            Block::CodeBlock { content, .. } => self.code(content, x, width),
            Block::HtmlBlock(html) => {
                self.text(TextRole::Html, html.trim_end_matches('\n'), x, width, false);
            }
            Block::ThematicBreak => {
                self.gap();
                self.out.push(BlockLayout::Rule {
                    rect: Rect::new(x, self.y + RULE_MARGIN, width, 1.0),
                });
                self.y += RULE_MARGIN * 2.0 + 1.0;
            }
            Block::BlockQuote(children) => {
                self.gap();
                let top = self.y;
                self.suppress_gap = true;
                let indent = QUOTE_BAR_WIDTH + QUOTE_GAP;
                self.blocks(children, x + indent, width - indent);
                self.suppress_gap = false;
                self.out.push(BlockLayout::QuoteBar {
                    rect: Rect::new(x, top, QUOTE_BAR_WIDTH, self.y - top),
                });
            }
            Block::List { start, items } => {
                let markers: Vec<String> = (0..items.len() as u64)
                    .map(|i| match start {
                        Some(n) => format!("{}. ", n + i),
                        None => "\u{00B7} ".to_string(),
                    })
                    .collect();
                let indent = markers
                    .iter()
                    .map(|m| self.measure.line_width(m))
                    .fold(0.0, f32::max);
                for (marker, item) in markers.into_iter().zip(items) {
                    self.gap();
                    self.out.push(BlockLayout::Text {
                        role: TextRole::ListMarker,
                        frame: Rect::new(x, self.y, indent, self.measure.line_height()),
                        background: None,
                        lines: vec![TextLine {
                            origin: Point::new(x, self.y),
                            text: marker,
                        }],
                    });
                    let top = self.y;
                    self.suppress_gap = true;
                    self.blocks(item, x + indent, width - indent);
                    self.suppress_gap = false;
                    // An empty item still takes one line.
                    self.y = self.y.max(top + self.measure.line_height());
                }
            }
            Block::Table {
                column_alignments,
                rows,
            } => {
                self.gap();
                let table = TableView::new(column_alignments, rows, self.style).layout(
                    self.measure,
                    Point::new(x, self.y),
                    width,
                    self.table_scroll,
                );
                self.y += table.height();
                self.out.push(BlockLayout::Table(table));
            }
        }
    }

    fn text(&mut self, role: TextRole, text: &str, x: f32, width: f32, wrap: bool) {
        self.gap();
        let lines = if wrap {
            self.measure.wrap(text, width)
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        let frame = self.lines(role, lines, x, None);
        self.y = frame.max_y();
    }

    fn code(&mut self, content: &str, x: f32, width: f32) {
        self.gap();
        let padding = Padding::new(4.0, 8.0, 4.0, 8.0);
        let lines: Vec<String> = content.trim_end_matches('\n').split('\n').map(str::to_string).collect();
        let height = lines.len() as f32 * self.measure.line_height() + padding.vertical();
        let background = Rect::new(x, self.y, width, height);
        self.y += padding.top;
        self.lines(TextRole::Code, lines, x + padding.left, Some(background));
        self.y = background.max_y();
    }

    /// Push `lines` starting at the current y and return their frame.
    fn lines(&mut self, role: TextRole, lines: Vec<String>, x: f32, background: Option<Rect>) -> Rect {
        let line_height = self.measure.line_height();
        let top = self.y;
        let mut width = 0.0f32;
        let lines: Vec<TextLine> = lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                width = width.max(self.measure.line_width(&text));
                TextLine {
                    origin: Point::new(x, top + i as f32 * line_height),
                    text,
                }
            })
            .collect();
        let frame = Rect::new(x, top, width, lines.len() as f32 * line_height);
        self.out.push(BlockLayout::Text {
            role,
            frame,
            background,
            lines,
        });
        frame
    }
}
