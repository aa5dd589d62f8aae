//! CommonMark + GFM front end.
//!
//! Uses pulldown-cmark for parsing and folds its event stream into the
//! block/inline tree of [`crate::ast`].

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::ast::{Block, Document, Inline, RawTableCell, RawTableColumnAlignment, RawTableRow};
use crate::spans;

/// Parse Markdown text into a [`Document`].
///
/// CommonMark has no invalid input, so this never fails.
pub fn parse(text: &str) -> Document {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(text, options);
    let mut builder = DocumentBuilder::new();
    builder.build(parser);
    builder.finish()
}

/// Open block containers, innermost last.
enum BlockFrame {
    Root(Vec<Block>),
    BlockQuote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item(Vec<Block>),
    Table(TableState),
}

struct TableState {
    column_alignments: Vec<RawTableColumnAlignment>,
    rows: Vec<RawTableRow>,
    /// Cells of the row being read
    current_row: Vec<RawTableCell>,
}

/// What an open inline frame turns into when it closes.
enum InlineKind {
    Paragraph,
    /// Text directly inside a tight list item (no paragraph tag)
    Implicit,
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, title: String },
    TableCell,
}

struct InlineFrame {
    kind: InlineKind,
    children: Vec<Inline>,
}

/// State tracking for tree construction
struct DocumentBuilder {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineFrame>,
    /// Info string and content of the open code block
    code_block: Option<(Option<String>, String)>,
    /// Content of the open HTML block
    html_block: Option<String>,
}

impl DocumentBuilder {
    fn new() -> Self {
        Self {
            blocks: vec![BlockFrame::Root(Vec::new())],
            inlines: Vec::new(),
            code_block: None,
            html_block: None,
        }
    }

    fn build(&mut self, parser: Parser) {
        for event in parser {
            match event {
                Event::Start(tag) => self.start_tag(tag),
                Event::End(tag) => self.end_tag(tag),
                Event::Text(text) => self.text(&text),
                Event::Code(code) => self.push_inline(Inline::Code(code.to_string())),
                Event::Html(html) => self.html(&html),
                Event::InlineHtml(html) => self.push_inline(Inline::Html(html.to_string())),
                Event::SoftBreak => self.push_inline(Inline::SoftBreak),
                Event::HardBreak => self.push_inline(Inline::LineBreak),
                Event::Rule => {
                    self.flush_implicit();
                    self.push_block(Block::ThematicBreak);
                }
                Event::TaskListMarker(checked) => {
                    let marker = if checked { "[x] " } else { "[ ] " };
                    self.push_inline(Inline::Text(marker.to_string()));
                }
                _ => {}
            }
        }
    }

    fn finish(mut self) -> Document {
        self.flush_implicit();
        // Unclosed frames only happen on truncated event streams; fold them
        // into their parents so no content is lost.
        while self.blocks.len() > 1 {
            self.close_block_frame();
        }
        match self.blocks.pop() {
            Some(BlockFrame::Root(blocks)) => Document::new(blocks),
            _ => Document::default(),
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                self.flush_implicit();
                self.open_inline(InlineKind::Paragraph);
            }
            Tag::Heading { level, .. } => {
                self.flush_implicit();
                let level = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
                self.open_inline(InlineKind::Heading(level));
            }
            Tag::BlockQuote(_) => {
                self.flush_implicit();
                self.blocks.push(BlockFrame::BlockQuote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_implicit();
                let info = match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.to_string()),
                    _ => None,
                };
                self.code_block = Some((info, String::new()));
            }
            Tag::HtmlBlock => {
                self.flush_implicit();
                self.html_block = Some(String::new());
            }
            Tag::List(start) => {
                self.flush_implicit();
                self.blocks.push(BlockFrame::List { start, items: Vec::new() });
            }
            Tag::Item => {
                self.blocks.push(BlockFrame::Item(Vec::new()));
            }
            Tag::Table(alignments) => {
                self.flush_implicit();
                self.blocks.push(BlockFrame::Table(TableState {
                    column_alignments: alignments.into_iter().map(Into::into).collect(),
                    rows: Vec::new(),
                    current_row: Vec::new(),
                }));
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(BlockFrame::Table(table)) = self.blocks.last_mut() {
                    table.current_row.clear();
                }
            }
            Tag::TableCell => self.open_inline(InlineKind::TableCell),
            Tag::Emphasis => self.open_inline(InlineKind::Emphasis),
            Tag::Strong => self.open_inline(InlineKind::Strong),
            Tag::Strikethrough => self.open_inline(InlineKind::Strikethrough),
            Tag::Link { dest_url, title, .. } => self.open_inline(InlineKind::Link {
                url: dest_url.to_string(),
                title: title.to_string(),
            }),
            Tag::Image { dest_url, title, .. } => self.open_inline(InlineKind::Image {
                url: dest_url.to_string(),
                title: title.to_string(),
            }),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.close_inline(),
            TagEnd::TableCell => self.close_table_cell(),
            TagEnd::TableHead => self.close_table_row(true),
            TagEnd::TableRow => self.close_table_row(false),
            TagEnd::CodeBlock => {
                if let Some((info, content)) = self.code_block.take() {
                    self.push_block(Block::CodeBlock { info, content });
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html_block.take() {
                    self.push_block(Block::HtmlBlock(html));
                }
            }
            TagEnd::BlockQuote(_) | TagEnd::List(_) | TagEnd::Item | TagEnd::Table => {
                self.flush_implicit();
                self.close_block_frame();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, content)) = self.code_block.as_mut() {
            content.push_str(text);
            return;
        }
        self.push_inline(Inline::Text(text.to_string()));
    }

    fn html(&mut self, html: &str) {
        match self.html_block.as_mut() {
            Some(content) => content.push_str(html),
            None => self.push_inline(Inline::Html(html.to_string())),
        }
    }

    // =====================================================================
    // Inline frames
    // =====================================================================

    fn open_inline(&mut self, kind: InlineKind) {
        self.inlines.push(InlineFrame { kind, children: Vec::new() });
    }

    fn push_inline(&mut self, inline: Inline) {
        if self.inlines.is_empty() {
            self.open_inline(InlineKind::Implicit);
        }
        if let Some(frame) = self.inlines.last_mut() {
            frame.children.push(inline);
        }
    }

    fn close_inline(&mut self) {
        let Some(frame) = self.inlines.pop() else {
            return;
        };
        let children = frame.children;
        match frame.kind {
            InlineKind::Paragraph | InlineKind::Implicit => {
                if !children.is_empty() {
                    self.push_block(Block::Paragraph(children));
                }
            }
            InlineKind::Heading(level) => self.push_block(Block::Heading { level, content: children }),
            InlineKind::Emphasis => self.push_inline(Inline::Emphasis(children)),
            InlineKind::Strong => self.push_inline(Inline::Strong(children)),
            InlineKind::Strikethrough => self.push_inline(Inline::Strikethrough(children)),
            InlineKind::Link { url, title } => self.push_inline(Inline::Link { url, title, children }),
            InlineKind::Image { url, title } => self.push_inline(Inline::Image { url, title, alt: children }),
            InlineKind::TableCell => {
                // Closed through close_table_cell; reaching here means the
                // tag pairing was broken, keep the text as a paragraph.
                if !children.is_empty() {
                    self.push_block(Block::Paragraph(children));
                }
            }
        }
    }

    /// Close a run of loose inline content in a tight list item.
    fn flush_implicit(&mut self) {
        if matches!(self.inlines.last(), Some(InlineFrame { kind: InlineKind::Implicit, .. })) {
            self.close_inline();
        }
    }

    // =====================================================================
    // Tables
    // =====================================================================

    fn close_table_cell(&mut self) {
        let content = match self.inlines.pop() {
            Some(frame) => frame.children,
            None => Vec::new(),
        };
        if let Some(BlockFrame::Table(table)) = self.blocks.last_mut() {
            let column_index = table.current_row.len();
            table.current_row.push(RawTableCell {
                column_index,
                colspan: 1,
                rowspan: 1,
                content,
            });
        }
    }

    fn close_table_row(&mut self, is_header: bool) {
        if let Some(BlockFrame::Table(table)) = self.blocks.last_mut() {
            let cells = std::mem::take(&mut table.current_row);
            table.rows.push(RawTableRow { is_header, cells });
        }
    }

    // =====================================================================
    // Block frames
    // =====================================================================

    fn push_block(&mut self, block: Block) {
        match self.blocks.last_mut() {
            Some(BlockFrame::Root(blocks))
            | Some(BlockFrame::BlockQuote(blocks))
            | Some(BlockFrame::Item(blocks)) => blocks.push(block),
            Some(BlockFrame::List { items, .. }) => items.push(vec![block]),
            Some(BlockFrame::Table(_)) | None => {
                tracing::trace!("dropping block outside of a block container");
            }
        }
    }

    fn close_block_frame(&mut self) {
        let Some(frame) = self.blocks.pop() else {
            return;
        };
        match frame {
            BlockFrame::Root(blocks) => {
                // Never popped while parsing; restore it.
                self.blocks.push(BlockFrame::Root(blocks));
            }
            BlockFrame::BlockQuote(blocks) => self.push_block(Block::BlockQuote(blocks)),
            BlockFrame::List { start, items } => self.push_block(Block::List { start, items }),
            BlockFrame::Item(blocks) => match self.blocks.last_mut() {
                Some(BlockFrame::List { items, .. }) => items.push(blocks),
                _ => {
                    for block in blocks {
                        self.push_block(block);
                    }
                }
            },
            BlockFrame::Table(mut table) => {
                spans::apply_span_markers(&mut table.rows);
                tracing::trace!(
                    rows = table.rows.len(),
                    columns = table.column_alignments.len(),
                    "parsed table"
                );
                self.push_block(Block::Table {
                    column_alignments: table.column_alignments,
                    rows: table.rows,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_paragraph_and_heading() {
        let doc = parse("# Title\n\nHello *world*");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading { level: 1, content: vec![text("Title")] },
                Block::Paragraph(vec![text("Hello "), Inline::Emphasis(vec![text("world")])]),
            ]
        );
    }

    #[test]
    fn test_tight_list_items_get_paragraphs() {
        let doc = parse("- one\n- two\n");
        let Block::List { start, items } = &doc.blocks[0] else {
            panic!("expected list, got {:?}", doc.blocks[0]);
        };
        assert_eq!(*start, None);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], vec![Block::Paragraph(vec![text("two")])]);
    }

    #[test]
    fn test_ordered_list_start() {
        let doc = parse("3. three\n4. four\n");
        assert!(matches!(&doc.blocks[0], Block::List { start: Some(3), items } if items.len() == 2));
    }

    #[test]
    fn test_code_block_keeps_content() {
        let doc = parse("```rust\nfn main() {}\n```\n");
        assert_eq!(
            doc.blocks,
            vec![Block::CodeBlock {
                info: Some("rust".to_string()),
                content: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn test_block_quote_nests() {
        let doc = parse("> quoted\n\nafter");
        assert_eq!(
            doc.blocks,
            vec![
                Block::BlockQuote(vec![Block::Paragraph(vec![text("quoted")])]),
                Block::Paragraph(vec![text("after")]),
            ]
        );
    }

    #[test]
    fn test_table_header_and_alignment() {
        let doc = parse("| a | b | c |\n|:--|:-:|--:|\n| 1 | 2 | 3 |\n");
        let Block::Table { column_alignments, rows } = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks[0]);
        };
        assert_eq!(
            column_alignments,
            &vec![
                RawTableColumnAlignment::Left,
                RawTableColumnAlignment::Center,
                RawTableColumnAlignment::Right,
            ]
        );
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_header);
        assert!(!rows[1].is_header);
        assert_eq!(rows[1].cells[2].column_index, 2);
        assert_eq!(rows[1].cells[2].plain_text(), "3");
        assert!(rows.iter().flat_map(|r| &r.cells).all(|c| c.colspan == 1 && c.rowspan == 1));
    }

    #[test]
    fn test_thematic_break() {
        let doc = parse("a\n\n---\n\nb");
        assert_eq!(doc.blocks[1], Block::ThematicBreak);
    }
}
