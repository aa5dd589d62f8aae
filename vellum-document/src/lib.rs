//! Vellum document model.
//!
//! Turns CommonMark + GFM text into the block/inline tree consumed by the
//! `vellum` layout engine. Parsing is delegated to pulldown-cmark; this crate
//! only shapes its events into [`Document`] and normalizes tables into rows of
//! [`RawTableCell`]s with explicit spans.
//!
//! ```
//! use vellum_document::{parse, Block};
//!
//! let doc = parse("| a | b |\n|---|---|\n| 1 | << |\n");
//! let Block::Table { rows, .. } = &doc.blocks[0] else { unreachable!() };
//! assert_eq!(rows[1].cells[0].colspan, 2);
//! assert_eq!(rows[1].cells[1].colspan, 0);
//! ```

pub mod ast;
pub mod parser;
pub mod spans;

pub use ast::{
    Block, Document, Inline, RawTableCell, RawTableColumnAlignment, RawTableRow, TableRef,
};
pub use parser::parse;
