//! Vellum: grid layout and decoration engine for Markdown tables.
//!
//! Vellum lays out parsed Markdown (see `vellum-document`) as positioned
//! geometry. The interesting part is tables:
//! - A track-based grid places cells with spans and per-column alignment
//! - Every placed cell publishes an anchor into a per-pass arena
//! - The anchors are reduced into row and column extents ([`TableBounds`])
//! - Borders and backgrounds are derived from those extents and the spans
//!
//! # Usage
//!
//! ```
//! use vellum::{MonospaceMeasure, Point, TableStyle, TableView};
//! use vellum_document::{parse, Block};
//!
//! let doc = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
//! let Block::Table { column_alignments, rows } = &doc.blocks[0] else { unreachable!() };
//! let style = TableStyle::default();
//! let layout = TableView::new(column_alignments, rows, &style)
//!     .layout(&MonospaceMeasure::default(), Point::ORIGIN, 600.0, 0.0);
//! assert_eq!(layout.cells.len(), 4);
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod table;

pub use document::{BlockLayout, DocumentLayout, DocumentView, TextLine, TextRole};
pub use error::StyleError;
pub use layout::{
    AnchorResolver, Decoration, Grid, GridAlignment, GridSpan, GridStart, GridTrack,
    HorizontalScroll, LayoutPass, MonospaceMeasure, TextMeasure,
};
pub use primitives::{Color, Point, Rect, Size};
pub use table::{
    CellIndex, TableBackgroundStyle, TableBorderSelector, TableBorderStyle, TableBounds,
    TableLayout, TableStyle, TableStyleConfig, TableView,
};
