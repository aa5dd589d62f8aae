//! Layout system for Vellum.
//!
//! Provides the grid placement model, the per-pass anchor arena, text
//! measurement and the horizontal scroll viewport. Layout is a full
//! recompute on every pass; nothing here caches between passes.
//!
//! # Architecture
//!
//! ```text
//! Grid::arrange -> LayoutPass::anchor per cell -> resolve -> decorations
//! ```

pub mod grid;
pub mod length;
pub mod pass;
pub mod scroll;
pub mod text;

pub use grid::{
    Grid, GridAlignment, GridArrangement, GridContentMode, GridFlow, GridItem, GridPlacement,
    GridSpan, GridStart, GridTrack,
};
pub use length::{Padding, BASE_FONT_SIZE, BLOCK_SPACING, CHAR_WIDTH, LINE_HEIGHT};
pub use pass::{Anchor, AnchorResolver, Decoration, LayoutPass, PassId};
pub use scroll::HorizontalScroll;
pub use text::{display_width, MonospaceMeasure, TextMeasure};
