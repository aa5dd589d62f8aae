//! Table geometry aggregated from the cells of one layout pass.
//!
//! Every placed cell publishes an [`Anchor`] under its [`CellIndex`]. After
//! the pass, [`TableBounds::aggregate`] resolves the anchors and reduces them
//! into per-row `(min_y, height)` and per-column `(min_x, width)` extents.
//! The reduction is a min/max fold, so publication order never matters and
//! partial folds can be combined with [`TrackExtents::merge`].

use std::collections::HashMap;

use serde::Serialize;
use vellum_document::RawTableRow;

use crate::layout::pass::{Anchor, AnchorResolver};
use crate::primitives::Rect;
use crate::table::index::CellIndex;

/// Sentinel coordinate of a track no cell has reported into.
const UNSET: f32 = f32::MAX;

/// Anchors published by the cells of one layout pass.
///
/// Every cell publishes its origin slot. Spanning cells also publish the
/// full region they cover, since a track made only of placeholders never
/// receives a measurement of its own.
#[derive(Debug, Clone, Default)]
pub struct CellAnchors {
    anchors: HashMap<CellIndex, Anchor>,
    regions: HashMap<CellIndex, Anchor>,
}

impl CellAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the anchor of `index`. Each index publishes at most once per pass.
    pub fn publish(&mut self, index: CellIndex, anchor: Anchor) {
        let previous = self.anchors.insert(index, anchor);
        debug_assert!(previous.is_none(), "cell {index} published twice in one pass");
    }

    /// Record the whole area covered by the spanning cell at `index`.
    pub fn publish_region(&mut self, index: CellIndex, anchor: Anchor) {
        let previous = self.regions.insert(index, anchor);
        debug_assert!(previous.is_none(), "cell {index} published its region twice in one pass");
    }

    pub fn get(&self, index: CellIndex) -> Option<Anchor> {
        self.anchors.get(&index).copied()
    }

    pub fn region(&self, index: CellIndex) -> Option<Anchor> {
        self.regions.get(&index).copied()
    }

    /// Fold another set of anchors into this one; on conflict `other` wins.
    pub fn merge(&mut self, other: CellAnchors) {
        self.anchors.extend(other.anchors);
        self.regions.extend(other.regions);
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Vertical extent of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowExtent {
    pub min_y: f32,
    pub height: f32,
}

impl RowExtent {
    pub const UNSET: Self = Self { min_y: UNSET, height: 0.0 };

    /// Whether any cell reported into this row.
    pub fn is_set(&self) -> bool {
        self.min_y < UNSET
    }

    fn include(&mut self, rect: &Rect) {
        self.min_y = self.min_y.min(rect.min_y());
        self.height = self.height.max(rect.height);
    }

    fn merge(self, other: Self) -> Self {
        Self {
            min_y: self.min_y.min(other.min_y),
            height: self.height.max(other.height),
        }
    }
}

/// Horizontal extent of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnExtent {
    pub min_x: f32,
    pub width: f32,
}

impl ColumnExtent {
    pub const UNSET: Self = Self { min_x: UNSET, width: 0.0 };

    /// Whether any cell reported into this column.
    pub fn is_set(&self) -> bool {
        self.min_x < UNSET
    }

    fn include(&mut self, rect: &Rect) {
        self.min_x = self.min_x.min(rect.min_x());
        self.width = self.width.max(rect.width);
    }

    fn merge(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            width: self.width.max(other.width),
        }
    }
}

/// Accumulator for row and column extents.
///
/// `include` and `merge` are commutative and associative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackExtents {
    pub rows: Vec<RowExtent>,
    pub columns: Vec<ColumnExtent>,
}

impl TrackExtents {
    pub fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            rows: vec![RowExtent::UNSET; row_count],
            columns: vec![ColumnExtent::UNSET; column_count],
        }
    }

    /// Grow the extents of `index`'s row and column to cover `rect`.
    pub fn include(&mut self, index: CellIndex, rect: Rect) {
        debug_assert!(
            index.row < self.rows.len() && index.column < self.columns.len(),
            "cell {index} outside a {}x{} table",
            self.rows.len(),
            self.columns.len()
        );
        let (Some(row), Some(column)) = (self.rows.get_mut(index.row), self.columns.get_mut(index.column))
        else {
            return;
        };
        row.include(&rect);
        column.include(&rect);
    }

    /// Combine two partial folds.
    pub fn merge(mut self, other: TrackExtents) -> TrackExtents {
        if self.rows.len() < other.rows.len() {
            self.rows.resize(other.rows.len(), RowExtent::UNSET);
        }
        if self.columns.len() < other.columns.len() {
            self.columns.resize(other.columns.len(), ColumnExtent::UNSET);
        }
        for (mine, theirs) in self.rows.iter_mut().zip(other.rows) {
            *mine = mine.merge(theirs);
        }
        for (mine, theirs) in self.columns.iter_mut().zip(other.columns) {
            *mine = mine.merge(theirs);
        }
        self
    }
}

/// Read-only geometry of a laid-out table.
///
/// Built once per layout pass and discarded after its decorations are drawn.
#[derive(Debug, Clone, Serialize)]
pub struct TableBounds<'a> {
    bounds: Rect,
    rows: Vec<RowExtent>,
    columns: Vec<ColumnExtent>,
    /// Resolved regions of spanning cells.
    #[serde(skip)]
    regions: HashMap<CellIndex, Rect>,
    #[serde(skip)]
    table_rows: &'a [RawTableRow],
}

impl<'a> TableBounds<'a> {
    /// Build bounds from already folded extents.
    pub fn new(bounds: Rect, extents: TrackExtents, table_rows: &'a [RawTableRow]) -> Self {
        Self {
            bounds,
            rows: extents.rows,
            columns: extents.columns,
            regions: HashMap::new(),
            table_rows,
        }
    }

    /// Resolve every published anchor and reduce the results into extents.
    ///
    /// Cells without an anchor, or whose anchor no longer resolves, are
    /// skipped. The table rectangle is the resolver's local frame.
    pub fn aggregate(
        row_count: usize,
        column_count: usize,
        table_rows: &'a [RawTableRow],
        anchors: &CellAnchors,
        resolver: &impl AnchorResolver,
    ) -> Self {
        let mut extents = TrackExtents::new(row_count, column_count);
        let mut regions = HashMap::new();

        for row in 0..row_count {
            for column in 0..column_count {
                let index = CellIndex::new(row, column);
                let Some(anchor) = anchors.get(index) else {
                    continue;
                };
                let placeholder = table_rows
                    .get(row)
                    .and_then(|r| r.cells.get(column))
                    .is_some_and(|cell| cell.is_placeholder());
                debug_assert!(!placeholder, "placeholder cell {index} was placed");
                if placeholder {
                    continue;
                }
                let Some(rect) = resolver.resolve(anchor) else {
                    tracing::trace!(cell = %index, "anchor did not resolve");
                    continue;
                };
                extents.include(index, rect);
                if let Some(region) = anchors.region(index).and_then(|a| resolver.resolve(a)) {
                    regions.insert(index, region);
                }
            }
        }

        let mut bounds = Self::new(resolver.local_frame(), extents, table_rows);
        bounds.regions = regions;
        bounds
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The whole table rectangle.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn rows(&self) -> &[RowExtent] {
        &self.rows
    }

    pub fn columns(&self) -> &[ColumnExtent] {
        &self.columns
    }

    /// The slot at `(row, column)`: column's x extent by row's y extent.
    ///
    /// Indices must be in range; out of range yields [`Rect::NULL`] in
    /// release builds.
    pub fn cell_bounds(&self, row: usize, column: usize) -> Rect {
        debug_assert!(
            row < self.row_count() && column < self.column_count(),
            "cell ({row}, {column}) outside a {}x{} table",
            self.row_count(),
            self.column_count()
        );
        match (self.rows.get(row), self.columns.get(column)) {
            (Some(r), Some(c)) => Rect::new(c.min_x, r.min_y, c.width, r.height),
            _ => Rect::NULL,
        }
    }

    /// Whether both tracks of `(row, column)` received a measurement.
    pub fn is_measured(&self, row: usize, column: usize) -> bool {
        self.rows.get(row).is_some_and(RowExtent::is_set)
            && self.columns.get(column).is_some_and(ColumnExtent::is_set)
    }

    /// Union of every measured slot in `row`; null when there are none.
    pub fn bounds_for_row(&self, row: usize) -> Rect {
        (0..self.column_count())
            .filter(|&column| self.is_measured(row, column))
            .map(|column| self.cell_bounds(row, column))
            .fold(Rect::NULL, |acc, rect| acc.union(&rect))
    }

    /// Union of every measured slot in `column`; null when there are none.
    pub fn bounds_for_column(&self, column: usize) -> Rect {
        (0..self.row_count())
            .filter(|&row| self.is_measured(row, column))
            .map(|row| self.cell_bounds(row, column))
            .fold(Rect::NULL, |acc, rect| acc.union(&rect))
    }

    /// Area covered by the cell at `(row, column)`.
    ///
    /// A published region wins; otherwise this is the union of the measured
    /// slots the cell spans, clamped to the table.
    pub fn span_bounds(&self, row: usize, column: usize) -> Rect {
        if let Some(region) = self.regions.get(&CellIndex::new(row, column)) {
            return *region;
        }
        let (colspan, rowspan) = self.spans(row, column).unwrap_or((1, 1));
        let row_end = (row + rowspan.max(1)).min(self.row_count());
        let column_end = (column + colspan.max(1)).min(self.column_count());
        let mut rect = Rect::NULL;
        for r in row..row_end {
            for c in column..column_end {
                if self.is_measured(r, c) {
                    rect = rect.union(&self.cell_bounds(r, c));
                }
            }
        }
        rect
    }

    /// True when `(row, column)` is a cell origin rather than a placeholder
    /// covered by a span. Missing cells have no background.
    pub fn has_background(&self, row: usize, column: usize) -> bool {
        self.spans(row, column)
            .is_some_and(|(colspan, rowspan)| colspan > 0 && rowspan > 0)
    }

    /// True only for unspanned 1x1 cells. Missing cells have no border.
    pub fn has_border(&self, row: usize, column: usize) -> bool {
        self.spans(row, column)
            .is_some_and(|(colspan, rowspan)| colspan == 1 && rowspan == 1)
    }

    fn spans(&self, row: usize, column: usize) -> Option<(usize, usize)> {
        let cell = self.table_rows.get(row)?.cells.get(column)?;
        Some((cell.colspan, cell.rowspan))
    }
}
