//! Table view driver.
//!
//! Builds one fit track per row, places every real cell at its explicit
//! `(column, row)` start with its span and column alignment, lays the grid
//! out at intrinsic size inside a horizontal scroll viewport, then
//! aggregates the published anchors into [`TableBounds`] and derives the
//! background and border decorations from it.

use serde::Serialize;
use vellum_document::{RawTableColumnAlignment, RawTableRow};

use crate::layout::grid::{
    Grid, GridAlignment, GridContentMode, GridFlow, GridItem, GridSpan, GridStart, GridTrack,
};
use crate::layout::pass::{Decoration, LayoutPass};
use crate::layout::scroll::HorizontalScroll;
use crate::layout::text::TextMeasure;
use crate::primitives::{Point, Rect, Size};
use crate::table::background::background_rectangles;
use crate::table::border::border_decorations;
use crate::table::bounds::{CellAnchors, ColumnExtent, RowExtent, TableBounds};
use crate::table::index::CellIndex;
use crate::table::style::TableStyle;

/// Map a declared column alignment; `None` means "use the grid default".
pub fn grid_alignment(alignment: RawTableColumnAlignment) -> Option<GridAlignment> {
    match alignment {
        RawTableColumnAlignment::None => None,
        RawTableColumnAlignment::Left => Some(GridAlignment::Leading),
        RawTableColumnAlignment::Center => Some(GridAlignment::Center),
        RawTableColumnAlignment::Right => Some(GridAlignment::Trailing),
    }
}

/// A table ready to be laid out.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    column_alignments: &'a [RawTableColumnAlignment],
    rows: &'a [RawTableRow],
    style: &'a TableStyle,
}

/// Geometry of one placed cell, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellLayout {
    pub index: CellIndex,
    pub label: String,
    pub span: GridSpan,
    pub alignment: GridAlignment,
    /// Full area of the cell including padding.
    pub frame: Rect,
    /// Where the first line of text starts.
    pub text_origin: Point,
    pub text: String,
}

/// Result of [`TableView::layout`]. All rectangles are in document
/// coordinates with the horizontal scroll offset applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLayout {
    pub origin: Point,
    /// Size of the whole grid, independent of the viewport.
    pub content_size: Size,
    /// The visible part of the table.
    pub viewport: Rect,
    pub scroll: HorizontalScroll,
    /// The table rectangle reported by the aggregated bounds.
    pub bounds: Rect,
    pub rows: Vec<RowExtent>,
    pub columns: Vec<ColumnExtent>,
    pub cells: Vec<CellLayout>,
    /// Drawn behind the cells.
    pub backgrounds: Vec<Decoration>,
    /// Drawn above the cells.
    pub borders: Vec<Decoration>,
}

impl TableLayout {
    fn empty(origin: Point) -> Self {
        Self {
            origin,
            content_size: Size::ZERO,
            viewport: Rect::from_origin_size(origin, Size::ZERO),
            scroll: HorizontalScroll::default(),
            bounds: Rect::NULL,
            rows: Vec::new(),
            columns: Vec::new(),
            cells: Vec::new(),
            backgrounds: Vec::new(),
            borders: Vec::new(),
        }
    }

    /// Total height the table occupies in the document.
    pub fn height(&self) -> f32 {
        self.viewport.height
    }
}

impl<'a> TableView<'a> {
    pub fn new(
        column_alignments: &'a [RawTableColumnAlignment],
        rows: &'a [RawTableRow],
        style: &'a TableStyle,
    ) -> Self {
        Self {
            column_alignments,
            rows,
            style,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_alignments.len()
    }

    /// One fit track per row.
    pub fn tracks(&self) -> Vec<GridTrack> {
        vec![GridTrack::Fit; self.row_count()]
    }

    /// Lay the table out with its top-left corner at `origin`.
    ///
    /// `scroll_offset` is the requested horizontal scroll; it is clamped to
    /// what the content allows.
    pub fn layout(
        &self,
        measure: &dyn TextMeasure,
        origin: Point,
        available_width: f32,
        scroll_offset: f32,
    ) -> TableLayout {
        let row_count = self.row_count();
        let column_count = self.column_count();
        if row_count == 0 || column_count == 0 {
            tracing::debug!(row_count, column_count, "empty table");
            return TableLayout::empty(origin);
        }

        let padding = self.style.cell.padding;
        let border_width = self.style.border.width;

        // Column-major, matching the column flow of the grid.
        let mut indices = Vec::new();
        let mut texts = Vec::new();
        let mut items = Vec::new();
        for column in 0..column_count {
            let alignment = grid_alignment(self.column_alignments[column]);
            for row in 0..row_count {
                let Some(cell) = self.rows[row].cells.get(column) else {
                    tracing::trace!(row, column, "row is short; no cell to place");
                    continue;
                };
                if cell.is_placeholder() {
                    continue;
                }
                let text = cell.plain_text();
                let size = padding.outer_size(measure.measure(&text));
                items.push(
                    GridItem::new(size)
                        .span(GridSpan::new(cell.colspan as i64, cell.rowspan as i64))
                        .start(GridStart::at(column, row))
                        .alignment(alignment),
                );
                indices.push(CellIndex::new(row, column));
                texts.push(text);
            }
        }

        let grid = Grid::new(self.tracks())
            .flow(GridFlow::Columns)
            .content_mode(GridContentMode::Scroll)
            .spacing(border_width, border_width)
            .padding(border_width)
            .default_alignment(GridAlignment::Leading);
        let arrangement = grid.arrange(&items, Size::new(f32::INFINITY, f32::INFINITY));
        debug_assert_eq!(arrangement.row_count(), row_count, "track count must equal row count");

        let content_size = arrangement.content_size;
        let viewport_width = content_size.width.min(available_width.max(0.0));
        let scroll = HorizontalScroll::new(scroll_offset, content_size.width, viewport_width);
        let content_origin = Point::new(origin.x - scroll.offset, origin.y);

        // Publish every cell's origin slot, then resolve against the grid frame.
        let mut pass = LayoutPass::new(content_origin);
        let mut anchors = CellAnchors::new();
        for (index, placement) in indices.iter().zip(&arrangement.placements) {
            anchors.publish(*index, pass.anchor(placement.origin_slot.translate(content_origin)));
            if placement.span != GridSpan::DEFAULT {
                anchors.publish_region(*index, pass.anchor(placement.region.translate(content_origin)));
            }
        }
        pass.set_frame(Rect::from_origin_size(content_origin, content_size));

        let bounds = TableBounds::aggregate(row_count, column_count, self.rows, &anchors, &pass);
        let backgrounds = background_rectangles(&bounds, &self.style.background)
            .into_iter()
            .map(|d| d.translate(content_origin))
            .collect();
        let borders = border_decorations(&bounds, &self.style.border)
            .into_iter()
            .map(|d| d.translate(content_origin))
            .collect();

        let cells = indices
            .into_iter()
            .zip(texts)
            .zip(&arrangement.placements)
            .map(|((index, text), placement)| {
                let frame = placement.frame.translate(content_origin);
                CellLayout {
                    index,
                    label: index.label(),
                    span: placement.span,
                    alignment: placement.alignment,
                    frame,
                    text_origin: padding.content_origin(frame.origin()),
                    text,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            rows = row_count,
            columns = column_count,
            cells = cells.len(),
            width = content_size.width,
            height = content_size.height,
            scroll = scroll.offset,
            "laid out table"
        );

        TableLayout {
            origin,
            content_size,
            viewport: Rect::new(origin.x, origin.y, viewport_width, content_size.height),
            scroll,
            bounds: bounds.bounds().translate(content_origin),
            rows: bounds.rows().to_vec(),
            columns: bounds.columns().to_vec(),
            cells,
            backgrounds,
            borders,
        }
    }
}

#[cfg(test)]
mod tests {
    use vellum_document::RawTableCell;

    use super::*;
    use crate::layout::text::MonospaceMeasure;
    use crate::table::style::{TableBorderStyle, TableCellStyle};
    use crate::layout::length::Padding;
    use crate::table::background::TableBackgroundStyle;

    fn bare_style() -> TableStyle {
        TableStyle {
            border: TableBorderStyle::default(),
            background: TableBackgroundStyle::clear(),
            cell: TableCellStyle { padding: Padding::all(0.0) },
        }
    }

    fn text_rows(rows: &[&[&str]]) -> Vec<RawTableRow> {
        rows.iter()
            .map(|r| RawTableRow::new(r.iter().enumerate().map(|(i, t)| RawTableCell::text(i, *t)).collect()))
            .collect()
    }

    #[test]
    fn test_alignment_mapping() {
        assert_eq!(grid_alignment(RawTableColumnAlignment::None), None);
        assert_eq!(grid_alignment(RawTableColumnAlignment::Left), Some(GridAlignment::Leading));
        assert_eq!(grid_alignment(RawTableColumnAlignment::Center), Some(GridAlignment::Center));
        assert_eq!(grid_alignment(RawTableColumnAlignment::Right), Some(GridAlignment::Trailing));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let rows = vec![
            RawTableRow::new(vec![RawTableCell::text(0, "ab"), RawTableCell::text(1, "cd")]),
            RawTableRow::new(vec![RawTableCell::text(0, "ef")]),
        ];
        let style = bare_style();
        let alignments = [RawTableColumnAlignment::None; 2];
        let layout = TableView::new(&alignments, &rows, &style).layout(
            &MonospaceMeasure::new(1.0, 1.0),
            Point::ORIGIN,
            f32::INFINITY,
            0.0,
        );
        assert_eq!(layout.cells.len(), 3);
        assert!(layout.cells.iter().all(|c| c.index != CellIndex::new(1, 1)));
    }

    #[test]
    fn test_wide_table_scrolls() {
        let rows = text_rows(&[&["aaaaaaaaaa", "bbbbbbbbbb"]]);
        let style = bare_style();
        let alignments = [RawTableColumnAlignment::None; 2];
        let view = TableView::new(&alignments, &rows, &style);
        let measure = MonospaceMeasure::new(1.0, 1.0);

        // 1 + 10 + 1 + 10 + 1
        let layout = view.layout(&measure, Point::new(5.0, 0.0), 15.0, 100.0);
        assert_eq!(layout.content_size.width, 23.0);
        assert_eq!(layout.viewport, Rect::new(5.0, 0.0, 15.0, 3.0));
        assert_eq!(layout.scroll.offset, 8.0);
        assert_eq!(layout.cells[0].frame.x, 5.0 - 8.0 + 1.0);
        assert_eq!(layout.bounds, Rect::new(-3.0, 0.0, 23.0, 3.0));
    }

    #[test]
    fn test_center_alignment_inside_spanning_width() {
        let rows = text_rows(&[&["a", "b"], &["wide", "c"]]);
        let style = bare_style();
        let alignments = [RawTableColumnAlignment::Center, RawTableColumnAlignment::None];
        let layout = TableView::new(&alignments, &rows, &style).layout(
            &MonospaceMeasure::new(1.0, 1.0),
            Point::ORIGIN,
            f32::INFINITY,
            0.0,
        );
        // Column 0 is 4 wide; "a" is centered in it.
        assert_eq!(layout.cells[0].frame, Rect::new(2.5, 1.0, 1.0, 1.0));
        assert_eq!(layout.cells[0].alignment, GridAlignment::Center);
        assert_eq!(layout.cells[2].alignment, GridAlignment::Leading);
    }

    #[test]
    fn test_empty_table() {
        let style = bare_style();
        let layout = TableView::new(&[], &[], &style).layout(
            &MonospaceMeasure::default(),
            Point::ORIGIN,
            100.0,
            0.0,
        );
        assert!(layout.cells.is_empty());
        assert_eq!(layout.height(), 0.0);
    }
}
