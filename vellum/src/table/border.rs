//! Border selection.
//!
//! Inside dividers follow the adjacency rule: the seam between two
//! neighbouring slots gets a divider when either side is an unspanned 1x1
//! cell. A spanning cell therefore draws nothing through its own area while
//! its unspanned neighbours still outline it. Each divider is derived from
//! the slot grown by the border width, so it sits in the spacing between
//! tracks. Per-slot segments are then coalesced so every seam is emitted
//! once.

use serde::{Deserialize, Serialize};

use crate::layout::pass::Decoration;
use crate::primitives::Rect;
use crate::table::bounds::TableBounds;
use crate::table::style::TableBorderStyle;

/// Which borders of a table are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableBorderSelector {
    /// Only the outer rectangle.
    OutsideBorders,
    /// Only the dividers between cells.
    InsideBorders,
    /// Outer rectangle plus dividers.
    #[default]
    AllBorders,
}

impl TableBorderSelector {
    /// Rectangles to draw for `bounds`.
    ///
    /// For [`TableBorderSelector::AllBorders`] the inside dividers come
    /// first, followed by the outer rectangle.
    pub fn rectangles(&self, bounds: &TableBounds<'_>, border_width: f32) -> Vec<Rect> {
        match self {
            Self::OutsideBorders => outside_rectangles(bounds),
            Self::InsideBorders => inside_rectangles(bounds, border_width),
            Self::AllBorders => {
                let mut rects = inside_rectangles(bounds, border_width);
                rects.extend(outside_rectangles(bounds));
                rects
            }
        }
    }

    pub fn includes_outside(&self) -> bool {
        matches!(self, Self::OutsideBorders | Self::AllBorders)
    }

    pub fn includes_inside(&self) -> bool {
        matches!(self, Self::InsideBorders | Self::AllBorders)
    }

    /// Whether a divider runs below `(row, column)`.
    ///
    /// False on the last row and in single-row or single-column tables;
    /// otherwise true when this cell or the one below it has a border.
    pub fn has_horizontal_border(bounds: &TableBounds<'_>, row: usize, column: usize) -> bool {
        if is_degenerate(bounds) || row + 1 >= bounds.row_count() {
            return false;
        }
        bounds.has_border(row, column) || bounds.has_border(row + 1, column)
    }

    /// Whether a divider runs right of `(row, column)`.
    ///
    /// False on the last column and in single-row or single-column tables;
    /// otherwise true when this cell or the one to its right has a border.
    pub fn has_vertical_border(bounds: &TableBounds<'_>, row: usize, column: usize) -> bool {
        if is_degenerate(bounds) || column + 1 >= bounds.column_count() {
            return false;
        }
        bounds.has_border(row, column) || bounds.has_border(row, column + 1)
    }
}

/// A table with one row or one column has no interior seams.
fn is_degenerate(bounds: &TableBounds<'_>) -> bool {
    bounds.row_count() < 2 || bounds.column_count() < 2
}

fn outside_rectangles(bounds: &TableBounds<'_>) -> Vec<Rect> {
    vec![bounds.bounds()]
}

fn inside_rectangles(bounds: &TableBounds<'_>, border_width: f32) -> Vec<Rect> {
    let mut horizontal = Seams::default();
    let mut vertical = Seams::default();

    for row in 0..bounds.row_count() {
        for column in 0..bounds.column_count() {
            if !bounds.is_measured(row, column) {
                tracing::trace!(row, column, "no geometry for slot; skipping its dividers");
                continue;
            }
            let slot = bounds.cell_bounds(row, column).inset_by(-border_width, -border_width);

            if TableBorderSelector::has_horizontal_border(bounds, row, column) {
                horizontal.add(
                    Rect::new(slot.min_x(), slot.max_y() - border_width, slot.width, border_width),
                    Axis::Horizontal,
                );
            }
            if TableBorderSelector::has_vertical_border(bounds, row, column) {
                vertical.add(
                    Rect::new(slot.max_x() - border_width, slot.min_y(), border_width, slot.height),
                    Axis::Vertical,
                );
            }
        }
    }

    let mut rects = horizontal.coalesce(Axis::Horizontal);
    rects.extend(vertical.coalesce(Axis::Vertical));
    rects
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// `(position, thickness)` across the axis; collinear segments share it.
    fn key(self, rect: &Rect) -> (u32, u32) {
        match self {
            Axis::Horizontal => (rect.y.to_bits(), rect.height.to_bits()),
            Axis::Vertical => (rect.x.to_bits(), rect.width.to_bits()),
        }
    }

    /// `(start, end)` along the axis.
    fn span(self, rect: &Rect) -> (f32, f32) {
        match self {
            Axis::Horizontal => (rect.min_x(), rect.max_x()),
            Axis::Vertical => (rect.min_y(), rect.max_y()),
        }
    }

    fn with_span(self, rect: Rect, start: f32, end: f32) -> Rect {
        match self {
            Axis::Horizontal => Rect::new(start, rect.y, end - start, rect.height),
            Axis::Vertical => Rect::new(rect.x, start, rect.width, end - start),
        }
    }
}

/// Divider segments grouped by seam, in first-seen order.
#[derive(Debug, Default)]
struct Seams {
    groups: Vec<((u32, u32), Vec<Rect>)>,
}

impl Seams {
    fn add(&mut self, rect: Rect, axis: Axis) {
        let key = axis.key(&rect);
        match self.groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, segments)) => segments.push(rect),
            None => self.groups.push((key, vec![rect])),
        }
    }

    /// Merge touching or overlapping segments of each seam.
    fn coalesce(self, axis: Axis) -> Vec<Rect> {
        let mut out = Vec::new();
        for (_, mut segments) in self.groups {
            segments.sort_by(|a, b| axis.span(a).0.total_cmp(&axis.span(b).0));
            let mut iter = segments.into_iter();
            let Some(first) = iter.next() else {
                continue;
            };
            let (mut start, mut end) = axis.span(&first);
            for segment in iter {
                let (s, e) = axis.span(&segment);
                if s <= end {
                    end = end.max(e);
                } else {
                    out.push(axis.with_span(first, start, end));
                    (start, end) = (s, e);
                }
            }
            out.push(axis.with_span(first, start, end));
        }
        out
    }
}

/// Border decorations for `bounds` in the table's local space.
///
/// Dividers are filled rectangles; the outer border is stroked inside the
/// table rectangle. A zero width or transparent color draws nothing.
pub fn border_decorations(bounds: &TableBounds<'_>, style: &TableBorderStyle) -> Vec<Decoration> {
    if style.width <= 0.0 || style.color.is_transparent() {
        return Vec::new();
    }
    let selector = style.visible_borders;
    let mut decorations = Vec::new();
    if selector.includes_inside() {
        decorations.extend(
            inside_rectangles(bounds, style.width)
                .into_iter()
                .map(|rect| Decoration::SolidRect { rect, color: style.color }),
        );
    }
    if selector.includes_outside() {
        decorations.extend(outside_rectangles(bounds).into_iter().map(|rect| Decoration::StrokedRect {
            rect,
            color: style.color,
            width: style.width,
        }));
    }
    decorations
}

#[cfg(test)]
mod tests {
    use vellum_document::{RawTableCell, RawTableRow};

    use super::*;
    use crate::table::bounds::TrackExtents;
    use crate::table::index::CellIndex;

    fn rows_of(spans: &[&[(usize, usize)]]) -> Vec<RawTableRow> {
        spans
            .iter()
            .map(|row| {
                RawTableRow::new(
                    row.iter()
                        .enumerate()
                        .map(|(i, (c, r))| RawTableCell::text(i, "x").with_span(*c, *r))
                        .collect(),
                )
            })
            .collect()
    }

    /// Uniform `w x h` slots with padding and spacing of `gap`.
    fn uniform<'a>(rows: &'a [RawTableRow], columns: usize, w: f32, h: f32, gap: f32) -> TableBounds<'a> {
        let mut extents = TrackExtents::new(rows.len(), columns);
        for row in 0..rows.len() {
            for column in 0..columns {
                let x = gap + column as f32 * (w + gap);
                let y = gap + row as f32 * (h + gap);
                extents.include(CellIndex::new(row, column), Rect::new(x, y, w, h));
            }
        }
        let width = gap + columns as f32 * (w + gap);
        let height = gap + rows.len() as f32 * (h + gap);
        TableBounds::new(Rect::new(0.0, 0.0, width, height), extents, rows)
    }

    #[test]
    fn test_round_trip_all_borders() {
        let rows = rows_of(&[&[(1, 1); 3], &[(1, 1); 3]]);
        let bounds = uniform(&rows, 3, 3.0, 4.0, 1.0);
        assert_eq!(bounds.rows().iter().map(|r| r.height).collect::<Vec<_>>(), vec![4.0, 4.0]);
        assert_eq!(bounds.columns().iter().map(|c| c.width).collect::<Vec<_>>(), vec![3.0; 3]);

        let rects = TableBorderSelector::AllBorders.rectangles(&bounds, 1.0);
        assert_eq!(
            rects,
            vec![
                Rect::new(0.0, 5.0, 13.0, 1.0),
                Rect::new(4.0, 0.0, 1.0, 11.0),
                Rect::new(8.0, 0.0, 1.0, 11.0),
                Rect::new(0.0, 0.0, 13.0, 11.0),
            ]
        );
    }

    #[test]
    fn test_adjacency_or_draws_seam_above_row_span() {
        // (0,0) is 1x1, (1,0) starts a row span over (2,0).
        let rows = rows_of(&[&[(1, 1), (1, 1)], &[(1, 2), (1, 1)], &[(1, 0), (1, 1)]]);
        let bounds = uniform(&rows, 2, 3.0, 4.0, 1.0);
        assert!(TableBorderSelector::has_horizontal_border(&bounds, 0, 0));
        assert!(!TableBorderSelector::has_horizontal_border(&bounds, 1, 0));
        assert!(TableBorderSelector::has_vertical_border(&bounds, 1, 0));
    }

    #[test]
    fn test_column_span_has_no_divider_through_it() {
        let rows = rows_of(&[&[(2, 1), (0, 1)], &[(1, 1), (1, 1)]]);
        let bounds = uniform(&rows, 2, 3.0, 4.0, 1.0);
        assert!(!TableBorderSelector::has_vertical_border(&bounds, 0, 0));
        let rects = TableBorderSelector::InsideBorders.rectangles(&bounds, 1.0);
        // One horizontal seam, one vertical divider only beside row 1.
        assert_eq!(
            rects,
            vec![Rect::new(0.0, 5.0, 9.0, 1.0), Rect::new(4.0, 5.0, 1.0, 6.0)]
        );
    }

    #[test]
    fn test_degenerate_tables_have_no_dividers() {
        for (rows, columns) in [(1, 4), (3, 1), (1, 1)] {
            let table = rows_of(&vec![&[(1, 1); 4][..columns]; rows]);
            let bounds = uniform(&table, columns, 3.0, 4.0, 1.0);
            assert!(
                TableBorderSelector::InsideBorders.rectangles(&bounds, 1.0).is_empty(),
                "{rows}x{columns}"
            );
            assert_eq!(
                TableBorderSelector::OutsideBorders.rectangles(&bounds, 1.0),
                vec![bounds.bounds()]
            );
            assert_eq!(
                TableBorderSelector::AllBorders.rectangles(&bounds, 1.0),
                vec![bounds.bounds()]
            );
        }
    }

    #[test]
    fn test_decorations_split_fill_and_stroke() {
        let rows = rows_of(&[&[(1, 1); 2], &[(1, 1); 2]]);
        let bounds = uniform(&rows, 2, 3.0, 4.0, 1.0);
        let style = TableBorderStyle::default();
        let decorations = border_decorations(&bounds, &style);
        assert!(matches!(decorations[0], Decoration::SolidRect { .. }));
        assert!(matches!(decorations.last(), Some(Decoration::StrokedRect { .. })));

        let hidden = TableBorderStyle { width: 0.0, ..style };
        assert!(border_decorations(&bounds, &hidden).is_empty());
    }
}
