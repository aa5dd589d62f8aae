//! Cell backgrounds.

use std::fmt;
use std::sync::Arc;

use crate::layout::pass::Decoration;
use crate::primitives::Color;
use crate::table::bounds::TableBounds;

type Picker = dyn Fn(usize, usize) -> Color + Send + Sync;

/// Chooses a background color for each `(row, column)` cell origin.
#[derive(Clone)]
pub struct TableBackgroundStyle {
    picker: Arc<Picker>,
}

impl TableBackgroundStyle {
    /// No background at all.
    pub fn clear() -> Self {
        Self::custom(|_, _| Color::TRANSPARENT)
    }

    /// Even rows (0, 2, ...) get `even`, odd rows get `odd`.
    pub fn alternating_rows(even: Color, odd: Color) -> Self {
        Self::custom(move |row, _| if row % 2 == 0 { even } else { odd })
    }

    /// Row 0 gets `header`; the remaining rows alternate by row index.
    pub fn alternating_rows_with_header(header: Color, even: Color, odd: Color) -> Self {
        Self::custom(move |row, _| match row {
            0 => header,
            r if r % 2 == 0 => even,
            _ => odd,
        })
    }

    /// Even columns get `even`, odd columns get `odd`.
    pub fn alternating_columns(even: Color, odd: Color) -> Self {
        Self::custom(move |_, column| if column % 2 == 0 { even } else { odd })
    }

    pub fn custom(picker: impl Fn(usize, usize) -> Color + Send + Sync + 'static) -> Self {
        Self { picker: Arc::new(picker) }
    }

    pub fn background(&self, row: usize, column: usize) -> Color {
        (self.picker)(row, column)
    }
}

impl Default for TableBackgroundStyle {
    fn default() -> Self {
        Self::clear()
    }
}

impl fmt::Debug for TableBackgroundStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBackgroundStyle").finish_non_exhaustive()
    }
}

/// One filled rectangle per cell origin, covering every slot the cell spans.
///
/// Placeholders and missing cells get nothing; transparent picks are skipped.
pub fn background_rectangles(bounds: &TableBounds<'_>, style: &TableBackgroundStyle) -> Vec<Decoration> {
    let mut decorations = Vec::new();
    for row in 0..bounds.row_count() {
        for column in 0..bounds.column_count() {
            if !bounds.has_background(row, column) {
                continue;
            }
            let color = style.background(row, column);
            if color.is_transparent() {
                continue;
            }
            let rect = bounds.span_bounds(row, column);
            if rect.is_null() {
                tracing::trace!(row, column, "cell has no geometry; skipping background");
                continue;
            }
            decorations.push(Decoration::SolidRect { rect, color });
        }
    }
    decorations
}

#[cfg(test)]
mod tests {
    use vellum_document::{RawTableCell, RawTableRow};

    use super::*;
    use crate::primitives::Rect;
    use crate::table::bounds::TrackExtents;
    use crate::table::index::CellIndex;

    #[test]
    fn test_presets() {
        let a = Color::rgb(1.0, 0.0, 0.0);
        let b = Color::rgb(0.0, 1.0, 0.0);
        let h = Color::rgb(0.0, 0.0, 1.0);
        let rows = TableBackgroundStyle::alternating_rows(a, b);
        assert_eq!((rows.background(0, 5), rows.background(1, 0)), (a, b));
        let cols = TableBackgroundStyle::alternating_columns(a, b);
        assert_eq!((cols.background(3, 0), cols.background(0, 1)), (a, b));
        let header = TableBackgroundStyle::alternating_rows_with_header(h, a, b);
        assert_eq!(
            (header.background(0, 0), header.background(1, 0), header.background(2, 0)),
            (h, b, a)
        );
        assert!(TableBackgroundStyle::clear().background(0, 0).is_transparent());
    }

    #[test]
    fn test_spanning_cell_gets_one_rectangle() {
        let rows = vec![
            RawTableRow::new(vec![
                RawTableCell::text(0, "a").with_span(2, 1),
                RawTableCell::text(1, "").with_span(0, 1),
            ]),
            RawTableRow::new(vec![RawTableCell::text(0, "b"), RawTableCell::text(1, "c")]),
        ];
        let mut extents = TrackExtents::new(2, 2);
        extents.include(CellIndex::new(0, 0), Rect::new(1.0, 1.0, 3.0, 4.0));
        extents.include(CellIndex::new(1, 0), Rect::new(1.0, 6.0, 3.0, 4.0));
        extents.include(CellIndex::new(1, 1), Rect::new(5.0, 6.0, 3.0, 4.0));
        let bounds = TableBounds::new(Rect::new(0.0, 0.0, 9.0, 11.0), extents, &rows);

        let style = TableBackgroundStyle::custom(|_, _| Color::WHITE);
        let rects: Vec<Rect> = background_rectangles(&bounds, &style).iter().map(|d| d.rect()).collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(1.0, 1.0, 7.0, 4.0),
                Rect::new(1.0, 6.0, 3.0, 4.0),
                Rect::new(5.0, 6.0, 3.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_clear_background_draws_nothing() {
        let rows = vec![RawTableRow::new(vec![RawTableCell::text(0, "a")])];
        let mut extents = TrackExtents::new(1, 1);
        extents.include(CellIndex::new(0, 0), Rect::new(1.0, 1.0, 3.0, 4.0));
        let bounds = TableBounds::new(Rect::new(0.0, 0.0, 5.0, 6.0), extents, &rows);
        assert!(background_rectangles(&bounds, &TableBackgroundStyle::clear()).is_empty());
    }
}
