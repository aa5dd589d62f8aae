//! Cell merge markers for GFM tables.
//!
//! GFM has no syntax for spanning cells. A cell whose whole text is `<<`
//! merges into the cell on its left, a cell whose whole text is `^^` merges
//! into the cell above. The marker cell stays in the row as a placeholder
//! (`colspan == 0` or `rowspan == 0`) so every row keeps one slot per
//! column. Merges that would make a non-rectangular region are ignored and
//! the marker is kept as literal text.

use crate::ast::RawTableRow;

/// Merges the marker cell into its left neighbour.
pub const MERGE_LEFT: &str = "<<";
/// Merges the marker cell into the cell above.
pub const MERGE_UP: &str = "^^";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Left,
    Up,
}

fn marker_at(rows: &[RawTableRow], row: usize, column: usize) -> Option<Marker> {
    let cell = rows.get(row)?.cells.get(column)?;
    if cell.is_placeholder() {
        return None;
    }
    match cell.plain_text().trim() {
        MERGE_LEFT => Some(Marker::Left),
        MERGE_UP => Some(Marker::Up),
        _ => None,
    }
}

/// Rewrite marker cells into placeholders and grow the spans they merge into.
pub fn apply_span_markers(rows: &mut [RawTableRow]) {
    for row in 0..rows.len() {
        for column in 0..rows[row].cells.len() {
            let merged = match marker_at(rows, row, column) {
                Some(Marker::Left) => merge_left(rows, row, column),
                Some(Marker::Up) => merge_up(rows, row, column),
                None => continue,
            };
            if !merged {
                tracing::debug!(row, column, "ignoring span marker that would not form a rectangle");
            }
        }
    }
}

fn merge_left(rows: &mut [RawTableRow], row: usize, column: usize) -> bool {
    let cells = &mut rows[row].cells;
    // Walk left over earlier placeholders of the same run.
    let mut origin = column;
    loop {
        if origin == 0 {
            return false;
        }
        origin -= 1;
        if cells[origin].colspan != 0 {
            break;
        }
    }
    let target = &cells[origin];
    if target.rowspan != 1 || origin + target.colspan != column {
        return false;
    }
    cells[origin].colspan += 1;
    let placeholder = &mut cells[column];
    placeholder.colspan = 0;
    placeholder.content.clear();
    true
}

fn merge_up(rows: &mut [RawTableRow], row: usize, column: usize) -> bool {
    let mut origin = row;
    loop {
        if origin == 0 || rows[origin].is_header != rows[row].is_header {
            return false;
        }
        origin -= 1;
        match rows[origin].cells.get(column) {
            Some(cell) if cell.rowspan == 0 => continue,
            Some(_) => break,
            None => return false,
        }
    }
    if rows[origin].is_header {
        return false;
    }
    let target = &rows[origin].cells[column];
    if target.colspan != 1 || origin + target.rowspan != row {
        return false;
    }
    rows[origin].cells[column].rowspan += 1;
    let placeholder = &mut rows[row].cells[column];
    placeholder.rowspan = 0;
    placeholder.content.clear();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RawTableCell;

    fn row(texts: &[&str]) -> RawTableRow {
        RawTableRow::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| RawTableCell::text(i, *t))
                .collect(),
        )
    }

    fn spans(rows: &[RawTableRow]) -> Vec<Vec<(usize, usize)>> {
        rows.iter()
            .map(|r| r.cells.iter().map(|c| (c.colspan, c.rowspan)).collect())
            .collect()
    }

    #[test]
    fn test_merge_left_run() {
        let mut rows = vec![row(&["a", "<<", "<<", "b"])];
        apply_span_markers(&mut rows);
        assert_eq!(spans(&rows), vec![vec![(3, 1), (0, 1), (0, 1), (1, 1)]]);
        assert!(rows[0].cells[1].content.is_empty());
    }

    #[test]
    fn test_merge_up_run() {
        let mut rows = vec![row(&["a", "b"]), row(&["^^", "c"]), row(&["^^", "d"])];
        apply_span_markers(&mut rows);
        assert_eq!(
            spans(&rows),
            vec![vec![(1, 3), (1, 1)], vec![(1, 0), (1, 1)], vec![(1, 0), (1, 1)]]
        );
    }

    #[test]
    fn test_marker_in_first_column_stays_literal() {
        let mut rows = vec![row(&["<<", "b"])];
        apply_span_markers(&mut rows);
        assert_eq!(spans(&rows), vec![vec![(1, 1), (1, 1)]]);
        assert_eq!(rows[0].cells[0].plain_text(), "<<");
    }

    #[test]
    fn test_non_rectangular_merge_is_ignored() {
        // (0,0) spans two columns, so merging (1,0) upward would leave a hole.
        let mut rows = vec![row(&["a", "<<"]), row(&["^^", "c"])];
        apply_span_markers(&mut rows);
        assert_eq!(spans(&rows), vec![vec![(2, 1), (0, 1)], vec![(1, 1), (1, 1)]]);
    }

    #[test]
    fn test_header_is_not_merged_into() {
        let mut rows = vec![
            RawTableRow::header(vec![RawTableCell::text(0, "h")]),
            row(&["^^"]),
        ];
        apply_span_markers(&mut rows);
        assert_eq!(spans(&rows), vec![vec![(1, 1)], vec![(1, 1)]]);
    }
}
