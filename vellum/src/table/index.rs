//! Cell coordinates and spreadsheet-style labels.

use std::fmt;

use serde::Serialize;

/// Zero-based `(row, column)` position of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Spreadsheet label such as `B3` (column letters, 1-based row).
    pub fn label(&self) -> String {
        format!("{}{}", column_label(self.column as i64 + 1), self.row + 1)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Convert a 1-based column number to letters: 1 is `A`, 26 is `Z`, 27 is `AA`.
///
/// Zero and negative numbers have no letter form and render as decimals.
pub fn column_label(n: i64) -> String {
    if n <= 0 {
        return n.to_string();
    }
    let mut n = n;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
