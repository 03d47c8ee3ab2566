use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows on the floor grid.
pub const ROWS: i64 = 7;
/// Number of columns on the floor grid.
pub const COLS: i64 = 10;

/// A (row, column) coordinate on the floor grid, 0-based.
///
/// Coordinates are not validated on construction: imported data may carry
/// out-of-range values, which the sanitizer demotes on the next commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i64,
    pub col: i64,
}

impl Cell {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// `true` when both coordinates fall inside the 7×10 grid.
    pub fn in_bounds(&self) -> bool {
        (0..ROWS).contains(&self.row) && is_valid_column(self.col)
    }

    /// Operator-facing label, 1-based (e.g. `R1C3`).
    pub fn label(&self) -> String {
        format!("R{}C{}", self.row.saturating_add(1), self.col.saturating_add(1))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn is_valid_column(col: i64) -> bool {
    (0..COLS).contains(&col)
}
