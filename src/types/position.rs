//! Cell addressing: positions and anchor/cursor ranges.

use serde::{Deserialize, Serialize};

/// A single cell address, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: u32,
    pub col: u32,
}

impl CellPosition {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A rectangular cell range.
///
/// `start` is the anchor fixed when a gesture begins; `end` is the live
/// cursor. The stored corners are never reordered in place - callers that
/// need min/max bounds go through [`CellRange::bounds`] or
/// [`CellRange::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    pub fn new(start: CellPosition, end: CellPosition) -> Self {
        Self { start, end }
    }

    /// A range covering exactly one cell.
    pub fn single(row: u32, col: u32) -> Self {
        let cell = CellPosition::new(row, col);
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Normalized bounds as `(min_row, min_col, max_row, max_col)`.
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.start.row.min(self.end.row),
            self.start.col.min(self.end.col),
            self.start.row.max(self.end.row),
            self.start.col.max(self.end.col),
        )
    }

    /// A copy with `start` at the min corner and `end` at the max corner.
    pub fn normalized(&self) -> Self {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        Self {
            start: CellPosition::new(min_row, min_col),
            end: CellPosition::new(max_row, max_col),
        }
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        row >= min_row && row <= max_row && col >= min_col && col <= max_col
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// A copy of this range with a replaced cursor; the anchor is untouched.
    pub fn with_end(&self, end: CellPosition) -> Self {
        Self {
            start: self.start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_normalized_for_inverted_corners() {
        let range = CellRange::new(CellPosition::new(7, 4), CellPosition::new(2, 9));
        assert_eq!(range.bounds(), (2, 4, 7, 9));
        let norm = range.normalized();
        assert_eq!(norm.start, CellPosition::new(2, 4));
        assert_eq!(norm.end, CellPosition::new(7, 9));
    }

    #[test]
    fn contains_checks_the_normalized_rectangle() {
        let range = CellRange::new(CellPosition::new(5, 5), CellPosition::new(1, 1));
        assert!(range.contains(3, 3));
        assert!(range.contains(1, 5));
        assert!(!range.contains(0, 3));
        assert!(!range.contains(3, 6));
    }

    #[test]
    fn with_end_preserves_the_anchor() {
        let range = CellRange::single(2, 2);
        let grown = range.with_end(CellPosition::new(8, 1));
        assert_eq!(grown.start, CellPosition::new(2, 2));
        assert_eq!(grown.end, CellPosition::new(8, 1));
    }
}
