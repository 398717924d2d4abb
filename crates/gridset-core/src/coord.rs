use std::fmt;

/// Cell coordinate within a grid (0-indexed)
///
/// Components are signed so that negative input can be passed through and
/// rejected by the grid's bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct CellCoord {
    pub row: i32,
    pub col: i32,
}

impl CellCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        CellCoord { row, col }
    }

    /// Linear cell id for a grid with `cols` columns (`row * cols + col`).
    ///
    /// Returns `None` if the id is negative or does not fit in `usize`.
    /// Columns are not checked against `cols`, so an oversized column on an
    /// early row lands on a later row.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridset_core::CellCoord;
    ///
    /// assert_eq!(CellCoord::new(2, 3).to_cell_id(4), Some(11));
    /// assert_eq!(CellCoord::new(-1, 0).to_cell_id(4), None);
    /// ```
    pub fn to_cell_id(&self, cols: u32) -> Option<usize> {
        let id = i64::from(self.row) * i64::from(cols) + i64::from(self.col);
        usize::try_from(id).ok()
    }

    /// Inverse of [`to_cell_id`](Self::to_cell_id) for a grid with `cols` columns.
    ///
    /// # Panics
    ///
    /// Panics if `cols` is zero.
    pub fn from_cell_id(id: usize, cols: u32) -> Self {
        let cols = cols as usize;
        CellCoord {
            row: (id / cols) as i32,
            col: (id % cols) as i32,
        }
    }

    /// Check if this coord is within bounds
    pub fn is_valid(&self, rows: u32, cols: u32) -> bool {
        self.row >= 0 && self.col >= 0 && (self.row as u32) < rows && (self.col as u32) < cols
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((row, col): (i32, i32)) -> Self {
        CellCoord::new(row, col)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterate over every coordinate of a `rows` x `cols` grid, row by row
pub fn coords(rows: u32, cols: u32) -> CoordIter {
    CoordIter {
        rows,
        cols,
        current_row: 0,
        current_col: 0,
    }
}

/// Row-major iterator over the coordinates of a grid
#[derive(Debug, Clone)]
pub struct CoordIter {
    rows: u32,
    cols: u32,
    current_row: u32,
    current_col: u32,
}

impl Iterator for CoordIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cols == 0 || self.current_row >= self.rows {
            return None;
        }

        let coord = CellCoord::new(self.current_row as i32, self.current_col as i32);

        self.current_col += 1;
        if self.current_col >= self.cols {
            self.current_col = 0;
            self.current_row += 1;
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.cols == 0 || self.current_row >= self.rows {
            0
        } else {
            let rows_left = (self.rows - self.current_row) as usize;
            rows_left * self.cols as usize - self.current_col as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CoordIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_id_round_trip() {
        for id in 0..20 {
            let coord = CellCoord::from_cell_id(id, 5);
            assert_eq!(coord.to_cell_id(5), Some(id));
        }
        assert_eq!(CellCoord::from_cell_id(7, 5), CellCoord::new(1, 2));
    }

    #[test]
    fn test_negative_cell_id() {
        assert_eq!(CellCoord::new(-5, -5).to_cell_id(4), None);
        assert_eq!(CellCoord::new(0, -1).to_cell_id(4), None);
        // Negative column offset by a positive row stays non-negative
        assert_eq!(CellCoord::new(1, -1).to_cell_id(4), Some(3));
    }

    #[test]
    fn test_large_cell_id_does_not_overflow() {
        let coord = CellCoord::new(i32::MAX, i32::MAX);
        let id = coord.to_cell_id(u32::MAX);
        assert!(id.is_none() || id.unwrap() > u32::MAX as usize);
    }

    #[test]
    fn test_is_valid() {
        assert!(CellCoord::new(0, 0).is_valid(1, 1));
        assert!(CellCoord::new(3, 9).is_valid(4, 10));
        assert!(!CellCoord::new(4, 0).is_valid(4, 10));
        assert!(!CellCoord::new(0, 10).is_valid(4, 10));
        assert!(!CellCoord::new(-1, 0).is_valid(4, 10));
        assert!(!CellCoord::new(0, 0).is_valid(0, 0));
    }

    #[test]
    fn test_display_and_from_tuple() {
        let coord: CellCoord = (3, -2).into();
        assert_eq!(coord, CellCoord::new(3, -2));
        assert_eq!(coord.to_string(), "(3, -2)");
    }

    #[test]
    fn test_coords_row_major() {
        let all: Vec<_> = coords(2, 3).collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], CellCoord::new(0, 0));
        assert_eq!(all[2], CellCoord::new(0, 2));
        assert_eq!(all[3], CellCoord::new(1, 0));
        assert_eq!(all[5], CellCoord::new(1, 2));
        assert_eq!(coords(2, 3).len(), 6);
    }

    #[test]
    fn test_coords_empty_grid() {
        assert_eq!(coords(0, 5).count(), 0);
        assert_eq!(coords(5, 0).count(), 0);
        assert_eq!(coords(5, 0).len(), 0);
    }
}
