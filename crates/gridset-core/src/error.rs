use thiserror::Error;

/// Result alias for grid operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors reported by [`Grid`](crate::Grid) accessors and mutators
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate translates to a cell id outside `[0, rows * cols)`
    #[error("cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    OutOfRange {
        row: i32,
        col: i32,
        rows: u32,
        cols: u32,
    },

    /// A strict accessor or erase hit a cell that holds no value
    #[error("cell ({row}, {col}) is empty")]
    EmptyCell { row: i32, col: i32 },
}

impl GridError {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, GridError::OutOfRange { .. })
    }

    pub fn is_empty_cell(&self) -> bool {
        matches!(self, GridError::EmptyCell { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GridError::OutOfRange {
            row: -5,
            col: -5,
            rows: 4,
            cols: 4,
        };
        assert_eq!(
            err.to_string(),
            "cell (-5, -5) is out of range for a 4x4 grid"
        );

        let err = GridError::EmptyCell { row: 1, col: 2 };
        assert_eq!(err.to_string(), "cell (1, 2) is empty");
    }

    #[test]
    fn test_kind_predicates() {
        let out = GridError::OutOfRange {
            row: 9,
            col: 0,
            rows: 2,
            cols: 2,
        };
        assert!(out.is_out_of_range());
        assert!(!out.is_empty_cell());

        let empty = GridError::EmptyCell { row: 0, col: 0 };
        assert!(empty.is_empty_cell());
        assert!(!empty.is_out_of_range());
    }
}
