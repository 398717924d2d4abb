//! Dense-backed sparse grid.
//!
//! A [`Grid`] addresses a fixed `rows x cols` plane of cells but only stores
//! values for occupied cells, packed contiguously:
//! - `slots`: one entry per cell, pointing into the dense store or empty
//! - `values`: the dense store, one value per occupied cell
//! - `cell_ids`: parallel to `values`, the cell id each value belongs to
//!
//! Lookups are O(1), removal is O(1) by swapping the last value into the hole,
//! and iteration walks the dense store only.
//!
//! # Example
//!
//! ```
//! use gridset_core::Grid;
//!
//! let mut grid = Grid::with_dimensions(2, 3);
//! grid.set(1, 2, "x").unwrap();
//! assert_eq!(grid.count(), 1);
//! assert_eq!(grid.at(1, 2).unwrap(), &"x");
//! assert_eq!(grid.get(0, 0).unwrap(), None);
//! assert!(grid.at(2, 3).unwrap_err().is_out_of_range());
//! ```

use std::slice;

use crate::coord::CellCoord;
use crate::error::{GridError, Result};

/// Lookup-plane entry: either a dense index or empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot(usize);

impl Slot {
    /// Never a reachable `Vec` index.
    const EMPTY: Slot = Slot(usize::MAX);

    fn occupied(index: usize) -> Self {
        Slot(index)
    }

    fn dense_index(self) -> Option<usize> {
        if self == Slot::EMPTY {
            None
        } else {
            Some(self.0)
        }
    }
}

/// A fixed-size two-dimensional grid with dense storage for occupied cells.
#[derive(Clone, Debug)]
pub struct Grid<V> {
    rows: u32,
    cols: u32,
    /// Lookup plane, `rows * cols` entries.
    slots: Vec<Slot>,
    /// Values of occupied cells, in dense order.
    values: Vec<V>,
    /// Cell id of each entry in `values`.
    cell_ids: Vec<usize>,
}

impl<V> Grid<V> {
    /// Number of rows and columns of a default grid.
    pub const DEFAULT_SIZE: u32 = 4;

    /// Create an empty `DEFAULT_SIZE x DEFAULT_SIZE` grid.
    pub fn new() -> Self {
        Self::with_dimensions(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }

    /// Create an empty grid with the given dimensions.
    ///
    /// Allocates the full lookup plane up front; the dense store starts empty.
    pub fn with_dimensions(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            slots: vec![Slot::EMPTY; rows as usize * cols as usize],
            values: Vec::new(),
            cell_ids: Vec::new(),
        }
    }

    /// Total number of addressable cells (`rows * cols`).
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Get the dimensions of the grid as `(rows, cols)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Check if no cell holds a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check whether the cell at the given position holds a value.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid.
    pub fn contains(&self, row: i32, col: i32) -> Result<bool> {
        Ok(self.dense_index(row, col)?.is_some())
    }

    /// Get a reference to the value at the given position, if any.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid. An
    /// empty cell is `Ok(None)`.
    pub fn get(&self, row: i32, col: i32) -> Result<Option<&V>> {
        let index = self.dense_index(row, col)?;
        Ok(index.map(|i| &self.values[i]))
    }

    /// Get a mutable reference to the value at the given position, if any.
    pub fn get_mut(&mut self, row: i32, col: i32) -> Result<Option<&mut V>> {
        match self.dense_index(row, col)? {
            Some(index) => Ok(Some(&mut self.values[index])),
            None => Ok(None),
        }
    }

    /// Get a reference to the value at the given position.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid,
    /// [`GridError::EmptyCell`] if the cell holds no value.
    pub fn at(&self, row: i32, col: i32) -> Result<&V> {
        let index = self.occupied_index(row, col)?;
        Ok(&self.values[index])
    }

    /// Get a mutable reference to the value at the given position.
    ///
    /// Fails the same way as [`at`](Self::at).
    pub fn at_mut(&mut self, row: i32, col: i32) -> Result<&mut V> {
        let index = self.occupied_index(row, col)?;
        Ok(&mut self.values[index])
    }

    /// Get the value at the given position, or `otherwise` if the cell is empty.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid; the
    /// fallback does not cover invalid positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridset_core::Grid;
    ///
    /// let mut grid = Grid::with_dimensions(2, 2);
    /// grid.set(0, 0, 1).unwrap();
    /// assert_eq!(grid.at_else(0, 0, &5).unwrap(), &1);
    /// assert_eq!(grid.at_else(1, 1, &5).unwrap(), &5);
    /// ```
    pub fn at_else<'a>(&'a self, row: i32, col: i32, otherwise: &'a V) -> Result<&'a V> {
        match self.dense_index(row, col)? {
            Some(index) => Ok(&self.values[index]),
            None => Ok(otherwise),
        }
    }

    /// Store `value` in the cell at the given position.
    ///
    /// An occupied cell has its value replaced in place; an empty cell gets a
    /// new slot at the end of the dense store.
    ///
    /// # Arguments
    ///
    /// * `row` - Row of the target cell
    /// * `col` - Column of the target cell
    /// * `value` - Value to store
    ///
    /// # Returns
    ///
    /// A mutable reference to the stored value.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid. The
    /// grid is left unchanged.
    pub fn set(&mut self, row: i32, col: i32, value: V) -> Result<&mut V> {
        self.emplace(row, col, move || value)
    }

    /// Store the value built by `make` in the cell at the given position.
    ///
    /// Same semantics as [`set`](Self::set), but the value is only
    /// constructed once the position has been validated, directly into its
    /// destination slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridset_core::Grid;
    ///
    /// let mut grid: Grid<Vec<u8>> = Grid::new();
    /// grid.emplace(1, 1, || vec![1, 2, 3]).unwrap().push(4);
    /// assert_eq!(grid.at(1, 1).unwrap(), &vec![1, 2, 3, 4]);
    /// ```
    pub fn emplace<F>(&mut self, row: i32, col: i32, make: F) -> Result<&mut V>
    where
        F: FnOnce() -> V,
    {
        let cell_id = self.cell_id(row, col)?;
        Ok(self.write(cell_id, make()))
    }

    /// Remove and return the value at the given position.
    ///
    /// The last value in the dense store is moved into the vacated slot, so
    /// dense order is not preserved across removals.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if the position is outside the grid,
    /// [`GridError::EmptyCell`] if the cell holds no value. The grid is left
    /// unchanged on error.
    pub fn erase(&mut self, row: i32, col: i32) -> Result<V> {
        let cell_id = self.cell_id(row, col)?;
        let index = self.slots[cell_id]
            .dense_index()
            .ok_or(GridError::EmptyCell { row, col })?;

        let value = self.values.swap_remove(index);
        self.cell_ids.swap_remove(index);
        self.slots[cell_id] = Slot::EMPTY;

        // Repoint the cell whose value was swapped into the hole
        if let Some(&moved) = self.cell_ids.get(index) {
            self.slots[moved] = Slot::occupied(index);
        }

        Ok(value)
    }

    /// Discard all values, keeping the current dimensions.
    pub fn reset(&mut self) {
        let dropped = self.count();
        *self = Self::with_dimensions(self.rows, self.cols);

        tracing::debug!(
            "Reset {}x{} grid (dropped {} cells)",
            self.rows,
            self.cols,
            dropped
        );
    }

    /// Change the dimensions of the grid.
    ///
    /// Every value whose coordinate is still inside the new bounds keeps its
    /// coordinate; values outside are dropped. Only occupied cells are
    /// visited, and values are moved rather than cloned. The dense store is
    /// repacked in its previous relative order.
    ///
    /// # Arguments
    ///
    /// * `rows` - New number of rows
    /// * `cols` - New number of columns
    ///
    /// # Examples
    ///
    /// ```
    /// use gridset_core::Grid;
    ///
    /// let mut grid = Grid::with_dimensions(3, 3);
    /// grid.set(0, 0, 'a').unwrap();
    /// grid.set(2, 2, 'b').unwrap();
    ///
    /// grid.set_size(2, 2);
    /// assert_eq!(grid.count(), 1);
    ///
    /// grid.set_size(3, 3);
    /// assert_eq!(grid.at(0, 0).unwrap(), &'a');
    /// assert!(!grid.contains(2, 2).unwrap());
    /// ```
    pub fn set_size(&mut self, rows: u32, cols: u32) {
        let (old_rows, old_cols) = self.dimensions();
        let old = std::mem::replace(self, Self::with_dimensions(rows, cols));
        let before = old.values.len();

        for (cell_id, value) in old.cell_ids.into_iter().zip(old.values) {
            let coord = CellCoord::from_cell_id(cell_id, old_cols);
            if !coord.is_valid(rows, cols) {
                continue;
            }
            if let Some(new_id) = coord.to_cell_id(cols) {
                self.write(new_id, value);
            }
        }

        tracing::debug!(
            "Resized grid from {}x{} to {}x{} (kept {}, dropped {})",
            old_rows,
            old_cols,
            rows,
            cols,
            self.count(),
            before - self.count()
        );
    }

    /// Iterate over stored values in dense order.
    ///
    /// Dense order is insertion order until the first removal.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            iter: self.values.iter(),
        }
    }

    /// Iterate over occupied cells as `(coordinate, &value)` pairs in dense order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &V)> {
        let cols = self.cols;
        self.cell_ids
            .iter()
            .zip(self.values.iter())
            .map(move |(&cell_id, value)| (CellCoord::from_cell_id(cell_id, cols), value))
    }

    /// Read-only view of the dense store.
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    /// Raw pointer to the start of the dense store.
    ///
    /// Valid for `count()` reads until the grid is next mutated.
    pub fn as_ptr(&self) -> *const V {
        self.values.as_ptr()
    }

    fn cell_id(&self, row: i32, col: i32) -> Result<usize> {
        CellCoord::new(row, col)
            .to_cell_id(self.cols)
            .filter(|&id| id < self.slots.len())
            .ok_or(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
    }

    fn dense_index(&self, row: i32, col: i32) -> Result<Option<usize>> {
        let cell_id = self.cell_id(row, col)?;
        Ok(self.slots[cell_id].dense_index())
    }

    fn occupied_index(&self, row: i32, col: i32) -> Result<usize> {
        self.dense_index(row, col)?
            .ok_or(GridError::EmptyCell { row, col })
    }

    /// Write path shared by `set`, `emplace` and `set_size`. `cell_id` must be
    /// in range.
    fn write(&mut self, cell_id: usize, value: V) -> &mut V {
        match self.slots[cell_id].dense_index() {
            Some(index) => {
                let slot = &mut self.values[index];
                *slot = value;
                slot
            }
            None => {
                let index = self.values.len();
                self.values.push(value);
                self.cell_ids.push(cell_id);
                self.slots[cell_id] = Slot::occupied(index);
                &mut self.values[index]
            }
        }
    }
}

impl<V> Default for Grid<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a Grid<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only iterator over the values of a [`Grid`] in dense order.
#[derive(Clone, Debug)]
pub struct Iter<'a, V> {
    iter: slice::Iter<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
