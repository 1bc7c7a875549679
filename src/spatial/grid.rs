//! Hypothesised true arrangement of tiles under construction

use ndarray::Array2;

/// Row-major arrangement of placed tile indices
///
/// Cells fill left to right, top to bottom; the last row may be incomplete.
/// Each search path owns its own copy, so growing one never disturbs another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialGrid {
    cols: usize,
    cells: Vec<usize>,
}

impl PartialGrid {
    /// Create an empty grid with the given row width
    pub fn new(cols: usize) -> Self {
        Self {
            cols: cols.max(1),
            cells: Vec::new(),
        }
    }

    /// Number of cells per row
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Test whether no tile has been placed
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of started rows
    pub fn row_count(&self) -> usize {
        self.cells.len().div_ceil(self.cols)
    }

    /// Row and column of the next cell to fill
    pub fn open_cell(&self) -> (usize, usize) {
        let placed = self.cells.len();
        (placed / self.cols, placed % self.cols)
    }

    /// Tile placed at `(row, col)`, if that cell is filled
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Place a tile in the open cell, opening a new row at a row boundary
    pub fn push(&mut self, tile: usize) {
        self.cells.push(tile);
    }

    /// Convert a grid of complete rows into a `rows × cols` array
    ///
    /// Returns `None` while the last row is still incomplete.
    pub fn into_array(self) -> Option<Array2<usize>> {
        let rows = self.row_count();
        Array2::from_shape_vec((rows, self.cols), self.cells).ok()
    }
}
