//! Tests for partial arrangement growth and conversion

#[cfg(test)]
mod tests {
    use ndarray::array;
    use tiledescramble::spatial::grid::PartialGrid;

    // Cells fill row-major
    // Verified by swapping row and column in open_cell
    #[test]
    fn test_open_cell_advances_row_major() {
        let mut grid = PartialGrid::new(3);
        assert_eq!(grid.open_cell(), (0, 0));
        grid.push(4);
        grid.push(1);
        assert_eq!(grid.open_cell(), (0, 2));
        grid.push(0);
        assert_eq!(grid.open_cell(), (1, 0));
        assert_eq!(grid.row_count(), 1);
        grid.push(2);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_get_placed_cells() {
        let mut grid = PartialGrid::new(2);
        for tile in [3, 1, 2] {
            grid.push(tile);
        }
        assert_eq!(grid.get(0, 0), Some(3));
        assert_eq!(grid.get(0, 1), Some(1));
        assert_eq!(grid.get(1, 0), Some(2));
        assert_eq!(grid.get(1, 1), None);
        assert_eq!(grid.get(0, 2), None);
    }

    // Only complete grids convert to arrays
    #[test]
    fn test_into_array_requires_complete_rows() {
        let mut grid = PartialGrid::new(2);
        for tile in [3, 1, 2] {
            grid.push(tile);
        }
        assert!(grid.clone().into_array().is_none());

        grid.push(0);
        assert_eq!(grid.into_array(), Some(array![[3, 1], [2, 0]]));
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let grid = PartialGrid::new(0);
        assert_eq!(grid.cols(), 1);
        assert!(grid.is_empty());
    }

    // Clones grow independently
    #[test]
    fn test_clones_are_independent() {
        let mut grid = PartialGrid::new(2);
        grid.push(0);
        let mut branch = grid.clone();
        branch.push(1);
        assert_eq!(grid.len(), 1);
        assert_eq!(branch.len(), 2);
    }
}
