//! Moore neighborhood lookups.
//!
//! Neighbors are clipped to the stored grid: no wraparound and no implicit
//! padding, so edge cells have 5 candidates and corner cells 3.

use crate::cell::CellValue;
use crate::grid::Grid;

/// Offsets `(dx, dy)` of the eight Moore neighbors.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterate over the in-bounds Moore neighbors of `(x, y)` as `(x, y, state)`.
pub fn moore_neighbors<S: CellValue>(
    grid: &Grid<S>,
    x: usize,
    y: usize,
) -> impl Iterator<Item = (usize, usize, S)> + '_ {
    MOORE_OFFSETS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        grid.get(nx, ny).map(|state| (nx, ny, state))
    })
}

/// Count the in-bounds Moore neighbors of `(x, y)` that are in `target`.
pub fn count_neighbors<S: CellValue>(grid: &Grid<S>, x: usize, y: usize, target: S) -> usize {
    moore_neighbors(grid, x, y)
        .filter(|(_, _, state)| *state == target)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState::*;
    use crate::test_fixtures::grid_from_digits;

    #[test]
    fn test_interior_cell_has_eight_neighbors() {
        let grid = grid_from_digits(&["111", "131", "111"]);
        assert_eq!(moore_neighbors(&grid, 1, 1).count(), 8);
        assert_eq!(count_neighbors(&grid, 1, 1, ElectronHead), 8);
        // The center itself is never counted.
        assert_eq!(count_neighbors(&grid, 1, 1, Conductor), 0);
    }

    #[test]
    fn test_corner_and_edge_are_clipped() {
        let grid = grid_from_digits(&["111", "111", "111"]);
        assert_eq!(count_neighbors(&grid, 0, 0, ElectronHead), 3);
        assert_eq!(count_neighbors(&grid, 2, 2, ElectronHead), 3);
        assert_eq!(count_neighbors(&grid, 1, 0, ElectronHead), 5);
    }

    #[test]
    fn test_no_wraparound() {
        // A head in the far corner must not be seen from the opposite corner.
        let grid = grid_from_digits(&["3000", "0000", "0001"]);
        assert_eq!(count_neighbors(&grid, 0, 0, ElectronHead), 0);
    }

    #[test]
    fn test_non_square_uses_column_then_row() {
        // 4 wide, 2 tall. The head at (x=3, y=1) neighbors (x=2, y=0) only if
        // x is the column index.
        let grid = grid_from_digits(&["0030", "0001"]);
        assert_eq!(count_neighbors(&grid, 2, 0, ElectronHead), 1);
        assert_eq!(count_neighbors(&grid, 0, 1, ElectronHead), 0);
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = grid_from_digits(&["3"]);
        assert_eq!(moore_neighbors(&grid, 0, 0).count(), 0);
    }
}
