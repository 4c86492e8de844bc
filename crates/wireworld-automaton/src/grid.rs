//! Dense row-major grid storage and directional growth.
//!
//! `x` indexes columns and `y` indexes rows; cell `(x, y)` lives at
//! `cells[y * width + x]`. This is the only type that touches the storage
//! vector directly.

use serde::Serialize;

use crate::cell::{CellState, CellValue};
use crate::error::{AutomatonError, AutomatonResult};

/// A dense rectangular grid of cell states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<S = CellState> {
    width: usize,
    height: usize,
    cells: Vec<S>,
}

impl<S: CellValue> Default for Grid<S> {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl<S: CellValue> Grid<S> {
    /// Create an all-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![S::default(); width * height],
        }
    }

    /// Create a grid from row-major cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<S>) -> AutomatonResult<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            AutomatonError::invalid_dimensions(format!("{}x{} overflows", width, height))
        })?;
        if cells.len() != expected {
            return Err(AutomatonError::invalid_dimensions(format!(
                "{}x{} grid needs {} cells, got {}",
                width,
                height,
                expected,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> S) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a grid from a list of equally long rows.
    pub fn from_rows(rows: Vec<Vec<S>>) -> AutomatonResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(AutomatonError::invalid_dimensions(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// True when the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if `(x, y)` is inside the grid.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Translate signed caller coordinates into a storage position.
    ///
    /// Fails with `OutOfRange` for negative coordinates or coordinates past
    /// the right/bottom edge.
    pub fn locate(&self, x: i64, y: i64) -> AutomatonResult<(usize, usize)> {
        let out_of_range = || AutomatonError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let col = usize::try_from(x).map_err(|_| out_of_range())?;
        let row = usize::try_from(y).map_err(|_| out_of_range())?;
        if self.contains(col, row) {
            Ok((col, row))
        } else {
            Err(out_of_range())
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| y * self.width + x)
    }

    /// Get the state at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<S> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Write the state at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: S) -> AutomatonResult<()> {
        let index = self.index(x, y).ok_or(AutomatonError::OutOfRange {
            x: i64::try_from(x).unwrap_or(i64::MAX),
            y: i64::try_from(y).unwrap_or(i64::MAX),
            width: self.width,
            height: self.height,
        })?;
        self.cells[index] = value;
        Ok(())
    }

    /// One row as a slice.
    pub fn row(&self, y: usize) -> Option<&[S]> {
        (y < self.height).then(|| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[S]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[S] {
        &self.cells
    }

    /// Iterate over `(x, y, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, S)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, state)| (i % width, i / width, *state))
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: S) -> usize {
        self.cells.iter().filter(|s| **s == state).count()
    }

    /// Raw `u8` values, row-major.
    pub fn to_raw(&self) -> Vec<u8> {
        self.cells.iter().map(|s| s.to_raw()).collect()
    }

    /// Return a copy grown by `margins`, existing cells shifted by
    /// `(margins.left, margins.top)`.
    pub fn grown(&self, margins: &Margins) -> AutomatonResult<Self> {
        let overflow = || {
            AutomatonError::invalid_dimensions(format!(
                "growing {}x{} by {:?} overflows",
                self.width, self.height, margins
            ))
        };
        let width = self
            .width
            .checked_add(margins.left)
            .and_then(|w| w.checked_add(margins.right))
            .ok_or_else(overflow)?;
        let height = self
            .height
            .checked_add(margins.top)
            .and_then(|h| h.checked_add(margins.bottom))
            .ok_or_else(overflow)?;
        width.checked_mul(height).ok_or_else(overflow)?;

        let mut grown = Self::new(width, height);
        for (y, row) in self.rows().enumerate() {
            let start = (y + margins.top) * width + margins.left;
            grown.cells[start..start + self.width].copy_from_slice(row);
        }
        Ok(grown)
    }
}

/// Empty rows/columns to add on each side of a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Margins {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Margins {
    pub fn new(left: usize, right: usize, top: usize, bottom: usize) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Build from caller-supplied signed margins, rejecting negatives.
    pub fn from_signed(left: i64, right: i64, top: i64, bottom: i64) -> AutomatonResult<Self> {
        let side = |name: &str, value: i64| {
            usize::try_from(value).map_err(|_| {
                AutomatonError::invalid_dimensions(format!(
                    "{} margin must be non-negative, got {}",
                    name, value
                ))
            })
        };
        Ok(Self {
            left: side("left", left)?,
            right: side("right", right)?,
            top: side("top", top)?,
            bottom: side("bottom", bottom)?,
        })
    }

    /// True when nothing would be added.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Offset `(dx, dy)` by which existing coordinates move after growth.
    pub fn origin_shift(&self) -> (usize, usize) {
        (self.left, self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{grid_from_digits, seed_grid};
    use CellState::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid: Grid = Grid::new(3, 2);
        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.count(Empty), 6);
    }

    #[test]
    fn test_row_major_addressing() {
        // 3 wide, 2 tall: (x=2, y=0) is the last cell of the first row.
        let mut grid: Grid = Grid::new(3, 2);
        grid.set(2, 0, Conductor).unwrap();
        assert_eq!(grid.cells()[2], Conductor);
        assert_eq!(grid.row(0).unwrap(), &[Empty, Empty, Conductor]);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![Empty, Empty], vec![Empty]]).unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(Grid::from_cells(2, 2, vec![Empty; 3]).is_err());
        assert!(Grid::from_cells(2, 2, vec![Empty; 4]).is_ok());
    }

    #[test]
    fn test_locate_rejects_negative_and_edge() {
        let grid: Grid = Grid::new(4, 2);
        assert_eq!(grid.locate(3, 1).unwrap(), (3, 1));
        assert!(matches!(
            grid.locate(-1, 0),
            Err(AutomatonError::OutOfRange { x: -1, .. })
        ));
        assert!(grid.locate(4, 0).is_err());
        assert!(grid.locate(0, 2).is_err());
    }

    #[test]
    fn test_set_out_of_range_reports_saturated_coordinate() {
        let mut grid: Grid = Grid::new(2, 2);
        assert!(matches!(
            grid.set(usize::MAX, 1, Conductor),
            Err(AutomatonError::OutOfRange {
                x: i64::MAX,
                y: 1,
                ..
            })
        ));
        assert_eq!(grid.count(Empty), 4);
    }

    #[test]
    fn test_iter_yields_coordinates() {
        let grid = grid_from_digits(&["01", "23"]);
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(
            cells,
            vec![
                (0, 0, Empty),
                (1, 0, ElectronHead),
                (0, 1, ElectronTail),
                (1, 1, Conductor),
            ]
        );
    }

    #[test]
    fn test_grown_shifts_content() {
        let grid = grid_from_digits(&["13"]);
        let grown = grid.grown(&Margins::new(2, 1, 1, 2)).unwrap();
        assert_eq!(grown.size(), (5, 4));
        assert_eq!(grown.get(2, 1), Some(ElectronHead));
        assert_eq!(grown.get(3, 1), Some(Conductor));
        assert_eq!(grown.count(Empty), 18);
    }

    #[test]
    fn test_grown_zero_margins_is_identity() {
        let grid = seed_grid();
        assert_eq!(grid.grown(&Margins::default()).unwrap(), grid);
    }

    #[test]
    fn test_grow_empty_grid() {
        let grid: Grid = Grid::default();
        let grown = grid.grown(&Margins::new(1, 1, 0, 2)).unwrap();
        assert_eq!(grown.size(), (2, 2));
    }

    #[test]
    fn test_margins_reject_negative() {
        let err = Margins::from_signed(0, -1, 0, 0).unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidDimensions { .. }));
        assert_eq!(
            Margins::from_signed(1, 2, 3, 4).unwrap().origin_shift(),
            (1, 3)
        );
    }
}
