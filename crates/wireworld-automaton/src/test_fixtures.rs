//! Minimal grid fixtures for unit tests.

use crate::cell::{CellState, CellValue};
use crate::grid::Grid;

/// Build a grid from rows of raw digits, e.g. `["0123", "3000"]`.
pub fn grid_from_digits(rows: &[&str]) -> Grid<CellState> {
    let rows = rows
        .iter()
        .map(|row| {
            row.bytes()
                .map(|b| CellState::from_raw(b - b'0').expect("digit must be a state"))
                .collect()
        })
        .collect();
    Grid::from_rows(rows).expect("fixture rows must be rectangular")
}

/// The 5x7 demonstration circuit.
pub fn seed_grid() -> Grid<CellState> {
    grid_from_digits(&[
        "0000000", //
        "0012300", //
        "0300030", //
        "0033300", //
        "0000000",
    ])
}
