//! Rule abstractions for generation updates.
//!
//! A rule computes a cell's next state from the previous generation's grid.
//! The automaton applies it to every cell against an unchanged snapshot, so
//! rules never observe partially updated neighbors.

use serde::{Deserialize, Serialize};

use crate::cell::{CellState, CellValue};
use crate::grid::Grid;
use crate::neighborhood::count_neighbors;

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A state offered to the user as a painting tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry<S> {
    /// Human-readable label.
    pub label: &'static str,
    /// State painted by this entry.
    pub state: S,
}

/// A rule set: the transition function plus the static metadata a renderer
/// needs to display its states.
pub trait Rule: Send + Sync {
    /// State type of this rule set.
    type State: CellValue;

    /// Unique identifier for this rule.
    fn id(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Next state of `(x, y)`, computed from the previous generation.
    fn next_state(&self, grid: &Grid<Self::State>, x: usize, y: usize) -> Self::State;

    /// RGB colors indexed by raw state value.
    fn color_table(&self) -> &'static [Rgb];

    /// Paintable states, in presentation order.
    fn palette(&self) -> &'static [PaletteEntry<Self::State>];

    /// Initial board used when no grid is supplied.
    fn seed(&self) -> Grid<Self::State> {
        Grid::default()
    }
}

const WIREWORLD_COLORS: [Rgb; 4] = [
    Rgb(0, 0, 0),
    Rgb(0, 0, 255),
    Rgb(255, 0, 0),
    Rgb(255, 255, 0),
];

const WIREWORLD_PALETTE: [PaletteEntry<CellState>; 3] = [
    PaletteEntry {
        label: "Conductor",
        state: CellState::Conductor,
    },
    PaletteEntry {
        label: "Electron Head",
        state: CellState::ElectronHead,
    },
    PaletteEntry {
        label: "Electron Tail",
        state: CellState::ElectronTail,
    },
];

/// Brian Silverman's WireWorld.
///
/// | current   | next                                          |
/// |-----------|-----------------------------------------------|
/// | empty     | empty                                         |
/// | head      | tail                                          |
/// | tail      | conductor                                     |
/// | conductor | head if 1 or 2 neighbors are heads, else same |
#[derive(Debug, Default, Clone, Copy)]
pub struct WireWorldRule;

impl Rule for WireWorldRule {
    type State = CellState;

    fn id(&self) -> &'static str {
        "wireworld"
    }

    fn description(&self) -> &str {
        "WireWorld: head -> tail -> conductor, conductor fires with 1-2 head neighbors"
    }

    fn next_state(&self, grid: &Grid<CellState>, x: usize, y: usize) -> CellState {
        match grid.get(x, y).unwrap_or_default() {
            CellState::Empty => CellState::Empty,
            CellState::ElectronHead => CellState::ElectronTail,
            CellState::ElectronTail => CellState::Conductor,
            CellState::Conductor => match count_neighbors(grid, x, y, CellState::ElectronHead) {
                1 | 2 => CellState::ElectronHead,
                _ => CellState::Conductor,
            },
        }
    }

    fn color_table(&self) -> &'static [Rgb] {
        &WIREWORLD_COLORS
    }

    fn palette(&self) -> &'static [PaletteEntry<CellState>] {
        &WIREWORLD_PALETTE
    }

    fn seed(&self) -> Grid<CellState> {
        use CellState::{Conductor as C, ElectronHead as H, ElectronTail as T, Empty as E};
        let rows = vec![
            vec![E, E, E, E, E, E, E],
            vec![E, E, H, T, C, E, E],
            vec![E, C, E, E, E, C, E],
            vec![E, E, C, C, C, E, E],
            vec![E, E, E, E, E, E, E],
        ];
        Grid::from_rows(rows).unwrap_or_default()
    }
}
