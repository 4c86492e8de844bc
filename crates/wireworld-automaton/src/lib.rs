//! WireWorld cellular automaton engine.
//!
//! This crate provides a dense, resizable two-dimensional grid of cell states
//! and a synchronous update rule that advances the whole grid one generation
//! at a time.
//!
//! ## Core Concepts
//!
//! - **Grid**: row-major storage addressed `(x, y)` = (column, row)
//! - **Rule**: a rule set's transition function plus its color table and palette
//! - **View**: a clipped, optionally padded window read for rendering
//! - **Margins**: directional growth; existing cells shift by `(left, top)`
//! - **Automaton**: the capability set collaborators program against
//!
//! ## The WireWorld Rule
//!
//! ```text
//! empty     -> empty
//! head      -> tail
//! tail      -> conductor
//! conductor -> head   if 1 or 2 of its 8 neighbors are heads
//!              conductor otherwise
//! ```
//!
//! Neighbors outside the grid do not exist: there is no wraparound.
//!
//! ## Example
//!
//! ```
//! use wireworld_automaton::{Automaton, CellState, ViewRequest, WireWorld};
//!
//! let mut world = WireWorld::default();
//! world.advance();
//! let view = world.read(&ViewRequest::cell(2, 1)).unwrap();
//! assert_eq!(view.get(0, 0), Some(CellState::ElectronTail));
//! ```

mod automaton;
mod cell;
mod error;
mod grid;
pub mod neighborhood;
pub mod persistence;
mod rule;
mod view;

#[cfg(test)]
mod test_fixtures;

pub use automaton::{Automaton, GenerationResult, GridAutomaton, WireWorld};
pub use cell::{CellState, CellValue};
pub use error::{AutomatonError, AutomatonResult};
pub use grid::{Grid, Margins};
pub use rule::{PaletteEntry, Rgb, Rule, WireWorldRule};
pub use view::{View, ViewRequest};

// Persistence
pub use persistence::{load_grid, read_npy, save_grid, write_npy, NPY_EXTENSION};
