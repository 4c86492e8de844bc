//! `ww set`, `ww erase` and `ww cycle`: single-cell edits.
//!
//! Each edit loads the board, changes one cell and writes the board back.

use std::path::Path;

use anyhow::{Context, Result};
use wireworld_automaton::{Automaton, AutomatonResult, CellState, ViewRequest, WireWorld};

use super::{open_board, save_board};

/// Paint `state` at `(x, y)`.
pub fn set(path: &Path, x: i64, y: i64, state: CellState) -> Result<()> {
    let state = edit_cell(path, x, y, |world| world.set(x, y, state))?;
    println!("✅ Set ({}, {}) to {}", x, y, state);
    Ok(())
}

/// Clear `(x, y)` back to empty.
pub fn erase(path: &Path, x: i64, y: i64) -> Result<()> {
    edit_cell(path, x, y, |world| world.set(x, y, CellState::Empty))?;
    println!("🧹 Erased ({}, {})", x, y);
    Ok(())
}

/// Step `(x, y)` to the next state in the cycle order.
pub fn cycle(path: &Path, x: i64, y: i64) -> Result<()> {
    let state = edit_cell(path, x, y, |world| world.cycle(x, y))?;
    println!("🔄 ({}, {}) is now {}", x, y, state);
    Ok(())
}

/// Apply `edit`, save, and return the cell's new state.
fn edit_cell(
    path: &Path,
    x: i64,
    y: i64,
    edit: impl FnOnce(&mut WireWorld) -> AutomatonResult<()>,
) -> Result<CellState> {
    let mut world = open_board(path)?;
    edit(&mut world).with_context(|| format!("Cannot edit cell ({}, {})", x, y))?;

    let state = world
        .read(&ViewRequest::cell(x, y))?
        .get(0, 0)
        .unwrap_or_default();

    save_board(&world, path)?;
    Ok(state)
}
