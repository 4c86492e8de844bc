//! `ww info`: board size and state census.

use std::path::Path;

use anyhow::Result;
use wireworld_automaton::{Automaton, CellState};

use super::open_board;

pub fn execute(path: &Path) -> Result<()> {
    let world = open_board(path)?;
    let grid = world.grid();
    let (width, height) = world.size();

    println!("📊 WireWorld Board");
    println!("{:─<40}", "");
    println!("📁 File:  {}", path.display());
    println!("📐 Size:  {}x{} ({} cells)", width, height, grid.area());
    println!();
    for state in CellState::ALL {
        println!("   {:<14} {}", state.label(), grid.count(state));
    }
    Ok(())
}
