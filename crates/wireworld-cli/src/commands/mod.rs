//! CLI command implementations.

pub mod config;
pub mod edit;
pub mod extend;
pub mod info;
pub mod new;
pub mod palette;
pub mod run;
pub mod show;
pub mod step;

use std::path::Path;

use anyhow::{Context, Result};
use wireworld_automaton::{WireWorld, WireWorldRule};

/// Load a board file into a fresh automaton.
pub fn open_board(path: &Path) -> Result<WireWorld> {
    WireWorld::open(WireWorldRule, path)
        .with_context(|| format!("Failed to load board from {}", path.display()))
}

/// Write the automaton's board to `path`.
pub fn save_board(world: &WireWorld, path: &Path) -> Result<()> {
    world
        .save_to_path(path)
        .with_context(|| format!("Failed to save board to {}", path.display()))
}
