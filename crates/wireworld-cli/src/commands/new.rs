//! `ww new`: create a board file.

use std::path::Path;

use anyhow::{bail, Result};
use wireworld_automaton::{Automaton, Grid, WireWorld, WireWorldRule};

use super::save_board;
use crate::config::Config;

/// Options for `ww new`.
#[derive(Debug, Clone, Default)]
pub struct NewOptions {
    /// Start from an all-empty board instead of the seed circuit.
    pub empty: bool,
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Overwrite an existing file.
    pub force: bool,
}

pub fn execute(config: &Config, path: &Path, options: &NewOptions) -> Result<()> {
    if path.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let world = if options.empty {
        let width = options.width.unwrap_or(config.board_width);
        let height = options.height.unwrap_or(config.board_height);
        WireWorld::with_grid(WireWorldRule, Grid::new(width, height))
    } else {
        WireWorld::default()
    };

    save_board(&world, path)?;

    let (width, height) = world.size();
    println!(
        "✅ Created {} {}x{} board at {}",
        if options.empty { "empty" } else { "seed" },
        width,
        height,
        path.display()
    );
    Ok(())
}
