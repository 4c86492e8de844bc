//! `ww step`: advance a board a fixed number of generations.

use std::path::Path;

use anyhow::Result;

use super::{open_board, save_board};

pub fn execute(path: &Path, generations: usize, output: Option<&Path>) -> Result<()> {
    let mut world = open_board(path)?;
    let results = world.run_generations(generations);
    let changed: usize = results.iter().map(|r| r.changed).sum();

    let target = output.unwrap_or(path);
    save_board(&world, target)?;

    println!("✅ Advanced {} generation(s), {} cell change(s)", generations, changed);
    println!("💾 Saved to {}", target.display());
    Ok(())
}
