//! `ww extend`: grow a board on any side.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use wireworld_automaton::Automaton;

use super::{open_board, save_board};
use crate::viewport::Viewport;

/// Options for `ww extend`.
#[derive(Debug, Clone, Default)]
pub struct ExtendOptions {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
    /// Current view origin, reported after the shift.
    pub view_x: usize,
    pub view_y: usize,
}

pub fn execute(path: &Path, options: &ExtendOptions) -> Result<()> {
    let mut world = open_board(path)?;
    let (old_w, old_h) = world.size();

    let margins = world
        .resize(options.left, options.right, options.top, options.bottom)
        .context("Cannot extend board")?;

    if margins.is_zero() {
        println!("Board unchanged at {}x{}", old_w, old_h);
        return Ok(());
    }

    save_board(&world, path)?;

    let (new_w, new_h) = world.size();
    let (dx, dy) = margins.origin_shift();
    let mut viewport = Viewport::new(options.view_x, options.view_y, 0, 0);
    viewport.apply_shift(&margins);

    info!(path = %path.display(), dx, dy, "Board extended");
    println!("✅ Extended board {}x{} -> {}x{}", old_w, old_h, new_w, new_h);
    println!("   Existing cells moved by ({}, {})", dx, dy);
    println!(
        "   View origin ({}, {}) -> ({}, {})",
        options.view_x, options.view_y, viewport.x, viewport.y
    );
    Ok(())
}
