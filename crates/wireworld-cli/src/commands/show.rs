//! `ww show`: render one view of a board.

use std::path::Path;

use anyhow::{Context, Result};
use wireworld_automaton::Automaton;

use super::open_board;
use crate::config::Config;
use crate::render::{render_view, RenderStyle};
use crate::viewport::Viewport;

/// Options for `ww show`.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub x: usize,
    pub y: usize,
    pub width: Option<usize>,
    pub height: Option<usize>,
    /// Pad the view with empty cells past the board edge.
    pub pad: bool,
    pub plain: bool,
    /// Print the view as JSON instead of drawing it.
    pub json: bool,
}

pub fn execute(config: &Config, path: &Path, options: &ShowOptions) -> Result<()> {
    let world = open_board(path)?;

    let mut viewport = Viewport::new(
        options.x,
        options.y,
        options.width.unwrap_or(config.view_width),
        options.height.unwrap_or(config.view_height),
    );
    // A padded window is shown exactly as asked; otherwise keep it on the board
    if !options.pad {
        viewport.clamp_to(world.size());
    }

    let mut request = viewport.request();
    request.pad = options.pad;

    let view = world
        .read(&request)
        .with_context(|| format!("Cannot read view at ({}, {})", viewport.x, viewport.y))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let style = RenderStyle::select(options.plain, config.color);
        print!("{}", render_view(&view, world.color_table(), style));
    }
    Ok(())
}
