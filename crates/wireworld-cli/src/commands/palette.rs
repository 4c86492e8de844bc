//! `ww palette`: list the paintable states.

use anyhow::Result;
use wireworld_automaton::{Automaton, CellValue, Rgb, WireWorld};

use crate::render::{glyph, swatch, RenderStyle};

pub fn execute(style: RenderStyle) -> Result<()> {
    let world = WireWorld::default();
    let colors = world.color_table();

    println!("🎨 Palette");
    for entry in world.palette_entries() {
        let raw = entry.state.to_raw();
        let color = colors.get(raw as usize).copied().unwrap_or(Rgb(0, 0, 0));
        println!(
            "   {}  {:<14} {}  {}  {}",
            raw,
            entry.label,
            glyph(entry.state),
            hex(color),
            swatch(color, style)
        );
    }
    println!("   Erase a cell with `ww erase <file> <x> <y>`");
    Ok(())
}

fn hex(Rgb(r, g, b): Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
