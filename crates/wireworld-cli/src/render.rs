//! Terminal rendering of views.

use std::fmt::Write as _;

use wireworld_automaton::{CellState, CellValue, Rgb, View};

/// How cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// Two-column blocks in ANSI true colour, mapped through the color table.
    Color,
    /// One ASCII glyph per cell.
    Plain,
}

impl RenderStyle {
    pub fn select(plain: bool, color_enabled: bool) -> Self {
        if plain || !color_enabled {
            RenderStyle::Plain
        } else {
            RenderStyle::Color
        }
    }
}

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const RESET: &str = "\x1b[0m";

/// Plain-text glyph for a state.
pub fn glyph(state: CellState) -> char {
    match state {
        CellState::Empty => '.',
        CellState::ElectronHead => 'H',
        CellState::ElectronTail => 't',
        CellState::Conductor => '#',
    }
}

/// Render `view` as lines of text, one per row.
pub fn render_view(view: &View, colors: &[Rgb], style: RenderStyle) -> String {
    let mut out = String::with_capacity(view.size().0 * view.size().1 * 2 + view.height());
    for row in view.rows() {
        match style {
            RenderStyle::Plain => out.extend(row.iter().map(|s| glyph(*s))),
            RenderStyle::Color => {
                for state in row {
                    let Rgb(r, g, b) = colors
                        .get(state.to_raw() as usize)
                        .copied()
                        .unwrap_or(Rgb(0, 0, 0));
                    let _ = write!(out, "\x1b[48;2;{};{};{}m  ", r, g, b);
                }
                out.push_str(RESET);
            }
        }
        out.push('\n');
    }
    out
}

/// A colour swatch for palette listings.
pub fn swatch(color: Rgb, style: RenderStyle) -> String {
    let Rgb(r, g, b) = color;
    match style {
        RenderStyle::Color => format!("\x1b[48;2;{};{};{}m  {}", r, g, b, RESET),
        RenderStyle::Plain => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireworld_automaton::{Automaton, ViewRequest, WireWorld};

    #[test]
    fn test_plain_render_of_seed() {
        let world = WireWorld::default();
        let view = world.read(&ViewRequest::new(0, 0)).unwrap();
        let text = render_view(&view, world.color_table(), RenderStyle::Plain);
        assert_eq!(text, ".......\n..Ht#..\n.#...#.\n..###..\n.......\n");
    }

    #[test]
    fn test_color_render_uses_color_table() {
        let world = WireWorld::default();
        let view = world.read(&ViewRequest::cell(2, 1)).unwrap();
        let text = render_view(&view, world.color_table(), RenderStyle::Color);
        assert_eq!(text, "\x1b[48;2;0;0;255m  \x1b[0m\n");
    }

    #[test]
    fn test_style_selection() {
        assert_eq!(RenderStyle::select(true, true), RenderStyle::Plain);
        assert_eq!(RenderStyle::select(false, false), RenderStyle::Plain);
        assert_eq!(RenderStyle::select(false, true), RenderStyle::Color);
    }
}
