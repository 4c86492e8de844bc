//! Conway's Game of Life on the same grid engine.
//!
//! Shows that `GridAutomaton` is not tied to WireWorld: a two-state cell type
//! and a rule are all another automaton needs. Views, growth and `.npy`
//! persistence come for free.
//!
//! Run with:
//! ```bash
//! cargo run --example game_of_life -p wireworld-automaton
//! ```

use std::thread;
use std::time::Duration;

use wireworld_automaton::neighborhood::count_neighbors;
use wireworld_automaton::{
    Automaton, AutomatonResult, CellValue, Grid, GridAutomaton, PaletteEntry, Rgb, Rule,
    ViewRequest,
};

// =============================================================================
// Cell type
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Life {
    #[default]
    Dead,
    Alive,
}

impl CellValue for Life {
    const STATE_COUNT: u8 = 2;

    fn to_raw(self) -> u8 {
        self as u8
    }

    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Life::Dead),
            1 => Some(Life::Alive),
            _ => None,
        }
    }
}

// =============================================================================
// Game of Life Rule
// =============================================================================

/// Survive with 2-3 live neighbors, born with exactly 3.
#[derive(Debug, Clone, Default)]
struct GameOfLifeRule;

const LIFE_COLORS: [Rgb; 2] = [Rgb(0, 0, 0), Rgb(255, 255, 255)];

const LIFE_PALETTE: [PaletteEntry<Life>; 1] = [PaletteEntry {
    label: "Alive",
    state: Life::Alive,
}];

impl Rule for GameOfLifeRule {
    type State = Life;

    fn id(&self) -> &'static str {
        "game_of_life"
    }

    fn description(&self) -> &str {
        "Conway's Game of Life: survive with 2-3 neighbors, born with exactly 3"
    }

    fn next_state(&self, grid: &Grid<Life>, x: usize, y: usize) -> Life {
        let alive = grid.get(x, y) == Some(Life::Alive);
        match (alive, count_neighbors(grid, x, y, Life::Alive)) {
            (true, 2) | (true, 3) => Life::Alive, // Survival
            (false, 3) => Life::Alive,            // Birth
            _ => Life::Dead,
        }
    }

    fn color_table(&self) -> &'static [Rgb] {
        &LIFE_COLORS
    }

    fn palette(&self) -> &'static [PaletteEntry<Life>] {
        &LIFE_PALETTE
    }
}

// =============================================================================
// Main
// =============================================================================

fn print_board(life: &GridAutomaton<GameOfLifeRule>) -> AutomatonResult<()> {
    let view = life.read(&ViewRequest::new(0, 0))?;
    println!("Generation {}", life.generation());
    for row in view.rows() {
        let line: String = row
            .iter()
            .map(|c| if *c == Life::Alive { '█' } else { '·' })
            .collect();
        println!("{}", line);
    }
    println!();
    Ok(())
}

fn main() -> AutomatonResult<()> {
    println!("🎮 Conway's Game of Life on the WireWorld engine\n");

    let mut life = GridAutomaton::with_grid(GameOfLifeRule, Grid::new(8, 8));

    // Glider
    for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        life.set(x, y, Life::Alive)?;
    }

    print_board(&life)?;
    for _ in 0..4 {
        thread::sleep(Duration::from_millis(300));
        let result = life.advance();
        print_board(&life)?;
        println!(
            "   {} cell(s) changed ({:.1}%)\n",
            result.changed,
            result.change_rate() * 100.0
        );
    }

    // Make room for the glider to keep travelling: existing cells shift by (2, 2).
    let margins = life.resize(2, 0, 2, 0)?;
    println!("📐 Grown by {:?}, board now {:?}\n", margins, life.size());
    print_board(&life)?;

    Ok(())
}
