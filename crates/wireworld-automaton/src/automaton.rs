//! Grid automaton that orchestrates generation updates.
//!
//! [`Automaton`] is the capability set consumed by renderers, editors and
//! playback drivers. [`GridAutomaton`] implements it for any [`Rule`];
//! [`WireWorld`] is the WireWorld instantiation.

use std::io::{Read, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::cell::CellValue;
use crate::error::AutomatonResult;
use crate::grid::{Grid, Margins};
use crate::persistence;
use crate::rule::{PaletteEntry, Rgb, Rule, WireWorldRule};
use crate::view::{self, View, ViewRequest};

/// Result of a single generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GenerationResult {
    /// Generation number that was computed (1 for the first advance).
    pub generation: u64,

    /// Number of cells whose state changed.
    pub changed: usize,

    /// Total number of cells.
    pub cells: usize,

    /// Duration of the update.
    pub duration: Duration,
}

impl GenerationResult {
    /// Check if any cell changed.
    pub fn had_changes(&self) -> bool {
        self.changed > 0
    }

    /// Fraction of cells that changed.
    pub fn change_rate(&self) -> f32 {
        if self.cells == 0 {
            0.0
        } else {
            self.changed as f32 / self.cells as f32
        }
    }
}

/// Operations a cellular automaton exposes to its collaborators.
///
/// Coordinates are signed so that callers translating pointer positions can
/// pass them through unchanged; anything outside the grid is `OutOfRange`.
pub trait Automaton {
    /// Cell state type.
    type State: CellValue;

    /// Write `value` into cell `(x, y)`.
    fn set(&mut self, x: i64, y: i64, value: Self::State) -> AutomatonResult<()>;

    /// Advance cell `(x, y)` to the next state in the cycle order.
    fn cycle(&mut self, x: i64, y: i64) -> AutomatonResult<()>;

    /// Compute and install the next generation.
    fn advance(&mut self) -> GenerationResult;

    /// Read a clipped (and optionally padded) window.
    fn read(&self, request: &ViewRequest) -> AutomatonResult<View<Self::State>>;

    /// Grow the grid by empty margins; negative margins are `InvalidDimensions`.
    ///
    /// Existing cells move by `(left, top)`; callers tracking a viewport
    /// origin must add [`Margins::origin_shift`] to it.
    fn resize(&mut self, left: i64, right: i64, top: i64, bottom: i64)
        -> AutomatonResult<Margins>;

    /// Current `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// RGB colors indexed by raw state value.
    fn color_table(&self) -> &'static [Rgb];

    /// `(label, state)` pairs for a tool selector.
    fn palette_entries(&self) -> &'static [PaletteEntry<Self::State>];

    /// Replace the grid with one decoded from `source`.
    fn load(&mut self, source: &mut dyn Read) -> AutomatonResult<()>;

    /// Serialize the grid to `sink`.
    fn save(&self, sink: &mut dyn Write) -> AutomatonResult<()>;
}

/// An automaton over a dense grid driven by a [`Rule`].
#[derive(Debug, Clone)]
pub struct GridAutomaton<R: Rule> {
    /// The rule set.
    rule: R,

    /// Current generation's cells.
    grid: Grid<R::State>,

    /// Generations computed since construction or the last load.
    generation: u64,
}

/// WireWorld automaton.
pub type WireWorld = GridAutomaton<WireWorldRule>;

impl<R: Rule + Default> Default for GridAutomaton<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Rule> GridAutomaton<R> {
    /// Create an automaton seeded with the rule's initial board.
    pub fn new(rule: R) -> Self {
        let grid = rule.seed();
        Self::with_grid(rule, grid)
    }

    /// Create with an explicit initial grid.
    pub fn with_grid(rule: R, grid: Grid<R::State>) -> Self {
        Self {
            rule,
            grid,
            generation: 0,
        }
    }

    /// Get the rule set.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Get reference to the current grid.
    pub fn grid(&self) -> &Grid<R::State> {
        &self.grid
    }

    /// Consume the automaton, returning its grid.
    pub fn into_grid(self) -> Grid<R::State> {
        self.grid
    }

    /// Generations computed since construction or the last load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Compute the next grid without installing it.
    pub fn next_grid(&self) -> Grid<R::State> {
        let (width, height) = self.grid.size();
        Grid::from_fn(width, height, |x, y| self.rule.next_state(&self.grid, x, y))
    }

    /// Run exactly `n` generations.
    pub fn run_generations(&mut self, n: usize) -> Vec<GenerationResult> {
        (0..n).map(|_| self.advance()).collect()
    }

    /// Install a new grid, resetting the generation counter.
    pub fn replace_grid(&mut self, grid: Grid<R::State>) {
        self.grid = grid;
        self.generation = 0;
    }
}

impl<R: Rule> Automaton for GridAutomaton<R> {
    type State = R::State;

    fn set(&mut self, x: i64, y: i64, value: R::State) -> AutomatonResult<()> {
        let (col, row) = self.grid.locate(x, y)?;
        self.grid.set(col, row, value)
    }

    fn cycle(&mut self, x: i64, y: i64) -> AutomatonResult<()> {
        let (col, row) = self.grid.locate(x, y)?;
        let current = self.grid.get(col, row).unwrap_or_default();
        self.grid.set(col, row, current.cycled())
    }

    fn advance(&mut self) -> GenerationResult {
        let started = Instant::now();
        let next = self.next_grid();
        let changed = self
            .grid
            .cells()
            .iter()
            .zip(next.cells())
            .filter(|(before, after)| before != after)
            .count();

        self.grid = next;
        self.generation += 1;

        let result = GenerationResult {
            generation: self.generation,
            changed,
            cells: self.grid.area(),
            duration: started.elapsed(),
        };

        debug!(
            rule = self.rule.id(),
            generation = result.generation,
            changed = result.changed,
            duration_us = result.duration.as_micros() as u64,
            "generation_complete"
        );

        result
    }

    fn read(&self, request: &ViewRequest) -> AutomatonResult<View<R::State>> {
        view::extract(&self.grid, request)
    }

    fn resize(
        &mut self,
        left: i64,
        right: i64,
        top: i64,
        bottom: i64,
    ) -> AutomatonResult<Margins> {
        let margins = Margins::from_signed(left, right, top, bottom)?;
        if margins.is_zero() {
            return Ok(margins);
        }

        self.grid = self.grid.grown(&margins)?;

        debug!(
            left = margins.left,
            right = margins.right,
            top = margins.top,
            bottom = margins.bottom,
            width = self.grid.width(),
            height = self.grid.height(),
            "grid_resized"
        );

        Ok(margins)
    }

    fn size(&self) -> (usize, usize) {
        self.grid.size()
    }

    fn color_table(&self) -> &'static [Rgb] {
        self.rule.color_table()
    }

    fn palette_entries(&self) -> &'static [PaletteEntry<R::State>] {
        self.rule.palette()
    }

    fn load(&mut self, source: &mut dyn Read) -> AutomatonResult<()> {
        let grid = persistence::read_npy(source)?;
        info!(width = grid.width(), height = grid.height(), "Loaded grid");
        self.replace_grid(grid);
        Ok(())
    }

    fn save(&self, sink: &mut dyn Write) -> AutomatonResult<()> {
        persistence::write_npy(&self.grid, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState::{self, *};
    use crate::error::AutomatonError;
    use crate::test_fixtures::{grid_from_digits, seed_grid};

    fn wireworld(rows: &[&str]) -> WireWorld {
        WireWorld::with_grid(WireWorldRule, grid_from_digits(rows))
    }

    #[test]
    fn test_default_uses_seed() {
        let automaton = WireWorld::default();
        assert_eq!(automaton.grid(), &seed_grid());
        assert_eq!(automaton.size(), (7, 5));
        assert_eq!(automaton.generation(), 0);
    }

    #[test]
    fn test_set_then_read() {
        let mut automaton = WireWorld::default();
        automaton.set(6, 4, Conductor).unwrap();
        let view = automaton.read(&ViewRequest::cell(6, 4)).unwrap();
        assert_eq!(view.get(0, 0), Some(Conductor));
    }

    #[test]
    fn test_set_out_of_range_leaves_grid_unchanged() {
        let mut automaton = WireWorld::default();
        let before = automaton.grid().clone();
        for (x, y) in [(7, 0), (0, 5), (-1, 2), (3, -1)] {
            let err = automaton.set(x, y, Conductor).unwrap_err();
            assert!(matches!(err, AutomatonError::OutOfRange { .. }));
            assert!(automaton.cycle(x, y).is_err());
        }
        assert_eq!(automaton.grid(), &before);
    }

    #[test]
    fn test_cycle_walks_all_states() {
        let mut automaton = wireworld(&["0"]);
        let mut seen = Vec::new();
        for _ in 0..4 {
            automaton.cycle(0, 0).unwrap();
            seen.push(automaton.grid().get(0, 0).unwrap());
        }
        assert_eq!(seen, vec![Conductor, ElectronTail, ElectronHead, Empty]);
    }

    #[test]
    fn test_advance_counts_changes() {
        let mut automaton = wireworld(&["123", "000"]);
        let result = automaton.advance();
        assert_eq!(result.generation, 1);
        // head -> tail, tail -> conductor; the conductor sees no head at (0,0)
        // because it is two columns away.
        assert_eq!(result.changed, 2);
        assert_eq!(result.cells, 6);
        assert!(result.had_changes());
        assert_eq!(automaton.grid(), &grid_from_digits(&["233", "000"]));
    }

    #[test]
    fn test_empty_grid_advance() {
        let mut automaton = WireWorld::with_grid(WireWorldRule, Grid::default());
        let result = automaton.advance();
        assert_eq!(result.changed, 0);
        assert_eq!(result.change_rate(), 0.0);
        assert_eq!(automaton.size(), (0, 0));
    }

    #[test]
    fn test_run_generations() {
        let mut automaton = WireWorld::default();
        let results = automaton.run_generations(3);
        assert_eq!(results.len(), 3);
        assert_eq!(automaton.generation(), 3);
        assert_eq!(results[2].generation, 3);
    }

    #[test]
    fn test_resize_negative_rejected() {
        let mut automaton = WireWorld::default();
        let err = automaton.resize(1, 0, -2, 0).unwrap_err();
        assert!(matches!(err, AutomatonError::InvalidDimensions { .. }));
        assert_eq!(automaton.size(), (7, 5));
    }

    #[test]
    fn test_resize_shifts_coordinates() {
        let mut automaton = WireWorld::default();
        let margins = automaton.resize(3, 1, 2, 0).unwrap();
        assert_eq!(margins.origin_shift(), (3, 2));
        assert_eq!(automaton.size(), (11, 7));
        // The head formerly at (2, 1).
        assert_eq!(automaton.grid().get(5, 3), Some(ElectronHead));
    }

    #[test]
    fn test_metadata_passthrough() {
        let automaton = WireWorld::default();
        assert_eq!(automaton.color_table().len(), 4);
        assert_eq!(automaton.palette_entries()[0].state, CellState::Conductor);
    }

    #[test]
    fn test_save_load_resets_generation() {
        let mut automaton = WireWorld::default();
        automaton.advance();
        let mut bytes = Vec::new();
        automaton.save(&mut bytes).unwrap();

        let mut restored = wireworld(&["0"]);
        restored.load(&mut bytes.as_slice()).unwrap();
        assert_eq!(restored.grid(), automaton.grid());
        assert_eq!(restored.generation(), 0);
    }

    #[test]
    fn test_failed_load_keeps_grid() {
        let mut automaton = WireWorld::default();
        let err = automaton.load(&mut &b"not a grid"[..]).unwrap_err();
        assert!(matches!(err, AutomatonError::CorruptFile { .. }));
        assert_eq!(automaton.grid(), &seed_grid());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut automaton: Box<dyn Automaton<State = CellState>> = Box::new(WireWorld::default());
        automaton.advance();
        assert_eq!(automaton.size(), (7, 5));
    }
}
