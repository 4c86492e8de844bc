//! Window state kept by the front end.
//!
//! The engine only answers windowed reads; which part of the board is on
//! screen, and keeping that window backed by storage, is up to the caller.

use wireworld_automaton::{Automaton, AutomatonResult, Margins, ViewRequest};

/// The visible part of the board, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the board right and down until the whole window lies on it.
    ///
    /// Returns the margins that were added (all zero when none were needed).
    pub fn fit<A: Automaton + ?Sized>(&self, automaton: &mut A) -> AutomatonResult<Margins> {
        let (board_w, board_h) = automaton.size();
        let right = self.x.saturating_add(self.width).saturating_sub(board_w);
        let bottom = self.y.saturating_add(self.height).saturating_sub(board_h);
        automaton.resize(0, to_signed(right), 0, to_signed(bottom))
    }

    /// Follow the cells under the window after the board grew by `margins`.
    pub fn apply_shift(&mut self, margins: &Margins) {
        let (dx, dy) = margins.origin_shift();
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Keep the origin within `board - window` on both axes.
    pub fn clamp_to(&mut self, (board_w, board_h): (usize, usize)) {
        self.x = self.x.min(board_w.saturating_sub(self.width));
        self.y = self.y.min(board_h.saturating_sub(self.height));
    }

    /// A padded read of exactly this window.
    pub fn request(&self) -> ViewRequest {
        ViewRequest::new(to_signed(self.x), to_signed(self.y))
            .with_size(self.width, self.height)
            .padded()
    }
}

fn to_signed(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireworld_automaton::{CellState, Grid, WireWorld, WireWorldRule};

    fn board(width: usize, height: usize) -> WireWorld {
        WireWorld::with_grid(WireWorldRule, Grid::new(width, height))
    }

    #[test]
    fn test_fit_grows_right_and_bottom() {
        let mut world = board(7, 5);
        world.set(6, 4, CellState::Conductor).unwrap();

        let margins = Viewport::new(2, 1, 30, 40).fit(&mut world).unwrap();
        assert_eq!(margins, Margins::new(0, 25, 0, 36));
        assert_eq!(world.size(), (32, 41));
        assert_eq!(world.grid().get(6, 4), Some(CellState::Conductor));
    }

    #[test]
    fn test_fit_is_noop_when_window_fits() {
        let mut world = board(10, 10);
        let margins = Viewport::new(0, 0, 10, 10).fit(&mut world).unwrap();
        assert!(margins.is_zero());
        assert_eq!(world.size(), (10, 10));
    }

    #[test]
    fn test_apply_shift_follows_content() {
        let mut viewport = Viewport::new(3, 4, 5, 5);
        viewport.apply_shift(&Margins::new(2, 9, 1, 9));
        assert_eq!((viewport.x, viewport.y), (5, 5));
    }

    #[test]
    fn test_clamp_to_board() {
        let mut viewport = Viewport::new(50, 50, 30, 40);
        viewport.clamp_to((100, 60));
        assert_eq!((viewport.x, viewport.y), (50, 20));

        // A window larger than the board pins the origin to the corner
        viewport.clamp_to((7, 5));
        assert_eq!((viewport.x, viewport.y), (0, 0));
    }

    #[test]
    fn test_request_is_padded_window() {
        let request = Viewport::new(1, 2, 3, 4).request();
        assert_eq!((request.x, request.y), (1, 2));
        assert_eq!((request.width, request.height), (Some(3), Some(4)));
        assert!(request.pad);
    }
}
