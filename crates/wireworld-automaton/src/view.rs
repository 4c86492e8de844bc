//! Windowed, clipped reads of a grid.
//!
//! A [`ViewRequest`] names an origin and an optional size. The extracted
//! [`View`] covers the intersection of that window with the stored grid,
//! optionally zero-padded on the right and bottom to the requested size.

use serde::Serialize;

use crate::cell::{CellState, CellValue};
use crate::error::{AutomatonError, AutomatonResult};
use crate::grid::Grid;

/// Parameters of a windowed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRequest {
    /// Column of the top-left cell.
    pub x: i64,
    /// Row of the top-left cell.
    pub y: i64,
    /// Requested width; `None` reads to the right edge.
    pub width: Option<usize>,
    /// Requested height; `None` reads to the bottom edge.
    pub height: Option<usize>,
    /// Pad with empty cells up to the requested size.
    pub pad: bool,
}

impl ViewRequest {
    /// Read everything right of and below `(x, y)`.
    pub fn new(x: i64, y: i64) -> Self {
        Self {
            x,
            y,
            width: None,
            height: None,
            pad: false,
        }
    }

    /// Read the single cell `(x, y)`.
    pub fn cell(x: i64, y: i64) -> Self {
        Self::new(x, y).with_size(1, 1)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_size(self, width: usize, height: usize) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Pad the result to exactly the requested size.
    pub fn padded(mut self) -> Self {
        self.pad = true;
        self
    }
}

/// A rectangular copy of part of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View<S = CellState> {
    origin: (usize, usize),
    width: usize,
    height: usize,
    cells: Vec<S>,
}

impl<S: CellValue> View<S> {
    /// Grid coordinates of the view's top-left cell.
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// State at view-local `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<S> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[S]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[S] {
        &self.cells
    }

    /// Raw values, row-major; suitable as an indexed-color image buffer.
    pub fn to_raw(&self) -> Vec<u8> {
        self.cells.iter().map(|s| s.to_raw()).collect()
    }
}

/// Extract the window described by `request` from `grid`.
pub fn extract<S: CellValue>(grid: &Grid<S>, request: &ViewRequest) -> AutomatonResult<View<S>> {
    let (x, y) = grid.locate(request.x, request.y)?;
    let available_w = grid.width() - x;
    let available_h = grid.height() - y;

    let requested_w = request.width.unwrap_or(available_w);
    let requested_h = request.height.unwrap_or(available_h);
    let clipped_w = requested_w.min(available_w);
    let clipped_h = requested_h.min(available_h);

    let (width, height) = if request.pad {
        (requested_w, requested_h)
    } else {
        (clipped_w, clipped_h)
    };

    let area = width.checked_mul(height).ok_or_else(|| {
        AutomatonError::invalid_dimensions(format!("{}x{} view overflows", width, height))
    })?;

    let mut cells = vec![S::default(); area];
    for (dy, row) in grid.rows().skip(y).take(clipped_h).enumerate() {
        let start = dy * width;
        cells[start..start + clipped_w].copy_from_slice(&row[x..x + clipped_w]);
    }

    Ok(View {
        origin: (x, y),
        width,
        height,
        cells,
    })
}
