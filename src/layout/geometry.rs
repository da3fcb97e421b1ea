//! Uniform-cell grid geometry and the pixel-to-cell coordinate mapper.

use crate::config::EngineConfig;
use crate::types::CellPosition;

/// Pixel rectangle of a single cell in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Precomputed grid dimensions for pixel/index conversion.
///
/// Every lookup is a pure total function: out-of-range pixel offsets clamp to
/// the nearest valid index, which is what lets the autoscroll loop re-derive
/// the selection end from a cached pointer offset on every frame.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    row_count: u32,
    col_count: u32,
    row_height: f32,
    col_width: f32,
}

impl GridGeometry {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            row_count: config.row_count.max(1),
            col_count: config.col_count.max(1),
            row_height: config.row_height,
            col_width: config.col_width,
        }
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn col_count(&self) -> u32 {
        self.col_count
    }

    /// Total content width of the cells area.
    pub fn content_width(&self) -> f32 {
        self.col_count as f32 * self.col_width
    }

    /// Total content height of the cells area.
    pub fn content_height(&self) -> f32 {
        self.row_count as f32 * self.row_height
    }

    /// Column index at an x offset in content coordinates, clamped.
    pub fn col_at_x(&self, x: f32) -> u32 {
        index_at(x, self.col_width, self.col_count)
    }

    /// Row index at a y offset in content coordinates, clamped.
    pub fn row_at_y(&self, y: f32) -> u32 {
        index_at(y, self.row_height, self.row_count)
    }

    /// The coordinate mapper: viewport-relative pixel offsets plus the current
    /// scroll offset to a clamped cell address.
    ///
    /// `x`/`y` are relative to the scrollable content's top-left; the caller
    /// has already subtracted any header origin.
    pub fn cell_at(&self, x: f32, y: f32, scroll_x: f32, scroll_y: f32) -> CellPosition {
        CellPosition {
            row: self.row_at_y(y + scroll_y),
            col: self.col_at_x(x + scroll_x),
        }
    }

    /// Pixel bounds of a cell in content coordinates. Indices past the grid
    /// edge clamp to the last cell.
    pub fn cell_rect(&self, row: u32, col: u32) -> CellRect {
        let row = row.min(self.row_count - 1);
        let col = col.min(self.col_count - 1);
        CellRect {
            x: col as f32 * self.col_width,
            y: row as f32 * self.row_height,
            width: self.col_width,
            height: self.row_height,
        }
    }
}

/// Clamped `floor(offset / size)` for one axis.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_at(offset: f32, size: f32, count: u32) -> u32 {
    if offset <= 0.0 || size <= 0.0 {
        return 0;
    }
    let index = (offset / size).floor();
    let last = count.saturating_sub(1);
    if index >= last as f32 {
        last
    } else {
        index as u32
    }
}
