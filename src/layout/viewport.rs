//! Viewport state: scroll offsets, clamping, and scroll-into-view targets.

use super::GridGeometry;

/// The visible cells area of the grid.
///
/// `width`/`height` are the scroll container's client size minus any header
/// bands, so they measure exactly the region cells paint into. Offsets are in
/// content coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Largest valid scroll offsets, per axis.
    pub fn max_scroll(&self, geometry: &GridGeometry) -> (f32, f32) {
        (
            (geometry.content_width() - self.width).max(0.0),
            (geometry.content_height() - self.height).max(0.0),
        )
    }

    /// Pull the stored offsets back into the valid range.
    pub fn clamp_scroll(&mut self, geometry: &GridGeometry) {
        let (max_x, max_y) = self.max_scroll(geometry);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    /// Apply a scroll delta, clamped per axis. Returns the applied deltas when
    /// the offset actually moved.
    pub fn apply_delta(
        &mut self,
        delta_x: f32,
        delta_y: f32,
        geometry: &GridGeometry,
    ) -> Option<(f32, f32)> {
        let (max_x, max_y) = self.max_scroll(geometry);
        let new_x = (self.scroll_x + delta_x).clamp(0.0, max_x);
        let new_y = (self.scroll_y + delta_y).clamp(0.0, max_y);
        let dx = new_x - self.scroll_x;
        let dy = new_y - self.scroll_y;
        if dx.abs() > f32::EPSILON || dy.abs() > f32::EPSILON {
            self.scroll_x = new_x;
            self.scroll_y = new_y;
            return Some((dx, dy));
        }
        None
    }

    /// Visible row range (inclusive) at the current scroll position.
    pub fn visible_rows(&self, geometry: &GridGeometry) -> (u32, u32) {
        (
            geometry.row_at_y(self.scroll_y),
            geometry.row_at_y(self.scroll_y + self.height),
        )
    }

    /// Visible column range (inclusive) at the current scroll position.
    pub fn visible_cols(&self, geometry: &GridGeometry) -> (u32, u32) {
        (
            geometry.col_at_x(self.scroll_x),
            geometry.col_at_x(self.scroll_x + self.width),
        )
    }

    /// Offsets that bring a cell's full bounds inside the viewport, or `None`
    /// when it is already fully visible.
    ///
    /// Scrolls the minimum distance: a cell above/left of the viewport lands
    /// on the near edge, one below/right lands on the far edge.
    pub fn scroll_into_view(
        &self,
        row: u32,
        col: u32,
        geometry: &GridGeometry,
    ) -> Option<(f32, f32)> {
        let rect = geometry.cell_rect(row, col);
        let (max_x, max_y) = self.max_scroll(geometry);

        let mut target_x = self.scroll_x;
        if rect.x < self.scroll_x {
            target_x = rect.x;
        } else if rect.x + rect.width > self.scroll_x + self.width {
            target_x = rect.x + rect.width - self.width;
        }

        let mut target_y = self.scroll_y;
        if rect.y < self.scroll_y {
            target_y = rect.y;
        } else if rect.y + rect.height > self.scroll_y + self.height {
            target_y = rect.y + rect.height - self.height;
        }

        let target_x = target_x.clamp(0.0, max_x);
        let target_y = target_y.clamp(0.0, max_y);
        if (target_x - self.scroll_x).abs() > f32::EPSILON
            || (target_y - self.scroll_y).abs() > f32::EPSILON
        {
            Some((target_x, target_y))
        } else {
            None
        }
    }
}
