//! Edge-zone scroll velocity and the pure per-frame autoscroll step.
//!
//! The browser shell only schedules frames and writes DOM scroll offsets;
//! everything it does per frame is the [`autoscroll_step`] function here, so
//! the whole feedback loop (pointer -> velocity -> offset -> selection end)
//! is testable without a DOM.

use crate::layout::GridGeometry;
use crate::types::{AxisScroll, CellPosition, ScrollDirection, ScrollVelocity};

/// Width of the edge band that triggers autoscroll, in logical pixels.
pub const EDGE_THRESHOLD: f32 = 50.0;
/// Speed at the moment the pointer enters an edge zone (px per frame).
pub const BASE_SPEED: f32 = 2.0;
/// Ramp factor applied to the normalized zone depth.
pub const SPEED_RAMP: f32 = 28.0;
/// Hard speed cap (px per frame).
pub const MAX_SPEED: f32 = 60.0;

/// Client-coordinate rectangle of the visible cells area (header bands already
/// excluded by the caller).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Power-law ramp: gentle inside the zone, accelerating the further the
/// pointer travels past it (including past the window edge). Depth is
/// unbounded; the cap provides the ceiling.
fn ramp(depth: f32, threshold: f32) -> f32 {
    let normalized = (depth.max(0.0) / threshold.max(1.0)).powf(1.5);
    (BASE_SPEED + SPEED_RAMP * normalized).min(MAX_SPEED)
}

fn axis_velocity(pointer: f32, near: f32, far: f32, threshold: f32) -> AxisScroll {
    if pointer < near + threshold {
        let depth = (near + threshold) - pointer;
        AxisScroll::moving(ScrollDirection::Left, ramp(depth, threshold))
    } else if pointer > far - threshold {
        let depth = pointer - (far - threshold);
        AxisScroll::moving(ScrollDirection::Right, ramp(depth, threshold))
    } else {
        AxisScroll::idle()
    }
}

/// Scroll direction and speed for a pointer position relative to a viewport.
///
/// The two axes are independent, so a pointer in a corner zone reports both
/// and produces diagonal autoscroll. A viewport narrower than two thresholds
/// biases toward the near edge, which keeps the result deterministic.
pub fn scroll_velocity(
    pointer_x: f32,
    pointer_y: f32,
    rect: ViewRect,
    threshold: f32,
) -> ScrollVelocity {
    let horizontal = axis_velocity(pointer_x, rect.left, rect.right(), threshold);
    let vertical = match axis_velocity(pointer_y, rect.top, rect.bottom(), threshold) {
        AxisScroll {
            direction: Some(ScrollDirection::Left),
            speed,
        } => AxisScroll::moving(ScrollDirection::Up, speed),
        AxisScroll {
            direction: Some(ScrollDirection::Right),
            speed,
        } => AxisScroll::moving(ScrollDirection::Down, speed),
        idle => idle,
    };
    ScrollVelocity {
        horizontal,
        vertical,
    }
}

/// Snapshot of live state consumed by one autoscroll frame.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    /// Last cached pointer position, in client coordinates.
    pub pointer_x: f32,
    pub pointer_y: f32,
    /// Fresh cells-area rectangle, client coordinates.
    pub rect: ViewRect,
    /// Fresh scroll offsets, re-read each frame so externally driven scrolls
    /// are never clobbered.
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub geometry: &'a GridGeometry,
    pub threshold: f32,
}

/// Committed outcome of one autoscroll frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub scroll_x: f32,
    pub scroll_y: f32,
    /// Whether the offset actually moved (false once pinned at a clamp).
    pub scrolled: bool,
    /// Selection end derived from the NEW offset, so observers never see an
    /// end cell inconsistent with the scroll position that produced it.
    pub end: CellPosition,
}

/// One frame of the autoscroll pipeline: velocity, clamped offset advance,
/// then selection-end re-derivation. Returns `None` when the pointer has left
/// every edge zone, which transitions the loop back to idle.
pub fn autoscroll_step(input: &StepInput<'_>) -> Option<StepOutcome> {
    let velocity = scroll_velocity(input.pointer_x, input.pointer_y, input.rect, input.threshold);
    if velocity.is_idle() {
        return None;
    }

    let max_x = (input.geometry.content_width() - input.rect.width).max(0.0);
    let max_y = (input.geometry.content_height() - input.rect.height).max(0.0);
    let new_x = (input.scroll_x + velocity.horizontal.signed()).clamp(0.0, max_x);
    let new_y = (input.scroll_y + velocity.vertical.signed()).clamp(0.0, max_y);
    let scrolled = (new_x - input.scroll_x).abs() > f32::EPSILON
        || (new_y - input.scroll_y).abs() > f32::EPSILON;

    let end = input.geometry.cell_at(
        input.pointer_x - input.rect.left,
        input.pointer_y - input.rect.top,
        new_x,
        new_y,
    );

    Some(StepOutcome {
        scroll_x: new_x,
        scroll_y: new_y,
        scrolled,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_viewport_is_idle() {
        let rect = ViewRect::new(0.0, 0.0, 400.0, 300.0);
        let velocity = scroll_velocity(200.0, 150.0, rect, EDGE_THRESHOLD);
        assert!(velocity.is_idle());
        assert!(velocity.horizontal.speed.abs() < f32::EPSILON);
    }

    #[test]
    fn speed_grows_with_depth_past_the_zone() {
        let rect = ViewRect::new(0.0, 0.0, 400.0, 300.0);
        let shallow = scroll_velocity(45.0, 150.0, rect, EDGE_THRESHOLD);
        let deep = scroll_velocity(-80.0, 150.0, rect, EDGE_THRESHOLD);
        assert_eq!(shallow.horizontal.direction, Some(ScrollDirection::Left));
        assert_eq!(deep.horizontal.direction, Some(ScrollDirection::Left));
        assert!(deep.horizontal.speed > shallow.horizontal.speed);
        assert!(deep.horizontal.speed <= MAX_SPEED);
    }

    #[test]
    fn corner_pointer_reports_both_axes() {
        let rect = ViewRect::new(0.0, 0.0, 400.0, 300.0);
        let velocity = scroll_velocity(395.0, 295.0, rect, EDGE_THRESHOLD);
        assert_eq!(velocity.horizontal.direction, Some(ScrollDirection::Right));
        assert_eq!(velocity.vertical.direction, Some(ScrollDirection::Down));
        assert!(velocity.horizontal.speed > 0.0);
        assert!(velocity.vertical.speed > 0.0);
    }

    #[test]
    fn ramp_is_monotonic_and_capped() {
        let mut previous = 0.0;
        for depth in [0.0_f32, 10.0, 50.0, 120.0, 400.0, 4000.0] {
            let speed = ramp(depth, EDGE_THRESHOLD);
            assert!(speed >= previous);
            assert!(speed <= MAX_SPEED);
            previous = speed;
        }
        assert!((ramp(1e6, EDGE_THRESHOLD) - MAX_SPEED).abs() < f32::EPSILON);
    }
}
