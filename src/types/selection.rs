//! Gesture and scroll state tags for the selection engine.

use serde::{Deserialize, Serialize};

/// What shape the published selection has, so the host can highlight the
/// matching headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected
    RowRange,
    /// Entire column(s) selected
    ColumnRange,
    /// All cells selected (corner click)
    All,
}

/// Which surface started the current pointer gesture.
///
/// A single enum rather than independent booleans, so that impossible
/// combinations (a row and a column header drag at once) cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragKind {
    /// No gesture in progress
    #[default]
    None,
    /// Dragging from a cell - end moves freely in 2D
    Cell,
    /// Dragging from a row header - end column locked to the last column
    RowHeader,
    /// Dragging from a column header - end row locked to the last row
    ColumnHeader,
    /// Corner click - whole grid selected, no further drag tracking
    Corner,
}

impl DragKind {
    pub fn is_active(self) -> bool {
        self != DragKind::None
    }
}

/// Per-axis autoscroll direction during a selection drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
    Up,
    Down,
}

impl ScrollDirection {
    /// Sign applied to a speed to get a scroll delta on this axis.
    pub fn sign(self) -> f32 {
        match self {
            ScrollDirection::Left | ScrollDirection::Up => -1.0,
            ScrollDirection::Right | ScrollDirection::Down => 1.0,
        }
    }
}

/// Direction and speed for one scroll axis.
///
/// Invariant: `direction == None` implies `speed == 0.0`, and a non-null
/// direction always carries a positive speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScroll {
    pub direction: Option<ScrollDirection>,
    pub speed: f32,
}

impl AxisScroll {
    pub fn idle() -> Self {
        Self {
            direction: None,
            speed: 0.0,
        }
    }

    pub fn moving(direction: ScrollDirection, speed: f32) -> Self {
        Self {
            direction: Some(direction),
            speed,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.direction.is_none()
    }

    /// Signed scroll delta for this axis (negative for Left/Up).
    pub fn signed(&self) -> f32 {
        match self.direction {
            Some(direction) => direction.sign() * self.speed,
            None => 0.0,
        }
    }
}

/// Derived scroll state for both axes; recomputed every pointer move while
/// dragging, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollVelocity {
    pub horizontal: AxisScroll,
    pub vertical: AxisScroll,
}

impl ScrollVelocity {
    pub fn idle() -> Self {
        Self {
            horizontal: AxisScroll::idle(),
            vertical: AxisScroll::idle(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.horizontal.is_idle() && self.vertical.is_idle()
    }
}
