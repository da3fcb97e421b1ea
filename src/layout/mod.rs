//! Grid geometry and viewport management.
//!
//! This module handles:
//! - Pure pixel-to-cell conversion (the coordinate mapper)
//! - Viewport state (scroll position, visible range, clamping)
//! - Scroll-into-view target computation

mod geometry;
mod viewport;

pub use geometry::{CellRect, GridGeometry};
pub use viewport::Viewport;
