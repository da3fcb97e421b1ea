//! Core data model: cell addressing, gesture tags, and scroll state.

mod position;
mod selection;

pub use position::{CellPosition, CellRange};
pub use selection::{AxisScroll, DragKind, ScrollDirection, ScrollVelocity, SelectionKind};
