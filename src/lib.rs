//! gridsel - selection and autoscroll engine for virtualized grids
//!
//! Turns raw pointer and keyboard events into a consistent selection model
//! over a large scrollable grid:
//! - Single cells, rectangular ranges, whole rows/columns, select-all
//! - Drag-based range extension from cells, headers, and the corner control
//! - Edge-triggered autoscroll with velocity ramp-up, re-deriving the
//!   selection end on every scroll tick
//! - Keyboard navigation with shift-extension and Home/End jumps
//!
//! The pure core (`types`, `layout`, `engine`) builds and tests natively;
//! the browser shell (`viewer`) is gated to `wasm32` and drives the core
//! from DOM events.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridsel';
//! await init();
//! const view = new GridView(scrollContainer, { row_count: 1000, col_count: 26 });
//! view.setSelectionCallback((range) => render(range));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use config::EngineConfig;
pub use engine::{NavKey, SelectionEngine};
pub use error::{GridError, Result};
pub use layout::{CellRect, GridGeometry, Viewport};
pub use types::*;
pub use viewer::GridView;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
