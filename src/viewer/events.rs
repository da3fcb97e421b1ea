//! Mouse and keyboard event routing for `GridView`.
//!
//! All functions here are `pub(crate)` helpers called from the listener
//! closures wired up in `mod.rs`. They resolve raw coordinates into engine
//! operations, collect any JS callbacks while the state borrow is held, and
//! invoke them only after it is released.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlDivElement;

#[cfg(target_arch = "wasm32")]
use super::{autoscroll, GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::engine::autoscroll::{scroll_velocity, ViewRect};
#[cfg(target_arch = "wasm32")]
use crate::engine::NavKey;
#[cfg(target_arch = "wasm32")]
use crate::types::CellPosition;

/// Target of a hit test (what was clicked)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitTarget {
    /// A regular cell at (row, col)
    Cell(u32, u32),
    /// A row header at the given row index
    RowHeader(u32),
    /// A column header at the given column index
    ColumnHeader(u32),
    /// The corner control (select all)
    Corner,
    /// Outside the grid content (empty background)
    None,
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    /// Determine what sits under a container-relative point at the given
    /// scroll offset.
    pub(crate) fn hit_test(s: &SharedState, x: f32, y: f32, scroll_x: f32, scroll_y: f32) -> HitTarget {
        let config = s.engine.config();
        let header_w = config.header_width;
        let header_h = config.header_height;

        if x < 0.0 || y < 0.0 {
            return HitTarget::None;
        }
        if x < header_w && y < header_h {
            return HitTarget::Corner;
        }

        let content_x = x - header_w + scroll_x;
        let content_y = y - header_h + scroll_y;

        if y < header_h {
            if content_x > s.geometry.content_width() {
                return HitTarget::None;
            }
            return HitTarget::ColumnHeader(s.geometry.col_at_x(content_x));
        }
        if x < header_w {
            if content_y > s.geometry.content_height() {
                return HitTarget::None;
            }
            return HitTarget::RowHeader(s.geometry.row_at_y(content_y));
        }

        if content_x > s.geometry.content_width() || content_y > s.geometry.content_height() {
            return HitTarget::None;
        }
        HitTarget::Cell(
            s.geometry.row_at_y(content_y),
            s.geometry.col_at_x(content_x),
        )
    }

    /// Client rectangle of the cells area: the container rect with the header
    /// bands removed.
    pub(crate) fn content_rect(s: &SharedState, container: &HtmlDivElement) -> ViewRect {
        let rect = container.get_bounding_client_rect();
        let config = s.engine.config();
        ViewRect::new(
            rect.left() as f32 + config.header_width,
            rect.top() as f32 + config.header_height,
            rect.width() as f32 - config.header_width,
            rect.height() as f32 - config.header_height,
        )
    }

    /// Fresh scroll offsets from the container. Always re-read at the point
    /// of use so externally driven scrolls are never clobbered.
    pub(crate) fn container_offsets(container: &HtmlDivElement) -> (f32, f32) {
        (
            container.scroll_left() as f32,
            container.scroll_top() as f32,
        )
    }

    pub(crate) fn internal_mouse_down(
        state: &Rc<RefCell<SharedState>>,
        x: f32,
        y: f32,
        shift: bool,
    ) {
        let snapshot = {
            let mut s = state.borrow_mut();
            let before = Self::snapshot(&s);
            let Some(container) = s.container.clone() else {
                return;
            };
            let (scroll_x, scroll_y) = Self::container_offsets(&container);

            match Self::hit_test(&s, x, y, scroll_x, scroll_y) {
                HitTarget::None => s.engine.clear_selection(),
                HitTarget::Corner => s.engine.pointer_down_corner(),
                HitTarget::ColumnHeader(col) => s.engine.pointer_down_col_header(col, shift),
                HitTarget::RowHeader(row) => s.engine.pointer_down_row_header(row, shift),
                HitTarget::Cell(row, col) => {
                    if let Some(cell) = s.engine.pointer_down_cell(row, col, shift) {
                        Self::scroll_cell_into_view(&mut s, &container, cell);
                    }
                }
            }
            before
        };
        Self::dispatch_changes(state, snapshot);
        autoscroll::schedule_telemetry(state);
    }

    /// Window-level mouse move. Caches the pointer position, then either
    /// resolves the drag target directly (pointer inside the viewport) or
    /// hands off to the autoscroll loop (pointer in an edge zone).
    pub(crate) fn internal_mouse_move(
        state: &Rc<RefCell<SharedState>>,
        client_x: f32,
        client_y: f32,
    ) {
        let (snapshot, wants_autoscroll) = {
            let mut s = state.borrow_mut();
            s.pointer_x = client_x;
            s.pointer_y = client_y;
            if !s.engine.is_dragging() {
                return;
            }
            let before = Self::snapshot(&s);
            let Some(container) = s.container.clone() else {
                return;
            };
            let rect = Self::content_rect(&s, &container);
            let velocity = scroll_velocity(client_x, client_y, rect, s.threshold);
            if velocity.is_idle() {
                // Selection updates for edge-zone moves happen inside the
                // autoscroll frame, with the post-scroll offset.
                let (scroll_x, scroll_y) = Self::container_offsets(&container);
                let cell = s.geometry.cell_at(
                    client_x - rect.left,
                    client_y - rect.top,
                    scroll_x,
                    scroll_y,
                );
                s.engine.drag_to(cell);
                (before, false)
            } else {
                (before, true)
            }
        };
        if wants_autoscroll {
            autoscroll::schedule_frame(state);
        }
        Self::dispatch_changes(state, snapshot);
        autoscroll::schedule_telemetry(state);
    }

    /// Window-level mouse up: end the gesture, stop the loop, and let the
    /// host renderer re-measure after any programmatic scrolling.
    pub(crate) fn internal_mouse_up(state: &Rc<RefCell<SharedState>>) {
        let resize_callback = {
            let mut s = state.borrow_mut();
            let was_dragging = s.engine.is_dragging();
            s.engine.pointer_up();
            autoscroll::cancel_frame(&mut s);
            if was_dragging {
                s.resize_callback.clone()
            } else {
                None
            }
        };
        if let Some(callback) = resize_callback {
            let _ = callback.call0(&wasm_bindgen::JsValue::NULL);
        }
        autoscroll::schedule_telemetry(state);
    }

    /// Window-level key down. Returns true when the key was consumed.
    pub(crate) fn internal_key_down(
        state: &Rc<RefCell<SharedState>>,
        key: &str,
        shift: bool,
        ctrl: bool,
    ) -> bool {
        let Some(key) = NavKey::from_key(key) else {
            return false;
        };
        let snapshot = {
            let mut s = state.borrow_mut();
            let before = Self::snapshot(&s);
            if let Some(cell) = s.engine.key_down(key, shift, ctrl) {
                if let Some(container) = s.container.clone() {
                    Self::scroll_cell_into_view(&mut s, &container, cell);
                }
            }
            before
        };
        Self::dispatch_changes(state, snapshot);
        autoscroll::schedule_telemetry(state);
        true
    }

    /// Container scroll (wheel, scrollbar, or our own writes). While a drag
    /// is live, the selection end is re-derived from the cached pointer and
    /// the offset the container now reports.
    pub(crate) fn internal_scroll(state: &Rc<RefCell<SharedState>>) {
        let snapshot = {
            let mut s = state.borrow_mut();
            if !s.engine.is_dragging() {
                return;
            }
            let before = Self::snapshot(&s);
            let Some(container) = s.container.clone() else {
                return;
            };
            let rect = Self::content_rect(&s, &container);
            let (scroll_x, scroll_y) = Self::container_offsets(&container);
            let cell = s.geometry.cell_at(
                s.pointer_x - rect.left,
                s.pointer_y - rect.top,
                scroll_x,
                scroll_y,
            );
            s.engine.drag_to(cell);
            before
        };
        Self::dispatch_changes(state, snapshot);
        autoscroll::schedule_telemetry(state);
    }

    /// Write the offsets that bring a cell fully into view, reading the live
    /// offset first. Missing container degrades to a no-op.
    pub(crate) fn scroll_cell_into_view(
        s: &mut SharedState,
        container: &HtmlDivElement,
        cell: CellPosition,
    ) {
        let rect = container.get_bounding_client_rect();
        let config = s.engine.config();
        let mut viewport = crate::layout::Viewport::new(
            rect.width() as f32 - config.header_width,
            rect.height() as f32 - config.header_height,
        );
        let (scroll_x, scroll_y) = Self::container_offsets(container);
        viewport.scroll_x = scroll_x;
        viewport.scroll_y = scroll_y;
        if let Some((x, y)) = viewport.scroll_into_view(cell.row, cell.col, &s.geometry) {
            Self::set_container_scroll(container, x, y);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn set_container_scroll(container: &HtmlDivElement, x: f32, y: f32) {
        container.set_scroll_left(x.max(0.0) as i32);
        container.set_scroll_top(y.max(0.0) as i32);
    }
}
