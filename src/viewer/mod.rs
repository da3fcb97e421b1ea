//! Main `GridView` struct - the browser-facing entry point.
//!
//! This module provides the WASM-exported `GridView` that:
//! - Owns the selection engine and grid geometry
//! - Binds `mousedown` on the scroll container and `mousemove`/`mouseup`/
//!   `keydown` at the window level, so drags keep working when the pointer
//!   leaves the grid element
//! - Runs the animation-frame autoscroll loop
//! - Publishes selection / active-cell changes to registered JS callbacks
//!
//! Event handlers are registered when the view is created and released when
//! it is dropped - no manual JavaScript wiring required.

mod autoscroll;
mod events;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use serde::Serialize;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;
#[cfg(target_arch = "wasm32")]
use web_sys::{Event, HtmlDivElement, KeyboardEvent, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::config::EngineConfig;
#[cfg(target_arch = "wasm32")]
use crate::engine::autoscroll::EDGE_THRESHOLD;
#[cfg(target_arch = "wasm32")]
use crate::engine::SelectionEngine;
#[cfg(target_arch = "wasm32")]
use crate::layout::GridGeometry;
#[cfg(target_arch = "wasm32")]
use crate::types::{CellPosition, CellRange, SelectionKind};

/// Shared state accessed by the event-listener closures.
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) engine: SelectionEngine,
    pub(crate) geometry: GridGeometry,
    /// Edge-zone width for autoscroll triggering.
    pub(crate) threshold: f32,
    /// The host renderer's scroll container. `None` after teardown; every
    /// consumer re-resolves it and no-ops when missing.
    pub(crate) container: Option<HtmlDivElement>,
    /// Last pointer position in client coordinates, cached for the loop.
    pub(crate) pointer_x: f32,
    pub(crate) pointer_y: f32,
    pub(crate) raf_id: Option<i32>,
    pub(crate) raf_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) telemetry_timer: Option<i32>,
    pub(crate) telemetry_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) last_change_ms: f64,
    pub(crate) selection_callback: Option<Function>,
    pub(crate) active_callback: Option<Function>,
    pub(crate) telemetry_callback: Option<Function>,
    /// Invoked after a drag ends so the host can re-measure its grid.
    pub(crate) resize_callback: Option<Function>,
}

/// Selection value delivered to the JS selection callback.
#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
pub(crate) struct SelectionPayload {
    pub(crate) start: CellPosition,
    pub(crate) end: CellPosition,
    pub(crate) kind: SelectionKind,
}

/// Debounced telemetry frame.
#[cfg(target_arch = "wasm32")]
#[derive(Serialize)]
pub(crate) struct TelemetryFrame {
    pub(crate) active: Option<CellPosition>,
    /// Normalized selection bounds as (min_row, min_col, max_row, max_col).
    pub(crate) bounds: Option<(u32, u32, u32, u32)>,
    pub(crate) kind: SelectionKind,
    pub(crate) dragging: bool,
    pub(crate) scroll_x: f32,
    pub(crate) scroll_y: f32,
}

/// Pre-transition snapshot used to decide which callbacks to fire.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct Snapshot {
    selection: Option<CellRange>,
    kind: SelectionKind,
    active: Option<CellPosition>,
}

/// The selection/autoscroll engine exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    container: HtmlDivElement,
    #[cfg(target_arch = "wasm32")]
    mouse_down_closure: Option<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    mouse_move_closure: Option<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    mouse_up_closure: Option<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    #[cfg(target_arch = "wasm32")]
    scroll_closure: Option<Closure<dyn FnMut(Event)>>,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a view bound to the host renderer's scroll container.
    ///
    /// `config` is a plain JS object matching [`EngineConfig`]; `null` or
    /// `undefined` selects the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlDivElement, config: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let geometry = GridGeometry::new(&config);
        let engine = SelectionEngine::new(config)?;

        let state = Rc::new(RefCell::new(SharedState {
            engine,
            geometry,
            threshold: EDGE_THRESHOLD,
            container: Some(container.clone()),
            pointer_x: 0.0,
            pointer_y: 0.0,
            raf_id: None,
            raf_closure: None,
            telemetry_timer: None,
            telemetry_closure: None,
            last_change_ms: 0.0,
            selection_callback: None,
            active_callback: None,
            telemetry_callback: None,
            resize_callback: None,
        }));

        // Mouse down on the container: coordinates relative to its rect.
        let mouse_down_closure = {
            let state = Rc::clone(&state);
            let container_ref = container.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = container_ref.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                Self::internal_mouse_down(&state, x, y, event.shift_key());
            }) as Box<dyn FnMut(MouseEvent)>);
            container
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Mouse move at the window level, so drags survive leaving the grid.
        let mouse_move_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                Self::internal_mouse_move(&state, event.client_x() as f32, event.client_y() as f32);
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        // Mouse up at the window level: ends the gesture wherever it lands.
        let mouse_up_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_mouse_up(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        // Keyboard navigation at the window level.
        let key_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let ctrl = event.ctrl_key() || event.meta_key();
                if Self::internal_key_down(&state, &event.key(), event.shift_key(), ctrl) {
                    event.prevent_default();
                }
            }) as Box<dyn FnMut(KeyboardEvent)>);
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        // Container scroll: keeps a live drag consistent with wheel/scrollbar
        // scrolling that the engine did not initiate.
        let scroll_closure = {
            let state = Rc::clone(&state);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                Self::internal_scroll(&state);
            }) as Box<dyn FnMut(Event)>);
            container
                .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
                .ok();
            Some(closure)
        };

        Ok(GridView {
            state,
            container,
            mouse_down_closure,
            mouse_move_closure,
            mouse_up_closure,
            key_closure,
            scroll_closure,
        })
    }

    /// The active cell as `{row, col}`, or `null`.
    #[wasm_bindgen(js_name = "activeCell")]
    pub fn active_cell(&self) -> JsValue {
        let s = self.state.borrow();
        match s.engine.active_cell() {
            Some(cell) => serde_wasm_bindgen::to_value(&cell).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// The selection as `{start, end, kind}`, or `null`.
    pub fn selection(&self) -> JsValue {
        let s = self.state.borrow();
        match Self::selection_payload(&s) {
            Some(payload) => serde_wasm_bindgen::to_value(&payload).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// The selection serialized to a JSON string (`"null"` when empty).
    #[wasm_bindgen(js_name = "selectionJson")]
    pub fn selection_json(&self) -> String {
        let s = self.state.borrow();
        serde_json::to_string(&Self::selection_payload(&s)).unwrap_or_else(|_| "null".to_string())
    }

    #[wasm_bindgen(js_name = "isCellSelected")]
    pub fn is_cell_selected(&self, row: u32, col: u32) -> bool {
        self.state.borrow().engine.is_cell_selected(row, col)
    }

    #[wasm_bindgen(js_name = "clearSelection")]
    pub fn clear_selection(&self) {
        let snapshot = {
            let mut s = self.state.borrow_mut();
            let before = Self::snapshot(&s);
            s.engine.clear_selection();
            before
        };
        Self::dispatch_changes(&self.state, snapshot);
    }

    /// Programmatic pointer-down on a cell, for hosts that do their own hit
    /// testing.
    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&self, row: u32, col: u32, shift: bool) {
        let snapshot = {
            let mut s = self.state.borrow_mut();
            let before = Self::snapshot(&s);
            if let Some(cell) = s.engine.pointer_down_cell(row, col, shift) {
                if let Some(container) = s.container.clone() {
                    Self::scroll_cell_into_view(&mut s, &container, cell);
                }
            }
            before
        };
        Self::dispatch_changes(&self.state, snapshot);
        autoscroll::schedule_telemetry(&self.state);
    }

    /// Programmatic pointer-down on a row or column header.
    #[wasm_bindgen(js_name = "headerPointerDown")]
    pub fn header_pointer_down(&self, index: u32, is_row: bool, shift: bool) {
        let snapshot = {
            let mut s = self.state.borrow_mut();
            let before = Self::snapshot(&s);
            if is_row {
                s.engine.pointer_down_row_header(index, shift);
            } else {
                s.engine.pointer_down_col_header(index, shift);
            }
            before
        };
        Self::dispatch_changes(&self.state, snapshot);
        autoscroll::schedule_telemetry(&self.state);
    }

    /// Programmatic pointer-down on the corner (select all) control.
    #[wasm_bindgen(js_name = "cornerPointerDown")]
    pub fn corner_pointer_down(&self) {
        let snapshot = {
            let mut s = self.state.borrow_mut();
            let before = Self::snapshot(&s);
            s.engine.pointer_down_corner();
            before
        };
        Self::dispatch_changes(&self.state, snapshot);
        autoscroll::schedule_telemetry(&self.state);
    }

    /// Register the selection-change callback (`range|null`).
    #[wasm_bindgen(js_name = "setSelectionCallback")]
    pub fn set_selection_callback(&self, callback: Function) {
        self.state.borrow_mut().selection_callback = Some(callback);
    }

    /// Register the active-cell callback (`{row, col}|null`).
    #[wasm_bindgen(js_name = "setActiveCellCallback")]
    pub fn set_active_cell_callback(&self, callback: Function) {
        self.state.borrow_mut().active_callback = Some(callback);
    }

    /// Register the debounced telemetry callback.
    #[wasm_bindgen(js_name = "setTelemetryCallback")]
    pub fn set_telemetry_callback(&self, callback: Function) {
        self.state.borrow_mut().telemetry_callback = Some(callback);
    }

    /// Register the callback asking the host renderer to re-measure, fired
    /// when a drag (and any autoscroll it drove) ends.
    #[wasm_bindgen(js_name = "setResizeCallback")]
    pub fn set_resize_callback(&self, callback: Function) {
        self.state.borrow_mut().resize_callback = Some(callback);
    }

    /// Scroll so the given cell's full bounds are visible.
    #[wasm_bindgen(js_name = "scrollToCell")]
    pub fn scroll_to_cell(&self, row: u32, col: u32) {
        let mut s = self.state.borrow_mut();
        let Some(container) = s.container.clone() else {
            return;
        };
        Self::scroll_cell_into_view(&mut s, &container, CellPosition::new(row, col));
    }

    /// Set the scroll offset directly (clamped by the browser).
    #[wasm_bindgen(js_name = "scrollToPosition")]
    pub fn scroll_to_position(&self, left: f32, top: f32) {
        let s = self.state.borrow();
        let Some(container) = s.container.clone() else {
            return;
        };
        Self::set_container_scroll(&container, left, top);
    }
}

#[cfg(target_arch = "wasm32")]
impl GridView {
    pub(crate) fn snapshot(s: &SharedState) -> Snapshot {
        Snapshot {
            selection: s.engine.selection(),
            kind: s.engine.selection_kind(),
            active: s.engine.active_cell(),
        }
    }

    fn selection_payload(s: &SharedState) -> Option<SelectionPayload> {
        s.engine.selection().map(|range| SelectionPayload {
            start: range.start,
            end: range.end,
            kind: s.engine.selection_kind(),
        })
    }

    pub(crate) fn telemetry_frame(s: &SharedState) -> TelemetryFrame {
        let (scroll_x, scroll_y) = s
            .container
            .as_ref()
            .map_or((0.0, 0.0), |c| Self::container_offsets(c));
        TelemetryFrame {
            active: s.engine.active_cell(),
            bounds: s.engine.selection().map(|range| range.bounds()),
            kind: s.engine.selection_kind(),
            dragging: s.engine.is_dragging(),
            scroll_x,
            scroll_y,
        }
    }

    /// Fire the JS callbacks for whatever changed since `before`. Callbacks
    /// run after the state borrow is released, so they can call back into
    /// the view.
    pub(crate) fn dispatch_changes(state: &Rc<RefCell<SharedState>>, before: Snapshot) {
        let (selection_change, active_change) = {
            let s = state.borrow();
            let after = Self::snapshot(&s);
            let selection_changed = after.selection != before.selection
                || (after.selection.is_some() && after.kind != before.kind);
            let selection_change = if selection_changed {
                let value = match Self::selection_payload(&s) {
                    Some(payload) => {
                        serde_wasm_bindgen::to_value(&payload).unwrap_or(JsValue::NULL)
                    }
                    None => JsValue::NULL,
                };
                s.selection_callback.clone().map(|cb| (cb, value))
            } else {
                None
            };
            let active_change = if after.active != before.active {
                let value = match after.active {
                    Some(cell) => serde_wasm_bindgen::to_value(&cell).unwrap_or(JsValue::NULL),
                    None => JsValue::NULL,
                };
                s.active_callback.clone().map(|cb| (cb, value))
            } else {
                None
            };
            (selection_change, active_change)
        };
        if let Some((callback, value)) = selection_change {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
        if let Some((callback, value)) = active_change {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for GridView {
    /// Scoped teardown: every listener bound in `new` is released, and any
    /// in-flight animation frame or telemetry timer is cancelled so a pending
    /// step cannot fire its commit.
    fn drop(&mut self) {
        {
            let mut s = self.state.borrow_mut();
            autoscroll::cancel_frame(&mut s);
            if let Some(timer_id) = s.telemetry_timer.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(timer_id);
                }
            }
            s.container = None;
        }
        if let Some(closure) = self.mouse_down_closure.take() {
            let _ = self.container.remove_event_listener_with_callback(
                "mousedown",
                closure.as_ref().unchecked_ref(),
            );
        }
        if let Some(closure) = self.scroll_closure.take() {
            let _ = self
                .container
                .remove_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        }
        if let Some(window) = web_sys::window() {
            if let Some(closure) = self.mouse_move_closure.take() {
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    closure.as_ref().unchecked_ref(),
                );
            }
            if let Some(closure) = self.mouse_up_closure.take() {
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    closure.as_ref().unchecked_ref(),
                );
            }
            if let Some(closure) = self.key_closure.take() {
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}
