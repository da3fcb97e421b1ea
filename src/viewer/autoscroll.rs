//! Animation-frame autoscroll loop and telemetry debounce for `GridView`.
//!
//! The loop has two states: idle (no frame scheduled, `raf_id` is `None`)
//! and scrolling (exactly one pending frame). Each frame runs the pure
//! [`autoscroll_step`] pipeline against fresh container geometry, commits the
//! outcome, and reschedules itself while a scroll direction remains.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{GridView, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::engine::autoscroll::{autoscroll_step, StepInput};

/// Delay (ms) after the last change before a telemetry frame is emitted.
#[cfg(target_arch = "wasm32")]
const TELEMETRY_SETTLE_MS: u32 = 100;

#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Idle -> Scrolling: schedule one frame if none is pending.
#[cfg(target_arch = "wasm32")]
pub(crate) fn schedule_frame(state: &Rc<RefCell<SharedState>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut s = state.borrow_mut();
    if s.raf_id.is_some() {
        return;
    }
    if s.raf_closure.is_none() {
        let weak_state = Rc::downgrade(state);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(state) = weak_state.upgrade() {
                run_frame(&state);
            }
        }) as Box<dyn FnMut()>);
        s.raf_closure = Some(closure);
    }
    let Some(callback) = s.raf_closure.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => s.raf_id = Some(id),
        Err(_) => s.raf_id = None,
    }
}

/// Scrolling -> Idle: cancel the pending frame so it cannot fire its commit.
#[cfg(target_arch = "wasm32")]
pub(crate) fn cancel_frame(s: &mut SharedState) {
    if let Some(id) = s.raf_id.take() {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

/// One scrolling step: velocity -> clamped offset -> re-derived selection end.
/// The scroll commit lands before the selection commit, so observers never
/// see an end cell computed against a stale offset.
#[cfg(target_arch = "wasm32")]
fn run_frame(state: &Rc<RefCell<SharedState>>) {
    let outcome = {
        let mut s = state.borrow_mut();
        s.raf_id = None;
        // Drag ended between scheduling and firing.
        if !s.engine.is_dragging() {
            return;
        }
        // Container unmounted mid-loop: terminate instead of rescheduling.
        let Some(container) = s.container.clone() else {
            return;
        };
        let before = GridView::snapshot(&s);
        let rect = GridView::content_rect(&s, &container);
        let (scroll_x, scroll_y) = GridView::container_offsets(&container);
        let geometry = s.geometry;
        let input = StepInput {
            pointer_x: s.pointer_x,
            pointer_y: s.pointer_y,
            rect,
            scroll_x,
            scroll_y,
            geometry: &geometry,
            threshold: s.threshold,
        };
        match autoscroll_step(&input) {
            // Velocity returned to idle; the loop stops here.
            None => return,
            Some(step) => {
                if step.scrolled {
                    GridView::set_container_scroll(&container, step.scroll_x, step.scroll_y);
                }
                s.engine.drag_to(step.end);
                s.last_change_ms = now_ms();
                before
            }
        }
    };
    // Direction was non-null, so another step is due regardless of whether
    // the offset moved this frame.
    schedule_frame(state);
    GridView::dispatch_changes(state, outcome);
    schedule_telemetry(state);
}

/// Debounced side-channel telemetry: coalesces rapid selection/scroll churn
/// into one frame delivered off the critical path.
#[cfg(target_arch = "wasm32")]
pub(crate) fn schedule_telemetry(state: &Rc<RefCell<SharedState>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let mut s = state.borrow_mut();
    if s.telemetry_callback.is_none() {
        return;
    }
    s.last_change_ms = now_ms();
    // Cancel any existing timer
    if let Some(timer_id) = s.telemetry_timer.take() {
        window.clear_timeout_with_handle(timer_id);
    }
    if s.telemetry_closure.is_none() {
        let weak_state = Rc::downgrade(state);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(state) = weak_state.upgrade() {
                fire_telemetry(&state);
            }
        }) as Box<dyn FnMut()>);
        s.telemetry_closure = Some(closure);
    }
    let Some(callback) = s.telemetry_closure.as_ref() else {
        return;
    };
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        TELEMETRY_SETTLE_MS as i32,
    ) {
        Ok(id) => s.telemetry_timer = Some(id),
        Err(_) => s.telemetry_timer = None,
    }
}

#[cfg(target_arch = "wasm32")]
fn fire_telemetry(state: &Rc<RefCell<SharedState>>) {
    let payload = {
        let mut s = state.borrow_mut();
        s.telemetry_timer = None;
        // Still churning; push the frame out again.
        let elapsed = now_ms() - s.last_change_ms;
        if elapsed < f64::from(TELEMETRY_SETTLE_MS) {
            drop(s);
            schedule_telemetry(state);
            return;
        }
        let Some(callback) = s.telemetry_callback.clone() else {
            return;
        };
        let frame = GridView::telemetry_frame(&s);
        Some((callback, frame))
    };
    if let Some((callback, frame)) = payload {
        if let Ok(value) = serde_wasm_bindgen::to_value(&frame) {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
    }
}
