//! Mouse handlers for `ShelfEditor`.
//!
//! All methods here are `pub(crate)` helpers called from the closures wired
//! up in `web.rs`.

use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use super::web::{SharedState, ShelfEditor};

impl ShelfEditor {
    pub(crate) fn internal_mouse_down(state: &Rc<RefCell<SharedState>>, x: f64, y: f64) {
        let callback = {
            let mut s = state.borrow_mut();
            if s.view.layout().is_none() {
                return;
            }
            s.view.pointer_down(x, y);
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn internal_mouse_move(state: &Rc<RefCell<SharedState>>, x: f64, y: f64) {
        let callback = {
            let mut s = state.borrow_mut();
            if !s.view.is_dragging() {
                return;
            }
            s.view.pointer_move(x, y);
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    /// Pointer left the canvas, or came back with no button held: the release
    /// was never seen, so the gesture is dropped rather than applied.
    pub(crate) fn internal_mouse_leave(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            if !s.view.is_dragging() {
                return;
            }
            s.view.pointer_cancel();
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn internal_mouse_up(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut guard = state.borrow_mut();
            let s = &mut *guard;
            if !s.view.is_dragging() {
                return;
            }
            s.status = match s.view.pointer_up(&mut s.store) {
                Ok(Some(count)) => Some(format!("Assigned {count} shelves")),
                Ok(None) => None,
                Err(e) => {
                    tracing::warn!(error = %e, "selection not applied");
                    Some(e.to_string())
                }
            };
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
