//! Shelf grid viewer.
//!
//! [`ShelfView`] holds the grid state and runs on any target. On wasm32,
//! [`ShelfEditor`] wraps it with a Canvas 2D renderer and mouse wiring for
//! use from JavaScript:
//!
//! ```javascript
//! import init, { ShelfEditor } from 'shelfmap';
//! await init();
//! const editor = new ShelfEditor(canvas, outputBytes, familyBytes);
//! editor.set_render_callback(() => requestAnimationFrame(() => editor.render()));
//! editor.choose_family("Dairy");
//! ```

mod controller;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod web;

pub use controller::ShelfView;
#[cfg(target_arch = "wasm32")]
pub use web::ShelfEditor;
