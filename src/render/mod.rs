//! Rendering of the shelf grid.
//!
//! This module provides:
//! - A backend-agnostic [`Scene`] built from a layout and the filtered records
//! - Greedy word wrapping over a pluggable [`TextMeasure`]
//! - Per-view category colors
//! - Canvas 2D backend (wasm32 only)

#[cfg(target_arch = "wasm32")]
mod canvas;
pub mod colors;
mod palette;
mod scene;
mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use colors::{CssColor, CATEGORY_COLORS};
pub use palette::CategoryPalette;
pub use scene::{build_scene, Face, Polygon, Scene, SceneInput, TextItem};
pub use text::{wrap_text, AverageCharWidth, TextMeasure};
