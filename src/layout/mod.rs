//! Layout engine for the shelf grid.
//!
//! This module handles:
//! - Cell sizing against a reference surface, capped per cell
//! - Keeping the cell aspect ratio across resizes and filter changes
//! - Rectangle hit testing for drag selection

mod grid;
mod selection;

pub use grid::{GridConfig, GridGeometry, GridLayout, Label};
pub use selection::{CellRect, SelectionRect};
