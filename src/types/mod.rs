//! Data types for shelf assignment and the workbooks that carry it.

mod cell;
mod content;
mod shelf;
mod workbook;

pub use cell::*;
pub use content::*;
pub use shelf::*;
pub use workbook::*;
