//! shelfmap - shelf family/category assignment
//!
//! Expands a summary of store sections into one record per physical shelf,
//! lets shelves be labelled with a product family and category, and writes
//! the table back as XLSX with Family/Category dropdowns:
//! - Shelf expansion from a section summary workbook
//! - Family/category index from a one-sheet-per-family workbook
//! - Assignment store with exact-coordinate lookup and bulk assign
//! - 2.5-D shelf grid with drag selection (Canvas 2D on wasm32)
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { generate_xlsx, ShelfEditor } from 'shelfmap';
//! await init();
//! const output = generate_xlsx(summaryBytes, familyBytes);
//! const editor = new ShelfEditor(canvas, output, familyBytes);
//! ```

// Reading and writing spreadsheets
pub mod cell_ref;
pub mod data_validation;
pub mod error;
pub mod export;
pub mod parser;
pub mod types;
pub mod xml_helpers;

// Shelf data
pub mod config;
pub mod editor;
pub mod expand;
pub mod family;
pub mod store;

// Shelf grid
pub mod layout;
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::ShelfEditor;

pub use error::{Result, ShelfmapError};
pub use types::*;

use export::ValidationHints;
use family::{FamilyIndex, FamilySheetLayout};
use store::AssignmentStore;

/// Expand the shelf summary and attach dropdown hints from the family workbook.
///
/// # Errors
/// Fails on a missing summary column, a malformed summary row or a repeated
/// section. Nothing is written; callers persist the returned store.
pub fn generate(
    summary: &Workbook,
    families: &Workbook,
    layout: FamilySheetLayout,
) -> Result<(AssignmentStore, FamilyIndex)> {
    let rows = expand::read_summary(summary)?;
    let records = expand::expand_rows(&rows)?;
    let index = FamilyIndex::from_workbook(families, layout);
    let store =
        AssignmentStore::from_records(records)?.with_hints(ValidationHints::from_index(&index));
    Ok((store, index))
}

/// Generate the assignment workbook from the summary and family workbooks.
///
/// # Errors
/// Returns an error if either file cannot be parsed or the summary is invalid.
#[wasm_bindgen]
pub fn generate_xlsx(summary: &[u8], families: &[u8]) -> std::result::Result<Vec<u8>, JsValue> {
    let to_js = |e: ShelfmapError| JsValue::from_str(&e.to_string());
    let summary = parser::parse(summary).map_err(to_js)?;
    let families = parser::parse(families).map_err(to_js)?;
    let (store, _) = generate(&summary, &families, FamilySheetLayout::default()).map_err(to_js)?;
    store.to_xlsx().map_err(to_js)
}

/// Parse a family workbook and return `[{name, categories}]` as a `JsValue`.
///
/// # Errors
/// Returns an error if the file cannot be parsed.
#[wasm_bindgen]
pub fn parse_families(data: &[u8]) -> std::result::Result<JsValue, JsValue> {
    let workbook = parser::parse(data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let index = FamilyIndex::from_workbook(&workbook, FamilySheetLayout::default());
    let families: Vec<_> = index.families().collect();
    serde_wasm_bindgen::to_value(&families)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn generate_attaches_hints() {
        let mut summary = Sheet::new("Summary");
        for (col, header) in (0u32..).zip(expand::SUMMARY_HEADERS) {
            summary.set(0, col, CellValue::Text(header.to_string()));
        }
        summary.set(1, 0, CellValue::Text("A".into()));
        for col in 1..5 {
            summary.set(1, col, CellValue::Number(1.0));
        }
        let mut family = Sheet::new("Dairy");
        family.set(1, 0, CellValue::Text("Dairy".into()));
        family.set(1, 1, CellValue::Text("Milk".into()));

        let (store, index) = generate(
            &Workbook { sheets: vec![summary] },
            &Workbook { sheets: vec![family] },
            FamilySheetLayout::default(),
        )
        .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(index.pairs(), vec![("Dairy", "Milk")]);

        let reread = parser::parse(&store.to_xlsx().unwrap()).unwrap();
        assert_eq!(reread.sheets[0].data_validations.len(), 2);
    }
}
