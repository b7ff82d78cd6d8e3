//! XLSX export pipeline.
//!
//! Writes the assignment table as a fresh single-sheet package. The whole
//! file is regenerated on every save, and the Family/Category dropdown hints
//! are rebuilt with it so they survive the overwrite.

mod package;
mod sheet_writer;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::family::{FamilyIndex, NO_CATEGORIES};
use crate::types::ShelfRecord;

/// Column headers of the assignment table, columns A through G.
pub const OUTPUT_HEADERS: [&str; 7] = [
    "Section", "Aisle", "Side", "Level", "Shelf", "Family", "Category",
];

/// Name of the single worksheet in generated files.
pub const OUTPUT_SHEET_NAME: &str = "Shelves";

/// Choice lists attached to the Family and Category columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationHints {
    pub families: Vec<String>,
    pub categories: Vec<String>,
}

impl ValidationHints {
    /// Family names in index order and the de-duplicated union of categories.
    pub fn from_index(index: &FamilyIndex) -> Self {
        Self {
            families: index.family_names().into_iter().map(String::from).collect(),
            categories: index
                .all_categories()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub(crate) fn family_items(&self) -> Vec<&str> {
        self.families.iter().map(String::as_str).collect()
    }

    /// Category items, or the placeholder when no family has categories.
    pub(crate) fn category_items(&self) -> Vec<&str> {
        if self.categories.is_empty() {
            vec![NO_CATEGORIES]
        } else {
            self.categories.iter().map(String::as_str).collect()
        }
    }
}

/// Serialize `records` as a complete XLSX file.
///
/// # Errors
/// Fails only if the ZIP writer fails.
pub fn write_workbook(records: &[ShelfRecord], hints: Option<&ValidationHints>) -> Result<Vec<u8>> {
    let sheet_xml = sheet_writer::write_sheet_xml(records, hints);
    let bytes = package::write_package(OUTPUT_SHEET_NAME, &sheet_xml)?;
    tracing::debug!(
        records = records.len(),
        bytes = bytes.len(),
        "serialized assignment workbook"
    );
    Ok(bytes)
}
