//! Structured error types for shelfmap.
//!
//! File-level and parse-level failures abort the current operation. Per-coordinate
//! misses during bulk assignment are never errors; they are simply not counted.

use std::path::PathBuf;

/// All errors that can occur while reading, expanding, editing or saving shelf data.
#[derive(Debug, thiserror::Error)]
pub enum ShelfmapError {
    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// ZIP archive error.
    #[error("ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (configuration) error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An input spreadsheet does not exist.
    #[error("input file not found: {}", path.display())]
    MissingInput { path: PathBuf },

    /// The header row lacks one or more required columns.
    #[error("missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A required cell in a data row is blank or not an integer.
    #[error("row {row}: missing or invalid column '{column}'")]
    MalformedRow { row: u32, column: String },

    /// The same section appears in more than one summary row.
    #[error("row {row}: section '{section}' is already defined")]
    DuplicateSection { row: u32, section: String },

    /// Two records share the same (section, aisle, side, level, shelf).
    #[error("duplicate shelf coordinate {0}")]
    DuplicateCoordinate(String),

    /// A table edit addressed a row that does not exist.
    #[error("row {row} out of range (table has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },

    /// Apply was requested before section/aisle/side/family/category were chosen.
    #[error("select section, aisle, side, family and category first")]
    IncompleteChoice,

    /// Apply was requested with no selected shelves.
    #[error("no shelves selected")]
    EmptySelection,

    /// Persist was requested on a store with no backing file.
    #[error("assignment store has no backing file")]
    NoBackingStore,

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShelfmapError>;

impl From<&str> for ShelfmapError {
    fn from(s: &str) -> Self {
        Self::Render(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<ShelfmapError> for wasm_bindgen::JsValue {
    fn from(e: ShelfmapError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_names_row_and_column() {
        let err = ShelfmapError::MalformedRow {
            row: 4,
            column: "levels max".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "row 4: missing or invalid column 'levels max'"
        );
    }

    #[test]
    fn missing_columns_lists_all() {
        let err = ShelfmapError::MissingColumns {
            columns: vec!["aisles".to_string(), "sides".to_string()],
        };
        assert_eq!(err.to_string(), "missing required columns: aisles, sides");
    }
}
