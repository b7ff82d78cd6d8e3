//! Tool configuration, read from an optional JSON file.
//!
//! Every key is optional; missing keys take the defaults below. Command-line
//! flags override whatever the file sets.
//!
//! ```json
//! {
//!   "shelfInfo": "data/shelf information.xlsx",
//!   "output": "data/shelf assignment.xlsx",
//!   "familySheet": { "categoryRow": 2 },
//!   "grid": { "maxCellWidth": 80 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfmapError};
use crate::family::FamilySheetLayout;
use crate::layout::GridConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Shelf summary workbook (section, aisles, sides, levels max, shelves max)
    pub shelf_info: PathBuf,
    /// Family workbook, one sheet per family
    pub family_info: PathBuf,
    /// Generated assignment table, rewritten on every save
    pub output: PathBuf,
    pub family_sheet: FamilySheetLayout,
    pub grid: GridConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shelf_info: PathBuf::from("shelf information.xlsx"),
            family_info: PathBuf::from("family information.xlsx"),
            output: PathBuf::from("shelf assignment.xlsx"),
            family_sheet: FamilySheetLayout::default(),
            grid: GridConfig::default(),
        }
    }
}

impl Config {
    /// Read a JSON config file.
    ///
    /// # Errors
    /// `MissingInput` if the file does not exist, `Json` if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ShelfmapError::MissingInput {
                path: path.to_path_buf(),
            },
            _ => ShelfmapError::Io(e),
        })?;
        let config = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"output": "out.xlsx", "familySheet": {"categoryRow": 2}, "grid": {"depth": 4}}"#,
        )
        .unwrap();
        assert_eq!(config.output, PathBuf::from("out.xlsx"));
        assert_eq!(config.shelf_info, Config::default().shelf_info);
        assert_eq!(config.family_sheet.category_row, 2);
        assert_eq!(config.family_sheet.name_row, 1);
        assert!((config.grid.depth - 4.0).abs() < f64::EPSILON);
        assert!((config.grid.base_width - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfmap.json");
        std::fs::write(&path, r#"{"familyInfo": "families.xlsx"}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.family_info, PathBuf::from("families.xlsx"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load(Path::new("/nonexistent/shelfmap.json")).unwrap_err();
        assert!(matches!(err, ShelfmapError::MissingInput { .. }));
    }

    #[test]
    fn bad_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ShelfmapError::Json(_))));
    }
}
