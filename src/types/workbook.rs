use std::collections::HashMap;

use super::{CellValue, DataValidationRange};

/// A parsed workbook: the ordered list of its worksheets.
#[derive(Debug, Default, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// The first worksheet, where single-table inputs keep their data.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

/// One worksheet's values.
///
/// Rows and columns are 0-indexed; `max_row` and `max_col` are counts
/// (one past the last used index).
#[derive(Debug, Default, Clone)]
pub struct Sheet {
    pub name: String,
    pub max_row: u32,
    pub max_col: u32,
    pub data_validations: Vec<DataValidationRange>,
    cells: HashMap<(u32, u32), CellValue>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Store a value, growing the used range to cover it.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        self.max_row = self.max_row.max(row.saturating_add(1));
        self.max_col = self.max_col.max(col.saturating_add(1));
        self.cells.insert((row, col), value);
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// The cell's value unless it is missing or blank.
    pub fn non_blank(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cell(row, col).filter(|v| !v.is_blank())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
