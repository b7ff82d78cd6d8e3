//! The assignment store: the session's authoritative shelf table.
//!
//! Both the table editor and the grid view operate on one store; the grid
//! never keeps its own copy of the records.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfmapError};
use crate::expand::header_columns;
use crate::export::{write_workbook, ValidationHints, OUTPUT_HEADERS};
use crate::types::{CellValue, GridCell, ShelfCoord, ShelfRecord, Sheet, SideRef, Workbook};

/// In-memory shelf table with a coordinate index.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    records: Vec<ShelfRecord>,
    index: HashMap<ShelfCoord, usize>,
    backing: Option<PathBuf>,
    hints: Option<ValidationHints>,
}

impl AssignmentStore {
    /// Build a store from records, indexing each coordinate.
    ///
    /// # Errors
    /// `DuplicateCoordinate` if two records share a 5-tuple.
    pub fn from_records(records: Vec<ShelfRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let coord = record.coord();
            if index.contains_key(&coord) {
                return Err(ShelfmapError::DuplicateCoordinate(coord.to_string()));
            }
            index.insert(coord, i);
        }
        Ok(Self {
            records,
            index,
            backing: None,
            hints: None,
        })
    }

    /// Load the assignment table from the first sheet of an output workbook.
    ///
    /// Family and Category columns are optional; missing ones load as empty.
    ///
    /// # Errors
    /// `MissingColumns` for absent coordinate headers, `MalformedRow` for a
    /// blank section or a coordinate that is not an integer ≥ 1, and
    /// `DuplicateCoordinate` for repeated coordinates.
    pub fn load(workbook: &Workbook) -> Result<Self> {
        let sheet = workbook.first_sheet().ok_or_else(|| ShelfmapError::MissingColumns {
            columns: coordinate_headers().map(String::from).to_vec(),
        })?;
        let records = read_assignment_sheet(sheet)?;
        tracing::info!(records = records.len(), "loaded assignment table");
        Self::from_records(records)
    }

    /// Persist to `path` on every [`persist`](Self::persist).
    #[must_use]
    pub fn with_backing(mut self, path: impl Into<PathBuf>) -> Self {
        self.backing = Some(path.into());
        self
    }

    /// Attach Family/Category dropdown hints to every written file.
    #[must_use]
    pub fn with_hints(mut self, hints: ValidationHints) -> Self {
        self.hints = Some(hints);
        self
    }

    pub fn set_hints(&mut self, hints: Option<ValidationHints>) {
        self.hints = hints;
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing.as_deref()
    }

    pub fn records(&self) -> &[ShelfRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact 5-tuple lookup.
    pub fn find_by_coordinate(
        &self,
        section: &str,
        aisle: u32,
        side: u32,
        level: u32,
        shelf: u32,
    ) -> Option<&ShelfRecord> {
        self.find(&ShelfCoord::new(section, aisle, side, level, shelf))
    }

    pub fn find(&self, coord: &ShelfCoord) -> Option<&ShelfRecord> {
        self.index.get(coord).and_then(|&i| self.records.get(i))
    }

    /// Overwrite family and category on every selected cell of `side`.
    ///
    /// Cells with no matching record are skipped. Returns how many records
    /// were updated; an empty selection is a no-op returning 0. Never creates
    /// records.
    pub fn assign<'a, I>(&mut self, cells: I, side: &SideRef, family: &str, category: &str) -> usize
    where
        I: IntoIterator<Item = &'a GridCell>,
    {
        let mut updated = 0;
        let mut missing = 0;
        for &cell in cells {
            let coord = ShelfCoord::at(side, cell);
            match self
                .index
                .get(&coord)
                .and_then(|&i| self.records.get_mut(i))
            {
                Some(record) => {
                    record.family = family.to_string();
                    record.category = category.to_string();
                    updated += 1;
                }
                None => missing += 1,
            }
        }
        tracing::info!(
            section = %side.section,
            aisle = side.aisle,
            side = side.side,
            family,
            category,
            updated,
            missing,
            "assigned shelves"
        );
        updated
    }

    /// Set the family of table row `row` and clear its category.
    ///
    /// # Errors
    /// `RowOutOfRange` if `row` is not a valid table row.
    pub fn set_family(&mut self, row: usize, family: &str) -> Result<()> {
        let record = self.row_mut(row)?;
        record.family = family.to_string();
        record.category.clear();
        Ok(())
    }

    /// Set the category of table row `row`.
    ///
    /// # Errors
    /// `RowOutOfRange` if `row` is not a valid table row.
    pub fn set_category(&mut self, row: usize, category: &str) -> Result<()> {
        self.row_mut(row)?.category = category.to_string();
        Ok(())
    }

    fn row_mut(&mut self, row: usize) -> Result<&mut ShelfRecord> {
        let len = self.records.len();
        self.records
            .get_mut(row)
            .ok_or(ShelfmapError::RowOutOfRange { row, len })
    }

    /// Distinct sections, sorted.
    pub fn sections(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.section.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct aisles of `section`, sorted.
    pub fn aisles(&self, section: &str) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .records
            .iter()
            .filter(|r| r.section == section)
            .map(|r| r.aisle)
            .collect();
        set.into_iter().collect()
    }

    /// Distinct sides of `section`/`aisle`, sorted.
    pub fn sides(&self, section: &str, aisle: u32) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .records
            .iter()
            .filter(|r| r.section == section && r.aisle == aisle)
            .map(|r| r.side)
            .collect();
        set.into_iter().collect()
    }

    /// The first side in sorted order, used as the initial grid filter.
    pub fn first_side(&self) -> Option<SideRef> {
        let section = self.sections().into_iter().next()?;
        let aisle = self.aisles(&section).into_iter().next()?;
        let side = self.sides(&section, aisle).into_iter().next()?;
        Some(SideRef {
            section,
            aisle,
            side,
        })
    }

    /// Records on `side`, in table order.
    pub fn side_view<'a>(&'a self, side: &'a SideRef) -> impl Iterator<Item = &'a ShelfRecord> + 'a {
        self.records.iter().filter(move |r| r.is_on(side))
    }

    /// Serialize the whole table, with hints if attached.
    ///
    /// # Errors
    /// Fails only if the ZIP writer fails.
    pub fn to_xlsx(&self) -> Result<Vec<u8>> {
        write_workbook(&self.records, self.hints.as_ref())
    }

    /// Write the whole table to the backing file, replacing its contents.
    ///
    /// The in-memory table is untouched on failure, so the call can be retried.
    ///
    /// # Errors
    /// `NoBackingStore` without a backing path; `Io` if the write fails.
    pub fn persist(&self) -> Result<()> {
        let path = self.backing.as_deref().ok_or(ShelfmapError::NoBackingStore)?;
        self.persist_to(path)
    }

    /// Write the whole table to `path`.
    ///
    /// # Errors
    /// `Io` if the write fails.
    pub fn persist_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_xlsx()?;
        std::fs::write(path, &bytes).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to save assignments");
            ShelfmapError::Io(e)
        })?;
        tracing::info!(
            path = %path.display(),
            records = self.records.len(),
            "saved assignments"
        );
        Ok(())
    }
}

fn coordinate_headers() -> [&'static str; 5] {
    ["section", "aisle", "side", "level", "shelf"]
}

/// Read the Section..Category table from an output sheet.
fn read_assignment_sheet(sheet: &Sheet) -> Result<Vec<ShelfRecord>> {
    let [section_col, aisle_col, side_col, level_col, shelf_col] =
        header_columns(sheet, &coordinate_headers())?;
    let family_col = header_columns(sheet, &["family"]).ok().map(|[c]| c);
    let category_col = header_columns(sheet, &["category"]).ok().map(|[c]| c);
    let coord_cols = [section_col, aisle_col, side_col, level_col, shelf_col];

    let label = |row: u32, col: Option<u32>| -> String {
        col.and_then(|c| sheet.non_blank(row, c))
            .map(CellValue::display_text)
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for r in 1..sheet.max_row {
        if coord_cols.iter().all(|&c| sheet.non_blank(r, c).is_none()) {
            continue;
        }
        let row_number = r.saturating_add(1);
        let section = sheet
            .non_blank(r, section_col)
            .map(CellValue::display_text)
            .ok_or_else(|| malformed(row_number, OUTPUT_HEADERS[0]))?;
        let coordinate = |col: u32, name: &str| -> Result<u32> {
            sheet
                .non_blank(r, col)
                .and_then(CellValue::as_integer)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n >= 1)
                .ok_or_else(|| malformed(row_number, name))
        };

        records.push(ShelfRecord {
            section,
            aisle: coordinate(aisle_col, "Aisle")?,
            side: coordinate(side_col, "Side")?,
            level: coordinate(level_col, "Level")?,
            shelf: coordinate(shelf_col, "Shelf")?,
            family: label(r, family_col),
            category: label(r, category_col),
        });
    }

    Ok(records)
}

fn malformed(row: u32, column: &str) -> ShelfmapError {
    ShelfmapError::MalformedRow {
        row,
        column: column.to_string(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::expand::expand_rows;
    use crate::types::FamilySummaryRow;

    fn example_store() -> AssignmentStore {
        let records = expand_rows(&[FamilySummaryRow::new("A", 2, 1, 3, 2)]).unwrap();
        AssignmentStore::from_records(records).unwrap()
    }

    #[test]
    fn finds_exact_coordinate() {
        let store = example_store();
        let record = store.find_by_coordinate("A", 2, 1, 3, 2).unwrap();
        assert_eq!((record.level, record.shelf), (3, 2));
        assert!(store.find_by_coordinate("A", 3, 1, 1, 1).is_none());
        assert!(store.find_by_coordinate("B", 1, 1, 1, 1).is_none());
    }

    #[test]
    fn dairy_milk_example() {
        let mut store = example_store();
        let side = SideRef::new("A", 1, 1);
        let cells = [GridCell::new(1, 1), GridCell::new(1, 2)];
        let before = store.find_by_coordinate("A", 1, 1, 2, 1).cloned().unwrap();

        assert_eq!(store.assign(&cells, &side, "Dairy", "Milk"), 2);

        for shelf in [1, 2] {
            let r = store.find_by_coordinate("A", 1, 1, 1, shelf).unwrap();
            assert_eq!((r.family.as_str(), r.category.as_str()), ("Dairy", "Milk"));
        }
        assert_eq!(store.find_by_coordinate("A", 1, 1, 2, 1).unwrap(), &before);
    }

    #[test]
    fn empty_selection_is_noop() {
        let mut store = example_store();
        let before = store.records().to_vec();
        let none: [GridCell; 0] = [];
        assert_eq!(store.assign(&none, &SideRef::new("A", 1, 1), "X", "Y"), 0);
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn missing_cells_are_skipped_and_not_counted() {
        let mut store = example_store();
        let cells = [GridCell::new(1, 1), GridCell::new(9, 9)];
        let count = store.assign(&cells, &SideRef::new("A", 1, 1), "Dairy", "Milk");
        assert_eq!(count, 1);
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn assign_is_scoped_to_side() {
        let mut store = example_store();
        store.assign(&[GridCell::new(1, 1)], &SideRef::new("A", 2, 1), "F", "C");
        assert!(store.find_by_coordinate("A", 1, 1, 1, 1).unwrap().family.is_empty());
        assert_eq!(store.find_by_coordinate("A", 2, 1, 1, 1).unwrap().family, "F");
    }

    #[test]
    fn duplicate_coordinates_are_rejected() {
        let records = vec![
            ShelfRecord::unassigned("A", 1, 1, 1, 1),
            ShelfRecord::unassigned("A", 1, 1, 1, 1),
        ];
        let err = AssignmentStore::from_records(records).unwrap_err();
        assert!(matches!(err, ShelfmapError::DuplicateCoordinate(_)));
    }

    #[test]
    fn set_family_clears_category() {
        let mut store = example_store();
        store.set_category(0, "Milk").unwrap();
        store.set_family(0, "Bakery").unwrap();
        assert_eq!(store.records()[0].family, "Bakery");
        assert!(store.records()[0].category.is_empty());
        store.set_category(0, "Bread").unwrap();
        assert_eq!(store.records()[0].category, "Bread");
    }

    #[test]
    fn table_edit_out_of_range() {
        let mut store = example_store();
        let err = store.set_family(12, "X").unwrap_err();
        assert!(matches!(err, ShelfmapError::RowOutOfRange { row: 12, len: 12 }));
    }

    #[test]
    fn filter_values_are_sorted_and_unique() {
        let records = expand_rows(&[
            FamilySummaryRow::new("B", 1, 2, 1, 1),
            FamilySummaryRow::new("A", 3, 1, 1, 1),
        ])
        .unwrap();
        let store = AssignmentStore::from_records(records).unwrap();
        assert_eq!(store.sections(), vec!["A", "B"]);
        assert_eq!(store.aisles("A"), vec![1, 2, 3]);
        assert_eq!(store.sides("B", 1), vec![1, 2]);
        assert_eq!(store.first_side(), Some(SideRef::new("A", 1, 1)));
        assert_eq!(store.side_view(&SideRef::new("B", 1, 2)).count(), 1);
    }

    #[test]
    fn persist_without_backing_fails() {
        let store = example_store();
        assert!(matches!(store.persist(), Err(ShelfmapError::NoBackingStore)));
    }

    #[test]
    fn persist_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let mut store = example_store().with_backing(&path);
        store.assign(&[GridCell::new(2, 2)], &SideRef::new("A", 1, 1), "Dairy", "Milk");
        store.persist().unwrap();

        let reloaded = AssignmentStore::load(&crate::parser::parse_file(&path).unwrap()).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn failed_persist_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.xlsx");
        let mut store = example_store().with_backing(&path);
        store.assign(&[GridCell::new(1, 1)], &SideRef::new("A", 1, 1), "Dairy", "Milk");
        assert!(matches!(store.persist(), Err(ShelfmapError::Io(_))));
        assert_eq!(store.find_by_coordinate("A", 1, 1, 1, 1).unwrap().family, "Dairy");
    }

    #[test]
    fn load_without_label_columns() {
        let mut sheet = Sheet::new("S");
        for (c, h) in [(0, "Section"), (1, "Aisle"), (2, "Side"), (3, "Level"), (4, "Shelf")] {
            sheet.set(0, c, CellValue::Text(h.into()));
        }
        for c in 0..5 {
            sheet.set(1, c, CellValue::Number(1.0));
        }
        let store = AssignmentStore::load(&Workbook { sheets: vec![sheet] }).unwrap();
        let record = store.find_by_coordinate("1", 1, 1, 1, 1).unwrap();
        assert!(record.family.is_empty() && record.category.is_empty());
    }

    #[test]
    fn load_rejects_zero_coordinate() {
        let mut sheet = Sheet::new("S");
        for (c, h) in [(0, "Section"), (1, "Aisle"), (2, "Side"), (3, "Level"), (4, "Shelf")] {
            sheet.set(0, c, CellValue::Text(h.into()));
        }
        sheet.set(1, 0, CellValue::Text("A".into()));
        for c in 1..5 {
            sheet.set(1, c, CellValue::Number(1.0));
        }
        sheet.set(1, 3, CellValue::Number(0.0));
        let err = AssignmentStore::load(&Workbook { sheets: vec![sheet] }).unwrap_err();
        assert_eq!(err.to_string(), "row 2: missing or invalid column 'Level'");
    }
}
