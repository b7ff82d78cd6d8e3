//! Shelf expansion: summary rows to individual shelf records.
//!
//! Each summary row (section, aisles, sides, levels, shelves) becomes the full
//! cross product of its coordinates, emitted aisle, side, level, shelf
//! ascending. Sections are processed in input order.

use std::collections::HashMap;

use crate::error::{Result, ShelfmapError};
use crate::types::{CellValue, FamilySummaryRow, ShelfRecord, Sheet, Workbook};

/// Required summary headers, matched case-insensitively after trimming.
pub const SUMMARY_HEADERS: [&str; 5] = ["section", "aisles", "sides", "levels max", "shelves max"];

/// Upper bound on records reserved up front; larger tables grow as needed.
const PREALLOCATE_LIMIT: usize = 1 << 20;

/// Expand summary rows into shelf records with empty family/category.
///
/// A count of zero or less yields no records for that row.
///
/// # Errors
/// A section named by more than one row is rejected, since it would produce
/// duplicate coordinates.
pub fn expand_rows(rows: &[FamilySummaryRow]) -> Result<Vec<ShelfRecord>> {
    let mut seen: HashMap<&str, u32> = HashMap::new();
    let mut records = Vec::with_capacity(expected_len(rows).min(PREALLOCATE_LIMIT));

    for row in rows {
        if seen.insert(row.section.as_str(), row.row).is_some() {
            return Err(ShelfmapError::DuplicateSection {
                row: row.row,
                section: row.section.clone(),
            });
        }
        expand_row(row, &mut records);
    }

    tracing::info!(
        sections = rows.len(),
        records = records.len(),
        "expanded shelf summary"
    );
    Ok(records)
}

fn expand_row(row: &FamilySummaryRow, out: &mut Vec<ShelfRecord>) {
    for aisle in 1..=count(row.aisles) {
        for side in 1..=count(row.sides) {
            for level in 1..=count(row.levels) {
                for shelf in 1..=count(row.shelves) {
                    out.push(ShelfRecord::unassigned(
                        &row.section,
                        aisle,
                        side,
                        level,
                        shelf,
                    ));
                }
            }
        }
    }
}

/// Loop bound for a count; non-positive counts give an empty range.
fn count(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

/// Number of records `rows` will expand to (saturating).
pub fn expected_len(rows: &[FamilySummaryRow]) -> usize {
    rows.iter()
        .map(|r| {
            [r.aisles, r.sides, r.levels, r.shelves]
                .iter()
                .map(|&n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
                .fold(1usize, usize::saturating_mul)
        })
        .fold(0usize, usize::saturating_add)
}

/// Read the summary table from the first sheet of `workbook`.
///
/// # Errors
/// See [`read_summary_sheet`]; an empty workbook reports every header missing.
pub fn read_summary(workbook: &Workbook) -> Result<Vec<FamilySummaryRow>> {
    match workbook.first_sheet() {
        Some(sheet) => read_summary_sheet(sheet),
        None => Err(ShelfmapError::MissingColumns {
            columns: SUMMARY_HEADERS.iter().map(ToString::to_string).collect(),
        }),
    }
}

/// Read the summary table from `sheet`.
///
/// Row 1 holds the headers. Rows with no value in any required column are
/// not part of the table and are skipped.
///
/// # Errors
/// `MissingColumns` when headers are absent, `MalformedRow` for a blank
/// section or a count that is not an integer.
pub fn read_summary_sheet(sheet: &Sheet) -> Result<Vec<FamilySummaryRow>> {
    let cols = header_columns(sheet, &SUMMARY_HEADERS)?;
    let [section_col, aisles_col, sides_col, levels_col, shelves_col] = cols;

    let mut rows = Vec::new();
    for r in 1..sheet.max_row {
        if cols.iter().all(|&c| sheet.non_blank(r, c).is_none()) {
            continue;
        }
        let row_number = r.saturating_add(1);
        let section = sheet
            .non_blank(r, section_col)
            .map(CellValue::display_text)
            .ok_or_else(|| malformed(row_number, "section"))?;

        rows.push(FamilySummaryRow {
            row: row_number,
            section,
            aisles: integer_at(sheet, r, aisles_col, "aisles")?,
            sides: integer_at(sheet, r, sides_col, "sides")?,
            levels: integer_at(sheet, r, levels_col, "levels max")?,
            shelves: integer_at(sheet, r, shelves_col, "shelves max")?,
        });
    }

    Ok(rows)
}

fn integer_at(sheet: &Sheet, row: u32, col: u32, name: &str) -> Result<i64> {
    sheet
        .non_blank(row, col)
        .and_then(CellValue::as_integer)
        .ok_or_else(|| malformed(row.saturating_add(1), name))
}

fn malformed(row: u32, column: &str) -> ShelfmapError {
    ShelfmapError::MalformedRow {
        row,
        column: column.to_string(),
    }
}

/// Locate `names` in row 1 of `sheet`, case-insensitively.
///
/// # Errors
/// `MissingColumns` naming every header that was not found.
pub(crate) fn header_columns<const N: usize>(
    sheet: &Sheet,
    names: &[&str; N],
) -> Result<[u32; N]> {
    let mut found = [None; N];
    for col in 0..sheet.max_col {
        let Some(header) = sheet.non_blank(0, col) else {
            continue;
        };
        let header = header.display_text().to_lowercase();
        for (slot, name) in found.iter_mut().zip(names.iter()) {
            if slot.is_none() && header == *name {
                *slot = Some(col);
            }
        }
    }

    let missing: Vec<String> = found
        .iter()
        .zip(names.iter())
        .filter(|(slot, _)| slot.is_none())
        .map(|(_, name)| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ShelfmapError::MissingColumns { columns: missing });
    }

    Ok(found.map(|slot| slot.unwrap_or(0)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::cast_possible_truncation
)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn summary_sheet(rows: &[[CellValue; 5]]) -> Sheet {
        let mut sheet = Sheet::new("Shelves");
        for (c, h) in ["Section", "Aisles", "Sides", "Levels Max", "Shelves Max"]
            .iter()
            .enumerate()
        {
            sheet.set(0, c as u32, CellValue::Text((*h).to_string()));
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                sheet.set(r as u32 + 1, c as u32, v.clone());
            }
        }
        sheet
    }

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn t(v: &str) -> CellValue {
        CellValue::Text(v.to_string())
    }

    #[test]
    fn example_row_expands_to_twelve_records() {
        let records = expand_rows(&[FamilySummaryRow::new("A", 2, 1, 3, 2)]).unwrap();
        assert_eq!(records.len(), 12);
        let first = &records[0];
        assert_eq!(
            (first.section.as_str(), first.aisle, first.side, first.level, first.shelf),
            ("A", 1, 1, 1, 1)
        );
        let last = records.last().unwrap();
        assert_eq!(
            (last.section.as_str(), last.aisle, last.side, last.level, last.shelf),
            ("A", 2, 1, 3, 2)
        );
        assert!(records.iter().all(|r| r.family.is_empty() && r.category.is_empty()));
    }

    #[test]
    fn emission_order_is_aisle_side_level_shelf() {
        let records = expand_rows(&[FamilySummaryRow::new("B", 1, 2, 2, 2)]).unwrap();
        let coords: Vec<(u32, u32, u32)> =
            records.iter().map(|r| (r.side, r.level, r.shelf)).collect();
        assert_eq!(
            coords,
            vec![
                (1, 1, 1),
                (1, 1, 2),
                (1, 2, 1),
                (1, 2, 2),
                (2, 1, 1),
                (2, 1, 2),
                (2, 2, 1),
                (2, 2, 2)
            ]
        );
    }

    #[test]
    fn zero_or_negative_dimension_is_empty_not_error() {
        let rows = [
            FamilySummaryRow::new("A", 2, 0, 3, 2),
            FamilySummaryRow::new("B", -1, 1, 1, 1),
            FamilySummaryRow::new("C", 1, 1, 1, 1),
        ];
        let records = expand_rows(&rows).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section, "C");
    }

    #[test]
    fn sections_keep_input_order() {
        let rows = [
            FamilySummaryRow::new("Z", 1, 1, 1, 1),
            FamilySummaryRow::new("A", 1, 1, 1, 1),
        ];
        let records = expand_rows(&rows).unwrap();
        assert_eq!(records[0].section, "Z");
        assert_eq!(records[1].section, "A");
    }

    #[test]
    fn repeated_section_is_rejected() {
        let mut second = FamilySummaryRow::new("A", 1, 1, 1, 1);
        second.row = 3;
        let err = expand_rows(&[FamilySummaryRow::new("A", 1, 1, 1, 1), second]).unwrap_err();
        assert!(matches!(err, ShelfmapError::DuplicateSection { row: 3, .. }));
    }

    #[test]
    fn coordinates_are_unique() {
        let rows = [
            FamilySummaryRow::new("A", 2, 2, 3, 4),
            FamilySummaryRow::new("B", 3, 1, 2, 2),
        ];
        let records = expand_rows(&rows).unwrap();
        let unique: HashSet<_> = records.iter().map(ShelfRecord::coord).collect();
        assert_eq!(unique.len(), records.len());
        assert_eq!(records.len(), expected_len(&rows));
    }

    #[test]
    fn reads_summary_with_mixed_case_headers() {
        let sheet = summary_sheet(&[
            [t("A"), n(2.0), n(1.0), n(3.0), n(2.0)],
            [n(7.0), t("1"), t(" 2 "), n(1.0), n(1.0)],
        ]);
        let rows = read_summary_sheet(&sheet).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], {
            let mut r = FamilySummaryRow::new("A", 2, 1, 3, 2);
            r.row = 2;
            r
        });
        assert_eq!(rows[1].section, "7");
        assert_eq!(rows[1].sides, 2);
    }

    #[test]
    fn fractional_count_names_row_and_column() {
        let sheet = summary_sheet(&[
            [t("A"), n(1.0), n(1.0), n(1.0), n(1.0)],
            [t("B"), n(1.0), n(1.0), n(2.5), n(1.0)],
        ]);
        let err = read_summary_sheet(&sheet).unwrap_err();
        assert_eq!(err.to_string(), "row 3: missing or invalid column 'levels max'");
    }

    #[test]
    fn blank_count_aborts() {
        let sheet = summary_sheet(&[[t("A"), n(1.0), t(""), n(1.0), n(1.0)]]);
        let err = read_summary_sheet(&sheet).unwrap_err();
        assert!(matches!(err, ShelfmapError::MalformedRow { row: 2, ref column } if column == "sides"));
    }

    #[test]
    fn blank_section_aborts() {
        let sheet = summary_sheet(&[[t(" "), n(1.0), n(1.0), n(1.0), n(1.0)]]);
        let err = read_summary_sheet(&sheet).unwrap_err();
        assert!(matches!(err, ShelfmapError::MalformedRow { ref column, .. } if column == "section"));
    }

    #[test]
    fn fully_blank_rows_are_skipped() {
        let sheet = summary_sheet(&[
            [t("A"), n(1.0), n(1.0), n(1.0), n(1.0)],
            [t(""), t(""), t(""), t(""), t("")],
            [t("B"), n(1.0), n(1.0), n(1.0), n(1.0)],
        ]);
        let rows = read_summary_sheet(&sheet).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].row, 4);
    }

    #[test]
    fn missing_headers_are_all_reported() {
        let mut sheet = Sheet::new("S");
        sheet.set(0, 0, t("Section"));
        sheet.set(0, 1, t("Aisles"));
        let err = read_summary_sheet(&sheet).unwrap_err();
        match err {
            ShelfmapError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["sides", "levels max", "shelves max"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let mut sheet = summary_sheet(&[[t("A"), n(1.0), n(1.0), n(2.0), n(2.0)]]);
        sheet.set(0, 5, t("Notes"));
        sheet.set(1, 5, t("back wall"));
        let rows = read_summary_sheet(&sheet).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
