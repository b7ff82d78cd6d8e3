//! Generates worksheet XML for the assignment table.
//!
//! Text cells use inline strings (`t="inlineStr"`), so no shared string table
//! has to be built.

use crate::cell_ref::{cell_ref, col_to_letter};
use crate::data_validation::list_formula;
use crate::types::ShelfRecord;
use crate::xml_helpers::xml_escape;

use super::{ValidationHints, OUTPUT_HEADERS};

/// Excel rejects inline list formulas longer than this.
const MAX_LIST_FORMULA_LEN: usize = 255;

/// Family and Category columns (0-based F and G).
const FAMILY_COL: u32 = 5;
const CATEGORY_COL: u32 = 6;

/// Write a complete worksheet XML string for `records`.
pub(super) fn write_sheet_xml(records: &[ShelfRecord], hints: Option<&ValidationHints>) -> String {
    let mut out = String::with_capacity(256 + records.len() * 192);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    let last_row = last_row_number(records);
    let last_col = col_to_letter(CATEGORY_COL);
    out.push_str(&format!("<dimension ref=\"A1:{last_col}{last_row}\"/>\n"));

    // Keep the header row visible while scrolling
    out.push_str("<sheetViews><sheetView tabSelected=\"1\" workbookViewId=\"0\">");
    out.push_str("<pane ySplit=\"1\" topLeftCell=\"A2\" activePane=\"bottomLeft\" state=\"frozen\"/>");
    out.push_str("</sheetView></sheetViews>\n");
    out.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>\n");
    out.push_str("<cols><col min=\"6\" max=\"7\" width=\"24\" customWidth=\"1\"/></cols>\n");

    out.push_str("<sheetData>\n");
    write_header_row(&mut out);
    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1);
        write_record_row(&mut out, row, record);
    }
    out.push_str("</sheetData>\n");

    if let Some(hints) = hints {
        if !records.is_empty() {
            write_data_validations(&mut out, hints, last_row);
        }
    }

    out.push_str("</worksheet>");
    out
}

/// 1-based number of the last used row (the header alone is row 1).
fn last_row_number(records: &[ShelfRecord]) -> u64 {
    records.len() as u64 + 1
}

fn write_header_row(out: &mut String) {
    out.push_str("<row r=\"1\">");
    for (col, header) in (0u32..).zip(OUTPUT_HEADERS.iter()) {
        write_text_cell(out, col, 0, header);
    }
    out.push_str("</row>\n");
}

/// Write one record on 0-based sheet row `row`.
fn write_record_row(out: &mut String, row: u32, record: &ShelfRecord) {
    out.push_str(&format!("<row r=\"{}\">", u64::from(row) + 1));
    write_text_cell(out, 0, row, &record.section);
    write_number_cell(out, 1, row, record.aisle);
    write_number_cell(out, 2, row, record.side);
    write_number_cell(out, 3, row, record.level);
    write_number_cell(out, 4, row, record.shelf);
    write_text_cell(out, FAMILY_COL, row, &record.family);
    write_text_cell(out, CATEGORY_COL, row, &record.category);
    out.push_str("</row>\n");
}

fn write_text_cell(out: &mut String, col: u32, row: u32, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(&format!("<c r=\"{}\" t=\"inlineStr\"><is><t", cell_ref(col, row)));
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        out.push_str(" xml:space=\"preserve\"");
    }
    out.push('>');
    out.push_str(&xml_escape(text));
    out.push_str("</t></is></c>");
}

fn write_number_cell(out: &mut String, col: u32, row: u32, value: u32) {
    out.push_str(&format!("<c r=\"{}\"><v>{value}</v></c>", cell_ref(col, row)));
}

/// Attach list validations to the Family and Category columns of every data row.
fn write_data_validations(out: &mut String, hints: &ValidationHints, last_row: u64) {
    let mut rules = Vec::new();
    let families = hints.family_items();
    if families.is_empty() {
        tracing::warn!("no families loaded; Family column left without a dropdown");
    } else {
        rules.push((FAMILY_COL, families));
    }
    rules.push((CATEGORY_COL, hints.category_items()));

    out.push_str(&format!("<dataValidations count=\"{}\">", rules.len()));
    for (col, items) in rules {
        let letter = col_to_letter(col);
        let (formula, dropped) = list_formula(items);
        if !dropped.is_empty() {
            tracing::warn!(
                column = %letter,
                ?dropped,
                "items with commas or quotes left out of dropdown"
            );
        }
        if formula.len() > MAX_LIST_FORMULA_LEN {
            tracing::warn!(
                column = %letter,
                len = formula.len(),
                "dropdown list exceeds Excel's inline list limit"
            );
        }
        out.push_str(&format!(
            "<dataValidation type=\"list\" allowBlank=\"1\" showInputMessage=\"1\" showErrorMessage=\"1\" sqref=\"{letter}2:{letter}{last_row}\">"
        ));
        out.push_str("<formula1>");
        out.push_str(&xml_escape(&formula));
        out.push_str("</formula1></dataValidation>");
    }
    out.push_str("</dataValidations>\n");
}
