//! Test fixtures for generating valid XLSX files in memory.
//!
//! Builds the two input workbooks the tool reads (the shelf summary and the
//! one-sheet-per-family workbook) as real ZIP packages, so tests go through
//! the same parser as files on disk.
//!
//! # Example
//!
//! ```rust
//! use fixtures::XlsxBuilder;
//!
//! let xlsx = XlsxBuilder::new()
//!     .add_sheet("Summary")
//!     .add_cell("A1", "Section")
//!     .add_cell("B1", 2.0)
//!     .build();
//!
//! let workbook = shelfmap::parser::parse(&xlsx).unwrap();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

use shelfmap::cell_ref::{col_to_letter, parse_cell_ref};

// ============================================================================
// Cell values
// ============================================================================

/// Cell value types.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Stored in the shared string table.
    String(String),
    Number(f64),
    Boolean(bool),
    /// An error value (e.g., "#N/A").
    Error(String),
    /// An inline string (not shared).
    InlineString(String),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

#[derive(Debug, Clone)]
pub struct CellEntry {
    pub cell_ref: String,
    pub value: CellValue,
}

/// Builder for a single worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetBuilder {
    pub name: String,
    pub cells: Vec<CellEntry>,
}

impl SheetBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: Vec::new(),
        }
    }

    #[must_use]
    pub fn cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V) -> Self {
        self.cells.push(CellEntry {
            cell_ref: cell_ref.to_string(),
            value: value.into(),
        });
        self
    }

    /// Fill a row left to right starting at column A (`row` is 1-based).
    #[must_use]
    pub fn row<V: Into<CellValue> + Clone>(mut self, row: u32, values: &[V]) -> Self {
        for (col, value) in (0u32..).zip(values.iter()) {
            let cell_ref = format!("{}{}", col_to_letter(col), row);
            self = self.cell(&cell_ref, value.clone());
        }
        self
    }
}

// ============================================================================
// XLSX Builder
// ============================================================================

#[derive(Debug, Default)]
pub struct XlsxBuilder {
    sheets: Vec<SheetBuilder>,
}

impl XlsxBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sheet(mut self, sheet: SheetBuilder) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Add a simple sheet by name (returns a builder for chaining).
    #[must_use]
    pub fn add_sheet(self, name: &str) -> XlsxSheetAdder {
        XlsxSheetAdder {
            builder: self,
            sheet: SheetBuilder::new(name),
        }
    }

    /// Build the XLSX file as bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut shared_strings: Vec<String> = Vec::new();
        for sheet in &self.sheets {
            for cell in &sheet.cells {
                if let CellValue::String(ref s) = cell.value {
                    if !shared_strings.contains(s) {
                        shared_strings.push(s.clone());
                    }
                }
            }
        }

        let _ = zip.start_file("[Content_Types].xml", options);
        let _ = zip.write_all(generate_content_types(self.sheets.len()).as_bytes());

        let _ = zip.start_file("_rels/.rels", options);
        let _ = zip.write_all(generate_rels().as_bytes());

        let _ = zip.start_file("xl/_rels/workbook.xml.rels", options);
        let _ = zip.write_all(generate_workbook_rels(self.sheets.len()).as_bytes());

        let _ = zip.start_file("xl/workbook.xml", options);
        let _ = zip.write_all(generate_workbook(&self.sheets).as_bytes());

        if !shared_strings.is_empty() {
            let _ = zip.start_file("xl/sharedStrings.xml", options);
            let _ = zip.write_all(generate_shared_strings(&shared_strings).as_bytes());
        }

        for (i, sheet) in self.sheets.iter().enumerate() {
            let path = format!("xl/worksheets/sheet{}.xml", i + 1);
            let _ = zip.start_file(&path, options);
            let _ = zip.write_all(generate_sheet_xml(sheet, &shared_strings).as_bytes());
        }

        let cursor = zip.finish().expect("Failed to finish ZIP");
        cursor.into_inner()
    }
}

/// Helper for fluent sheet building within `XlsxBuilder`.
pub struct XlsxSheetAdder {
    builder: XlsxBuilder,
    sheet: SheetBuilder,
}

impl XlsxSheetAdder {
    #[must_use]
    pub fn add_cell<V: Into<CellValue>>(mut self, cell_ref: &str, value: V) -> Self {
        self.sheet = self.sheet.cell(cell_ref, value);
        self
    }

    /// Finish the current sheet and return the builder.
    #[must_use]
    pub fn done(mut self) -> XlsxBuilder {
        self.builder.sheets.push(self.sheet);
        self.builder
    }

    /// Build the XLSX directly (finishes the current sheet automatically).
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.done().build()
    }
}

// ============================================================================
// Shelf tool inputs
// ============================================================================

/// Summary workbook with the standard headers and one row per
/// `(section, aisles, sides, levels, shelves)`.
pub fn summary_xlsx(rows: &[(&str, i32, i32, i32, i32)]) -> Vec<u8> {
    let mut sheet = SheetBuilder::new("Shelves").row(
        1,
        &["Section", "Aisles", "Sides", "Levels Max", "Shelves Max"],
    );
    for (i, &(section, aisles, sides, levels, shelves)) in (2u32..).zip(rows.iter()) {
        sheet = sheet
            .cell(&format!("A{i}"), section)
            .cell(&format!("B{i}"), aisles)
            .cell(&format!("C{i}"), sides)
            .cell(&format!("D{i}"), levels)
            .cell(&format!("E{i}"), shelves);
    }
    XlsxBuilder::new().sheet(sheet).build()
}

/// Family workbook: one sheet per `(family, categories)`, name in A2 and
/// categories from B2.
pub fn family_xlsx(families: &[(&str, &[&str])]) -> Vec<u8> {
    let mut builder = XlsxBuilder::new();
    for (i, &(family, categories)) in families.iter().enumerate() {
        let mut sheet = SheetBuilder::new(&format!("Family{}", i + 1))
            .cell("A1", "Family")
            .cell("B1", "Categories");
        if !family.is_empty() {
            sheet = sheet.cell("A2", family);
        }
        for (col, category) in (1u32..).zip(categories.iter()) {
            sheet = sheet.cell(&format!("{}2", col_to_letter(col)), *category);
        }
        builder = builder.sheet(sheet);
    }
    builder.build()
}

// ============================================================================
// Package parts
// ============================================================================

fn generate_content_types(sheet_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }
    xml.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

fn generate_rels() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
        "</Relationships>"
    )
    .to_string()
}

fn generate_workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for i in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }
    xml.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        sheet_count + 1
    ));
    xml.push_str("</Relationships>");
    xml
}

fn generate_workbook(sheets: &[SheetBuilder]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);
    xml.push_str("<sheets>");
    for (i, sheet) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(&sheet.name),
            i + 1,
            i + 1
        ));
    }
    xml.push_str("</sheets>");
    xml.push_str("</workbook>");
    xml
}

fn generate_shared_strings(strings: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(&format!(
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
        strings.len(),
        strings.len()
    ));
    for s in strings {
        xml.push_str(&format!(
            r#"<si><t xml:space="preserve">{}</t></si>"#,
            escape_xml(s)
        ));
    }
    xml.push_str("</sst>");
    xml
}

fn generate_sheet_xml(sheet: &SheetBuilder, shared_strings: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    xml.push_str("<sheetData>");

    let mut rows: std::collections::BTreeMap<u32, Vec<&CellEntry>> =
        std::collections::BTreeMap::new();
    for cell in &sheet.cells {
        let (_, row) = parse_cell_ref(&cell.cell_ref).expect("valid cell reference");
        rows.entry(row + 1).or_default().push(cell);
    }

    for (row_num, cells) in rows {
        xml.push_str(&format!(r#"<row r="{}">"#, row_num));
        for cell in cells {
            let r = &cell.cell_ref;
            match &cell.value {
                CellValue::String(s) => {
                    let idx = shared_strings.iter().position(|x| x == s).unwrap_or(0);
                    xml.push_str(&format!(r#"<c r="{r}" t="s"><v>{idx}</v></c>"#));
                }
                CellValue::Number(n) => {
                    xml.push_str(&format!(r#"<c r="{r}"><v>{n}</v></c>"#));
                }
                CellValue::Boolean(b) => {
                    let v = if *b { "1" } else { "0" };
                    xml.push_str(&format!(r#"<c r="{r}" t="b"><v>{v}</v></c>"#));
                }
                CellValue::Error(e) => {
                    xml.push_str(&format!(r#"<c r="{r}" t="e"><v>{}</v></c>"#, escape_xml(e)));
                }
                CellValue::InlineString(s) => {
                    xml.push_str(&format!(
                        r#"<c r="{r}" t="inlineStr"><is><t>{}</t></is></c>"#,
                        escape_xml(s)
                    ));
                }
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    xml
}

// ============================================================================
// Helpers
// ============================================================================

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
