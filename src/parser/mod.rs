//! XLSX reader
//!
//! Opens the ZIP package, resolves the workbook relationships and sheet list,
//! loads the shared string table and reads every worksheet's values.

mod relationships;
mod worksheet;

use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

use crate::error::{Result, ShelfmapError};
use crate::types::Workbook;

use relationships::{get_sheet_info, parse_shared_strings, parse_workbook_relationships};
use worksheet::parse_sheet;

/// Parse an XLSX file from bytes.
///
/// # Errors
/// Fails if the data is not a ZIP archive, if `xl/workbook.xml` or a listed
/// worksheet is missing, or if a worksheet is not well-formed XML.
pub fn parse(data: &[u8]) -> Result<Workbook> {
    let cursor = Cursor::new(data);
    let mut archive = ZipArchive::new(cursor)?;

    let relationships = parse_workbook_relationships(&mut archive);
    let shared_strings =
        parse_shared_strings(&mut archive, relationships.shared_strings.as_deref());
    let sheet_infos = get_sheet_info(&mut archive, &relationships.worksheets)?;

    let mut sheets = Vec::with_capacity(sheet_infos.len());
    for info in &sheet_infos {
        let sheet = parse_sheet(&mut archive, info, &shared_strings)?;
        tracing::debug!(
            sheet = %sheet.name,
            cells = sheet.cell_count(),
            rows = sheet.max_row,
            "parsed worksheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook { sheets })
}

/// Read and parse an XLSX file from disk.
///
/// # Errors
/// A file that does not exist is reported as [`ShelfmapError::MissingInput`];
/// other failures as in [`parse`].
pub fn parse_file(path: &Path) -> Result<Workbook> {
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ShelfmapError::MissingInput {
                path: path.to_path_buf(),
            }
        } else {
            ShelfmapError::Io(e)
        }
    })?;
    parse(&data)
}
