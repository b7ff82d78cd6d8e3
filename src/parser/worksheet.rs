//! Worksheet parsing - reads one sheet part into a `Sheet`.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufRead, BufReader, Read, Seek};
use zip::ZipArchive;

use crate::cell_ref::parse_cell_ref_bytes;
use crate::data_validation::parse_data_validation;
use crate::error::Result;
use crate::types::{CellValue, Sheet};
use crate::xml_helpers::attr_u32;

/// Sheet metadata from workbook.xml
pub(super) struct SheetInfo {
    pub name: String,
    pub path: String,
}

/// Cell type tag from the `t` attribute of a `<c>` element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum CellTypeTag {
    Shared,
    Inline,
    Str,
    Bool,
    Error,
    Default,
}

pub(super) fn parse_cell_type_tag(value: &[u8]) -> CellTypeTag {
    match value {
        b"s" => CellTypeTag::Shared,
        b"b" => CellTypeTag::Bool,
        b"e" => CellTypeTag::Error,
        b"str" => CellTypeTag::Str,
        b"inlineStr" => CellTypeTag::Inline,
        _ => CellTypeTag::Default,
    }
}

/// Parse a worksheet part.
pub(super) fn parse_sheet<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    info: &SheetInfo,
    shared_strings: &[String],
) -> Result<Sheet> {
    let file = archive.by_name(&info.path)?;
    let reader = BufReader::new(file);
    read_sheet_xml(reader, &info.name, shared_strings)
}

/// Read worksheet XML from any buffered reader.
pub(super) fn read_sheet_xml<B: BufRead>(
    reader: B,
    name: &str,
    shared_strings: &[String],
) -> Result<Sheet> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(false);

    let mut sheet = Sheet::new(name);
    let mut buf = Vec::new();
    let mut current_row: u32 = 0;
    let mut next_col: u32 = 0;

    loop {
        let event = xml.read_event_into(&mut buf)?;
        let is_start = matches!(event, Event::Start(_));
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(r) = attr_u32(e, b"r") {
                        current_row = r.saturating_sub(1);
                    }
                    next_col = 0;
                }
                b"c" => {
                    let mut col = next_col;
                    let mut row = current_row;
                    let mut cell_type = CellTypeTag::Default;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"r" => {
                                if let Some((c, r)) = parse_cell_ref_bytes(&attr.value) {
                                    col = c;
                                    row = r;
                                }
                            }
                            b"t" => cell_type = parse_cell_type_tag(&attr.value),
                            _ => {}
                        }
                    }
                    next_col = col.saturating_add(1);

                    // Self-closing cells like <c r="A1"/> have no value
                    if is_start {
                        let raw = read_cell_contents(&mut xml)?;
                        if let Some(value) = resolve_cell_value(raw, cell_type, shared_strings) {
                            sheet.set(row, col, value);
                        }
                    }
                }
                b"dataValidation" if is_start => {
                    if let Some(validation) = parse_data_validation(e, &mut xml) {
                        sheet.data_validations.push(validation);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheet)
}

/// Collect the text of `<v>` or `<is><t>` inside a `<c>` element, consuming
/// through its end tag.
fn read_cell_contents<B: BufRead>(xml: &mut Reader<B>) -> Result<Option<String>> {
    let mut cell_buf = Vec::new();
    let mut value: Option<String> = None;
    let mut in_value = false;
    let mut in_phonetic = false;

    loop {
        match xml.read_event_into(&mut cell_buf)? {
            Event::Start(ref inner) => match inner.local_name().as_ref() {
                b"rPh" => in_phonetic = true,
                b"v" | b"t" if !in_phonetic => in_value = true,
                _ => {}
            },
            Event::Text(ref text) if in_value => {
                let text = text.unescape()?;
                value.get_or_insert_with(String::new).push_str(&text);
            }
            Event::End(ref inner) => match inner.local_name().as_ref() {
                b"c" => break,
                b"rPh" => in_phonetic = false,
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        cell_buf.clear();
    }

    Ok(value)
}

/// Turn the raw text of a cell into a typed value.
///
/// A shared string index that is out of range, or a missing value, yields
/// no cell. A numeric cell whose text is not a number is kept as text.
fn resolve_cell_value(
    raw: Option<String>,
    cell_type: CellTypeTag,
    shared_strings: &[String],
) -> Option<CellValue> {
    let raw = raw?;
    match cell_type {
        CellTypeTag::Shared => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .map(|s| CellValue::Text(s.clone())),
        CellTypeTag::Inline | CellTypeTag::Str => Some(CellValue::Text(raw)),
        CellTypeTag::Bool => Some(CellValue::Bool(matches!(raw.trim(), "1" | "true"))),
        CellTypeTag::Error => Some(CellValue::Error(raw)),
        CellTypeTag::Default => match raw.trim().parse::<f64>() {
            Ok(n) => Some(CellValue::Number(n)),
            Err(_) => Some(CellValue::Text(raw)),
        },
    }
}
