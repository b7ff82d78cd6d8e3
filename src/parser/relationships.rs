//! Package plumbing: workbook relationships, the sheet list and shared strings.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

use crate::error::Result;
use crate::xml_helpers::{attr_string, attr_string_local};

use super::worksheet::SheetInfo;

const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const DEFAULT_SHARED_STRINGS: &str = "xl/sharedStrings.xml";

/// Targets of xl/_rels/workbook.xml.rels, as full archive paths.
#[derive(Default, Debug)]
pub(super) struct WorkbookRelationships {
    /// rId -> part path, e.g. "rId1" -> "xl/worksheets/sheet1.xml"
    pub worksheets: HashMap<String, String>,
    pub shared_strings: Option<String>,
}

/// Resolve a relationship target against the xl/ directory.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

/// Read the workbook relationships; a package without them yields none.
pub(super) fn parse_workbook_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> WorkbookRelationships {
    let mut rels = WorkbookRelationships::default();
    let Ok(file) = archive.by_name(WORKBOOK_RELS) else {
        return rels;
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e) | Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let id = attr_string(e, b"Id").unwrap_or_default();
                let target = attr_string(e, b"Target").unwrap_or_default();
                let kind = attr_string(e, b"Type").unwrap_or_default();

                if !target.is_empty() {
                    let path = resolve_target(&target);
                    if kind.ends_with("/worksheet") && !id.is_empty() {
                        rels.worksheets.insert(id, path);
                    } else if kind.ends_with("/sharedStrings") {
                        rels.shared_strings = Some(path);
                    }
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    rels
}

/// Sheet names and part paths from xl/workbook.xml, in tab order.
///
/// A sheet whose relationship is missing falls back to the conventional
/// `sheetN.xml` part name.
pub(super) fn get_sheet_info<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    relationships: &HashMap<String, String>,
) -> Result<Vec<SheetInfo>> {
    let file = archive.by_name("xl/workbook.xml")?;
    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(true);

    let mut sheets = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Empty(ref e) | Event::Start(ref e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr_string(e, b"name").unwrap_or_default();
                if !name.is_empty() {
                    let path = attr_string_local(e, b"id")
                        .and_then(|id| relationships.get(&id).cloned())
                        .unwrap_or_else(|| format!("xl/worksheets/sheet{}.xml", sheets.len() + 1));
                    sheets.push(SheetInfo { name, path });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Read the shared string table; a missing part is an empty table.
///
/// Rich text runs are joined into plain text and phonetic guides (`<rPh>`)
/// are left out, so every entry is what the cell displays.
pub(super) fn parse_shared_strings<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: Option<&str>,
) -> Vec<String> {
    let Ok(file) = archive.by_name(path.unwrap_or(DEFAULT_SHARED_STRINGS)) else {
        return Vec::new();
    };

    let mut xml = Reader::from_reader(BufReader::new(file));
    xml.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current: Option<String> = None;
    let mut phonetic_depth = 0u32;
    let mut in_text = false;

    loop {
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => phonetic_depth += 1,
                b"t" => in_text = current.is_some() && phonetic_depth == 0,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Ok(Event::Text(ref e)) if in_text => {
                if let (Some(s), Ok(text)) = (current.as_mut(), e.unescape()) {
                    s.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"si" => strings.extend(current.take()),
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    strings
}
