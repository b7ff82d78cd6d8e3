//! Data validation parsing module
//!
//! Reads `<dataValidation>` rules back from worksheet XML so the dropdown
//! hints attached to the Family and Category columns can be inspected after
//! a save.

use crate::types::{DataValidation, DataValidationRange, ValidationType};
use crate::xml_helpers::{attr_bool_default, attr_string, read_element_text};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Parse a `<dataValidation>` element and its `<formula1>` child.
///
/// # Example XML
/// ```xml
/// <dataValidation type="list" allowBlank="1" sqref="F2:F13">
///   <formula1>"Dairy,Bakery"</formula1>
/// </dataValidation>
/// ```
///
/// Returns `None` when `sqref` is missing.
pub fn parse_data_validation<R: BufRead>(
    e: &BytesStart,
    xml: &mut Reader<R>,
) -> Option<DataValidationRange> {
    let sqref = attr_string(e, b"sqref").unwrap_or_default();
    let validation_type = attr_string(e, b"type")
        .map(|t| parse_validation_type(&t))
        .unwrap_or_default();
    let allow_blank = attr_bool_default(e, b"allowBlank", false);
    // showDropDown="1" suppresses the in-cell arrow
    let show_dropdown = !attr_bool_default(e, b"showDropDown", false);

    let mut formula1: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match xml.read_event_into(&mut buf) {
            Ok(Event::Start(ref inner)) => {
                if inner.local_name().as_ref() == b"formula1" {
                    formula1 = read_element_text(xml);
                }
            }
            Ok(Event::End(ref inner)) => {
                if inner.local_name().as_ref() == b"dataValidation" {
                    break;
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }

    if sqref.is_empty() {
        return None;
    }

    let list_values = if validation_type == ValidationType::List {
        formula1.as_deref().and_then(parse_list_values)
    } else {
        None
    };

    Some(DataValidationRange {
        sqref,
        validation: DataValidation {
            validation_type,
            formula1,
            allow_blank,
            show_dropdown,
            list_values,
        },
    })
}

fn parse_validation_type(s: &str) -> ValidationType {
    match s {
        "whole" => ValidationType::Whole,
        "decimal" => ValidationType::Decimal,
        "list" => ValidationType::List,
        "date" => ValidationType::Date,
        "time" => ValidationType::Time,
        "textLength" => ValidationType::TextLength,
        "custom" => ValidationType::Custom,
        _ => ValidationType::None,
    }
}

/// Parse list values from an inline quoted formula1 (`"A,B,C"`).
///
/// Cell references (`$A$1:$A$10`) are not lists and yield `None`.
pub fn parse_list_values(formula: &str) -> Option<Vec<String>> {
    let inner = formula
        .trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))?;
    let values: Vec<String> = inner
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Build an inline list formula from items.
///
/// Items containing a comma or a double quote cannot be represented in an
/// inline list and are returned separately so the caller can report them.
pub fn list_formula<'a, I>(items: I) -> (String, Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for item in items {
        if item.contains(',') || item.contains('"') {
            dropped.push(item.to_string());
        } else {
            kept.push(item);
        }
    }
    (format!("\"{}\"", kept.join(",")), dropped)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse_one(xml_str: &str) -> Option<DataValidationRange> {
        let mut xml = Reader::from_str(xml_str);
        xml.trim_text(true);
        let mut buf = Vec::new();
        loop {
            match xml.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"dataValidation" => {
                    let e = e.to_owned();
                    return parse_data_validation(&e, &mut xml);
                }
                Ok(Event::Eof) | Err(_) => return None,
                _ => {}
            }
            buf.clear();
        }
    }

    #[test]
    fn parses_list_rule() {
        let dv = parse_one(
            r#"<dataValidation type="list" allowBlank="1" sqref="F2:F13"><formula1>"Dairy,Bakery"</formula1></dataValidation>"#,
        )
        .unwrap();
        assert_eq!(dv.sqref, "F2:F13");
        assert_eq!(dv.validation.validation_type, ValidationType::List);
        assert!(dv.validation.allow_blank);
        assert!(dv.validation.show_dropdown);
        assert_eq!(
            dv.validation.list_values,
            Some(vec!["Dairy".to_string(), "Bakery".to_string()])
        );
    }

    #[test]
    fn missing_sqref_is_ignored() {
        let dv = parse_one(
            r#"<dataValidation type="list"><formula1>"A"</formula1></dataValidation>"#,
        );
        assert!(dv.is_none());
    }

    #[test]
    fn range_formula_is_not_a_list() {
        assert_eq!(parse_list_values("$A$1:$A$10"), None);
        assert_eq!(parse_list_values("\"\""), None);
    }

    #[test]
    fn list_formula_drops_unrepresentable_items() {
        let (formula, dropped) = list_formula(["Milk", "Eggs, large", "Cheese"]);
        assert_eq!(formula, "\"Milk,Cheese\"");
        assert_eq!(dropped, vec!["Eggs, large".to_string()]);
    }
}
