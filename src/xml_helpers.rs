//! Shared XML helpers for the XLSX reader and writer.
//!
//! Attribute helpers handle namespace-prefixed keys and UTF-8 conversion
//! safely; `xml_escape` is the single escaping routine used by the writer.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Extract a string attribute value by key, unescaping entities.
///
/// Returns `None` if the attribute is missing or not valid UTF-8.
pub fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return attr.unescape_value().ok().map(|s| s.to_string());
        }
    }
    None
}

/// Extract a string attribute by local name (ignoring namespace prefix).
pub fn attr_string_local(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == key {
            return attr.unescape_value().ok().map(|s| s.to_string());
        }
    }
    None
}

/// Extract a `u32` attribute value by key.
pub fn attr_u32(e: &BytesStart, key: &[u8]) -> Option<u32> {
    attr_string(e, key).and_then(|s| s.trim().parse().ok())
}

/// Extract a boolean attribute value by key.
///
/// Recognizes `"1"` and `"true"` as true; anything else present is false.
pub fn attr_bool(e: &BytesStart, key: &[u8]) -> Option<bool> {
    attr_string(e, key).map(|s| matches!(s.as_str(), "1" | "true"))
}

/// Extract a boolean attribute with a default value.
pub fn attr_bool_default(e: &BytesStart, key: &[u8], default: bool) -> bool {
    attr_bool(e, key).unwrap_or(default)
}

/// Read the text content of the element whose start tag was just consumed.
///
/// Stops at the first non-text event; returns `None` for empty elements.
pub fn read_element_text<R: BufRead>(xml: &mut Reader<R>) -> Option<String> {
    let mut text_buf = Vec::new();
    match xml.read_event_into(&mut text_buf) {
        Ok(Event::Text(text)) => text.unescape().ok().map(|s| s.to_string()),
        Ok(Event::CData(cdata)) => std::str::from_utf8(&cdata).ok().map(ToString::to_string),
        _ => None,
    }
}

/// Escape text for use in XML element content or attribute values.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
