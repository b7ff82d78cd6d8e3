//! Utilities for Excel-style cell references and ranges.
//!
//! All coordinates returned here are 0-indexed.

/// Parse a cell reference like "A1" into (col, row).
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    parse_cell_ref_bytes(cell_ref.trim().as_bytes())
}

/// Parse a cell reference from raw bytes (ASCII) into (col, row).
///
/// This is the bytes equivalent of [`parse_cell_ref`] for use with raw XML
/// attribute values (e.g., `attr.value` from quick-xml).
pub fn parse_cell_ref_bytes(ref_bytes: &[u8]) -> Option<(u32, u32)> {
    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for &b in ref_bytes {
        if b == b'$' {
            continue;
        }
        if b.is_ascii_alphabetic() {
            if saw_row {
                return None;
            }
            let upper = b.to_ascii_uppercase();
            col = col
                .saturating_mul(26)
                .saturating_add(u32::from(upper - b'A') + 1);
            saw_col = true;
        } else if b.is_ascii_digit() {
            row = row.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            saw_row = true;
        } else {
            return None;
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }

    Some((col - 1, row - 1))
}

/// Convert a 0-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...).
pub fn col_to_letter(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = u64::from(col) + 1;
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        result.push(char::from(b'A' + offset));
        n /= 26;
    }
    result.iter().rev().collect()
}

/// Format a 0-based (col, row) pair as an "A1"-style reference.
pub fn cell_ref(col: u32, row: u32) -> String {
    format!("{}{}", col_to_letter(col), u64::from(row) + 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A1", Some((0, 0)); "first cell")]
    #[test_case("F2", Some((5, 1)); "family column")]
    #[test_case("$G$13", Some((6, 12)); "absolute")]
    #[test_case("aa10", Some((26, 9)); "lowercase double letter")]
    #[test_case("A0", None; "row zero")]
    #[test_case("12", None; "no column")]
    #[test_case("B", None; "no row")]
    #[test_case("1A", None; "digits before letters")]
    fn parses_references(input: &str, expected: Option<(u32, u32)>) {
        assert_eq!(parse_cell_ref(input), expected);
    }

    #[test_case(0, "A")]
    #[test_case(6, "G")]
    #[test_case(25, "Z")]
    #[test_case(26, "AA")]
    #[test_case(701, "ZZ")]
    #[test_case(702, "AAA")]
    fn converts_columns(col: u32, expected: &str) {
        assert_eq!(col_to_letter(col), expected);
    }

    #[test]
    fn letters_round_trip_through_parser() {
        for col in [0, 5, 26, 51, 700, 16383] {
            let r = cell_ref(col, 41);
            assert_eq!(parse_cell_ref(&r), Some((col, 41)), "{r}");
        }
    }
}
