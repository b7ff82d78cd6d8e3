use serde::{Deserialize, Serialize};

/// A parsed cell value.
///
/// Strings from the shared string table, inline strings and formula string
/// results all become `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "camelCase")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Error(String),
}

impl CellValue {
    /// True for empty or whitespace-only text. Error cells count as blank
    /// since they carry no usable label.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Error(_) => true,
            Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Text as a user would see it in the sheet, trimmed.
    ///
    /// Integral numbers print without a fractional part (`3.0` becomes `"3"`).
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => format_number(*n),
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Self::Error(_) => String::new(),
        }
    }

    /// Integer content of the cell, if it holds exactly one.
    ///
    /// Numbers must be integral; text must parse as an integer after trimming
    /// (`"3"` and `"3.0"` both qualify, `"3.5"` and `"three"` do not).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) => integral(*n),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            Self::Bool(_) | Self::Error(_) => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(n: f64) -> Option<i64> {
    // 2^53: beyond this f64 no longer represents every integer
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT {
        Some(n as i64)
    } else {
        None
    }
}

fn format_number(n: f64) -> String {
    match integral(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
