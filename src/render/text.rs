//! Text measurement and greedy word wrapping for shelf labels.

/// Measures the rendered width of a string at a font size.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_px: f64) -> f64;
}

/// Width estimate without a text engine: every character is the same
/// fraction of the font size.
#[derive(Debug, Clone, Copy)]
pub struct AverageCharWidth {
    pub ratio: f64,
}

impl Default for AverageCharWidth {
    fn default() -> Self {
        Self { ratio: 0.6 }
    }
}

impl TextMeasure for AverageCharWidth {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.ratio
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Words are added to the current line while the line still fits; a word
/// wider than the limit on its own takes a line by itself and is never
/// split. Whitespace runs collapse to single spaces.
pub fn wrap_text(text: &str, max_width: f64, font_px: f64, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
            continue;
        }

        let test_line = format!("{} {}", current_line, word);
        if measure.measure(&test_line, font_px) <= max_width {
            current_line = test_line;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}
