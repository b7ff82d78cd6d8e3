//! Per-view category colors.

use super::colors::{palette, CssColor, CATEGORY_COLORS};
use crate::types::ShelfRecord;

/// Category → color for one filtered view.
///
/// Colors are handed out in first-encounter order of the non-empty categories
/// in the view, so the same category may get a different color on another
/// side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPalette {
    entries: Vec<(String, CssColor)>,
}

impl CategoryPalette {
    pub fn for_view<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ShelfRecord>,
    {
        let mut entries: Vec<(String, CssColor)> = Vec::new();
        for record in records {
            let category = record.category.trim();
            if category.is_empty() || entries.iter().any(|(c, _)| c == category) {
                continue;
            }
            let color = CATEGORY_COLORS
                .get(entries.len() % CATEGORY_COLORS.len())
                .copied()
                .unwrap_or(palette::LABEL_TEXT);
            entries.push((category.to_string(), color));
        }
        Self { entries }
    }

    /// Color of `category`; unknown categories draw in black.
    pub fn color(&self, category: &str) -> CssColor {
        let category = category.trim();
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map_or(palette::LABEL_TEXT, |(_, color)| *color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, CssColor)> {
        self.entries.iter().map(|(c, color)| (c.as_str(), *color))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn with_category(shelf: u32, category: &str) -> ShelfRecord {
        let mut r = ShelfRecord::unassigned("A", 1, 1, 1, shelf);
        r.category = category.to_string();
        r
    }

    #[test]
    fn first_encounter_order() {
        let records = vec![
            with_category(1, "Milk"),
            with_category(2, ""),
            with_category(3, "Bread"),
            with_category(4, "Milk"),
        ];
        let palette = CategoryPalette::for_view(&records);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color("Milk"), CATEGORY_COLORS[0]);
        assert_eq!(palette.color("Bread"), CATEGORY_COLORS[1]);
        assert_eq!(palette.color("Eggs"), palette::LABEL_TEXT);
    }

    #[test]
    fn wraps_after_sixteen() {
        let records: Vec<_> = (1..=17).map(|i| with_category(i, &format!("C{i}"))).collect();
        let palette = CategoryPalette::for_view(&records);
        assert_eq!(palette.color("C17"), CATEGORY_COLORS[0]);
        assert_eq!(palette.color("C16"), CATEGORY_COLORS[15]);
    }
}
