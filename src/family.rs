//! Family/category index built from the family information workbook.
//!
//! Every sheet is one family (or an unused template): the family name sits in
//! a fixed cell and its categories run along the same row to its right.

use serde::{Deserialize, Serialize};

use crate::types::{CellValue, Sheet, Workbook};

/// Placeholder shown in category choices when a family has none.
pub const NO_CATEGORIES: &str = "No Categories Available";

/// Where the family name and category run live on a family sheet.
///
/// Rows and columns are 0-indexed. The default is the name in A2 and the
/// categories in B2 onward. Workbooks that keep categories on the row below
/// the name set `category_row` to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilySheetLayout {
    pub name_row: u32,
    pub name_col: u32,
    pub category_row: u32,
    pub first_category_col: u32,
}

impl Default for FamilySheetLayout {
    fn default() -> Self {
        Self {
            name_row: 1,
            name_col: 0,
            category_row: 1,
            first_category_col: 1,
        }
    }
}

/// One family and its ordered categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub name: String,
    pub categories: Vec<String>,
}

/// Ordered family → categories mapping.
///
/// Families keep the position of their first appearance; a family that
/// recurs on a later sheet has its category list replaced (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyIndex {
    families: Vec<Family>,
}

impl FamilyIndex {
    /// Build the index from every sheet of `workbook`.
    pub fn from_workbook(workbook: &Workbook, layout: FamilySheetLayout) -> Self {
        let mut index = Self::default();
        for sheet in &workbook.sheets {
            match read_family_sheet(sheet, layout) {
                Some(family) => index.insert(family.name, family.categories),
                None => tracing::debug!(sheet = %sheet.name, "skipping sheet without family name"),
            }
        }
        tracing::info!(families = index.len(), "loaded family index");
        index
    }

    /// Add a family, replacing the categories of an existing one in place.
    pub fn insert(&mut self, name: String, categories: Vec<String>) {
        if let Some(existing) = self.families.iter_mut().find(|f| f.name == name) {
            existing.categories = categories;
        } else {
            self.families.push(Family { name, categories });
        }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.iter()
    }

    /// Family names in index order.
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.name.as_str()).collect()
    }

    /// Categories of `family`, or `None` if the family is unknown.
    pub fn categories(&self, family: &str) -> Option<&[String]> {
        self.families
            .iter()
            .find(|f| f.name == family)
            .map(|f| f.categories.as_slice())
    }

    pub fn contains(&self, family: &str) -> bool {
        self.categories(family).is_some()
    }

    /// One (family, category) pair per category occurrence.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.families
            .iter()
            .flat_map(|f| {
                f.categories
                    .iter()
                    .map(move |c| (f.name.as_str(), c.as_str()))
            })
            .collect()
    }

    /// Every category across all families, de-duplicated, first appearance first.
    pub fn all_categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for (_, category) in self.pairs() {
            if !out.contains(&category) {
                out.push(category);
            }
        }
        out
    }
}

/// Read one family sheet; `None` when the name cell is blank or unreadable.
pub fn read_family_sheet(sheet: &Sheet, layout: FamilySheetLayout) -> Option<Family> {
    let name = sheet
        .non_blank(layout.name_row, layout.name_col)
        .map(CellValue::display_text)?;

    let categories = (layout.first_category_col..sheet.max_col)
        .filter_map(|col| sheet.non_blank(layout.category_row, col))
        .map(CellValue::display_text)
        .collect();

    Some(Family { name, categories })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// Name cell A2 from `row[0]`, categories from B2 onward.
    fn family_sheet(name: &str, row: &[CellValue]) -> Sheet {
        let mut sheet = Sheet::new(name);
        sheet.set(0, 0, CellValue::Text("Family".into()));
        let mut values = row.iter();
        if let Some(family) = values.next() {
            sheet.set(1, 0, family.clone());
        }
        for (col, value) in (1u32..).zip(values) {
            sheet.set(1, col, value.clone());
        }
        sheet
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn workbook(sheets: Vec<Sheet>) -> Workbook {
        Workbook { sheets }
    }

    #[test]
    fn builds_mapping_and_pairs() {
        let wb = workbook(vec![
            family_sheet("Dairy", &[text("Dairy"), text("Milk"), text("Cheese")]),
            family_sheet("Bakery", &[text("Bakery"), text("Bread")]),
        ]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert_eq!(index.family_names(), vec!["Dairy", "Bakery"]);
        assert_eq!(
            index.categories("Dairy").unwrap(),
            &["Milk".to_string(), "Cheese".to_string()]
        );
        assert_eq!(
            index.pairs(),
            vec![("Dairy", "Milk"), ("Dairy", "Cheese"), ("Bakery", "Bread")]
        );
    }

    #[test]
    fn blank_family_name_skips_sheet() {
        let wb = workbook(vec![
            family_sheet("Template", &[text("  "), text("Unused")]),
            family_sheet("Frozen", &[text("Frozen"), text("Ice")]),
        ]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert_eq!(index.family_names(), vec!["Frozen"]);
    }

    #[test]
    fn blank_categories_are_dropped_and_numbers_rendered() {
        let wb = workbook(vec![family_sheet(
            "Snacks",
            &[
                text("Snacks"),
                text("Chips"),
                text(""),
                CellValue::Number(100.0),
                CellValue::Error("#N/A".into()),
            ],
        )]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert_eq!(
            index.categories("Snacks").unwrap(),
            &["Chips".to_string(), "100".to_string()]
        );
    }

    #[test]
    fn family_without_categories_has_no_pairs() {
        let wb = workbook(vec![family_sheet("Empty", &[text("Empty")])]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert!(index.contains("Empty"));
        assert!(index.pairs().is_empty());
        assert!(index.categories("Empty").unwrap().is_empty());
    }

    #[test]
    fn later_sheet_replaces_categories_in_place() {
        let wb = workbook(vec![
            family_sheet("A", &[text("Dairy"), text("Milk")]),
            family_sheet("B", &[text("Bakery"), text("Bread")]),
            family_sheet("C", &[text("Dairy"), text("Yogurt"), text("Butter")]),
        ]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert_eq!(index.family_names(), vec!["Dairy", "Bakery"]);
        assert_eq!(
            index.categories("Dairy").unwrap(),
            &["Yogurt".to_string(), "Butter".to_string()]
        );
    }

    #[test]
    fn duplicate_categories_are_kept_within_a_family() {
        let wb = workbook(vec![family_sheet(
            "X",
            &[text("X"), text("Milk"), text("Milk")],
        )]);
        let index = FamilyIndex::from_workbook(&wb, FamilySheetLayout::default());
        assert_eq!(index.categories("X").unwrap().len(), 2);
    }

    #[test]
    fn all_categories_are_unique_in_first_seen_order() {
        let mut index = FamilyIndex::default();
        index.insert("A".into(), vec!["Milk".into(), "Eggs".into()]);
        index.insert("B".into(), vec!["Eggs".into(), "Bread".into()]);
        assert_eq!(index.all_categories(), vec!["Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn categories_share_the_name_row() {
        let mut sheet = Sheet::new("Dairy");
        sheet.set(1, 0, text("Dairy"));
        sheet.set(1, 1, text("Milk"));
        sheet.set(1, 2, text("Cheese"));
        sheet.set(2, 1, text("Not a category"));
        let family = read_family_sheet(&sheet, FamilySheetLayout::default()).unwrap();
        assert_eq!(family.name, "Dairy");
        assert_eq!(family.categories, vec!["Milk".to_string(), "Cheese".to_string()]);
    }

    #[test]
    fn categories_on_the_row_below_when_configured() {
        let mut sheet = Sheet::new("Dairy");
        sheet.set(1, 0, text("Dairy"));
        sheet.set(2, 1, text("Milk"));
        let layout = FamilySheetLayout {
            category_row: 2,
            ..FamilySheetLayout::default()
        };
        let family = read_family_sheet(&sheet, layout).unwrap();
        assert_eq!(family.categories, vec!["Milk".to_string()]);
        assert!(read_family_sheet(&sheet, FamilySheetLayout::default())
            .unwrap()
            .categories
            .is_empty());
    }

    #[test]
    fn custom_layout() {
        let mut sheet = Sheet::new("Custom");
        sheet.set(0, 2, text("Produce"));
        sheet.set(0, 3, text("Apples"));
        let layout = FamilySheetLayout {
            name_row: 0,
            name_col: 2,
            category_row: 0,
            first_category_col: 3,
        };
        let family = read_family_sheet(&sheet, layout).unwrap();
        assert_eq!(family.name, "Produce");
        assert_eq!(family.categories, vec!["Apples".to_string()]);
    }
}
