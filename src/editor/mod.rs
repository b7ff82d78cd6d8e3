//! Table editor support.
//!
//! Dropdown values for the Family and Category cells, type-ahead filtering,
//! and the edits the table view applies to the store.

pub(crate) mod mutation;

pub use mutation::{apply_edit, TableEdit};

use crate::family::{FamilyIndex, NO_CATEGORIES};

/// Family dropdown values, in index order.
pub fn family_choices(index: &FamilyIndex) -> Vec<String> {
    index.family_names().into_iter().map(String::from).collect()
}

/// Category dropdown values for `family`.
///
/// An unknown family or one without categories offers only the
/// "No Categories Available" placeholder.
pub fn category_choices(index: &FamilyIndex, family: &str) -> Vec<String> {
    match index.categories(family) {
        Some(categories) if !categories.is_empty() => categories.to_vec(),
        _ => vec![NO_CATEGORIES.to_string()],
    }
}

/// Choices starting with `typed`, ignoring case and surrounding whitespace.
///
/// Empty input gives back the full list.
pub fn filter_choices(choices: &[String], typed: &str) -> Vec<String> {
    let typed = typed.trim().to_lowercase();
    if typed.is_empty() {
        return choices.to_vec();
    }
    choices
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&typed))
        .cloned()
        .collect()
}
