use serde::{Deserialize, Serialize};
use std::fmt;

/// One physical shelf slot plus its assigned labels.
///
/// The 5-tuple (section, aisle, side, level, shelf) is the identity and is
/// unique across a table; only `family` and `category` ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfRecord {
    pub section: String,
    pub aisle: u32,
    pub side: u32,
    pub level: u32,
    pub shelf: u32,
    pub family: String,
    pub category: String,
}

impl ShelfRecord {
    /// A record with empty labels.
    pub fn unassigned(section: &str, aisle: u32, side: u32, level: u32, shelf: u32) -> Self {
        Self {
            section: section.to_string(),
            aisle,
            side,
            level,
            shelf,
            family: String::new(),
            category: String::new(),
        }
    }

    pub fn coord(&self) -> ShelfCoord {
        ShelfCoord {
            section: self.section.clone(),
            aisle: self.aisle,
            side: self.side,
            level: self.level,
            shelf: self.shelf,
        }
    }

    pub fn grid_cell(&self) -> GridCell {
        GridCell {
            level: self.level,
            shelf: self.shelf,
        }
    }

    pub fn is_on(&self, side: &SideRef) -> bool {
        self.section == side.section && self.aisle == side.aisle && self.side == side.side
    }
}

/// Full identity of a shelf slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShelfCoord {
    pub section: String,
    pub aisle: u32,
    pub side: u32,
    pub level: u32,
    pub shelf: u32,
}

impl ShelfCoord {
    pub fn new(section: &str, aisle: u32, side: u32, level: u32, shelf: u32) -> Self {
        Self {
            section: section.to_string(),
            aisle,
            side,
            level,
            shelf,
        }
    }

    pub fn at(side: &SideRef, cell: GridCell) -> Self {
        Self {
            section: side.section.clone(),
            aisle: side.aisle,
            side: side.side,
            level: cell.level,
            shelf: cell.shelf,
        }
    }
}

impl fmt::Display for ShelfCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {}, {})",
            self.section, self.aisle, self.side, self.level, self.shelf
        )
    }
}

/// One shelf run: the (section, aisle, side) a grid view shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideRef {
    pub section: String,
    pub aisle: u32,
    pub side: u32,
}

impl SideRef {
    pub fn new(section: &str, aisle: u32, side: u32) -> Self {
        Self {
            section: section.to_string(),
            aisle,
            side,
        }
    }
}

/// A (level, shelf) position within one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub level: u32,
    pub shelf: u32,
}

impl GridCell {
    pub const fn new(level: u32, shelf: u32) -> Self {
        Self { level, shelf }
    }
}

/// One row of the shelf summary sheet.
///
/// Counts are signed: zero or negative counts are valid and expand to
/// nothing. `row` is the 1-based spreadsheet row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySummaryRow {
    pub row: u32,
    pub section: String,
    pub aisles: i64,
    pub sides: i64,
    pub levels: i64,
    pub shelves: i64,
}

impl FamilySummaryRow {
    pub fn new(section: &str, aisles: i64, sides: i64, levels: i64, shelves: i64) -> Self {
        Self {
            row: 0,
            section: section.to_string(),
            aisles,
            sides,
            levels,
            shelves,
        }
    }
}
