//! Rectangles used for drag selection and hit testing.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its two corners, `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CellRect {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Inclusive overlap: rectangles that only touch at an edge overlap.
    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// A drag gesture's rectangle: the press point and the current pointer.
///
/// The corners are kept as given; [`rect`](Self::rect) normalises them, so a
/// drag in any direction covers the same area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl SelectionRect {
    /// A zero-size rectangle at the press point.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            start: (x, y),
            end: (x, y),
        }
    }

    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    pub fn extend_to(&mut self, x: f64, y: f64) {
        self.end = (x, y);
    }

    pub fn rect(&self) -> CellRect {
        CellRect {
            x1: self.start.0.min(self.end.0),
            y1: self.start.1.min(self.end.1),
            x2: self.start.0.max(self.end.0),
            y2: self.start.1.max(self.end.1),
        }
    }

    pub fn overlaps(&self, cell: &CellRect) -> bool {
        self.rect().overlaps(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellRect {
        CellRect {
            x1: 10.0,
            y1: 10.0,
            x2: 20.0,
            y2: 20.0,
        }
    }

    #[test]
    fn normalises_reverse_drag() {
        let sel = SelectionRect::new((30.0, 40.0), (5.0, 1.0));
        assert_eq!(
            sel.rect(),
            CellRect {
                x1: 5.0,
                y1: 1.0,
                x2: 30.0,
                y2: 40.0
            }
        );
    }

    #[test]
    fn edge_contact_counts_as_overlap() {
        assert!(SelectionRect::new((20.0, 20.0), (25.0, 25.0)).overlaps(&cell()));
        assert!(SelectionRect::at(10.0, 15.0).overlaps(&cell()));
    }

    #[test]
    fn disjoint_rectangles_do_not_overlap() {
        assert!(!SelectionRect::new((21.0, 0.0), (30.0, 30.0)).overlaps(&cell()));
        assert!(!SelectionRect::new((0.0, 0.0), (30.0, 9.5)).overlaps(&cell()));
    }

    #[test]
    fn containment_overlaps() {
        assert!(SelectionRect::new((12.0, 12.0), (13.0, 13.0)).overlaps(&cell()));
        assert!(SelectionRect::new((0.0, 0.0), (100.0, 100.0)).overlaps(&cell()));
    }
}
