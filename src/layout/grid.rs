//! Shelf grid geometry: cell sizes, centring and scaling.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{CellRect, SelectionRect};
use crate::types::GridCell;

/// Fixed sizes of the grid at scale 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Reference surface the base cell size is computed against
    pub base_width: f64,
    pub base_height: f64,
    pub max_cell_width: f64,
    pub max_cell_height: f64,
    /// 2.5-D offset of the top and right faces
    pub depth: f64,
    /// Room left of the grid for level labels
    pub label_gutter_left: f64,
    /// Room above the grid for shelf labels
    pub label_gutter_top: f64,
    pub label_font_px: f64,
    pub text_font_px: f64,
    /// Scaled fonts never shrink below this
    pub min_font_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_width: 1000.0,
            base_height: 600.0,
            max_cell_width: 60.0,
            max_cell_height: 80.0,
            depth: 10.0,
            label_gutter_left: 50.0,
            label_gutter_top: 30.0,
            label_font_px: 10.0,
            text_font_px: 8.0,
            min_font_px: 6.0,
        }
    }
}

/// Scale state shared by every layout of one view.
///
/// The first layout fixes the cell aspect ratio; later layouts, whatever
/// their level and shelf counts, keep it.
#[derive(Debug, Clone)]
pub struct GridGeometry {
    config: GridConfig,
    surface_width: f64,
    surface_height: f64,
    scale: f64,
    aspect: Option<f64>,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridGeometry {
    /// Geometry for a surface of the base size (scale 1.0).
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            surface_width: config.base_width,
            surface_height: config.base_height,
            scale: 1.0,
            aspect: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Aspect ratio fixed by the first layout, if one has been computed.
    pub fn aspect(&self) -> Option<f64> {
        self.aspect
    }

    pub fn surface(&self) -> (f64, f64) {
        (self.surface_width, self.surface_height)
    }

    /// Track a new surface size; the scale is the smaller of the two axis ratios.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface_width = width.max(0.0);
        self.surface_height = height.max(0.0);
        self.scale = (self.surface_width / self.config.base_width)
            .min(self.surface_height / self.config.base_height);
        tracing::debug!(width, height, scale = self.scale, "grid surface resized");
    }

    /// Lay out a `max_level` × `max_shelf` grid centred on the surface.
    ///
    /// Counts of zero are treated as one so the base cell size stays finite.
    pub fn layout(&mut self, max_level: u32, max_shelf: u32) -> GridLayout {
        let cfg = self.config;
        let levels = f64::from(max_level.max(1));
        let shelves = f64::from(max_shelf.max(1));

        let base_w = (cfg.base_width / shelves).floor().min(cfg.max_cell_width);
        let base_h = (cfg.base_height / levels).floor().min(cfg.max_cell_height);
        let aspect = *self.aspect.get_or_insert(base_w / base_h);

        let scale = self.scale;
        let cell_width = base_w * scale;
        let cell_height = if aspect > 0.0 { cell_width / aspect } else { 0.0 };
        let depth = cfg.depth * scale;
        let gutter_left = cfg.label_gutter_left * scale;
        let gutter_top = cfg.label_gutter_top * scale;

        let total_width = shelves * cell_width + depth + gutter_left;
        let total_height = levels * cell_height + depth + gutter_top;
        let offset_x = ((self.surface_width - total_width) / 2.0).floor() + gutter_left;
        let offset_y = ((self.surface_height - total_height) / 2.0).floor() + gutter_top;

        GridLayout {
            max_level,
            max_shelf,
            cell_width,
            cell_height,
            depth,
            offset_x,
            offset_y,
            scale,
            label_font_px: scaled_font(cfg.label_font_px, scale, cfg.min_font_px),
            text_font_px: scaled_font(cfg.text_font_px, scale, cfg.min_font_px),
        }
    }
}

/// Whole pixels, as the label fonts are drawn.
fn scaled_font(base: f64, scale: f64, min: f64) -> f64 {
    (base * scale).floor().max(min)
}

/// Text placed at a point, centred on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Positions of every cell of one side's grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub max_level: u32,
    pub max_shelf: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub depth: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub label_font_px: f64,
    pub text_font_px: f64,
}

impl GridLayout {
    /// Front face of `cell`. Level 1 is the top row.
    pub fn cell_rect(&self, cell: GridCell) -> CellRect {
        let x1 = f64::from(cell.shelf.saturating_sub(1)) * self.cell_width + self.offset_x;
        let y1 = f64::from(cell.level.saturating_sub(1)) * self.cell_height + self.offset_y;
        CellRect {
            x1,
            y1,
            x2: x1 + self.cell_width,
            y2: y1 + self.cell_height,
        }
    }

    /// Every cell of the grid, level-major.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (1..=self.max_level)
            .flat_map(move |level| (1..=self.max_shelf).map(move |shelf| GridCell::new(level, shelf)))
    }

    /// Cells whose front face overlaps the selection rectangle.
    pub fn hit_test(&self, selection: &SelectionRect) -> BTreeSet<GridCell> {
        let rect = selection.rect();
        self.cells()
            .filter(|&cell| self.cell_rect(cell).overlaps(&rect))
            .collect()
    }

    /// `S1..Sn` centred above each shelf column.
    pub fn shelf_labels(&self) -> Vec<Label> {
        let y = self.offset_y - self.depth - 10.0 * self.scale;
        (1..=self.max_shelf)
            .map(|shelf| Label {
                text: format!("S{shelf}"),
                x: f64::from(shelf - 1) * self.cell_width + self.offset_x + self.cell_width / 2.0,
                y,
            })
            .collect()
    }

    /// `L1..Ln` left of each level row.
    pub fn level_labels(&self) -> Vec<Label> {
        let x = self.offset_x - self.depth - 30.0 * self.scale;
        (1..=self.max_level)
            .map(|level| Label {
                text: format!("L{level}"),
                x,
                y: f64::from(level - 1) * self.cell_height + self.offset_y + self.cell_height / 2.0,
            })
            .collect()
    }
}
