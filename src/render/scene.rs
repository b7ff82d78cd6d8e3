//! Backend-independent description of one frame of the shelf grid.

use std::collections::{BTreeSet, HashMap};

use super::colors::{palette, CssColor};
use super::palette::CategoryPalette;
use super::text::{wrap_text, TextMeasure};
use crate::layout::{CellRect, GridLayout, Label, SelectionRect};
use crate::types::{GridCell, ShelfRecord};

/// Horizontal padding subtracted from the cell width before wrapping.
const TEXT_PADDING: f64 = 10.0;

/// Line height as a multiple of the font size.
const LINE_SPACING: f64 = 1.2;

/// Which face of a shelf a polygon draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub cell: GridCell,
    pub face: Face,
    pub points: [(f64, f64); 4],
    pub fill: CssColor,
}

/// A line of text centred on (x, y).
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_px: f64,
    pub bold: bool,
    pub color: CssColor,
}

/// Everything a backend draws for one frame, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub polygons: Vec<Polygon>,
    pub texts: Vec<TextItem>,
    /// Dashed outline of an active drag
    pub drag_rect: Option<CellRect>,
}

impl Scene {
    /// Front faces drawn with the selection highlight.
    pub fn highlighted(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.polygons
            .iter()
            .filter(|p| p.face == Face::Front && p.fill == palette::FRONT_FACE_SELECTED)
            .map(|p| p.cell)
    }
}

/// Inputs for one frame.
pub struct SceneInput<'a> {
    pub layout: &'a GridLayout,
    /// Records of the filtered side
    pub records: &'a [&'a ShelfRecord],
    pub selected: &'a BTreeSet<GridCell>,
    pub palette: &'a CategoryPalette,
    pub drag: Option<&'a SelectionRect>,
    pub measure: &'a dyn TextMeasure,
}

pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let layout = input.layout;
    let mut scene = Scene::default();

    for label in layout.shelf_labels().into_iter().chain(layout.level_labels()) {
        scene.texts.push(label_text(label, layout.label_font_px));
    }

    let categories: HashMap<GridCell, &str> = input
        .records
        .iter()
        .map(|r| (r.grid_cell(), r.category.as_str()))
        .filter(|(_, c)| !c.trim().is_empty())
        .collect();

    for cell in layout.cells() {
        let rect = layout.cell_rect(cell);
        push_faces(&mut scene, cell, &rect, layout.depth, input.selected.contains(&cell));
        if let Some(category) = categories.get(&cell) {
            push_category_text(&mut scene, input, &rect, category);
        }
    }

    scene.drag_rect = input.drag.map(SelectionRect::rect);
    scene
}

fn label_text(label: Label, font_px: f64) -> TextItem {
    TextItem {
        text: label.text,
        x: label.x,
        y: label.y,
        font_px,
        bold: false,
        color: palette::LABEL_TEXT,
    }
}

/// Front face slanted right by the depth, with top and right edges behind it.
fn push_faces(scene: &mut Scene, cell: GridCell, r: &CellRect, depth: f64, selected: bool) {
    let (x1, y1, x2, y2) = (r.x1, r.y1, r.x2, r.y2);
    let front = if selected {
        palette::FRONT_FACE_SELECTED
    } else {
        palette::FRONT_FACE
    };

    scene.polygons.push(Polygon {
        cell,
        face: Face::Front,
        points: [(x1 + depth, y1), (x2 + depth, y1), (x2, y2), (x1, y2)],
        fill: front,
    });
    scene.polygons.push(Polygon {
        cell,
        face: Face::Top,
        points: [(x1 + depth, y1), (x2 + depth, y1), (x2, y1 - depth), (x1, y1 - depth)],
        fill: palette::TOP_FACE,
    });
    scene.polygons.push(Polygon {
        cell,
        face: Face::Right,
        points: [(x2 + depth, y1), (x2, y1 - depth), (x2 - depth, y2 - depth), (x2, y2)],
        fill: palette::RIGHT_FACE,
    });
}

#[allow(clippy::cast_precision_loss)]
fn push_category_text(scene: &mut Scene, input: &SceneInput<'_>, rect: &CellRect, category: &str) {
    let layout = input.layout;
    let font_px = layout.text_font_px;
    let lines = wrap_text(category, rect.width() - TEXT_PADDING, font_px, input.measure);
    let spacing = font_px * LINE_SPACING;
    let (cx, cy) = rect.center();
    let start_y = cy - lines.len() as f64 * spacing / 2.0 + spacing / 2.0;
    let color = input.palette.color(category);

    for (i, line) in lines.into_iter().enumerate() {
        scene.texts.push(TextItem {
            text: line,
            x: cx + layout.depth / 2.0,
            y: start_y + i as f64 * spacing,
            font_px,
            bold: true,
            color,
        });
    }
}
