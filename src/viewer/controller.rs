//! Platform-independent state of the shelf grid view.
//!
//! The view never owns shelf records: every operation borrows the session's
//! [`AssignmentStore`], so the table editor and the grid always agree.

use std::collections::BTreeSet;

use crate::error::{Result, ShelfmapError};
use crate::family::FamilyIndex;
use crate::layout::{GridConfig, GridGeometry, GridLayout, SelectionRect};
use crate::render::{build_scene, CategoryPalette, Scene, SceneInput, TextMeasure};
use crate::store::AssignmentStore;
use crate::types::{GridCell, ShelfRecord, SideRef};

#[derive(Debug, Clone, Default)]
pub struct ShelfView {
    filter: Option<SideRef>,
    family: Option<String>,
    category: Option<String>,
    geometry: GridGeometry,
    layout: Option<GridLayout>,
    drag: Option<SelectionRect>,
    selected: BTreeSet<GridCell>,
    palette: CategoryPalette,
}

impl ShelfView {
    pub fn new(config: GridConfig) -> Self {
        Self {
            geometry: GridGeometry::new(config),
            ..Self::default()
        }
    }

    pub fn filter(&self) -> Option<&SideRef> {
        self.filter.as_ref()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Current layout; `None` while no filter is set or the side has no shelves.
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn selected(&self) -> &BTreeSet<GridCell> {
        &self.selected
    }

    pub fn palette(&self) -> &CategoryPalette {
        &self.palette
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Show `side`, rebuilding the layout and colors and clearing the selection.
    pub fn set_filter(&mut self, store: &AssignmentStore, side: SideRef) {
        tracing::debug!(section = %side.section, aisle = side.aisle, side = side.side, "filter changed");
        self.filter = Some(side);
        self.drag = None;
        self.selected.clear();
        self.relayout(store);
    }

    /// Pick a family and pre-select its first category, if it has one.
    pub fn choose_family(&mut self, name: &str, index: &FamilyIndex) {
        self.family = Some(name.to_string());
        self.category = index
            .categories(name)
            .and_then(|categories| categories.first())
            .cloned();
    }

    pub fn choose_category(&mut self, name: &str) {
        self.category = Some(name.to_string());
    }

    /// Track a new surface size and re-lay out the current side.
    pub fn resize(&mut self, store: &AssignmentStore, width: f64, height: f64) {
        self.geometry.resize(width, height);
        self.relayout(store);
    }

    /// Start a drag gesture; the previous selection is dropped.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag = Some(SelectionRect::at(x, y));
        self.selected.clear();
    }

    /// Replace the selection with the cells under the current rectangle.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.extend_to(x, y);
        self.selected = match &self.layout {
            Some(layout) => layout.hit_test(drag),
            None => BTreeSet::new(),
        };
    }

    /// End the gesture and apply a non-empty selection right away.
    ///
    /// Returns `Ok(None)` when nothing was selected or no gesture was active.
    ///
    /// # Errors
    /// Same as [`apply`](Self::apply); the selection is kept on error.
    pub fn pointer_up(&mut self, store: &mut AssignmentStore) -> Result<Option<usize>> {
        if self.drag.take().is_none() || self.selected.is_empty() {
            return Ok(None);
        }
        tracing::debug!(cells = self.selected.len(), "selection released");
        self.apply(store).map(Some)
    }

    /// Abandon a gesture whose release was not seen (pointer left the
    /// surface, or moved with no button held). Nothing is applied.
    pub fn pointer_cancel(&mut self) {
        if self.drag.is_some() {
            tracing::debug!(cells = self.selected.len(), "gesture cancelled");
        }
        self.clear_selection();
    }

    pub fn clear_selection(&mut self) {
        self.drag = None;
        self.selected.clear();
    }

    /// Assign the chosen family and category to the selected cells.
    ///
    /// On success the selection is cleared and the grid re-laid out so labels
    /// and colors reflect the new values. The store is only changed in
    /// memory; saving is left to the caller.
    ///
    /// # Errors
    /// `IncompleteChoice` without a filter, family or category,
    /// `EmptySelection` with nothing selected.
    pub fn apply(&mut self, store: &mut AssignmentStore) -> Result<usize> {
        let (Some(side), Some(family), Some(category)) =
            (self.filter.as_ref(), self.family.as_deref(), self.category.as_deref())
        else {
            return Err(ShelfmapError::IncompleteChoice);
        };
        if self.selected.is_empty() {
            return Err(ShelfmapError::EmptySelection);
        }

        let updated = store.assign(&self.selected, side, family, category);
        self.selected.clear();
        self.relayout(store);
        Ok(updated)
    }

    /// Describe the current frame.
    pub fn scene(&self, store: &AssignmentStore, measure: &dyn TextMeasure) -> Scene {
        let (Some(layout), Some(side)) = (self.layout.as_ref(), self.filter.as_ref()) else {
            return Scene::default();
        };
        let records: Vec<&ShelfRecord> = store.side_view(side).collect();
        build_scene(&SceneInput {
            layout,
            records: &records,
            selected: &self.selected,
            palette: &self.palette,
            drag: self.drag.as_ref(),
            measure,
        })
    }

    fn relayout(&mut self, store: &AssignmentStore) {
        let Some(side) = self.filter.as_ref() else {
            self.layout = None;
            self.palette = CategoryPalette::default();
            return;
        };

        let (max_level, max_shelf) = store
            .side_view(side)
            .fold((0, 0), |(l, s), r| (l.max(r.level), s.max(r.shelf)));
        self.palette = CategoryPalette::for_view(store.side_view(side));
        self.layout = if max_level == 0 || max_shelf == 0 {
            tracing::debug!("no shelves for filter; clearing grid");
            None
        } else {
            Some(self.geometry.layout(max_level, max_shelf))
        };
    }
}
