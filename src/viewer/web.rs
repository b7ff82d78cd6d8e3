//! Browser front end: the table editor and shelf grid on one canvas.

use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::ShelfView;
use crate::editor::{apply_edit, category_choices, family_choices, filter_choices, TableEdit};
use crate::export::ValidationHints;
use crate::family::{FamilyIndex, FamilySheetLayout};
use crate::layout::GridConfig;
use crate::parser;
use crate::render::CanvasRenderer;
use crate::store::AssignmentStore;
use crate::types::SideRef;

/// State shared with the mouse handlers.
pub(crate) struct SharedState {
    pub(crate) store: AssignmentStore,
    pub(crate) index: FamilyIndex,
    pub(crate) view: ShelfView,
    pub(crate) render_callback: Option<Function>,
    /// Outcome of the last apply, for the host page to show
    pub(crate) status: Option<String>,
    pub(crate) needs_render: bool,
}

/// Shelf assignment editor exported to JavaScript.
#[wasm_bindgen]
pub struct ShelfEditor {
    state: Rc<RefCell<SharedState>>,
    renderer: CanvasRenderer,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl ShelfEditor {
    /// Load the generated shelf table and the family workbook, and wire
    /// drag selection on `canvas`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        output_xlsx: &[u8],
        family_xlsx: &[u8],
    ) -> Result<ShelfEditor, JsValue> {
        console_error_panic_hook::set_once();

        let index = FamilyIndex::from_workbook(&parser::parse(family_xlsx)?, FamilySheetLayout::default());
        let store = AssignmentStore::load(&parser::parse(output_xlsx)?)?
            .with_hints(ValidationHints::from_index(&index));

        let renderer = CanvasRenderer::new(canvas.clone())?;
        let mut view = ShelfView::new(GridConfig::default());
        view.resize(
            &store,
            f64::from(renderer.width()),
            f64::from(renderer.height()),
        );
        if let Some(side) = store.first_side() {
            view.set_filter(&store, side);
        }

        let state = Rc::new(RefCell::new(SharedState {
            store,
            index,
            view,
            render_callback: None,
            status: None,
            needs_render: true,
        }));

        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down
        {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                Self::internal_mouse_down(&state, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move
        {
            let state = state.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                if event.buttons() == 0 {
                    Self::internal_mouse_leave(&state);
                } else {
                    Self::internal_mouse_move(&state, x, y);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse up
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_mouse_up(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse leave
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_mouse_leave(&state);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        Ok(ShelfEditor {
            state,
            renderer,
            closures,
        })
    }

    /// Called after any state change that needs a redraw.
    #[wasm_bindgen]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        if !s.needs_render {
            return Ok(());
        }
        let scene = s.view.scene(&s.store, &self.renderer);
        self.renderer.render(&scene)?;
        s.needs_render = false;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        s.view.resize(&s.store, f64::from(width), f64::from(height));
        s.needs_render = true;
    }

    #[wasm_bindgen]
    pub fn sections(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.borrow().store.sections())?)
    }

    #[wasm_bindgen]
    pub fn aisles(&self, section: &str) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state.borrow().store.aisles(section))?)
    }

    #[wasm_bindgen]
    pub fn sides(&self, section: &str, aisle: u32) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(
            &self.state.borrow().store.sides(section, aisle),
        )?)
    }

    #[wasm_bindgen]
    pub fn set_filter(&mut self, section: &str, aisle: u32, side: u32) {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        s.view.set_filter(&s.store, SideRef::new(section, aisle, side));
        s.needs_render = true;
    }

    /// Family dropdown values matching what the user typed so far.
    #[wasm_bindgen]
    pub fn family_choices(&self, typed: &str) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let choices = family_choices(&s.index);
        Ok(serde_wasm_bindgen::to_value(&filter_choices(&choices, typed))?)
    }

    /// Category dropdown values for the chosen family.
    #[wasm_bindgen]
    pub fn category_choices(&self, typed: &str) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let choices = category_choices(&s.index, s.view.family().unwrap_or_default());
        Ok(serde_wasm_bindgen::to_value(&filter_choices(&choices, typed))?)
    }

    #[wasm_bindgen]
    pub fn choose_family(&mut self, name: &str) {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        s.view.choose_family(name, &s.index);
    }

    #[wasm_bindgen]
    pub fn choose_category(&mut self, name: &str) {
        self.state.borrow_mut().view.choose_category(name);
    }

    /// Apply the current selection; returns the number of shelves updated.
    #[wasm_bindgen]
    pub fn apply(&mut self) -> Result<usize, JsValue> {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        let updated = s.view.apply(&mut s.store)?;
        s.needs_render = true;
        Ok(updated)
    }

    #[wasm_bindgen]
    pub fn clear_selection(&mut self) {
        let mut s = self.state.borrow_mut();
        s.view.clear_selection();
        s.needs_render = true;
    }

    /// Outcome of the last drag-apply, cleared on read.
    #[wasm_bindgen]
    pub fn take_status(&mut self) -> Option<String> {
        self.state.borrow_mut().status.take()
    }

    /// Edit the family cell of a table row; its category is cleared.
    #[wasm_bindgen]
    pub fn set_family(&mut self, row: usize, value: String) -> Result<(), JsValue> {
        self.edit(TableEdit::SetFamily { row, value })
    }

    #[wasm_bindgen]
    pub fn set_category(&mut self, row: usize, value: String) -> Result<(), JsValue> {
        self.edit(TableEdit::SetCategory { row, value })
    }

    /// All shelf records, in table order.
    #[wasm_bindgen]
    pub fn records(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.state.borrow().store.records())?)
    }

    /// The whole table as XLSX bytes, with dropdown hints.
    #[wasm_bindgen]
    pub fn save(&self) -> Result<Vec<u8>, JsValue> {
        Ok(self.state.borrow().store.to_xlsx()?)
    }
}

impl ShelfEditor {
    fn edit(&mut self, edit: TableEdit) -> Result<(), JsValue> {
        let mut guard = self.state.borrow_mut();
        let s = &mut *guard;
        apply_edit(&mut s.store, &edit)?;
        if let Some(side) = s.view.filter().cloned() {
            s.view.set_filter(&s.store, side);
        }
        s.needs_render = true;
        Ok(())
    }
}
