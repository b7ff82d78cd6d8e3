//! Canvas 2D backend for the shelf grid.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::colors::palette;
use super::scene::{Polygon, Scene, TextItem};
use super::text::TextMeasure;
use crate::error::Result;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    /// Create a new Canvas renderer from an HtmlCanvasElement
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let width = canvas.width();
        let height = canvas.height();

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Clear the canvas and draw `scene`.
    pub fn render(&self, scene: &Scene) -> Result<()> {
        self.clear();
        for polygon in &scene.polygons {
            self.draw_polygon(polygon);
        }
        for text in &scene.texts {
            self.draw_text(text)?;
        }
        if let Some(rect) = &scene.drag_rect {
            let dash = js_sys::Array::of2(&JsValue::from_f64(2.0), &JsValue::from_f64(2.0));
            self.ctx
                .set_line_dash(&dash)
                .map_err(|_| "Failed to set line dash")?;
            self.ctx.set_stroke_style_str(palette::DRAG_RECT);
            self.ctx.set_line_width(1.0);
            self.ctx.stroke_rect(rect.x1, rect.y1, rect.width(), rect.height());
            self.ctx
                .set_line_dash(&js_sys::Array::new())
                .map_err(|_| "Failed to reset line dash")?;
        }
        Ok(())
    }

    pub fn clear(&self) {
        self.ctx.set_fill_style_str(palette::WHITE);
        self.ctx
            .fill_rect(0.0, 0.0, f64::from(self.width), f64::from(self.height));
    }

    fn draw_polygon(&self, polygon: &Polygon) {
        let [first, rest @ ..] = &polygon.points;
        self.ctx.begin_path();
        self.ctx.move_to(first.0, first.1);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(polygon.fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(palette::OUTLINE);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke();
    }

    fn draw_text(&self, text: &TextItem) -> Result<()> {
        self.ctx.set_font(&font_spec(text.font_px, text.bold));
        self.ctx.set_fill_style_str(text.color);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx
            .fill_text(&text.text, text.x, text.y)
            .map_err(|_| "Failed to draw text")?;
        Ok(())
    }
}

impl TextMeasure for CanvasRenderer {
    fn measure(&self, text: &str, font_px: f64) -> f64 {
        self.ctx.set_font(&font_spec(font_px, true));
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }
}

fn font_spec(font_px: f64, bold: bool) -> String {
    let weight = if bold { "bold " } else { "" };
    format!("{weight}{font_px}px {FONT_FAMILY}")
}
