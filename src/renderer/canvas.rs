//! `Surface2d` over a browser canvas 2D context

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{BackingStore, Surface2d};
use crate::sim::ContainerSize;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Resize the backing store for a new container size and reapply the
    /// pixel ratio transform, so drawing stays in CSS pixels.
    ///
    /// Setting the canvas size resets the context state, which is why the
    /// transform and smoothing flags are applied here every time.
    pub fn configure(&self, size: ContainerSize, device_pixel_ratio: f64) -> BackingStore {
        let (store, dpr) = BackingStore::for_container(size, device_pixel_ratio);
        self.canvas.set_width(store.width);
        self.canvas.set_height(store.height);

        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::warn!("set_transform failed: {:?}", e);
        }
        self.ctx.set_image_smoothing_enabled(true);
        let _ = js_sys::Reflect::set(
            &self.ctx,
            &JsValue::from_str("imageSmoothingQuality"),
            &JsValue::from_str("high"),
        );

        log::info!(
            "canvas {}x{} @{}x -> {}x{}",
            size.width,
            size.height,
            dpr,
            store.width,
            store.height
        );
        store
    }
}

impl Surface2d for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64) {
        // Only fails for a negative radius
        let _ = self.ctx.arc(cx, cy, r, 0.0, TAU);
    }

    fn clip(&mut self) {
        self.ctx.clip();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, x: f64, y: f64, w: f64, h: f64) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
        {
            log::trace!("draw_image failed: {:?}", e);
        }
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke(&mut self, color: &str, line_width: f64) {
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke();
    }
}
