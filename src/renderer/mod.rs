//! Canvas 2D rendering module
//!
//! The render pass is written against `Surface2d` so it can be recorded in
//! tests; the browser implementation lives in `canvas`.

pub mod ball;
#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use ball::render_ball;

use crate::sim::ContainerSize;

/// The subset of the 2D context API the render pass needs
pub trait Surface2d {
    /// Image handle accepted by `draw_image`
    type Image;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn begin_path(&mut self);
    fn circle(&mut self, cx: f64, cy: f64, r: f64);
    fn clip(&mut self);
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64);
    fn stroke(&mut self, color: &str, line_width: f64);
}

/// Canvas backing store in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackingStore {
    pub width: u32,
    pub height: u32,
}

impl BackingStore {
    /// Size the backing store for a container at the given pixel ratio.
    ///
    /// Ratios below 1 are raised to 1; fractional ratios are kept.
    pub fn for_container(size: ContainerSize, device_pixel_ratio: f64) -> (Self, f64) {
        let dpr = effective_dpr(device_pixel_ratio);
        let store = Self {
            width: (size.width * dpr).floor().max(0.0) as u32,
            height: (size.height * dpr).floor().max(0.0) as u32,
        };
        (store, dpr)
    }
}

/// `max(1, ratio)`, treating a missing or broken ratio as 1
pub fn effective_dpr(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() {
        device_pixel_ratio.max(1.0)
    } else {
        1.0
    }
}
