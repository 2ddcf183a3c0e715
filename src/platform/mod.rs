//! Browser platform layer
//!
//! Everything that touches `web-sys` lives here:
//! - RAII guards for listeners, frame callbacks, timers and observers
//! - The picture ball and typewriter mounts
//! - Page-wide discovery of elements carrying option attributes

pub mod guards;
pub mod picture_ball;
pub mod type_text;

pub use guards::{AnimationLoop, IntersectionWatch, Listener, ResizeWatch, Timeout};
pub use picture_ball::PictureBall;
pub use type_text::TypeText;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, Window};

use crate::settings::{BallSettings, TypewriterSettings, load_from};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// High resolution timestamp in milliseconds
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// Components mounted on page load. Dropping this tears them all down.
#[derive(Default)]
pub struct Mounted {
    pub balls: Vec<PictureBall>,
    pub texts: Vec<TypeText>,
}

/// Mount every `canvas[data-picture-ball]` and `[data-type-text]` element.
///
/// An element that fails to mount is logged and skipped.
pub fn mount_all(document: &Document) -> Result<Mounted, JsValue> {
    let mut mounted = Mounted::default();

    for element in query_all(document, &format!("canvas[{}]", BallSettings::ATTRIBUTE))? {
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            continue;
        };
        let settings = load_from(&canvas, BallSettings::ATTRIBUTE, BallSettings::from_json);
        match PictureBall::mount(canvas, settings) {
            Ok(ball) => mounted.balls.push(ball),
            Err(e) => log::warn!("Picture ball not mounted: {:?}", e),
        }
    }

    for element in query_all(document, &format!("[{}]", TypewriterSettings::ATTRIBUTE))? {
        let settings = load_from(&element, TypewriterSettings::ATTRIBUTE, TypewriterSettings::from_json);
        match TypeText::mount(element, settings) {
            Ok(text) => mounted.texts.push(text),
            Err(e) => log::warn!("Typewriter not mounted: {:?}", e),
        }
    }

    log::info!(
        "Mounted {} picture ball(s), {} typewriter(s)",
        mounted.balls.len(),
        mounted.texts.len()
    );
    Ok(mounted)
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
