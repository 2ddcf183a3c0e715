//! Picture ball mount: wires a canvas to `BallSim` and the render pass
//!
//! Lifetime is the `PictureBall` value. Dropping it (or calling `free()` from
//! JS) cancels the frame loop, disconnects the resize observer, removes the
//! pointer listeners and restores text selection.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlCanvasElement, HtmlImageElement, PointerEvent};

use super::guards::{AnimationLoop, Listener, ResizeWatch};
use super::{device_pixel_ratio, now_ms, window};
use crate::renderer::canvas::CanvasSurface;
use crate::renderer::render_ball;
use crate::settings::BallSettings;
use crate::sim::{BallSim, ContainerSize, PressOutcome};

struct BallHost {
    sim: BallSim,
    surface: CanvasSurface,
    /// Set once the picture has decoded
    image: Option<HtmlImageElement>,
}

impl BallHost {
    fn resize(&mut self, size: ContainerSize) {
        if self.sim.resize(size) && !size.is_empty() {
            self.surface.configure(size, device_pixel_ratio());
        }
    }

    fn frame(&mut self) {
        if self.sim.frame().is_some() {
            render_ball(
                &mut self.surface,
                self.sim.size(),
                self.sim.ball(),
                self.sim.radius(),
                self.image.as_ref(),
            );
        }
    }
}

#[wasm_bindgen]
pub struct PictureBall {
    host: Rc<RefCell<BallHost>>,
    canvas: HtmlCanvasElement,
    _frames: AnimationLoop,
    _resize: ResizeWatch,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PictureBall {
    /// Mount on a canvas, reading options from its `data-picture-ball`
    #[wasm_bindgen(js_name = mountPictureBall)]
    pub fn mount_js(canvas: HtmlCanvasElement) -> Result<PictureBall, JsValue> {
        let settings =
            crate::settings::load_from(&canvas, BallSettings::ATTRIBUTE, BallSettings::from_json);
        Self::mount(canvas, settings)
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.host.borrow().sim.is_dragging()
    }
}

impl PictureBall {
    pub fn mount(canvas: HtmlCanvasElement, settings: BallSettings) -> Result<Self, JsValue> {
        let container = find_container(&canvas, &settings.container_selector)
            .ok_or_else(|| JsValue::from_str("canvas has no container"))?;

        canvas.set_attribute("style", &settings.canvas_style())?;
        if let Some(class) = &settings.class_name {
            for name in class.split_whitespace() {
                canvas.class_list().add_1(name)?;
            }
        }
        set_cursor(&canvas, "grab");

        let host = Rc::new(RefCell::new(BallHost {
            sim: BallSim::with_throw_factor(settings.throw_factor),
            surface: CanvasSurface::new(canvas.clone())?,
            image: None,
        }));
        host.borrow_mut().resize(measure(&container));

        let resize = {
            let host = Rc::downgrade(&host);
            let watched = container.clone();
            ResizeWatch::observe(&container, move || {
                if let Some(host) = host.upgrade() {
                    host.borrow_mut().resize(measure(&watched));
                }
            })?
        };

        let listeners = pointer_listeners(&canvas, &container, &host)?;

        let frames = {
            let host = Rc::downgrade(&host);
            AnimationLoop::start(move |_time| {
                if let Some(host) = host.upgrade() {
                    host.borrow_mut().frame();
                }
            })?
        };

        load_image(&settings.image_src, Rc::downgrade(&host))?;

        log::info!("Picture ball mounted ({})", settings.image_src);
        Ok(Self {
            host,
            canvas,
            _frames: frames,
            _resize: resize,
            _listeners: listeners,
        })
    }
}

impl Drop for PictureBall {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.sim.cancel_drag();
        }
        set_cursor(&self.canvas, "");
        set_body_user_select("");
        log::info!("Picture ball unmounted");
    }
}

/// `closest(selector)`, falling back to the parent element
fn find_container(canvas: &HtmlCanvasElement, selector: &str) -> Option<Element> {
    let closest = match canvas.closest(selector) {
        Ok(found) => found,
        Err(e) => {
            log::warn!("Bad container selector {:?}: {:?}", selector, e);
            None
        }
    };
    closest.or_else(|| canvas.parent_element())
}

fn measure(container: &Element) -> ContainerSize {
    let rect = container.get_bounding_client_rect();
    ContainerSize::new(rect.width(), rect.height())
}

/// Pointer position relative to the container's box
fn pointer_in(container: &Element, event: &PointerEvent) -> DVec2 {
    let rect = container.get_bounding_client_rect();
    DVec2::new(
        event.client_x() as f64 - rect.left(),
        event.client_y() as f64 - rect.top(),
    )
}

fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) {
    let _ = canvas.style().set_property("cursor", cursor);
}

fn set_body_user_select(value: &str) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.style().set_property("user-select", value);
    }
}

fn pointer_listeners(
    canvas: &HtmlCanvasElement,
    container: &Element,
    host: &Rc<RefCell<BallHost>>,
) -> Result<Vec<Listener>, JsValue> {
    let window = window()?;
    let mut listeners = Vec::with_capacity(4);

    // Press on the canvas
    {
        let host = Rc::downgrade(host);
        let canvas_clone = canvas.clone();
        let container = container.clone();
        listeners.push(Listener::new(canvas, "pointerdown", move |event: PointerEvent| {
            let Some(host) = host.upgrade() else { return };
            let pos = pointer_in(&container, &event);
            let outcome = host
                .borrow_mut()
                .sim
                .press(event.pointer_id(), pos, now_ms());
            if outcome == PressOutcome::Grabbed {
                event.prevent_default();
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                set_cursor(&canvas_clone, "grabbing");
                set_body_user_select("none");
            }
        })?);
    }

    // Moves anywhere in the window while dragging
    {
        let host = Rc::downgrade(host);
        let container = container.clone();
        listeners.push(Listener::new(&window, "pointermove", move |event: PointerEvent| {
            let Some(host) = host.upgrade() else { return };
            let pos = pointer_in(&container, &event);
            host.borrow_mut()
                .sim
                .drag_to(event.pointer_id(), pos, now_ms());
        })?);
    }

    // Release or cancel ends the drag
    for name in ["pointerup", "pointercancel"] {
        let host = Rc::downgrade(host);
        let canvas_clone = canvas.clone();
        listeners.push(Listener::new(&window, name, move |event: PointerEvent| {
            let Some(host) = host.upgrade() else { return };
            if host.borrow_mut().sim.release(event.pointer_id()) {
                let _ = canvas_clone.release_pointer_capture(event.pointer_id());
                set_cursor(&canvas_clone, "grab");
                set_body_user_select("");
            }
        })?);
    }

    Ok(listeners)
}

/// Decode the picture in the background. Failure keeps the fallback fill.
fn load_image(src: &str, host: Weak<RefCell<BallHost>>) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    let src = src.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(image.decode()).await {
            Ok(_) => {
                if let Some(host) = host.upgrade() {
                    host.borrow_mut().image = Some(image);
                    log::info!("Picture loaded: {}", src);
                }
            }
            Err(e) => log::warn!("Picture {} failed to load, using fallback fill: {:?}", src, e),
        }
    });
    Ok(())
}
