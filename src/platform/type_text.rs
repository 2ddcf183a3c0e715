//! Typewriter mount: drives a `Typewriter` with `setTimeout` and mirrors it
//! into the DOM
//!
//! Markup produced inside the host element:
//! `<span class="text-type__content">…</span><span class="text-type__cursor">|</span>`

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use super::document;
use super::guards::{AnimationLoop, IntersectionWatch, Timeout};
use crate::settings::TypewriterSettings;
use crate::typewriter::{CursorBlink, SentenceComplete, Typewriter, blink_opacity};

const CURSOR_HIDDEN_CLASS: &str = "text-type__cursor--hidden";

struct TypeTextHost {
    typewriter: Typewriter,
    content: HtmlElement,
    cursor: Option<HtmlElement>,
    timer: Option<Timeout>,
    /// Typewriter generation the current timer was scheduled for
    timer_generation: u64,
    on_complete: Option<js_sys::Function>,
    self_ref: Weak<RefCell<TypeTextHost>>,
}

impl TypeTextHost {
    fn render(&self) {
        let tw = &self.typewriter;
        self.content.set_text_content(Some(tw.displayed()));
        let style = self.content.style();
        let _ = match tw.color() {
            Some(color) => style.set_property("color", color),
            None => style.remove_property("color").map(|_| ()),
        };
        if let Some(cursor) = &self.cursor {
            let _ = cursor
                .class_list()
                .toggle_with_force(CURSOR_HIDDEN_CLASS, tw.cursor_hidden());
        }
    }

    /// Make the JS timer match the typewriter's pending step
    fn sync_timer(&mut self) {
        let generation = self.typewriter.generation();
        if generation == self.timer_generation {
            return;
        }
        self.timer_generation = generation;
        self.timer = None;

        let Some(pending) = self.typewriter.pending() else {
            return;
        };
        let weak = self.self_ref.clone();
        match Timeout::new(pending.delay_ms, move || fire(weak)) {
            Ok(timer) => self.timer = Some(timer),
            Err(e) => log::warn!("Could not schedule typewriter step: {:?}", e),
        }
    }

    /// Render, reschedule and collect finished sentences after a state change
    fn after_change(&mut self) -> (Vec<SentenceComplete>, Option<js_sys::Function>) {
        self.render();
        self.sync_timer();
        (self.typewriter.drain_completions(), self.on_complete.clone())
    }
}

/// Timer callback. Completion callbacks run after the host borrow is released
/// so they may call back into the handle.
fn fire(host: Weak<RefCell<TypeTextHost>>) {
    let Some(host) = host.upgrade() else { return };
    let (done, callback) = {
        let mut h = host.borrow_mut();
        h.timer = None;
        h.typewriter.advance();
        h.after_change()
    };
    notify(done, callback);
}

fn notify(done: Vec<SentenceComplete>, callback: Option<js_sys::Function>) {
    let Some(callback) = callback else { return };
    for SentenceComplete { sentence, index } in done {
        if let Err(e) = callback.call2(
            &JsValue::NULL,
            &JsValue::from_str(&sentence),
            &JsValue::from_f64(index as f64),
        ) {
            log::warn!("onSentenceComplete threw: {:?}", e);
        }
    }
}

/// Imperative handle for a mounted typewriter
#[wasm_bindgen]
pub struct TypeText {
    host: Rc<RefCell<TypeTextHost>>,
    _visibility: Option<IntersectionWatch>,
    _blink: Option<AnimationLoop>,
}

#[wasm_bindgen]
impl TypeText {
    /// Mount on an element, reading options from its `data-type-text`
    #[wasm_bindgen(js_name = mountTypeText)]
    pub fn mount_js(element: Element) -> Result<TypeText, JsValue> {
        let settings = crate::settings::load_from(
            &element,
            TypewriterSettings::ATTRIBUTE,
            TypewriterSettings::from_json,
        );
        Self::mount(element, settings)
    }

    pub fn start(&self) {
        self.update(Typewriter::start);
    }

    pub fn stop(&self) {
        self.update(Typewriter::stop);
    }

    /// Stop and clear back to the first sentence
    pub fn reset(&self) {
        self.update(Typewriter::reset);
    }

    /// Register `fn(sentence, index)` called after each finished sentence
    #[wasm_bindgen(js_name = onSentenceComplete)]
    pub fn on_sentence_complete(&self, callback: js_sys::Function) {
        self.host.borrow_mut().on_complete = Some(callback);
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.host.borrow().typewriter.displayed().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.host.borrow().typewriter.is_running()
    }
}

impl TypeText {
    pub fn mount(element: Element, settings: TypewriterSettings) -> Result<Self, JsValue> {
        let doc = document()?;

        let classes = element.class_list();
        classes.add_1("text-type")?;
        for name in settings.class_name.split_whitespace() {
            classes.add_1(name)?;
        }
        if let Some(blink) = settings.cursor_blink_mode.host_class() {
            classes.add_1(blink)?;
        }
        element.set_attribute("aria-live", "polite")?;
        element.set_text_content(None);

        let content: HtmlElement = doc.create_element("span")?.dyn_into()?;
        content.set_class_name("text-type__content");
        element.append_child(&content)?;

        let cursor = if settings.show_cursor {
            let cursor: HtmlElement = doc.create_element("span")?.dyn_into()?;
            cursor.set_class_name("text-type__cursor");
            for name in settings.cursor_class_name.split_whitespace() {
                cursor.class_list().add_1(name)?;
            }
            cursor.set_text_content(Some(&settings.cursor_character));
            element.append_child(&cursor)?;
            Some(cursor)
        } else {
            None
        };

        let blink = match (&cursor, settings.cursor_blink_mode) {
            (Some(cursor), CursorBlink::Gsap) => Some(start_blink(cursor.clone(), settings.cursor_blink_duration)?),
            _ => None,
        };

        let gated = settings.start_on_visible;
        let seed = js_sys::Date::now() as u64;
        let host = Rc::new_cyclic(|weak| {
            RefCell::new(TypeTextHost {
                typewriter: Typewriter::new(settings, seed),
                content,
                cursor,
                timer: None,
                timer_generation: 0,
                on_complete: None,
                self_ref: weak.clone(),
            })
        });
        let (done, callback) = host.borrow_mut().after_change();
        notify(done, callback);

        let visibility = if gated {
            let weak = Rc::downgrade(&host);
            Some(IntersectionWatch::observe(&element, move |intersecting| {
                let Some(host) = weak.upgrade() else {
                    return false;
                };
                let (keep, done, callback) = {
                    let mut h = host.borrow_mut();
                    let keep = h.typewriter.on_visibility(intersecting);
                    let (done, callback) = h.after_change();
                    (keep, done, callback)
                };
                notify(done, callback);
                keep
            })?)
        } else {
            None
        };

        log::info!("Typewriter mounted");
        Ok(Self {
            host,
            _visibility: visibility,
            _blink: blink,
        })
    }

    fn update(&self, change: fn(&mut Typewriter)) {
        let (done, callback) = {
            let mut h = self.host.borrow_mut();
            change(&mut h.typewriter);
            h.after_change()
        };
        notify(done, callback);
    }
}

impl Drop for TypeText {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.typewriter.stop();
            host.timer = None;
        }
        log::info!("Typewriter unmounted");
    }
}

/// Tween the cursor opacity on the frame loop
fn start_blink(cursor: HtmlElement, duration_s: f64) -> Result<AnimationLoop, JsValue> {
    let mut start: Option<f64> = None;
    AnimationLoop::start(move |time| {
        let t0 = *start.get_or_insert(time);
        let opacity = blink_opacity((time - t0) / 1000.0, duration_s);
        let _ = cursor.style().set_property("opacity", &format!("{:.3}", opacity));
    })
}
