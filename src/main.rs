//! Portfolio FX entry point
//!
//! On the web, mounts every picture ball and typewriter found on the page.
//! Natively, runs a headless pass over the simulation and the typewriter.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;

    use portfolio_fx::platform::{self, Mounted};

    thread_local! {
        /// Page-lifetime components
        static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Portfolio FX starting...");

        let mounted = platform::document().and_then(|doc| platform::mount_all(&doc));
        match mounted {
            Ok(mounted) => MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted)),
            Err(e) => log::warn!("Nothing mounted: {:?}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portfolio FX (native) starting...");
    log::info!("The components need a browser - build for wasm32 and serve the page for the real thing");

    simulate_throw();
    type_sentence();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drop the ball, grab it, fling it, and report where it settles
#[cfg(not(target_arch = "wasm32"))]
fn simulate_throw() {
    use glam::DVec2;
    use portfolio_fx::sim::{BallSim, ContainerSize};

    let mut sim = BallSim::default();
    sim.resize(ContainerSize::new(1280.0, 720.0));

    let mut bounces = 0;
    for _ in 0..300 {
        if sim.frame().is_some_and(|c| c.any()) {
            bounces += 1;
        }
    }
    log::info!("after 300 frames: pos {:?}, {} contact frames", sim.ball().pos, bounces);

    // Grab at the center and drag right over ~50ms
    let grab = sim.ball().pos;
    sim.press(1, grab, 0.0);
    for step in 1..=3 {
        let t = step as f64 * 16.0;
        sim.drag_to(1, grab + DVec2::new(step as f64 * 12.0, -(step as f64) * 6.0), t);
        sim.frame();
    }
    sim.release(1);
    log::info!("thrown with velocity {:?}", sim.ball().vel);

    for _ in 0..300 {
        sim.frame();
    }
    let ball = sim.ball();
    log::info!("after 300 more frames: pos {:?}, vel {:?}", ball.pos, ball.vel);
    println!(
        "ball at ({:.1}, {:.1}) moving ({:.2}, {:.2}) after {} frames",
        ball.pos.x,
        ball.pos.y,
        ball.vel.x,
        ball.vel.y,
        sim.frames()
    );
}

/// Type a sentence against a virtual clock
#[cfg(not(target_arch = "wasm32"))]
fn type_sentence() {
    use portfolio_fx::settings::TypewriterSettings;
    use portfolio_fx::typewriter::Typewriter;

    let settings = TypewriterSettings {
        looping: false,
        ..TypewriterSettings::with_text(["Hello, I build things."])
    };
    let mut typewriter = Typewriter::new(settings, 7);

    let mut clock_ms = 0.0;
    while let Some(pending) = typewriter.pending() {
        clock_ms += pending.delay_ms;
        typewriter.advance();
    }
    for done in typewriter.drain_completions() {
        log::info!("sentence {} done: {:?}", done.index, done.sentence);
    }
    println!("typed {:?} in {:.0} ms", typewriter.displayed(), clock_ms);
}
