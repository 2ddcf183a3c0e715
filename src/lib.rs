//! Portfolio FX - canvas picture ball and typewriter text for the portfolio site
//!
//! Core modules:
//! - `sim`: Ball simulation (physics, drag tracking, resize clamping)
//! - `typewriter`: Timed typing/deleting state machine
//! - `renderer`: Canvas 2D render pass for the ball
//! - `platform`: Browser bindings (listeners, observers, timers, mounts)
//! - `settings`: Component options parsed from data attributes

#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod typewriter;

pub use settings::{BallSettings, TypewriterSettings};
pub use sim::BallSim;
pub use typewriter::Typewriter;

/// Simulation and rendering constants
pub mod consts {
    /// Ball radius in CSS pixels
    pub const BALL_RADIUS: f64 = 100.0;
    /// Velocity kept (and reversed) on a wall hit
    pub const DAMPING: f64 = 0.85;
    /// Horizontal velocity kept on each floor contact
    pub const TRACTION: f64 = 0.9;
    /// Added to vertical velocity every frame
    pub const GRAVITY: f64 = 0.2;
    /// Distance between the container bottom and the floor line
    pub const FLOOR_OFFSET: f64 = 0.0;

    /// Lower bound on the drag sample interval (avoids divide by zero)
    pub const MIN_SAMPLE_MS: f64 = 1.0;
    /// Multiplier applied to drag speed when the ball is thrown
    pub const DEFAULT_THROW_FACTOR: f64 = 0.8;

    /// Starting ball center
    pub const START_POS: (f64, f64) = (100.0, 100.0);
    /// Starting ball velocity
    pub const START_VEL: (f64, f64) = (10.0, -10.0);

    /// Fill used while the picture is missing
    pub const FALLBACK_FILL: &str = "#2ed851";
    /// Outline drawn over the ball
    pub const OUTLINE_STROKE: &str = "rgba(255,255,255,.8)";
    pub const OUTLINE_WIDTH: f64 = 2.0;
}

/// Clamp `value` into `[lo, hi]`, preferring `lo` when the range is empty.
///
/// `f64::clamp` panics when `lo > hi`, which happens whenever the container
/// is narrower than the ball.
#[inline]
pub fn clamp_lo(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}
