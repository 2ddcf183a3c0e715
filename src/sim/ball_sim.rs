//! The picture ball simulation: one ball, one drag tracker, one container
//!
//! Pure and platform free. The browser layer feeds it sizes, pointer samples
//! and frame ticks, then draws `ball()`.

use glam::DVec2;

use super::collision::Contacts;
use super::pointer::{PointerTracker, PressOutcome};
use super::state::{BallState, ContainerSize};
use super::tick::{PhysicsParams, tick};

#[derive(Debug, Clone)]
pub struct BallSim {
    ball: BallState,
    tracker: PointerTracker,
    size: ContainerSize,
    params: PhysicsParams,
    frames: u64,
}

impl Default for BallSim {
    fn default() -> Self {
        Self::new(PhysicsParams::default(), PointerTracker::default())
    }
}

impl BallSim {
    pub fn new(params: PhysicsParams, mut tracker: PointerTracker) -> Self {
        tracker.radius = params.radius;
        Self {
            ball: BallState::default(),
            tracker,
            size: ContainerSize::default(),
            params,
            frames: 0,
        }
    }

    pub fn with_throw_factor(throw_factor: f64) -> Self {
        Self::new(PhysicsParams::default(), PointerTracker::new(throw_factor))
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn size(&self) -> ContainerSize {
        self.size
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Frames advanced so far (dragged frames included)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Replace the ball outright; the new center is clamped into the container
    pub fn place(&mut self, ball: BallState) {
        self.ball = ball;
        if !self.size.is_empty() {
            self.ball.reclamp(self.size, self.params.radius);
        }
    }

    /// Container box changed. Returns false if the size is unchanged.
    pub fn resize(&mut self, size: ContainerSize) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        if !size.is_empty() {
            self.ball.reclamp(size, self.params.radius);
        }
        log::debug!("container resized to {}x{}", size.width, size.height);
        true
    }

    /// Run one display frame.
    ///
    /// Returns `None` while the container has no size yet (nothing should be
    /// drawn). While dragging, the ball is left where the pointer put it.
    pub fn frame(&mut self) -> Option<Contacts> {
        if self.size.is_empty() {
            return None;
        }
        self.frames += 1;
        if self.tracker.is_dragging() {
            return Some(Contacts::default());
        }
        Some(tick(&mut self.ball, self.size, &self.params))
    }

    pub fn press(&mut self, pointer_id: i32, pointer: DVec2, now_ms: f64) -> PressOutcome {
        let outcome = self.tracker.on_press(&mut self.ball, pointer_id, pointer, now_ms);
        if outcome == PressOutcome::Grabbed {
            log::debug!("ball grabbed at {:?}", pointer);
        }
        outcome
    }

    pub fn drag_to(&mut self, pointer_id: i32, pointer: DVec2, now_ms: f64) -> bool {
        self.tracker
            .on_move(&mut self.ball, self.size, pointer_id, pointer, now_ms)
    }

    pub fn release(&mut self, pointer_id: i32) -> bool {
        let released = self.tracker.on_release(pointer_id);
        if released {
            log::debug!("ball thrown with velocity {:?}", self.ball.vel);
        }
        released
    }

    /// Abandon a drag without a release event
    pub fn cancel_drag(&mut self) -> bool {
        self.tracker.cancel()
    }
}
