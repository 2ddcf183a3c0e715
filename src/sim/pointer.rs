//! Drag tracking for grabbing and throwing the ball
//!
//! The tracker owns the drag transients. It writes the ball's position and
//! velocity while a drag is live; the frame loop only reads `is_dragging()`.

use glam::DVec2;

use super::state::{BallState, ContainerSize};
use crate::consts::*;

/// One press-to-release gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer that owns the gesture
    pub pointer_id: i32,
    /// Pointer position minus ball center at grab time
    pub grab_offset: DVec2,
    pub last_pointer: DVec2,
    pub last_sample_ms: f64,
}

/// Result of a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Pointer was outside the ball
    Missed,
    /// A drag began; the host should capture the pointer
    Grabbed,
    /// A drag is already running
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    drag: Option<DragState>,
    /// Scales drag speed (px/s) into the thrown per-frame velocity
    pub throw_factor: f64,
    pub radius: f64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THROW_FACTOR)
    }
}

impl PointerTracker {
    pub fn new(throw_factor: f64) -> Self {
        Self {
            drag: None,
            throw_factor,
            radius: BALL_RADIUS,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Start a drag if the press lands on the ball.
    pub fn on_press(
        &mut self,
        ball: &mut BallState,
        pointer_id: i32,
        pointer: DVec2,
        now_ms: f64,
    ) -> PressOutcome {
        if self.drag.is_some() {
            return PressOutcome::Ignored;
        }
        if ball.distance_sq(pointer) > self.radius * self.radius {
            return PressOutcome::Missed;
        }

        ball.vel = DVec2::ZERO;
        self.drag = Some(DragState {
            pointer_id,
            grab_offset: pointer - ball.pos,
            last_pointer: pointer,
            last_sample_ms: now_ms,
        });
        PressOutcome::Grabbed
    }

    /// Follow the pointer. Returns false when the event does not belong to a
    /// live drag.
    pub fn on_move(
        &mut self,
        ball: &mut BallState,
        size: ContainerSize,
        pointer_id: i32,
        pointer: DVec2,
        now_ms: f64,
    ) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if drag.pointer_id != pointer_id {
            return false;
        }

        let dt = (now_ms - drag.last_sample_ms).max(MIN_SAMPLE_MS) / 1000.0;
        ball.pos = size.clamp_center(pointer - drag.grab_offset, self.radius);
        ball.vel = (pointer - drag.last_pointer) / dt * self.throw_factor;

        drag.last_pointer = pointer;
        drag.last_sample_ms = now_ms;
        true
    }

    /// End the drag, leaving the last sampled velocity on the ball. Returns
    /// false when there was nothing to release.
    pub fn on_release(&mut self, pointer_id: i32) -> bool {
        match self.drag {
            Some(drag) if drag.pointer_id == pointer_id => {
                self.drag = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any drag without a pointer event (unmount)
    pub fn cancel(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> ContainerSize {
        ContainerSize::new(1000.0, 800.0)
    }

    fn ball_at(x: f64, y: f64) -> BallState {
        BallState::new(DVec2::new(x, y), DVec2::new(7.0, -3.0))
    }

    #[test]
    fn test_press_outside_is_noop() {
        let mut tracker = PointerTracker::default();
        let mut ball = ball_at(400.0, 400.0);
        let before = (tracker, ball);

        let outcome = tracker.on_press(&mut ball, 1, DVec2::new(520.0, 400.0), 10.0);
        assert_eq!(outcome, PressOutcome::Missed);
        assert_eq!((tracker, ball), before);
    }

    #[test]
    fn test_press_on_edge_grabs() {
        let mut tracker = PointerTracker::default();
        let mut ball = ball_at(400.0, 400.0);
        let outcome = tracker.on_press(&mut ball, 1, DVec2::new(500.0, 400.0), 10.0);
        assert_eq!(outcome, PressOutcome::Grabbed);
        assert!(tracker.is_dragging());
        assert_eq!(ball.vel, DVec2::ZERO);
        assert_eq!(tracker.drag().map(|d| d.grab_offset), Some(DVec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_second_press_is_ignored() {
        let mut tracker = PointerTracker::default();
        let mut ball = ball_at(400.0, 400.0);
        tracker.on_press(&mut ball, 1, DVec2::new(410.0, 400.0), 0.0);
        let drag = *tracker.drag().unwrap();

        let outcome = tracker.on_press(&mut ball, 2, DVec2::new(400.0, 420.0), 5.0);
        assert_eq!(outcome, PressOutcome::Ignored);
        assert_eq!(tracker.drag(), Some(&drag));
    }

    #[test]
    fn test_move_keeps_grab_offset_and_samples_velocity() {
        let mut tracker = PointerTracker::new(0.8);
        let mut ball = ball_at(400.0, 400.0);
        tracker.on_press(&mut ball, 1, DVec2::new(420.0, 390.0), 1000.0);

        assert!(tracker.on_move(&mut ball, size(), 1, DVec2::new(440.0, 400.0), 1020.0));
        assert_eq!(ball.pos, DVec2::new(420.0, 410.0));
        // 20px and 10px over 20ms, scaled by the throw factor
        assert_eq!(ball.vel, DVec2::new(20.0, 10.0) / 0.02 * 0.8);
    }

    #[test]
    fn test_move_with_zero_elapsed_uses_one_ms_floor() {
        let mut tracker = PointerTracker::new(1.0);
        let mut ball = ball_at(400.0, 400.0);
        tracker.on_press(&mut ball, 1, DVec2::new(400.0, 400.0), 50.0);
        tracker.on_move(&mut ball, size(), 1, DVec2::new(401.0, 400.0), 50.0);
        assert!((ball.vel.x - 1000.0).abs() < 1e-9);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_move_clamps_into_bounds() {
        let mut tracker = PointerTracker::default();
        let mut ball = ball_at(400.0, 400.0);
        tracker.on_press(&mut ball, 1, DVec2::new(400.0, 400.0), 0.0);
        tracker.on_move(&mut ball, size(), 1, DVec2::new(-300.0, 2000.0), 16.0);
        assert_eq!(ball.pos, DVec2::new(100.0, 700.0));
    }

    #[test]
    fn test_move_without_drag_or_from_other_pointer() {
        let mut tracker = PointerTracker::default();
        let mut ball = ball_at(400.0, 400.0);
        assert!(!tracker.on_move(&mut ball, size(), 1, DVec2::new(10.0, 10.0), 5.0));
        assert_eq!(ball, ball_at(400.0, 400.0));

        tracker.on_press(&mut ball, 1, DVec2::new(400.0, 400.0), 0.0);
        let grabbed = ball;
        assert!(!tracker.on_move(&mut ball, size(), 9, DVec2::new(10.0, 10.0), 5.0));
        assert_eq!(ball, grabbed);
    }

    #[test]
    fn test_release_keeps_momentum() {
        let mut tracker = PointerTracker::new(1.0);
        let mut ball = ball_at(400.0, 400.0);
        tracker.on_press(&mut ball, 3, DVec2::new(400.0, 400.0), 0.0);
        tracker.on_move(&mut ball, size(), 3, DVec2::new(410.0, 400.0), 10.0);
        let thrown = ball.vel;

        assert!(!tracker.on_release(4));
        assert!(tracker.is_dragging());
        assert!(tracker.on_release(3));
        assert!(!tracker.is_dragging());
        assert_eq!(ball.vel, thrown);
        assert!(!tracker.on_release(3));
    }
}
