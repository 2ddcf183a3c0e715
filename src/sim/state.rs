//! Ball state and container geometry
//!
//! Positions are container-local CSS pixels with the origin at the top-left.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::clamp_lo;
use crate::consts::*;

/// Size of the hosting container (its bounding box, not the canvas)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True before the first layout, when there is nothing to draw into
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Pin a center point so a circle of `radius` stays inside the container
    pub fn clamp_center(&self, pos: DVec2, radius: f64) -> DVec2 {
        DVec2::new(
            clamp_lo(pos.x, radius, self.width - radius),
            clamp_lo(pos.y, radius, self.height - radius),
        )
    }

    /// Whether a circle of `radius` at `pos` lies fully inside
    pub fn contains(&self, pos: DVec2, radius: f64) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

/// The ball: center and per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: DVec2,
    pub vel: DVec2,
}

impl Default for BallState {
    fn default() -> Self {
        Self {
            pos: DVec2::new(START_POS.0, START_POS.1),
            vel: DVec2::new(START_VEL.0, START_VEL.1),
        }
    }
}

impl BallState {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self { pos, vel }
    }

    /// Squared distance from the center to a point
    pub fn distance_sq(&self, point: DVec2) -> f64 {
        self.pos.distance_squared(point)
    }

    /// Pull the center back inside the container after a shrink
    pub fn reclamp(&mut self, size: ContainerSize, radius: f64) {
        self.pos = size.clamp_center(self.pos, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_center_inside_is_identity() {
        let size = ContainerSize::new(800.0, 600.0);
        let pos = DVec2::new(400.0, 300.0);
        assert_eq!(size.clamp_center(pos, BALL_RADIUS), pos);
    }

    #[test]
    fn test_clamp_center_pins_each_axis() {
        let size = ContainerSize::new(800.0, 600.0);
        let clamped = size.clamp_center(DVec2::new(-50.0, 900.0), BALL_RADIUS);
        assert_eq!(clamped, DVec2::new(100.0, 500.0));
    }

    #[test]
    fn test_clamp_center_tiny_container_pins_to_radius() {
        // Narrower than the ball: no legal position exists, stay at radius
        let size = ContainerSize::new(150.0, 150.0);
        let clamped = size.clamp_center(DVec2::new(400.0, 10.0), BALL_RADIUS);
        assert_eq!(clamped, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_reclamp_after_shrink() {
        let mut ball = BallState::new(DVec2::new(700.0, 500.0), DVec2::new(3.0, 4.0));
        ball.reclamp(ContainerSize::new(500.0, 400.0), BALL_RADIUS);
        assert_eq!(ball.pos, DVec2::new(400.0, 300.0));
        // Velocity is untouched by a resize
        assert_eq!(ball.vel, DVec2::new(3.0, 4.0));
    }

    #[test]
    fn test_empty_size() {
        assert!(ContainerSize::default().is_empty());
        assert!(ContainerSize::new(100.0, 0.0).is_empty());
        assert!(!ContainerSize::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_default_ball_matches_start_constants() {
        let ball = BallState::default();
        assert_eq!(ball.pos, DVec2::new(100.0, 100.0));
        assert_eq!(ball.vel, DVec2::new(10.0, -10.0));
    }
}
