//! Per-frame simulation tick
//!
//! One call per display refresh while the ball is free. Units are pixels and
//! frames: velocity is added to position once per tick, gravity once per tick.

use serde::{Deserialize, Serialize};

use super::collision::{Contacts, resolve_walls};
use super::state::{BallState, ContainerSize};
use crate::consts::*;

/// Tunables for the free-flight integrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub radius: f64,
    pub damping: f64,
    pub traction: f64,
    pub gravity: f64,
    pub floor_offset: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            damping: DAMPING,
            traction: TRACTION,
            gravity: GRAVITY,
            floor_offset: FLOOR_OFFSET,
        }
    }
}

/// Advance the ball by one frame.
///
/// Order matters: walls, then gravity, then integration. Gravity is applied
/// even while resting on the floor, so a settled ball keeps a tiny bounce.
/// The final clamp keeps the center legal between frames; a ball that
/// overshoots is caught by the wall check on the next tick.
pub fn tick(ball: &mut BallState, size: ContainerSize, params: &PhysicsParams) -> Contacts {
    let contacts = resolve_walls(ball, size, params);

    ball.vel.y += params.gravity;
    ball.pos += ball.vel;
    ball.reclamp(size, params.radius);

    if contacts.any() {
        log::trace!("contact {:?} at {:?}, vel {:?}", contacts, ball.pos, ball.vel);
    }
    contacts
}
