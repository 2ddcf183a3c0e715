//! Wall and floor collision response
//!
//! The ball lives in an axis-aligned box. Each axis is checked once per frame,
//! before gravity and integration, and at most one side per axis can fire.

use super::state::{BallState, ContainerSize};
use super::tick::PhysicsParams;

/// Which boundaries the ball touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub floor: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.floor
    }
}

/// Reflect and damp velocity on every boundary the ball has reached, snapping
/// the center back onto that boundary.
///
/// A floor contact also bleeds horizontal speed through `traction`. The top
/// edge has no traction.
pub fn resolve_walls(ball: &mut BallState, size: ContainerSize, params: &PhysicsParams) -> Contacts {
    let r = params.radius;
    let mut contacts = Contacts::default();

    if ball.pos.x + r >= size.width {
        ball.vel.x = -ball.vel.x * params.damping;
        ball.pos.x = size.width - r;
        contacts.right = true;
    } else if ball.pos.x - r <= 0.0 {
        ball.vel.x = -ball.vel.x * params.damping;
        ball.pos.x = r;
        contacts.left = true;
    }

    if ball.pos.y + r + params.floor_offset >= size.height {
        ball.vel.y = -ball.vel.y * params.damping;
        ball.pos.y = size.height - r - params.floor_offset;
        ball.vel.x *= params.traction;
        contacts.floor = true;
    } else if ball.pos.y - r <= 0.0 {
        ball.vel.y = -ball.vel.y * params.damping;
        ball.pos.y = r;
        contacts.top = true;
    }

    contacts
}
