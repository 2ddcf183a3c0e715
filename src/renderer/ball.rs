//! Render pass for the picture ball

use super::Surface2d;
use crate::consts::{FALLBACK_FILL, OUTLINE_STROKE, OUTLINE_WIDTH};
use crate::sim::{BallState, ContainerSize};

/// Draw one frame: clear, clip a circle, paint the picture (or the fallback
/// fill), then stroke the outline outside the clip.
pub fn render_ball<S: Surface2d>(
    surface: &mut S,
    size: ContainerSize,
    ball: &BallState,
    radius: f64,
    image: Option<&S::Image>,
) {
    let (cx, cy) = (ball.pos.x, ball.pos.y);
    let (left, top, side) = (cx - radius, cy - radius, radius * 2.0);

    surface.clear_rect(0.0, 0.0, size.width, size.height);

    surface.save();
    surface.begin_path();
    surface.circle(cx, cy, radius);
    surface.clip();
    match image {
        Some(image) => surface.draw_image(image, left, top, side, side),
        None => surface.fill_rect(FALLBACK_FILL, left, top, side, side),
    }
    surface.restore();

    surface.begin_path();
    surface.circle(cx, cy, radius);
    surface.stroke(OUTLINE_STROKE, OUTLINE_WIDTH);
}
