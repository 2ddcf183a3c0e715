//! Cursor blink modes

use serde::{Deserialize, Serialize};

/// How the cursor blinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorBlink {
    /// Stylesheet animation via the `text-type--blink` class
    #[default]
    Css,
    /// Opacity tween driven from the frame loop
    Gsap,
    /// Always visible
    None,
}

impl CursorBlink {
    /// Class added to the host element for this mode
    pub fn host_class(&self) -> Option<&'static str> {
        match self {
            CursorBlink::Css => Some("text-type--blink"),
            _ => None,
        }
    }
}

/// Quadratic ease-in-out (`power2.inOut`)
fn ease_in_out_quad(p: f64) -> f64 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        1.0 - (-2.0 * p + 2.0).powi(2) / 2.0
    }
}

/// Cursor opacity for the tweened mode: 1 -> 0 over `duration_s`, then back,
/// forever.
pub fn blink_opacity(elapsed_s: f64, duration_s: f64) -> f64 {
    if duration_s <= 0.0 || !elapsed_s.is_finite() {
        return 1.0;
    }
    let t = (elapsed_s / duration_s).max(0.0);
    let cycle = t.floor();
    let frac = t - cycle;
    // Odd half cycles run backwards
    let p = if cycle as u64 % 2 == 0 { frac } else { 1.0 - frac };
    1.0 - ease_in_out_quad(p)
}
