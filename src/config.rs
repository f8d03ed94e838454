//! World bounds and tuning constants
//!
//! Both are fixed at construction time; nothing here mutates during a
//! session. Serde support exists so a host can ship tuning/layout data as
//! JSON next to its assets.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::proportional_size;

/// World bounds, taken from the host surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Design-space size scaled for this viewport's height.
    #[inline]
    pub fn scaled(&self, size: f32) -> f32 {
        proportional_size(size, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Physics and "feel" constants.
///
/// The overlap band fractions and the checkpoint proximity factor are tuned
/// values with no derivable formula; they live here as named fields so they
/// can be adjusted in one place without touching the collision rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Gravity unit added back to vertical velocity each airborne frame
    pub gravity: f32,
    /// Horizontal run speed (pixels per frame)
    pub run_speed: f32,
    /// World translation per frame while scrolling
    pub scroll_speed: f32,
    /// Upward impulse per jump input
    pub jump_impulse: f32,
    /// Overlap band slack past a platform's left edge, as a fraction of
    /// player width
    pub band_left_fraction: f32,
    /// Overlap band shrink before a platform's right edge, as a fraction of
    /// player width
    pub band_right_fraction: f32,
    /// Checkpoint proximity bound, as a fraction of player width
    pub proximity_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            run_speed: RUN_SPEED,
            scroll_speed: SCROLL_SPEED,
            jump_impulse: JUMP_IMPULSE,
            band_left_fraction: 0.5,
            band_right_fraction: 1.0 / 3.0,
            proximity_factor: 0.9,
        }
    }
}
