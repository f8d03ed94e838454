//! Axis-aligned collision rules
//!
//! Two mutually exclusive rules per platform: resting contact (gravity
//! cancelled while the player rides the top) and landing (a falling player
//! snaps onto the surface). Both share a horizontal overlap band that is
//! asymmetric on purpose: half a player width of slack past the left edge,
//! a third of a player width short of the right edge. The fractions are
//! tuned for feel, not derived; they live in [`Tuning`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Checkpoint, Platform, Player};
use crate::config::Tuning;

/// Axis-aligned box, top-left anchored (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }
}

/// Outcome of checking one platform against the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// No rule matched
    None,
    /// Player rides the platform top; cancel gravity this frame
    Resting,
    /// Player fell into the platform; snap onto the surface
    Landing,
}

/// Whether the player is horizontally inside the platform's tolerance band.
#[inline]
fn in_overlap_band(player: &Player, platform: &Platform, tuning: &Tuning) -> bool {
    player.pos.x >= platform.pos.x - player.size.x * tuning.band_left_fraction
        && player.pos.x
            <= platform.pos.x + platform.size.x - player.size.x * tuning.band_right_fraction
}

/// Classify the player's contact with one platform.
///
/// Resting is checked first; the rules are mutually exclusive by
/// construction, so the first match governs. Resting holds when the player's
/// bottom is at or above the platform top but this frame's velocity would
/// carry it through; landing when the player already overlaps the platform
/// vertically.
pub fn platform_contact(player: &Player, platform: &Platform, tuning: &Tuning) -> PlatformContact {
    if !in_overlap_band(player, platform, tuning) {
        return PlatformContact::None;
    }

    if player.bottom() <= platform.top() && player.bottom() + player.vel.y >= platform.top() {
        return PlatformContact::Resting;
    }

    if player.bottom() >= platform.top() && player.top() <= platform.bottom() {
        return PlatformContact::Landing;
    }

    PlatformContact::None
}

/// Whether the player currently satisfies every geometric condition to claim
/// a checkpoint: inside its vertical extent, past its left edge, and close
/// enough horizontally. The ordering gate and the scroll-active gate live in
/// the step loop.
pub fn checkpoint_reached(player: &Player, checkpoint: &Checkpoint, tuning: &Tuning) -> bool {
    player.pos.x >= checkpoint.pos.x
        && player.pos.y >= checkpoint.pos.y
        && player.bottom() <= checkpoint.bottom()
        && player.pos.x - player.size.x
            <= checkpoint.pos.x - checkpoint.size.x + player.size.x * tuning.proximity_factor
}
