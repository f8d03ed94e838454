//! Ledge Runner - a side-scrolling checkpoint platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, checkpoint claims)
//! - `config`: World bounds and tuning constants
//!
//! Rendering, key-event wiring, UI screens and frame scheduling are host
//! collaborators: the host calls [`sim::step`] once per animation tick with
//! the input flags held at that moment, reads entity geometry back for
//! drawing, and reacts to the returned [`sim::GameEvent`]s.

pub mod config;
pub mod sim;

pub use config::{Tuning, Viewport};
pub use sim::{GameEvent, LevelLayout, StepInput, WorldState, step};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration re-applied to vertical velocity every airborne frame
    pub const GRAVITY: f32 = 0.5;
    /// Horizontal run speed (pixels per frame)
    pub const RUN_SPEED: f32 = 5.0;
    /// World translation per frame while scroll is active
    pub const SCROLL_SPEED: f32 = 5.0;
    /// Upward impulse applied on a jump input
    pub const JUMP_IMPULSE: f32 = 8.0;

    /// Player square side, design space
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player spawn position, design space
    pub const PLAYER_START_X: f32 = 10.0;
    pub const PLAYER_START_Y: f32 = 400.0;

    /// Platform width (not viewport-scaled)
    pub const PLATFORM_WIDTH: f32 = 200.0;
    /// Platform height, design space
    pub const PLATFORM_HEIGHT: f32 = 40.0;

    /// Checkpoint extent, design space
    pub const CHECKPOINT_WIDTH: f32 = 40.0;
    pub const CHECKPOINT_HEIGHT: f32 = 70.0;

    /// Past this x the player stops translating and the world scrolls instead
    pub const FORWARD_THRESHOLD: f32 = 400.0;
    /// Below this x leftward input no longer translates the player
    pub const BACKWARD_THRESHOLD: f32 = 100.0;

    /// Viewport height under which design-space sizes scale down linearly
    pub const RESPONSIVE_HEIGHT: f32 = 500.0;
}

/// Scale a design-space size for short viewports.
///
/// Sizes are authored against a 500px-tall surface; shorter surfaces get a
/// linear scale-down rounded up, taller ones use the authored size as-is.
#[inline]
pub fn proportional_size(size: f32, viewport_height: f32) -> f32 {
    if viewport_height < consts::RESPONSIVE_HEIGHT {
        (size / consts::RESPONSIVE_HEIGHT * viewport_height).ceil()
    } else {
        size
    }
}
