//! Simulation state and entity types
//!
//! Everything advanced by [`step`](super::tick::step) lives here: the player,
//! the ordered platform and checkpoint lists, and the scroll flag. The world
//! exclusively owns its entities; lists keep their length and order for the
//! whole session (claims mutate elements in place, never remove them).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::layout::{LayoutError, LevelLayout};
use crate::config::{Tuning, Viewport};
use crate::consts::*;

/// Banner text for a non-final claim, forwarded with the event.
pub const CHECKPOINT_MESSAGE: &str = "You reached a checkpoint!";
/// Banner text for the final claim.
pub const FINAL_CHECKPOINT_MESSAGE: &str = "You reached the final checkpoint!";

/// Events emitted by a simulation step for the presentation layer.
///
/// The core only emits; banner display and auto-dismiss timing belong to the
/// host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A non-final checkpoint was claimed while the player stood on it
    CheckpointReached { message: &'static str },
    /// The last checkpoint was claimed; the world is frozen from here on
    FinalCheckpointReached,
}

/// The controllable entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width/height, fixed after construction
    pub size: Vec2,
}

impl Player {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.scaled(PLAYER_START_X),
                viewport.scaled(PLAYER_START_Y),
            ),
            vel: Vec2::ZERO,
            size: Vec2::splat(viewport.scaled(PLAYER_SIZE)),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Collidable extent, for the render collaborator.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Advance position by velocity, then apply the per-frame gravity rule
    /// and the soft horizontal bounds.
    ///
    /// Gravity is reset-then-accumulate: while the player would stay above
    /// the floor, vertical velocity is zeroed (or set to one gravity unit
    /// when clamped at the ceiling) and a single gravity unit added back, so
    /// it never accumulates across frames. Landing re-arms the same value
    /// via the collision pass.
    pub fn integrate(&mut self, viewport: &Viewport, gravity: f32) {
        self.pos += self.vel;

        if self.pos.y + self.size.y + self.vel.y <= viewport.height {
            if self.pos.y < 0.0 {
                self.pos.y = 0.0;
                self.vel.y = gravity;
            } else {
                self.vel.y = 0.0;
            }
            self.vel.y += gravity;
        }

        // Soft bounds: one player width from the left edge, two from the right.
        let min_x = self.size.x;
        let max_x = viewport.width - 2.0 * self.size.x;
        if self.pos.x < min_x {
            self.pos.x = min_x;
        }
        if self.pos.x >= max_x {
            self.pos.x = max_x;
        }
    }
}

/// A static platform. Only its x coordinate ever changes, under world scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn new(x: f32, design_y: f32, viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(x, viewport.scaled(design_y)),
            size: Vec2::new(PLATFORM_WIDTH, viewport.scaled(PLATFORM_HEIGHT)),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A checkpoint. Claiming is a one-way transition: the geometry collapses so
/// the checkpoint never collides again, and `claimed` records completion.
///
/// Claimed geometry is non-finite in memory (y at infinity), which JSON
/// cannot carry, so serialization goes through [`CheckpointSnapshot`] and
/// rebuilds the collapsed geometry on load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CheckpointSnapshot", into = "CheckpointSnapshot")]
pub struct Checkpoint {
    pub pos: Vec2,
    pub size: Vec2,
    pub claimed: bool,
}

/// Wire shape for [`Checkpoint`]: all-finite fields plus the claimed flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct CheckpointSnapshot {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    claimed: bool,
}

impl From<Checkpoint> for CheckpointSnapshot {
    fn from(checkpoint: Checkpoint) -> Self {
        Self {
            x: checkpoint.pos.x,
            y: if checkpoint.claimed {
                0.0
            } else {
                checkpoint.pos.y
            },
            width: checkpoint.size.x,
            height: checkpoint.size.y,
            claimed: checkpoint.claimed,
        }
    }
}

impl From<CheckpointSnapshot> for Checkpoint {
    fn from(snapshot: CheckpointSnapshot) -> Self {
        if snapshot.claimed {
            Self {
                pos: Vec2::new(snapshot.x, f32::INFINITY),
                size: Vec2::ZERO,
                claimed: true,
            }
        } else {
            Self {
                pos: Vec2::new(snapshot.x, snapshot.y),
                size: Vec2::new(snapshot.width, snapshot.height),
                claimed: false,
            }
        }
    }
}

impl Checkpoint {
    pub fn new(x: f32, design_y: f32, viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(x, viewport.scaled(design_y)),
            size: Vec2::new(
                viewport.scaled(CHECKPOINT_WIDTH),
                viewport.scaled(CHECKPOINT_HEIGHT),
            ),
            claimed: false,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Claim the checkpoint. Guarded: a second call is a no-op.
    pub fn claim(&mut self) {
        if self.claimed {
            return;
        }
        self.size = Vec2::ZERO;
        self.pos.y = f32::INFINITY;
        self.claimed = true;
    }
}

/// Complete simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub player: Player,
    /// Ordered left to right; fixed length for the session
    pub platforms: Vec<Platform>,
    /// Ordered left to right; claim order follows list order
    pub checkpoints: Vec<Checkpoint>,
    /// True while the checkpoint sequence is incomplete. Cleared permanently
    /// by the final claim, which freezes scroll and checkpoint detection.
    pub scroll_active: bool,
    /// Step counter
    pub time_ticks: u64,
}

impl WorldState {
    /// Build a world from a layout, validating it up front.
    ///
    /// Malformed layouts are programmer errors and fail here rather than at
    /// step time.
    pub fn new(
        viewport: Viewport,
        tuning: Tuning,
        layout: &LevelLayout,
    ) -> Result<Self, LayoutError> {
        layout.validate()?;

        let platforms = layout
            .platforms
            .iter()
            .map(|spawn| Platform::new(spawn.x, spawn.y, &viewport))
            .collect::<Vec<_>>();
        let checkpoints = layout
            .checkpoints
            .iter()
            .map(|spawn| Checkpoint::new(spawn.x, spawn.y, &viewport))
            .collect::<Vec<_>>();

        log::debug!(
            "world created: {} platforms, {} checkpoints, viewport {}x{}",
            platforms.len(),
            checkpoints.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            viewport,
            tuning,
            player: Player::new(&viewport),
            platforms,
            checkpoints,
            scroll_active: true,
            time_ticks: 0,
        })
    }

    /// Number of claimed checkpoints, in claim order from the left.
    pub fn claimed_count(&self) -> usize {
        self.checkpoints.iter().filter(|c| c.claimed).count()
    }
}
