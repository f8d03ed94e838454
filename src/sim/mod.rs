//! Deterministic simulation module
//!
//! All gameplay logic lives here. The module is frame-driven and
//! single-threaded:
//! - One synchronous [`step`] per animation tick, no re-entrancy
//! - State mutated in place, events returned to the caller
//! - No rendering, timers or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{Aabb, PlatformContact, checkpoint_reached, platform_contact};
pub use layout::{LayoutError, LevelLayout, Spawn};
pub use state::{
    CHECKPOINT_MESSAGE, Checkpoint, FINAL_CHECKPOINT_MESSAGE, GameEvent, Platform, Player,
    WorldState,
};
pub use tick::{StepInput, step};
