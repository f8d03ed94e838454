//! Level layouts: ordered platform and checkpoint spawn lists
//!
//! Layouts are authored in design space (y values against a 500px-tall
//! surface; x values absolute) and validated when the world is built. A
//! malformed layout is a construction-time error, never a step-time one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A spawn position in design space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
}

impl Spawn {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Layout rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    NoPlatforms,
    NoCheckpoints,
    /// Checkpoint x positions must strictly increase; holds the offending index
    UnorderedCheckpoint(usize),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoPlatforms => write!(f, "layout has no platforms"),
            LayoutError::NoCheckpoints => write!(f, "layout has no checkpoints"),
            LayoutError::UnorderedCheckpoint(index) => {
                write!(f, "checkpoint {index} is not right of its predecessor")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// An ordered course: platforms and checkpoints, both left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub platforms: Vec<Spawn>,
    pub checkpoints: Vec<Spawn>,
}

impl LevelLayout {
    /// The built-in course.
    pub fn default_course() -> Self {
        Self {
            platforms: vec![
                Spawn::new(500.0, 450.0),
                Spawn::new(700.0, 400.0),
                Spawn::new(850.0, 350.0),
                Spawn::new(900.0, 350.0),
                Spawn::new(1050.0, 150.0),
                Spawn::new(2500.0, 450.0),
                Spawn::new(2900.0, 400.0),
                Spawn::new(3150.0, 350.0),
                Spawn::new(3900.0, 450.0),
                Spawn::new(4200.0, 400.0),
                Spawn::new(4400.0, 200.0),
                Spawn::new(4700.0, 150.0),
            ],
            checkpoints: vec![
                Spawn::new(1170.0, 80.0),
                Spawn::new(2900.0, 330.0),
                Spawn::new(4800.0, 80.0),
            ],
        }
    }

    /// Fail-fast validation: non-empty lists, strictly increasing checkpoint
    /// x positions (claim order is list order, so geometry must agree).
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.platforms.is_empty() {
            return Err(LayoutError::NoPlatforms);
        }
        if self.checkpoints.is_empty() {
            return Err(LayoutError::NoCheckpoints);
        }
        for (index, pair) in self.checkpoints.windows(2).enumerate() {
            if pair[1].x <= pair[0].x {
                return Err(LayoutError::UnorderedCheckpoint(index + 1));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::default_course()
    }
}
