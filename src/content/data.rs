//! Serializable shapes for data files under `assets/data`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::MovementTuning;

/// Current `movement.ron` schema.
pub const MOVEMENT_SCHEMA_VERSION: u32 = 1;

/// Serializable Vec2 for data files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for Vec2Def {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Top-level layout of `movement.ron`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovementDataFile {
    pub schema_version: u32,
    pub tuning: MovementTuning,
}
