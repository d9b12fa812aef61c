//! Movement domain: per-tick collision snapshot and pushable contacts.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One tick's collision query result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionProbe {
    pub grounded: bool,
    /// Distance to a wall on the left, if one is within reach.
    pub left_wall: Option<f32>,
    /// Distance to a wall on the right, if one is within reach.
    pub right_wall: Option<f32>,
}

impl CollisionProbe {
    pub const AIRBORNE: Self = Self {
        grounded: false,
        left_wall: None,
        right_wall: None,
    };

    pub const GROUNDED: Self = Self {
        grounded: true,
        left_wall: None,
        right_wall: None,
    };

    pub fn touching_wall(&self) -> bool {
        self.left_wall.is_some() || self.right_wall.is_some()
    }

    /// The wall a slide or wall jump is resolved against. Right wins a tie.
    pub fn wall_side(&self) -> Option<Side> {
        if self.right_wall.is_some() {
            Some(Side::Right)
        } else if self.left_wall.is_some() {
            Some(Side::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Classification of something found beside the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Solid,
    Pushable,
}

/// A body found beside the player, owned by the host scene.
///
/// The push resolver only ever writes `velocity.x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushableTarget<H> {
    pub handle: H,
    pub side: Side,
    pub kind: ContactKind,
    pub velocity: Vec2,
}

impl<H> PushableTarget<H> {
    pub fn is_pushable(&self) -> bool {
        self.kind == ContactKind::Pushable
    }
}

/// Axis-aligned bounds of the player collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }
}
