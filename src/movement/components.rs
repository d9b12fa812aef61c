//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Crates the player can push and pull
    Pushable,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marks a dynamic body the player may push or pull.
#[derive(Component, Debug)]
pub struct Pushable;

/// Size of the player's box collider, used to build probe bounds.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerBody {
    pub size: Vec2,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            size: Vec2::new(24.0, 48.0),
        }
    }
}
