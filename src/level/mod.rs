//! Level domain: the playground room the motor is exercised in.

mod spawn;

use bevy::prelude::*;

use crate::level::spawn::{spawn_player, spawn_test_room};

/// Where the player appears on startup and on reset.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerSpawn {
    pub position: Vec2,
}

impl Default for PlayerSpawn {
    fn default() -> Self {
        Self {
            position: Vec2::new(0.0, -150.0),
        }
    }
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerSpawn>()
            .add_systems(Startup, (spawn_test_room, spawn_player).chain());
    }
}
