//! Core domain: camera, world gravity and pause handling.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::resources::GameplayPaused;
use crate::movement::MovementTuning;

/// Pause source used by the pause key.
pub(crate) const PLAYER_PAUSE: &str = "player";

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// The motor's gravity shaping and the physics world share one magnitude.
pub(crate) fn apply_world_gravity(tuning: Res<MovementTuning>, mut gravity: ResMut<Gravity>) {
    gravity.0 = Vec2::NEG_Y * tuning.gravity_scale;
    info!("World gravity set to {}", tuning.gravity_scale);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
    mut physics_time: ResMut<Time<Physics>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    if paused.toggle(PLAYER_PAUSE) {
        physics_time.pause();
        info!("Paused");
    } else if !paused.is_paused() {
        physics_time.unpause();
        info!("Resumed");
    }
}
