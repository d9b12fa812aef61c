//! Core domain: app-wide setup shared by every other plugin.

mod resources;
mod systems;

pub use resources::{GameplayPaused, gameplay_active};

use bevy::prelude::*;

use crate::core::systems::{apply_world_gravity, setup_camera, toggle_pause};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .add_systems(Startup, (setup_camera, apply_world_gravity))
            .add_systems(Update, toggle_pause);
    }
}
