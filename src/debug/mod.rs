//! Debug tooling for tuning the motor (dev-tools builds only).
//!
//! Hotkeys:
//! - Ctrl+R resets the player to its spawn point and restarts recording
//! - Ctrl+S or F9 writes the recorded ticks to `recordings/` as JSON
//! - Ctrl+D toggles the motor info overlay

mod recorder;
mod state;
mod systems;
mod ui;

use bevy::prelude::*;

use crate::debug::recorder::TickRecorder;
use crate::debug::state::DebugState;
use crate::debug::systems::{
    handle_debug_hotkeys, record_ticks, start_recording, update_debug_info_overlay,
    update_status_message,
};
use crate::movement::MovementSet;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .init_resource::<TickRecorder>()
            .add_systems(Startup, start_recording)
            // A reset lands before the motor so the restarted trace opens at spawn
            .add_systems(Update, handle_debug_hotkeys.before(MovementSet))
            .add_systems(
                Update,
                (record_ticks, update_status_message)
                    .chain()
                    .after(MovementSet),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}
