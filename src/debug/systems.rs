//! Debug domain: hotkeys, recording and overlay systems.

use std::fs;
use std::path::{Path, PathBuf};

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::debug::recorder::TickRecorder;
use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, describe_motor, spawn_debug_info_overlay};
use crate::level::PlayerSpawn;
use crate::movement::{AnimationFlags, MotorTicked, Player, PlayerState};

/// Directory trace dumps are written to.
pub const RECORDINGS_DIR: &str = "recordings";

pub(crate) fn start_recording(spawn: Res<PlayerSpawn>, mut recorder: ResMut<TickRecorder>) {
    recorder.restart(spawn.position);
    info!("[DEBUG] Recording motor ticks from {:?}", spawn.position);
}

/// Append every motor tick to the current trace
pub(crate) fn record_ticks(
    mut ticks: MessageReader<MotorTicked>,
    mut recorder: ResMut<TickRecorder>,
    mut debug_state: ResMut<DebugState>,
) {
    for ticked in ticks.read() {
        if recorder.record(&ticked.report) && recorder.is_full() {
            warn!(
                "[DEBUG] Tick recorder reached {} ticks; further ticks are dropped",
                recorder.capacity
            );
            debug_state.set_message("Recording full; Ctrl+R to restart", 3.0);
        }
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    spawn: Res<PlayerSpawn>,
    mut debug_state: ResMut<DebugState>,
    mut recorder: ResMut<TickRecorder>,
    mut players: Query<(&mut PlayerState, &mut Transform, &mut LinearVelocity), With<Player>>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    // Ctrl+R: Reset player to spawn
    if ctrl && keyboard.just_pressed(KeyCode::KeyR) {
        for (mut state, mut transform, mut velocity) in &mut players {
            *state = PlayerState::spawn_at(spawn.position);
            transform.translation = spawn.position.extend(transform.translation.z);
            velocity.0 = Vec2::ZERO;
        }
        recorder.restart(spawn.position);
        debug_state.set_message("Player reset", 2.0);
        info!("[DEBUG] Player reset to {:?}", spawn.position);
    }

    // Ctrl+S or F9: Dump the current trace
    if (ctrl && keyboard.just_pressed(KeyCode::KeyS)) || keyboard.just_pressed(KeyCode::F9) {
        let index = debug_state.dumps_written;
        match dump_trace(&recorder, Path::new(RECORDINGS_DIR), index) {
            Ok(path) => {
                debug_state.dumps_written += 1;
                let msg = format!("Saved {}", path.display());
                info!("[DEBUG] {}", msg);
                debug_state.set_message(msg, 3.0);
            }
            Err(e) => {
                warn!("[DEBUG] Trace dump failed: {}", e);
                debug_state.set_message("Trace dump failed", 3.0);
            }
        }
    }

    // Ctrl+D: Toggle info overlay
    if ctrl && keyboard.just_pressed(KeyCode::KeyD) {
        debug_state.show_info = !debug_state.show_info;
        info!(
            "[DEBUG] Info overlay {}",
            if debug_state.show_info { "ON" } else { "OFF" }
        );
    }
}

/// Write the recorder's trace as `motor-trace-<index>.json` under `dir`.
pub(crate) fn dump_trace(
    recorder: &TickRecorder,
    dir: &Path,
    index: u32,
) -> Result<PathBuf, String> {
    let trace = recorder
        .trace
        .as_ref()
        .ok_or_else(|| "nothing recorded yet".to_string())?;
    let json = trace.to_json().map_err(|e| e.to_string())?;
    fs::create_dir_all(dir).map_err(|e| format!("{}: {}", dir.display(), e))?;
    let path = dir.join(format!("motor-trace-{:03}.json", index));
    fs::write(&path, json).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(path)
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    debug_state.tick_message(time.delta_secs());
}

/// Update the debug info overlay with the current motor state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    recorder: Res<TickRecorder>,
    player_query: Query<(&PlayerState, &AnimationFlags), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((state, flags)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let status = debug_state
            .status_message
            .as_ref()
            .map(|(msg, _)| msg.as_str());
        **text = describe_motor(state, flags, recorder.len(), status);
    }
}
