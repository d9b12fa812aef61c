//! Debug domain: motor info overlay.

use bevy::prelude::*;

use crate::movement::{AnimationFlags, PlayerState};

/// Marker for the motor info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

/// Overlay text for one player.
pub(crate) fn describe_motor(
    state: &PlayerState,
    flags: &AnimationFlags,
    recorded: usize,
    status: Option<&str>,
) -> String {
    let timers = &state.timers;
    let mut text = format!(
        "Mode: {:?}\nPos: ({:.0}, {:.0})\nVel: ({:.1}, {:.1})\n\
         Locked: {}  Wall hold: {}  Can push: {}\n\
         Landing: {:.2}  Lockout: {:.2}\nCooldown: {:.2}  Window: {:.2}\n\
         Flags: g={} run={} wall={} push={} pull={} right={}\nRecorded ticks: {}",
        state.mode,
        state.position.x,
        state.position.y,
        state.velocity.x,
        state.velocity.y,
        state.movement_locked,
        state.can_hold_wall,
        state.can_push,
        timers.landing_recovery.remaining,
        timers.wall_jump_lockout.remaining,
        timers.push_cooldown.remaining,
        timers.push_window.remaining,
        flags.grounded,
        flags.running,
        flags.on_wall,
        flags.pushing,
        flags.pulling,
        flags.facing_right,
        recorded,
    );
    if let Some(message) = status {
        text.push('\n');
        text.push_str(message);
    }
    text
}
