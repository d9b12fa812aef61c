//! Movement domain: thin presentation adapters fed by motor output.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::events::{AnimationFlags, ModeChangedEvent, MotorEvent, MotorEventMessage};
use crate::movement::Player;

pub(crate) fn sync_sprite_facing(mut query: Query<(&AnimationFlags, &mut Sprite), With<Player>>) {
    for (flags, mut sprite) in &mut query {
        sprite.flip_x = !flags.facing_right;
    }
}

pub(crate) fn log_motor_events(
    mut events: MessageReader<MotorEventMessage>,
    mut modes: MessageReader<ModeChangedEvent>,
) {
    for message in events.read() {
        match message.event {
            MotorEvent::Land => info!("Player {:?} landed hard", message.entity),
            MotorEvent::Jump => debug!("Player {:?} jumped", message.entity),
            MotorEvent::Falling => debug!("Player {:?} started falling", message.entity),
        }
    }
    for change in modes.read() {
        debug!(
            "Player {:?} mode {:?} -> {:?}",
            change.entity, change.from, change.to
        );
    }
}
