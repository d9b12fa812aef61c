//! Movement domain: runs the motor for every player and writes results back.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::{
    AnimationFlags, ModeChangedEvent, MotorEventMessage, MotorOutput, MotorTicked,
};
use crate::movement::host::{AnimationSink, drive_tick};
use crate::movement::probe::Bounds;
use crate::movement::systems::collisions::AvianCollisions;
use crate::movement::systems::input::MovementInput;
use crate::movement::{MovementTuning, Player, PlayerBody, PlayerState, Pushable};

/// Forwards motor output into the ECS: flags onto the player, events out as messages.
struct EcsAnimationSink<'a, 'w> {
    entity: Entity,
    flags: &'a mut AnimationFlags,
    events: &'a mut MessageWriter<'w, MotorEventMessage>,
}

impl AnimationSink for EcsAnimationSink<'_, '_> {
    fn apply(&mut self, output: &MotorOutput) {
        *self.flags = output.flags;
        for event in &output.events {
            self.events.write(MotorEventMessage {
                entity: self.entity,
                event: *event,
            });
        }
    }
}

#[allow(clippy::type_complexity)]
pub(crate) fn run_motor(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    spatial_query: SpatialQuery,
    mut input: ResMut<MovementInput>,
    mut players: Query<
        (
            Entity,
            &mut PlayerState,
            &PlayerBody,
            &mut Transform,
            &mut LinearVelocity,
            &mut AnimationFlags,
        ),
        (With<Player>, Without<Pushable>),
    >,
    mut crates: Query<&mut LinearVelocity, (With<Pushable>, Without<Player>)>,
    mut motor_events: MessageWriter<MotorEventMessage>,
    mut mode_events: MessageWriter<ModeChangedEvent>,
    mut ticks: MessageWriter<MotorTicked>,
) {
    let dt = time.delta_secs();

    for (entity, mut state, body, mut transform, mut velocity, mut flags) in &mut players {
        // The host integrated the body since the last tick
        state.position = transform.translation.truncate();
        state.velocity = velocity.0;
        let previous_mode = state.mode;

        let bounds = Bounds::new(state.position, body.size);
        let report = {
            let crate_velocity = |e: Entity| crates.get(e).ok().map(|v| v.0);
            let collisions = AvianCollisions {
                spatial: &spatial_query,
                player: entity,
                crate_velocity: &crate_velocity,
            };
            let mut sink = EcsAnimationSink {
                entity,
                flags: &mut *flags,
                events: &mut motor_events,
            };
            drive_tick(
                &mut *state,
                &tuning,
                &collisions,
                &mut *input,
                &mut sink,
                bounds,
                dt,
            )
        };

        velocity.0 = report.output.velocity;
        if report.output.displacement != Vec2::ZERO {
            transform.translation += report.output.displacement.extend(0.0);
        }

        for pushed in &report.pushables {
            if let Ok(mut crate_velocity) = crates.get_mut(pushed.handle) {
                crate_velocity.0.x = pushed.velocity.x;
            }
        }

        if state.mode != previous_mode {
            mode_events.write(ModeChangedEvent {
                entity,
                from: previous_mode,
                to: state.mode,
            });
        }

        ticks.write(MotorTicked { entity, report });
    }
}
