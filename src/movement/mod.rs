//! Movement domain: the player motor and its Bevy wiring.
//!
//! The motor itself (`machine`, `velocity`, `push`, `timers`) is plain Rust
//! over [`PlayerState`]; everything engine-facing lives in `systems` behind
//! the traits in `host`.

mod components;
mod events;
mod host;
mod input;
mod machine;
mod probe;
mod push;
mod resources;
mod state;
mod systems;
mod timers;
mod velocity;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, Ground, Player, PlayerBody, Pushable, Wall};
pub use events::{
    AnimationFlags, ModeChangedEvent, MotorEvent, MotorEventMessage, MotorOutput, MotorTicked,
};
pub use host::{AnimationSink, CollisionQuery, InputSource, TickReport, drive_tick};
pub use input::{InputFrame, sanitize_delta};
pub use machine::{step, wall_eligible};
pub use probe::{Bounds, CollisionProbe, ContactKind, PushableTarget, Side};
pub use resources::MovementTuning;
pub use state::{MovementMode, PlayerState};
pub use systems::input::MovementInput;
pub use timers::{Countdown, Expired, TimerBank};

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::systems::{log_motor_events, read_input, run_motor, sync_sprite_facing};

/// Systems that read input and tick the motor. Anything that reads
/// [`MotorTicked`] or rewrites [`PlayerState`] orders itself against this.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovementSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<MotorEventMessage>()
            .add_message::<ModeChangedEvent>()
            .add_message::<MotorTicked>()
            .add_systems(
                Update,
                (read_input, run_motor, sync_sprite_facing, log_motor_events)
                    .chain()
                    .in_set(MovementSet)
                    .run_if(gameplay_active),
            );
    }
}
