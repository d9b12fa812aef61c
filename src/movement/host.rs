//! Movement domain: capability seams to the host's physics, input and animation.
//!
//! The motor never talks to the engine directly. Systems in
//! `movement::systems` implement these traits on top of Bevy and avian2d;
//! tests implement them with plain structs.

use bevy::prelude::*;

use crate::movement::events::MotorOutput;
use crate::movement::input::{InputFrame, sanitize_delta};
use crate::movement::machine::step;
use crate::movement::probe::{Bounds, CollisionProbe, PushableTarget};
use crate::movement::resources::MovementTuning;
use crate::movement::state::PlayerState;

/// Physics collaborator: collision snapshots and nearby bodies.
pub trait CollisionQuery {
    /// Handle the host uses to write pushable velocities back.
    type Handle: Copy;

    /// Ground box cast and left/right wall rays for the given bounds.
    fn probe(&self, bounds: Bounds, tuning: &MovementTuning) -> CollisionProbe;

    /// Bodies within wall reach on either side. An empty list means none.
    fn pushables(
        &self,
        bounds: Bounds,
        tuning: &MovementTuning,
    ) -> Vec<PushableTarget<Self::Handle>>;
}

/// Input collaborator. Frames are sanitized before the motor sees them.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}

/// Animation/audio collaborator.
pub trait AnimationSink {
    fn apply(&mut self, output: &MotorOutput);
}

/// Everything one tick consumed and produced, for hosts that want to
/// write pushable velocities back or record the frame.
#[derive(Debug, Clone)]
pub struct TickReport<H> {
    /// Position and velocity the tick started from, after host sync.
    pub position: Vec2,
    pub velocity: Vec2,
    pub input: InputFrame,
    pub probe: CollisionProbe,
    pub dt: f32,
    /// Bodies beside the player as the host reported them.
    pub sighted: Vec<PushableTarget<H>>,
    /// The same bodies after the push resolver ran.
    pub pushables: Vec<PushableTarget<H>>,
    pub output: MotorOutput,
}

/// Run one motor tick against the host collaborators.
///
/// The probe is captured once and reused for the whole tick.
pub fn drive_tick<Q, I, A>(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    collisions: &Q,
    input: &mut I,
    animation: &mut A,
    bounds: Bounds,
    dt: f32,
) -> TickReport<Q::Handle>
where
    Q: CollisionQuery,
    I: InputSource,
    A: AnimationSink,
{
    let frame = input.poll().sanitized();
    let dt = sanitize_delta(dt);
    let probe = collisions.probe(bounds, tuning);
    let mut pushables = if frame.interact_held {
        collisions.pushables(bounds, tuning)
    } else {
        Vec::new()
    };

    let position = state.position;
    let velocity = state.velocity;
    let sighted = pushables.clone();
    let output = step(state, tuning, &frame, &probe, &mut pushables, dt);
    animation.apply(&output);

    TickReport {
        position,
        velocity,
        input: frame,
        probe,
        dt,
        sighted,
        pushables,
        output,
    }
}
