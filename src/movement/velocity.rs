//! Movement domain: per-mode velocity rules.

use bevy::prelude::*;

use crate::movement::input::InputFrame;
use crate::movement::probe::Side;
use crate::movement::resources::MovementTuning;

/// Grounded horizontal speed: direct set, no ramp.
pub(crate) fn ground_horizontal(input: &InputFrame, tuning: &MovementTuning) -> f32 {
    input.horizontal * tuning.speed
}

/// Airborne horizontal speed: integrate air acceleration, then clamp.
pub(crate) fn air_horizontal(
    vx: f32,
    input: &InputFrame,
    tuning: &MovementTuning,
    wall_jump_active: bool,
    dt: f32,
) -> f32 {
    let limit = tuning.air_clamp(wall_jump_active);
    (vx + input.horizontal * tuning.air_accel * dt).clamp(-limit, limit)
}

/// Velocity while clinging to a wall. Vertical speed ignores gravity entirely.
pub(crate) fn wall_slide(input: &InputFrame, tuning: &MovementTuning) -> Vec2 {
    let speed = if input.sprint_held {
        tuning.sprint_speed
    } else {
        tuning.speed
    };
    Vec2::new(input.horizontal * speed, -tuning.wall_slide_speed)
}

/// Kick off a wall. Returns the new velocity and the lateral displacement
/// that clears the player from the wall probe.
pub(crate) fn wall_jump(wall: Side, tuning: &MovementTuning) -> (Vec2, Vec2) {
    let dir = wall.sign();
    let velocity = Vec2::new(
        -tuning.wall_jump_velocity.x * dir,
        tuning.wall_jump_velocity.y,
    );
    let offset = -(tuning.wall_detect_distance + tuning.wall_jump_clearance) * dir;
    (velocity, Vec2::new(offset, 0.0))
}

/// Variable-gravity shaping. Conditions read the velocity the body had
/// entering the tick; the adjustment lands on the velocity being resolved.
pub(crate) fn better_jumping(
    vy: f32,
    entering_vy: f32,
    jump_held: bool,
    tuning: &MovementTuning,
    dt: f32,
) -> f32 {
    let mut vy = vy;
    if entering_vy < 0.0 {
        vy -= tuning.gravity_scale * tuning.fall_multiplier * dt;
    }
    if entering_vy > 0.0 && jump_held {
        vy += tuning.gravity_scale * tuning.jump_multiplier * dt;
    }
    vy
}

/// The only integration that runs while movement is locked.
pub(crate) fn locked_gravity(vy: f32, tuning: &MovementTuning, dt: f32) -> f32 {
    vy + tuning.gravity_scale * tuning.jump_multiplier * dt
}
