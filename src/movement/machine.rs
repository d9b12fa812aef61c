//! Movement domain: the per-tick motor state machine.
//!
//! [`step`] is a pure function of the player state, one input frame, one
//! collision probe, the nearby pushables and the frame time. It runs in a
//! fixed order every tick:
//!
//! 1. advance the timer bank and apply expiries
//! 2. landing edge (may engage the landing lock)
//! 3. falling detection
//! 4. locked ticks integrate gravity only; otherwise resolve wall or open
//!    movement, then push/pull
//! 5. derive animation flags and facing

use bevy::prelude::*;

use crate::movement::events::{AnimationFlags, MotorEvent, MotorOutput};
use crate::movement::input::InputFrame;
use crate::movement::probe::{CollisionProbe, PushableTarget, Side};
use crate::movement::push::{self, PushOutcome};
use crate::movement::resources::MovementTuning;
use crate::movement::state::{MovementMode, PlayerState};
use crate::movement::velocity;

/// Advance the motor by one tick.
pub fn step<H>(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    input: &InputFrame,
    probe: &CollisionProbe,
    pushables: &mut [PushableTarget<H>],
    dt: f32,
) -> MotorOutput {
    let previous_mode = state.mode;
    let mut out = MotorOutput::default();

    apply_expiries(state, tuning, dt);

    if probe.grounded && !state.was_grounded {
        land(state, tuning, &mut out);
    }
    state.was_grounded = probe.grounded;

    track_falling(state, tuning, &mut out);

    let mut push = PushOutcome::default();
    // Stays set on the wall-jump tick, when the mode has already left the wall.
    let mut held_wall = false;
    if state.movement_locked {
        state.velocity.y = velocity::locked_gravity(state.velocity.y, tuning, dt);
        state.mode = MovementMode::LandingRecovery;
    } else if wall_eligible(state, probe) {
        state.on_wall = true;
        held_wall = true;
        wall_movement(state, tuning, input, probe, &mut out);
    } else {
        state.on_wall = false;
        push = open_movement(state, tuning, input, probe, pushables, dt, &mut out);
    }

    if probe.grounded {
        state.wall_jump_active = false;
    }

    update_facing(state, tuning, probe, push);

    out.velocity = state.velocity;
    out.mode = state.mode;
    out.flags = AnimationFlags {
        grounded: probe.grounded,
        running: push.moving
            || (input.has_direction() && probe.grounded && !state.movement_locked),
        on_wall: held_wall,
        pushing: push.pushing,
        pulling: push.pulling,
        facing_right: state.facing_right,
    };

    if state.mode != previous_mode {
        debug!("Motor mode {:?} -> {:?}", previous_mode, state.mode);
    }

    out
}

/// Rule 3: a wall can be held when touching one in the air and either the
/// lockout is clear or the player is already on it.
pub fn wall_eligible(state: &PlayerState, probe: &CollisionProbe) -> bool {
    probe.touching_wall() && !probe.grounded && (state.can_hold_wall || state.on_wall)
}

fn apply_expiries(state: &mut PlayerState, tuning: &MovementTuning, dt: f32) {
    let expired = state.timers.tick(dt, tuning.push_window);
    if expired.landing_recovery {
        state.movement_locked = false;
        state.mode = MovementMode::Grounded;
        debug!("Landing recovery finished");
    }
    if expired.wall_jump_lockout {
        state.can_hold_wall = true;
    }
    if expired.push_cooldown {
        state.can_push = true;
        // A zero-length window never arms, which ends the cycle here.
        state.push_running = state.timers.push_window.is_active();
    }
    if expired.push_window {
        state.push_running = false;
    }
}

fn land(state: &mut PlayerState, tuning: &MovementTuning, out: &mut MotorOutput) {
    state.velocity = Vec2::ZERO;
    let fall_distance = state.last_grounded_y - state.position.y;

    let hard = fall_distance > tuning.jump_recovery_margin;
    if hard {
        out.events.push(MotorEvent::Land);
    }

    if hard && tuning.jump_recovery > 0.0 {
        state.timers.landing_recovery.start(tuning.jump_recovery);
        state.movement_locked = true;
        state.mode = MovementMode::LandingRecovery;
        debug!(
            "Hard landing: fell {:.1}, locked for {:.2}s",
            fall_distance, tuning.jump_recovery
        );
    } else if !state.timers.landing_recovery.is_active() {
        state.movement_locked = false;
        state.mode = MovementMode::Grounded;
    }
}

fn track_falling(state: &mut PlayerState, tuning: &MovementTuning, out: &mut MotorOutput) {
    if state.velocity.y < -tuning.falling_threshold {
        if !state.was_falling {
            state.last_grounded_y = state.position.y;
            out.events.push(MotorEvent::Falling);
        }
        state.was_falling = true;
    } else {
        state.was_falling = false;
    }
}

fn wall_movement(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    input: &InputFrame,
    probe: &CollisionProbe,
    out: &mut MotorOutput,
) {
    let Some(wall) = probe.wall_side() else {
        return;
    };

    state.velocity = velocity::wall_slide(input, tuning);
    state.mode = MovementMode::WallSliding;

    if input.jump_pressed {
        let (kick, displacement) = velocity::wall_jump(wall, tuning);
        state.velocity = kick;
        state.position += displacement;
        out.displacement += displacement;
        state.wall_jump_active = true;
        state.on_wall = false;
        state.lock_wall_hold(tuning.wall_hold_lockout);
        state.mode = MovementMode::Airborne;
        out.events.push(MotorEvent::Jump);
        debug!("Wall jump off {:?} wall", wall);
    }
}

fn open_movement<H>(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    input: &InputFrame,
    probe: &CollisionProbe,
    pushables: &mut [PushableTarget<H>],
    dt: f32,
    out: &mut MotorOutput,
) -> PushOutcome {
    let entering_vy = state.velocity.y;

    if probe.grounded {
        state.velocity.x = velocity::ground_horizontal(input, tuning);
        state.mode = MovementMode::Grounded;
    } else {
        state.velocity.x = velocity::air_horizontal(
            state.velocity.x,
            input,
            tuning,
            state.wall_jump_active,
            dt,
        );
        state.mode = MovementMode::Airborne;
    }

    if input.jump_pressed && probe.grounded {
        state.velocity.y = tuning.jump_height;
        state.cancel_all_timers();
        if tuning.lockout_on_ground_jump {
            state.lock_wall_hold(tuning.wall_hold_lockout);
        }
        state.mode = MovementMode::Airborne;
        out.events.push(MotorEvent::Jump);
    }

    state.velocity.y =
        velocity::better_jumping(state.velocity.y, entering_vy, input.jump_held, tuning, dt);

    push::resolve(state, input, pushables, tuning)
}

fn update_facing(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    probe: &CollisionProbe,
    push: PushOutcome,
) {
    if !state.movement_locked && state.velocity.x.abs() > tuning.facing_threshold {
        state.facing_right = state.velocity.x > 0.0;
    }

    if state.mode == MovementMode::WallSliding {
        // Face away from the wall being held.
        if let Some(wall) = probe.wall_side() {
            state.facing_right = wall == Side::Left;
        }
    } else if let Some(side) = push.gripped {
        state.facing_right = side == Side::Right;
    }
}
