//! Movement domain: unit tests for the motor, its timers and the host seam.

use std::cell::Cell;

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::push::select_target;
use super::{
    AnimationSink, Bounds, CollisionProbe, CollisionQuery, ContactKind, Countdown, InputFrame,
    InputSource, MotorEvent, MotorOutput, MovementMode, MovementTuning, PlayerState,
    PushableTarget, Side, TickReport, TimerBank, drive_tick, sanitize_delta, step, wall_eligible,
};
use crate::content::Vec2Def;

const DT: f32 = 1.0 / 60.0;
/// Exactly representable, so countdowns land on zero without drift.
const EXACT_DT: f32 = 0.125;

fn standing() -> PlayerState {
    let mut state = PlayerState::spawn_at(Vec2::ZERO);
    state.mode = MovementMode::Grounded;
    state.was_grounded = true;
    state
}

fn airborne() -> PlayerState {
    PlayerState::spawn_at(Vec2::new(0.0, 200.0))
}

fn tick(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    input: InputFrame,
    probe: CollisionProbe,
    dt: f32,
) -> MotorOutput {
    let mut nothing: [PushableTarget<u32>; 0] = [];
    step(state, tuning, &input, &probe, &mut nothing, dt)
}

fn right_wall() -> CollisionProbe {
    CollisionProbe {
        right_wall: Some(2.0),
        ..CollisionProbe::AIRBORNE
    }
}

fn left_wall() -> CollisionProbe {
    CollisionProbe {
        left_wall: Some(2.0),
        ..CollisionProbe::AIRBORNE
    }
}

fn crate_on(side: Side, handle: u32) -> PushableTarget<u32> {
    PushableTarget {
        handle,
        side,
        kind: ContactKind::Pushable,
        velocity: Vec2::ZERO,
    }
}

fn walk(horizontal: f32) -> InputFrame {
    InputFrame {
        horizontal,
        ..default()
    }
}

fn hold(horizontal: f32) -> InputFrame {
    InputFrame {
        horizontal,
        interact_held: true,
        ..default()
    }
}

fn jump() -> InputFrame {
    InputFrame {
        jump_pressed: true,
        jump_held: true,
        ..default()
    }
}

/// Tuning whose push timings divide evenly by `EXACT_DT`.
fn exact_push_tuning() -> MovementTuning {
    MovementTuning {
        push_cooldown: 0.25,
        push_window: 0.5,
        ..default()
    }
}

// ============================================================================
// Timers
// ============================================================================

#[test]
fn test_countdown_reports_expiry_once() {
    let mut countdown = Countdown::default();
    countdown.start(0.25);
    assert!(countdown.is_active());

    assert!(!countdown.tick(0.125));
    assert!(countdown.tick(0.125));
    assert!(!countdown.is_active());
    assert_eq!(countdown.remaining, 0.0);
    assert!(!countdown.tick(0.125));
}

#[test]
fn test_countdown_with_no_duration_never_arms() {
    let mut countdown = Countdown::default();
    countdown.start(0.0);
    assert!(!countdown.is_active());
    countdown.start(-1.0);
    assert!(!countdown.is_active());
    assert!(!countdown.tick(1.0));
}

#[test]
fn test_push_cycle_runs_window_after_cooldown() {
    let mut timers = TimerBank::default();
    timers.start_push_cycle(0.25, 0.5);
    assert!(timers.push_cooldown.is_active());
    assert!(!timers.push_window.is_active());

    timers.tick(0.125, 0.5);
    let expired = timers.tick(0.125, 0.5);
    assert!(expired.push_cooldown);
    assert!(timers.push_window.is_active());
    assert_eq!(timers.push_window.remaining, 0.5);
    assert!(timers.push_cycle_active());

    for _ in 0..3 {
        assert!(!timers.tick(0.125, 0.5).push_window);
    }
    assert!(timers.tick(0.125, 0.5).push_window);
    assert!(!timers.push_cycle_active());
}

#[test]
fn test_push_cycle_without_cooldown_starts_at_window() {
    let mut timers = TimerBank::default();
    timers.start_push_cycle(0.0, 0.5);
    assert!(!timers.push_cooldown.is_active());
    assert!(timers.push_window.is_active());
}

#[test]
fn test_cancel_all_deactivates_every_timer() {
    let mut timers = TimerBank::default();
    timers.landing_recovery.start(1.0);
    timers.wall_jump_lockout.start(1.0);
    timers.start_push_cycle(1.0, 1.0);
    assert!(timers.any_active());

    timers.cancel_all();
    assert!(!timers.any_active());
}

// ============================================================================
// Input boundary
// ============================================================================

#[test]
fn test_input_axes_are_clamped_and_cleaned() {
    let frame = InputFrame {
        horizontal: 3.5,
        vertical: f32::NAN,
        jump_held: true,
        ..default()
    }
    .sanitized();
    assert_eq!(frame.horizontal, 1.0);
    assert_eq!(frame.vertical, 0.0);
    assert!(frame.jump_held);

    let frame = InputFrame {
        horizontal: f32::NEG_INFINITY,
        vertical: -7.0,
        ..default()
    }
    .sanitized();
    assert_eq!(frame.horizontal, 0.0);
    assert_eq!(frame.vertical, -1.0);
}

#[test]
fn test_bad_frame_time_becomes_zero() {
    assert_eq!(sanitize_delta(-0.5), 0.0);
    assert_eq!(sanitize_delta(f32::NAN), 0.0);
    assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
    assert_eq!(sanitize_delta(DT), DT);
}

// ============================================================================
// Ground and air movement
// ============================================================================

#[test]
fn test_ground_speed_is_set_directly() {
    let tuning = MovementTuning::default();
    let mut state = standing();

    let out = tick(&mut state, &tuning, walk(1.0), CollisionProbe::GROUNDED, DT);
    assert_eq!(out.velocity.x, tuning.speed);
    assert_eq!(out.mode, MovementMode::Grounded);
    assert!(out.flags.grounded);
    assert!(out.flags.running);

    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::GROUNDED, DT);
    assert_eq!(out.velocity.x, 0.0);
    assert!(!out.flags.running);
}

#[test]
fn test_ground_jump_resets_push_state() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    state.can_push = false;
    state.push_running = true;
    state.timers.start_push_cycle(tuning.push_cooldown, tuning.push_window);

    let input = InputFrame {
        horizontal: 1.0,
        ..jump()
    };
    let out = tick(&mut state, &tuning, input, CollisionProbe::GROUNDED, DT);

    assert_eq!(out.velocity.y, tuning.jump_height);
    assert_eq!(out.mode, MovementMode::Airborne);
    assert!(out.emitted(MotorEvent::Jump));
    assert!(state.can_push);
    assert!(!state.push_running);
    assert!(!state.timers.push_cycle_active());
    // Ground jumps also arm the wall-hold lockout
    assert!(state.timers.wall_jump_lockout.is_active());
    assert!(!state.can_hold_wall);
}

#[test]
fn test_ground_jump_without_lockout_keeps_wall_hold() {
    let tuning = MovementTuning {
        lockout_on_ground_jump: false,
        ..default()
    };
    let mut state = standing();

    tick(&mut state, &tuning, jump(), CollisionProbe::GROUNDED, DT);
    assert!(state.can_hold_wall);
    assert!(!state.timers.any_active());
}

#[test]
fn test_air_control_integrates_then_clamps() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    let right = InputFrame {
        horizontal: 1.0,
        ..default()
    };

    let out = tick(&mut state, &tuning, right, CollisionProbe::AIRBORNE, DT);
    assert!((out.velocity.x - tuning.air_accel * DT).abs() < 1e-4);

    for _ in 0..120 {
        tick(&mut state, &tuning, right, CollisionProbe::AIRBORNE, DT);
    }
    assert_eq!(state.velocity.x, tuning.speed);
}

#[test]
fn test_better_jumping_shapes_vertical_speed() {
    let tuning = MovementTuning::default();

    let mut rising = airborne();
    rising.velocity.y = 100.0;
    let input = InputFrame {
        jump_held: true,
        ..default()
    };
    let held = tick(&mut rising, &tuning, input, CollisionProbe::AIRBORNE, DT);
    let boost = tuning.gravity_scale * tuning.jump_multiplier * DT;
    assert!((held.velocity.y - (100.0 + boost)).abs() < 1e-4);

    let mut released = airborne();
    released.velocity.y = 100.0;
    let out = tick(&mut released, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert_eq!(out.velocity.y, 100.0);

    let mut falling = airborne();
    falling.velocity.y = -100.0;
    let out = tick(&mut falling, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    let drag = tuning.gravity_scale * tuning.fall_multiplier * DT;
    assert!((out.velocity.y - (-100.0 - drag)).abs() < 1e-4);
}

#[test]
fn test_falling_event_fires_on_entry_only() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    state.velocity.y = -50.0;

    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert!(out.emitted(MotorEvent::Falling));
    assert_eq!(state.last_grounded_y, 200.0);

    state.position.y = 150.0;
    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert!(!out.emitted(MotorEvent::Falling));
    assert_eq!(state.last_grounded_y, 200.0);
}

#[test]
fn test_slow_descent_is_not_falling() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    state.velocity.y = -tuning.falling_threshold * 0.5;

    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert!(!out.emitted(MotorEvent::Falling));
    assert!(!state.was_falling);
}

// ============================================================================
// Landing
// ============================================================================

/// Fall from `height`, then touch down at y = 0.
fn land_from(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    height: f32,
    dt: f32,
) -> MotorOutput {
    state.position.y = height;
    state.velocity.y = -300.0;
    tick(state, tuning, InputFrame::default(), CollisionProbe::AIRBORNE, dt);
    state.position.y = 0.0;
    tick(state, tuning, InputFrame::default(), CollisionProbe::GROUNDED, dt)
}

#[test]
fn test_hard_landing_locks_for_recovery_time() {
    let tuning = MovementTuning {
        jump_recovery: 0.5,
        ..default()
    };
    let mut state = airborne();

    let out = land_from(&mut state, &tuning, tuning.jump_recovery_margin + 50.0, EXACT_DT);
    assert!(out.emitted(MotorEvent::Land));
    assert_eq!(out.mode, MovementMode::LandingRecovery);
    assert_eq!(out.velocity.x, 0.0);
    assert!(state.movement_locked);

    let mut locked_ticks = 1;
    loop {
        let out = tick(
            &mut state,
            &tuning,
            walk(1.0),
            CollisionProbe::GROUNDED,
            EXACT_DT,
        );
        if !state.movement_locked {
            assert_eq!(out.mode, MovementMode::Grounded);
            assert_eq!(out.velocity.x, tuning.speed);
            break;
        }
        assert_eq!(out.velocity.x, 0.0);
        locked_ticks += 1;
    }
    assert_eq!(locked_ticks as f32 * EXACT_DT, tuning.jump_recovery);
}

#[test]
fn test_soft_landing_goes_straight_to_grounded() {
    let tuning = MovementTuning::default();
    let mut state = airborne();

    let out = land_from(&mut state, &tuning, tuning.jump_recovery_margin - 1.0, DT);
    assert!(!out.emitted(MotorEvent::Land));
    assert_eq!(out.mode, MovementMode::Grounded);
    assert!(!state.movement_locked);
    assert!(!state.timers.landing_recovery.is_active());
}

#[test]
fn test_zero_recovery_never_locks() {
    let tuning = MovementTuning {
        jump_recovery: 0.0,
        ..default()
    };
    let mut state = airborne();

    let out = land_from(&mut state, &tuning, 1000.0, DT);
    assert_eq!(out.mode, MovementMode::Grounded);
    assert!(!state.movement_locked);
    // The drop still reads as a hard landing
    assert!(out.emitted(MotorEvent::Land));
}

#[test]
fn test_held_jump_on_flat_ground_lands_softly() {
    let tuning = MovementTuning::default();
    let held = InputFrame {
        jump_held: true,
        ..default()
    };
    let mut state = standing();
    let mut out = tick(&mut state, &tuning, jump(), CollisionProbe::GROUNDED, DT);
    let mut events = out.events.clone();
    let mut peak: f32 = 0.0;
    let mut landed = false;

    for _ in 0..600 {
        // Host integration with world gravity
        state.position += out.velocity * DT;
        state.velocity.y -= tuning.gravity_scale * DT;
        peak = peak.max(state.position.y);
        landed = state.position.y <= 0.0;
        if landed {
            state.position.y = 0.0;
        }
        let probe = if landed {
            CollisionProbe::GROUNDED
        } else {
            CollisionProbe::AIRBORNE
        };
        out = tick(&mut state, &tuning, held, probe, DT);
        events.extend(out.events.iter().copied());
        if landed {
            break;
        }
    }

    assert!(landed);
    assert!(events.contains(&MotorEvent::Falling));
    assert!(!events.contains(&MotorEvent::Land));
    assert_eq!(out.mode, MovementMode::Grounded);
    assert!(!state.movement_locked);
    assert!((peak - tuning.held_jump_apex()).abs() < tuning.held_jump_apex() * 0.05);
    assert!(peak < tuning.jump_recovery_margin);
}

#[test]
fn test_locked_ticks_only_integrate_gravity() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    land_from(&mut state, &tuning, 1000.0, DT);

    let input = InputFrame {
        horizontal: -1.0,
        ..jump()
    };
    let before = state.velocity.y;
    let out = tick(&mut state, &tuning, input, CollisionProbe::GROUNDED, DT);
    let expected = before + tuning.gravity_scale * tuning.jump_multiplier * DT;
    assert_eq!(out.velocity.x, 0.0);
    assert!((out.velocity.y - expected).abs() < 1e-4);
    assert!(!out.emitted(MotorEvent::Jump));
    assert!(!out.flags.running);
    assert!(out.flags.facing_right);
}

// ============================================================================
// Walls
// ============================================================================

#[test]
fn test_wall_slide_holds_constant_descent() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    state.velocity.y = -400.0;

    for _ in 0..5 {
        let out = tick(&mut state, &tuning, InputFrame::default(), right_wall(), DT);
        assert_eq!(out.mode, MovementMode::WallSliding);
        assert_eq!(out.velocity.y, -tuning.wall_slide_speed);
        assert!(out.flags.on_wall);
        assert!(!out.flags.facing_right);
    }
}

#[test]
fn test_wall_slide_horizontal_uses_sprint_speed() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    let input = InputFrame {
        horizontal: -1.0,
        sprint_held: true,
        ..default()
    };

    let out = tick(&mut state, &tuning, input, left_wall(), DT);
    assert_eq!(out.velocity.x, -tuning.sprint_speed);
    assert!(out.flags.facing_right);
}

#[test]
fn test_ground_beats_wall_contact() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let probe = CollisionProbe {
        grounded: true,
        right_wall: Some(1.0),
        ..default()
    };

    let out = tick(&mut state, &tuning, InputFrame::default(), probe, DT);
    assert_eq!(out.mode, MovementMode::Grounded);
    assert!(!out.flags.on_wall);
    assert!(!wall_eligible(&state, &probe));
}

#[test]
fn test_wall_jump_kicks_away_and_locks_out_wall() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    tick(&mut state, &tuning, InputFrame::default(), right_wall(), DT);
    let start_x = state.position.x;

    let out = tick(&mut state, &tuning, jump(), right_wall(), DT);
    let offset = tuning.wall_detect_distance + tuning.wall_jump_clearance;
    assert!(out.emitted(MotorEvent::Jump));
    assert_eq!(out.mode, MovementMode::Airborne);
    // The kick frame still reports the wall it left
    assert!(out.flags.on_wall);
    assert_eq!(
        out.velocity,
        Vec2::new(-tuning.wall_jump_velocity.x, tuning.wall_jump_velocity.y)
    );
    assert_eq!(out.displacement, Vec2::new(-offset, 0.0));
    assert_eq!(state.position.x, start_x - offset);
    assert!(state.wall_jump_active);
    assert!(!state.can_hold_wall);

    // Still touching the wall, but the lockout keeps the player off it
    let out = tick(&mut state, &tuning, InputFrame::default(), right_wall(), DT);
    assert_eq!(out.mode, MovementMode::Airborne);
    assert!(!out.flags.on_wall);
}

#[test]
fn test_wall_jump_off_left_wall_goes_right() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    tick(&mut state, &tuning, InputFrame::default(), left_wall(), DT);

    let out = tick(&mut state, &tuning, jump(), left_wall(), DT);
    assert_eq!(out.velocity.x, tuning.wall_jump_velocity.x);
    assert!(out.displacement.x > 0.0);
    assert!(out.flags.facing_right);
}

#[test]
fn test_wall_can_be_held_again_after_lockout() {
    let tuning = MovementTuning {
        wall_hold_lockout: 0.25,
        ..default()
    };
    let mut state = airborne();
    tick(&mut state, &tuning, InputFrame::default(), right_wall(), EXACT_DT);
    tick(&mut state, &tuning, jump(), right_wall(), EXACT_DT);

    let out = tick(&mut state, &tuning, InputFrame::default(), right_wall(), EXACT_DT);
    assert_eq!(out.mode, MovementMode::Airborne);

    let out = tick(&mut state, &tuning, InputFrame::default(), right_wall(), EXACT_DT);
    assert!(state.can_hold_wall);
    assert_eq!(out.mode, MovementMode::WallSliding);
}

#[test]
fn test_wall_jump_narrows_air_clamp_until_grounded() {
    let tuning = MovementTuning {
        wall_jump_velocity: Vec2Def { x: 150.0, y: 520.0 },
        ..default()
    };
    let mut state = airborne();
    tick(&mut state, &tuning, InputFrame::default(), left_wall(), DT);
    tick(&mut state, &tuning, jump(), left_wall(), DT);

    let right = InputFrame {
        horizontal: 1.0,
        ..default()
    };
    for _ in 0..60 {
        let out = tick(&mut state, &tuning, right, CollisionProbe::AIRBORNE, DT);
        assert!(out.velocity.x.abs() <= tuning.air_clamp(true));
    }
    assert_eq!(state.velocity.x, 150.0);

    tick(&mut state, &tuning, right, CollisionProbe::GROUNDED, DT);
    assert!(!state.wall_jump_active);
    assert_eq!(tuning.air_clamp(false), tuning.speed);
}

#[test]
fn test_losing_wall_returns_to_airborne() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    tick(&mut state, &tuning, InputFrame::default(), right_wall(), DT);
    assert!(state.on_wall);

    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert_eq!(out.mode, MovementMode::Airborne);
    assert!(!state.on_wall);
}

// ============================================================================
// Push and pull
// ============================================================================

#[test]
fn test_push_left_crate() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let mut crates = [crate_on(Side::Left, 1)];

    let out = step(&mut state, &tuning, &hold(-1.0), &CollisionProbe::GROUNDED, &mut crates, DT);
    assert_eq!(out.velocity.x, -tuning.push_speed);
    assert_eq!(crates[0].velocity.x, -tuning.pull_boost);
    assert!(out.flags.pushing);
    assert!(!out.flags.pulling);
    assert!(out.flags.running);
    assert!(!out.flags.facing_right);
}

#[test]
fn test_pull_right_crate() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let mut crates = [crate_on(Side::Right, 1)];

    let out = step(&mut state, &tuning, &hold(-1.0), &CollisionProbe::GROUNDED, &mut crates, DT);
    assert!(out.flags.pulling);
    assert!(!out.flags.pushing);
    assert_eq!(crates[0].velocity.x, -tuning.pull_boost);
    // Gripping faces the object even while backing away from it
    assert!(out.flags.facing_right);
}

#[test]
fn test_left_crate_wins_tie() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let mut crates = [crate_on(Side::Right, 1), crate_on(Side::Left, 2)];
    assert_eq!(select_target(&crates), Some(1));

    step(&mut state, &tuning, &hold(1.0), &CollisionProbe::GROUNDED, &mut crates, DT);
    assert_eq!(crates[0].velocity.x, 0.0);
    assert_eq!(crates[1].velocity.x, tuning.pull_boost);
}

#[test]
fn test_solid_contacts_are_not_pushed() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let mut contacts = [PushableTarget {
        kind: ContactKind::Solid,
        ..crate_on(Side::Left, 1)
    }];

    let out = step(&mut state, &tuning, &hold(-1.0), &CollisionProbe::GROUNDED, &mut contacts, DT);
    assert_eq!(out.velocity.x, -tuning.speed);
    assert_eq!(contacts[0].velocity.x, 0.0);
    assert!(!out.flags.pushing && !out.flags.pulling);
}

#[test]
fn test_holding_without_direction_grips_in_place() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    state.velocity.x = 80.0;
    let mut crates = [crate_on(Side::Right, 1)];

    let out = step(&mut state, &tuning, &hold(0.0), &CollisionProbe::GROUNDED, &mut crates, DT);
    assert_eq!(out.velocity.x, 0.0);
    assert_eq!(crates[0].velocity.x, 0.0);
    assert!(out.flags.pushing && out.flags.pulling);
    assert!(!out.flags.running);
}

#[test]
fn test_interact_without_crate_is_plain_movement() {
    let tuning = MovementTuning::default();
    let mut state = standing();

    let out = tick(&mut state, &tuning, hold(1.0), CollisionProbe::GROUNDED, DT);
    assert_eq!(out.velocity.x, tuning.speed);
    assert!(!out.flags.pushing && !out.flags.pulling);
}

#[test]
fn test_push_cycle_phases() {
    let tuning = exact_push_tuning();
    let mut state = standing();
    let mut crates = [crate_on(Side::Right, 1)];
    let push = |state: &mut PlayerState, crates: &mut [PushableTarget<u32>]| {
        step(state, &tuning, &hold(1.0), &CollisionProbe::GROUNDED, crates, EXACT_DT)
    };

    // Tick 0 starts the cycle in its cooldown phase
    let out = push(&mut state, &mut crates);
    assert!(out.flags.pushing && !out.flags.pulling);
    assert!(!state.can_push);
    assert!(state.push_running);

    // Cooldown: the player grips but cannot move the crate
    let out = push(&mut state, &mut crates);
    assert_eq!(out.velocity.x, 0.0);
    assert_eq!(crates[0].velocity.x, tuning.pull_boost);

    // Cooldown expires: pushing resumes inside the window
    let out = push(&mut state, &mut crates);
    assert!(state.can_push);
    assert!(state.push_running);
    assert!(state.timers.push_window.is_active());
    assert_eq!(out.velocity.x, tuning.push_speed);
    assert_eq!(crates[0].velocity.x, 2.0 * tuning.pull_boost);

    for _ in 0..3 {
        push(&mut state, &mut crates);
        assert!(state.push_running);
        assert!(state.can_push);
    }

    // Window expires and the next qualifying tick opens a new cycle
    push(&mut state, &mut crates);
    assert!(state.timers.push_cooldown.is_active());
    assert!(!state.can_push);
}

#[test]
fn test_push_reversal_restarts_cycle() {
    let tuning = exact_push_tuning();
    let mut state = standing();
    let mut crates = [crate_on(Side::Left, 1)];

    for _ in 0..4 {
        step(&mut state, &tuning, &hold(-1.0), &CollisionProbe::GROUNDED, &mut crates, EXACT_DT);
    }
    assert!(state.timers.push_window.is_active());
    assert_eq!(state.last_push_direction, -1.0);

    let out = step(
        &mut state,
        &tuning,
        &hold(1.0),
        &CollisionProbe::GROUNDED,
        &mut crates,
        EXACT_DT,
    );
    assert!(out.flags.pulling);
    assert_eq!(out.velocity.x, tuning.push_speed);
    assert_eq!(state.last_push_direction, 1.0);
    assert!(!state.timers.push_window.is_active());
    assert!(state.timers.push_cooldown.is_active());
    assert_eq!(state.timers.push_cooldown.remaining, tuning.push_cooldown);
}

#[test]
fn test_no_push_while_wall_sliding() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    let mut crates = [crate_on(Side::Right, 1)];

    let out = step(&mut state, &tuning, &hold(1.0), &right_wall(), &mut crates, DT);
    assert_eq!(out.mode, MovementMode::WallSliding);
    assert_eq!(crates[0].velocity.x, 0.0);
    assert!(!out.flags.pushing);
}

// ============================================================================
// Zero-length ticks and facing
// ============================================================================

#[test]
fn test_zero_dt_ticks_are_idempotent() {
    let tuning = MovementTuning::default();
    let walking = InputFrame {
        horizontal: 1.0,
        ..default()
    };

    for (mut state, input, probe) in [
        (standing(), walking, CollisionProbe::GROUNDED),
        (airborne(), InputFrame::default(), right_wall()),
        (airborne(), walking, CollisionProbe::AIRBORNE),
    ] {
        // Let edge-triggered bookkeeping settle first
        for _ in 0..3 {
            tick(&mut state, &tuning, input, probe, 0.0);
        }
        let first = tick(&mut state, &tuning, input, probe, 0.0);
        let settled = state.clone();
        let second = tick(&mut state, &tuning, input, probe, 0.0);
        assert_eq!(first, second);
        assert_eq!(state, settled);
    }
}

#[test]
fn test_facing_follows_velocity_past_threshold() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    state.velocity.x = -(tuning.facing_threshold * 0.5);

    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert!(out.flags.facing_right);

    state.velocity.x = -100.0;
    let out = tick(&mut state, &tuning, InputFrame::default(), CollisionProbe::AIRBORNE, DT);
    assert!(!out.flags.facing_right);
}

// ============================================================================
// Host seam
// ============================================================================

struct FakeWorld {
    probe: CollisionProbe,
    crates: Vec<PushableTarget<u32>>,
    probes: Cell<u32>,
    scans: Cell<u32>,
}

impl FakeWorld {
    fn new(probe: CollisionProbe, crates: Vec<PushableTarget<u32>>) -> Self {
        Self {
            probe,
            crates,
            probes: Cell::new(0),
            scans: Cell::new(0),
        }
    }
}

impl CollisionQuery for FakeWorld {
    type Handle = u32;

    fn probe(&self, _bounds: Bounds, _tuning: &MovementTuning) -> CollisionProbe {
        self.probes.set(self.probes.get() + 1);
        self.probe
    }

    fn pushables(&self, _bounds: Bounds, _tuning: &MovementTuning) -> Vec<PushableTarget<u32>> {
        self.scans.set(self.scans.get() + 1);
        self.crates.clone()
    }
}

struct Script(InputFrame);

impl InputSource for Script {
    fn poll(&mut self) -> InputFrame {
        self.0
    }
}

#[derive(Default)]
struct Recorder {
    outputs: Vec<MotorOutput>,
}

impl AnimationSink for Recorder {
    fn apply(&mut self, output: &MotorOutput) {
        self.outputs.push(output.clone());
    }
}

fn bounds() -> Bounds {
    Bounds::new(Vec2::ZERO, Vec2::new(24.0, 48.0))
}

fn drive(
    state: &mut PlayerState,
    tuning: &MovementTuning,
    world: &FakeWorld,
    input: InputFrame,
    sink: &mut Recorder,
) -> TickReport<u32> {
    drive_tick(state, tuning, world, &mut Script(input), sink, bounds(), DT)
}

#[test]
fn test_drive_tick_sanitizes_before_stepping() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let world = FakeWorld::new(CollisionProbe::GROUNDED, Vec::new());
    let mut input = Script(InputFrame {
        horizontal: 9.0,
        vertical: f32::NAN,
        ..default()
    });
    let mut sink = Recorder::default();

    let report = drive_tick(&mut state, &tuning, &world, &mut input, &mut sink, bounds(), -1.0);
    assert_eq!(report.input.horizontal, 1.0);
    assert_eq!(report.input.vertical, 0.0);
    assert_eq!(report.dt, 0.0);
    assert_eq!(report.output.velocity.x, tuning.speed);
    assert_eq!(sink.outputs, vec![report.output.clone()]);
    assert_eq!(world.probes.get(), 1);
}

#[test]
fn test_drive_tick_scans_only_while_interacting() {
    let tuning = MovementTuning::default();
    let mut state = standing();
    let world = FakeWorld::new(CollisionProbe::GROUNDED, vec![crate_on(Side::Right, 9)]);
    let mut sink = Recorder::default();

    let report = drive(&mut state, &tuning, &world, walk(1.0), &mut sink);
    assert_eq!(world.scans.get(), 0);
    assert!(report.pushables.is_empty());

    let report = drive(&mut state, &tuning, &world, hold(1.0), &mut sink);
    assert_eq!(world.scans.get(), 1);
    assert_eq!(report.sighted[0].velocity.x, 0.0);
    assert_eq!(report.pushables[0].handle, 9);
    assert_eq!(report.pushables[0].velocity.x, tuning.pull_boost);
}

#[test]
fn test_drive_tick_reports_starting_body() {
    let tuning = MovementTuning::default();
    let mut state = airborne();
    state.velocity = Vec2::new(12.0, -40.0);
    let world = FakeWorld::new(CollisionProbe::AIRBORNE, Vec::new());
    let mut sink = Recorder::default();

    let report = drive(&mut state, &tuning, &world, InputFrame::default(), &mut sink);
    assert_eq!(report.position, Vec2::new(0.0, 200.0));
    assert_eq!(report.velocity, Vec2::new(12.0, -40.0));
    assert!(report.output.emitted(MotorEvent::Falling));
}

// ============================================================================
// Seeded invariant sweep
// ============================================================================

fn random_input(rng: &mut ChaCha8Rng) -> InputFrame {
    let horizontal = match rng.random_range(0..4) {
        0 => 0.0,
        1 => -1.0,
        2 => 1.0,
        _ => rng.random_range(-1.0..=1.0),
    };
    InputFrame {
        horizontal,
        vertical: rng.random_range(-1.0..=1.0),
        jump_pressed: rng.random_bool(0.1),
        jump_held: rng.random_bool(0.5),
        sprint_held: rng.random_bool(0.3),
        interact_held: rng.random_bool(0.3),
    }
}

fn random_probe(rng: &mut ChaCha8Rng) -> CollisionProbe {
    CollisionProbe {
        grounded: rng.random_bool(0.4),
        left_wall: rng.random_bool(0.2).then(|| rng.random_range(0.0..4.0)),
        right_wall: rng.random_bool(0.2).then(|| rng.random_range(0.0..4.0)),
    }
}

fn random_contacts(rng: &mut ChaCha8Rng) -> Vec<PushableTarget<u32>> {
    (0..rng.random_range(0..3))
        .map(|handle| PushableTarget {
            handle,
            side: if rng.random_bool(0.5) { Side::Left } else { Side::Right },
            kind: if rng.random_bool(0.7) {
                ContactKind::Pushable
            } else {
                ContactKind::Solid
            },
            velocity: Vec2::new(rng.random_range(-50.0..50.0), 0.0),
        })
        .collect()
}

fn assert_invariants(state: &PlayerState, out: &MotorOutput, tuning: &MovementTuning, seed: u64) {
    assert_eq!(out.mode, state.mode, "seed {seed}");
    assert_eq!(
        state.movement_locked,
        state.mode == MovementMode::LandingRecovery,
        "seed {seed}: lock and mode disagree in {:?}",
        state.mode
    );

    let vx = out.velocity.x.abs();
    match out.mode {
        MovementMode::Grounded => assert!(vx <= tuning.speed, "seed {seed}: vx {vx}"),
        MovementMode::Airborne => {
            let limit = tuning.air_clamp(state.wall_jump_active);
            assert!(vx <= limit + 1e-3, "seed {seed}: vx {vx} over {limit}");
        }
        MovementMode::WallSliding => {
            assert_eq!(out.velocity.y, -tuning.wall_slide_speed, "seed {seed}")
        }
        MovementMode::LandingRecovery => {}
    }

    for countdown in [
        state.timers.landing_recovery,
        state.timers.wall_jump_lockout,
        state.timers.push_cooldown,
        state.timers.push_window,
    ] {
        assert!(countdown.remaining >= 0.0, "seed {seed}");
        if !countdown.is_active() {
            assert_eq!(countdown.remaining, 0.0, "seed {seed}");
        }
    }
    assert_eq!(
        state.can_hold_wall,
        !state.timers.wall_jump_lockout.is_active(),
        "seed {seed}"
    );
    if out.mode == MovementMode::WallSliding {
        assert!(out.flags.on_wall, "seed {seed}");
    } else if out.flags.on_wall {
        // Only a wall jump leaves the wall while still flagging it
        assert!(out.emitted(MotorEvent::Jump), "seed {seed}");
        assert!(state.wall_jump_active, "seed {seed}");
    }
}

#[test]
fn test_invariants_hold_under_random_play() {
    let tuning = MovementTuning::default();

    for seed in 0..32u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = PlayerState::spawn_at(Vec2::new(0.0, rng.random_range(0.0..800.0)));

        for _ in 0..600 {
            let input = random_input(&mut rng);
            let probe = random_probe(&mut rng);
            let mut contacts = if input.interact_held {
                random_contacts(&mut rng)
            } else {
                Vec::new()
            };
            let dt = if rng.random_bool(0.05) { 0.0 } else { DT };

            let out = step(&mut state, &tuning, &input, &probe, &mut contacts, dt);
            assert_invariants(&state, &out, &tuning, seed);

            // Crude host integration
            state.position += out.velocity * dt + out.displacement;
            if !probe.grounded {
                state.velocity.y -= tuning.gravity_scale * dt;
            }
            if probe.grounded {
                state.position.y = state.position.y.min(0.0);
            }
        }
    }
}
