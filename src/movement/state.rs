//! Movement domain: the per-player motor state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::timers::TimerBank;

/// Discrete locomotion mode. Exactly one is current on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MovementMode {
    #[default]
    Grounded,
    /// In the air. `PlayerState::wall_jump_active` narrows the horizontal clamp.
    Airborne,
    WallSliding,
    /// Post-landing lock; only passive gravity shaping runs.
    LandingRecovery,
}

/// Everything the motor remembers between ticks.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mode: MovementMode,
    pub facing_right: bool,
    pub movement_locked: bool,
    pub on_wall: bool,
    pub wall_jump_active: bool,
    pub can_hold_wall: bool,
    /// Height recorded when the current fall started.
    pub last_grounded_y: f32,
    pub was_falling: bool,
    /// Previous tick's grounded probe, for the landing edge.
    pub was_grounded: bool,
    pub can_push: bool,
    pub push_running: bool,
    pub last_push_direction: f32,
    pub timers: TimerBank,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::spawn_at(Vec2::ZERO)
    }
}

impl PlayerState {
    pub fn spawn_at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            mode: MovementMode::Airborne,
            facing_right: true,
            movement_locked: false,
            on_wall: false,
            wall_jump_active: false,
            can_hold_wall: true,
            last_grounded_y: position.y,
            was_falling: false,
            was_grounded: false,
            can_push: true,
            push_running: false,
            last_push_direction: 0.0,
            timers: TimerBank::default(),
        }
    }

    /// Start the wall-hold lockout.
    pub(crate) fn lock_wall_hold(&mut self, duration: f32) {
        self.timers.wall_jump_lockout.start(duration);
        self.can_hold_wall = !self.timers.wall_jump_lockout.is_active();
    }

    /// Deactivate every countdown and restore what each one was holding back.
    /// Only reached from unlocked ticks, so the landing lock is never torn down here.
    pub(crate) fn cancel_all_timers(&mut self) {
        self.timers.cancel_all();
        self.can_hold_wall = true;
        self.can_push = true;
        self.push_running = false;
    }
}
