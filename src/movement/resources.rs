//! Movement domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::Vec2Def;

/// Every number the motor reads. Loaded from `assets/data/movement.ron`.
///
/// Units are world units (pixels) and seconds. `gravity_scale` is the
/// magnitude the better-jumping shaping multiplies, and the host uses the
/// same value for the physics world's gravity.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub speed: f32,
    pub sprint_speed: f32,
    pub air_accel: f32,
    pub jump_height: f32,
    pub fall_multiplier: f32,
    pub jump_multiplier: f32,
    pub gravity_scale: f32,

    pub wall_slide_speed: f32,
    pub wall_jump_velocity: Vec2Def,
    pub wall_detect_distance: f32,
    /// Extra lateral nudge on top of `wall_detect_distance` when leaving a wall.
    pub wall_jump_clearance: f32,
    /// Seconds a wall cannot be grabbed after a jump.
    pub wall_hold_lockout: f32,
    /// Whether a ground jump also arms the wall-hold lockout.
    pub lockout_on_ground_jump: bool,

    pub jump_recovery_margin: f32,
    pub jump_recovery: f32,
    /// Downward speed past which the player counts as falling.
    pub falling_threshold: f32,
    /// Horizontal speed past which facing follows velocity.
    pub facing_threshold: f32,

    pub push_speed: f32,
    pub pull_boost: f32,
    pub push_cooldown: f32,
    pub push_window: f32,

    /// Downward reach of the ground box cast.
    pub ground_probe_distance: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: 260.0,
            sprint_speed: 380.0,
            air_accel: 1400.0,
            jump_height: 560.0,
            fall_multiplier: 1.5,
            jump_multiplier: 0.4,
            gravity_scale: 980.0,
            wall_slide_speed: 90.0,
            wall_jump_velocity: Vec2Def { x: 300.0, y: 520.0 },
            wall_detect_distance: 4.0,
            wall_jump_clearance: 0.1,
            wall_hold_lockout: 0.25,
            lockout_on_ground_jump: true,
            jump_recovery_margin: 320.0,
            jump_recovery: 0.35,
            falling_threshold: 1.5,
            facing_threshold: 0.5,
            push_speed: 120.0,
            pull_boost: 40.0,
            push_cooldown: 0.15,
            push_window: 0.6,
            ground_probe_distance: 0.1,
        }
    }
}

impl MovementTuning {
    /// Apex of a ground jump with the button held the whole way up.
    ///
    /// While rising and held, better jumping hands back
    /// `jump_multiplier` of the host gravity, so the net deceleration is
    /// `gravity_scale * (1 - jump_multiplier)`.
    pub fn held_jump_apex(&self) -> f32 {
        let deceleration = self.gravity_scale * (1.0 - self.jump_multiplier);
        if deceleration <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_height * self.jump_height / (2.0 * deceleration)
    }

    /// Horizontal clamp for airborne movement.
    pub fn air_clamp(&self, wall_jump_active: bool) -> f32 {
        if wall_jump_active {
            self.wall_jump_velocity.x
        } else {
            self.speed
        }
    }

    /// Ray length for wall probes measured from the collider center.
    pub fn wall_reach(&self, half_width: f32) -> f32 {
        half_width + self.wall_detect_distance
    }
}
