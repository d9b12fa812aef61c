//! Validation for loaded movement tuning.

use crate::movement::MovementTuning;

/// A tuning value that the motor cannot run with.
#[derive(Debug, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f32,
    pub reason: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "movement tuning field '{}' = {} {}",
            self.field, self.value, self.reason
        )
    }
}

/// Helper macro for a field that must be finite and above a floor
macro_rules! check_min {
    ($errors:expr, $tuning:expr, $field:ident, $min:expr, $reason:expr) => {
        let value = $tuning.$field;
        if !value.is_finite() || value < $min {
            $errors.push(ValidationError {
                field: stringify!($field),
                value,
                reason: $reason,
            });
        }
    };
}

/// Validate tuning values.
/// Returns a list of validation errors, empty if everything is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    const POSITIVE: &str = "must be greater than zero";
    const NON_NEGATIVE: &str = "must not be negative";

    check_min!(errors, tuning, speed, f32::MIN_POSITIVE, POSITIVE);
    check_min!(errors, tuning, sprint_speed, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, air_accel, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, jump_height, f32::MIN_POSITIVE, POSITIVE);
    check_min!(errors, tuning, fall_multiplier, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, jump_multiplier, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, gravity_scale, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, wall_slide_speed, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, wall_detect_distance, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, wall_jump_clearance, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, wall_hold_lockout, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, jump_recovery_margin, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, jump_recovery, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, falling_threshold, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, facing_threshold, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, push_speed, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, pull_boost, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, push_cooldown, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, push_window, 0.0, NON_NEGATIVE);
    check_min!(errors, tuning, ground_probe_distance, f32::MIN_POSITIVE, POSITIVE);

    if tuning.jump_multiplier >= 1.0 {
        errors.push(ValidationError {
            field: "jump_multiplier",
            value: tuning.jump_multiplier,
            reason: "must be below 1 or a held jump never comes down",
        });
    }

    // An ordinary held jump must not count as a hard landing
    let apex = tuning.held_jump_apex();
    if apex.is_finite() && tuning.jump_recovery_margin <= apex {
        errors.push(ValidationError {
            field: "jump_recovery_margin",
            value: tuning.jump_recovery_margin,
            reason: "must exceed the held-jump apex",
        });
    }

    let kick = tuning.wall_jump_velocity;
    if !kick.x.is_finite() || kick.x <= 0.0 {
        errors.push(ValidationError {
            field: "wall_jump_velocity.x",
            value: kick.x,
            reason: POSITIVE,
        });
    }
    if !kick.y.is_finite() || kick.y < 0.0 {
        errors.push(ValidationError {
            field: "wall_jump_velocity.y",
            value: kick.y,
            reason: NON_NEGATIVE,
        });
    }

    errors
}
