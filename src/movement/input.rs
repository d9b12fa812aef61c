//! Movement domain: the per-tick input frame and its boundary sanitation.

use serde::{Deserialize, Serialize};

/// One tick of player intent, already sampled from the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub horizontal: f32,
    pub vertical: f32,
    /// Rising edge of the jump button this tick.
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub sprint_held: bool,
    pub interact_held: bool,
}

impl InputFrame {
    /// Clamp both axes into `[-1, 1]`; non-finite values become zero.
    ///
    /// The motor assumes sanitized input, so adapters call this before
    /// handing a frame over.
    pub fn sanitized(self) -> Self {
        Self {
            horizontal: clamp_axis(self.horizontal),
            vertical: clamp_axis(self.vertical),
            ..self
        }
    }

    pub fn has_direction(&self) -> bool {
        self.horizontal != 0.0
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Frame time as the motor accepts it: negative or non-finite deltas become zero.
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
