//! Debug domain: overlay and status state.

use bevy::prelude::*;

/// Resource tracking debug tooling state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the motor info overlay is visible
    pub show_info: bool,
    /// Traces written this session, used to number dump files
    pub dumps_written: u32,
    /// Message shown in the overlay until its timer runs out
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Count down the status message and drop it once expired.
    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }
}
