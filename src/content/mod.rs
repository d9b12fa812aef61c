//! Content domain: data-driven tuning loaded from `assets/data`.

mod data;
mod loader;
mod validation;

pub use data::{MOVEMENT_SCHEMA_VERSION, MovementDataFile, Vec2Def};
pub use loader::{ContentLoadError, load_movement_tuning, parse_movement_tuning};
pub use validation::{ValidationError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::movement::MovementTuning;

/// Directory holding the RON data files.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Replace the default tuning with `movement.ron` when it loads and validates.
fn load_content(mut commands: Commands) {
    let tuning = match load_movement_tuning(Path::new(DATA_DIR)) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default movement tuning", e);
            return;
        }
    };

    let errors = validate_tuning(&tuning);
    if !errors.is_empty() {
        for error in &errors {
            error!("{}", error);
        }
        warn!(
            "movement.ron has {} invalid value(s); using default movement tuning",
            errors.len()
        );
        return;
    }

    info!(
        "Loaded movement tuning: speed={}, jump_height={}, wall_slide_speed={}, jump_recovery={}s",
        tuning.speed, tuning.jump_height, tuning.wall_slide_speed, tuning.jump_recovery
    );
    commands.insert_resource(tuning);
}
