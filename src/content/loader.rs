//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{MOVEMENT_SCHEMA_VERSION, MovementDataFile};
use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse movement tuning from RON text. `file` only labels errors.
pub fn parse_movement_tuning(
    contents: &str,
    file: &str,
) -> Result<MovementTuning, ContentLoadError> {
    let data: MovementDataFile = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if data.schema_version != MOVEMENT_SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                data.schema_version, MOVEMENT_SCHEMA_VERSION
            ),
        });
    }

    Ok(data.tuning)
}

/// Load `movement.ron` from the data directory.
pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, ContentLoadError> {
    let path = base_path.join("movement.ron");
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(&path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_movement_tuning(&contents, &file_name)
}
