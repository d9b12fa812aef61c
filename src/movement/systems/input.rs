//! Movement domain: keyboard sampling into input frames.

use bevy::prelude::*;

use crate::movement::host::InputSource;
use crate::movement::input::InputFrame;

/// Latest sampled frame, consumed by the motor in the same update.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub frame: InputFrame,
}

impl InputSource for MovementInput {
    fn poll(&mut self) -> InputFrame {
        self.frame
    }
}

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.frame = InputFrame {
        horizontal: x,
        vertical: y,
        jump_pressed: keyboard.just_pressed(KeyCode::Space)
            || keyboard.just_pressed(KeyCode::KeyW),
        jump_held: keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyW),
        sprint_held: keyboard.pressed(KeyCode::ShiftLeft),
        interact_held: keyboard.pressed(KeyCode::KeyE),
    }
    .sanitized();
}
