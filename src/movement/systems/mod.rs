//! Movement domain: system modules for locomotion updates.

pub(crate) mod animation;
pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod motor;

pub(crate) use animation::{log_motor_events, sync_sprite_facing};
pub(crate) use input::read_input;
pub(crate) use motor::run_motor;
