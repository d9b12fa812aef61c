//! Movement domain: what the motor reports to animation and audio each tick.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::host::TickReport;
use crate::movement::state::MovementMode;

/// Edge-triggered motor events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorEvent {
    Jump,
    Land,
    Falling,
}

/// Level-triggered animation parameters.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationFlags {
    pub grounded: bool,
    pub running: bool,
    pub on_wall: bool,
    pub pushing: bool,
    pub pulling: bool,
    pub facing_right: bool,
}

/// Result of one motor tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotorOutput {
    pub velocity: Vec2,
    /// Instant positional correction the host must apply (wall-jump clearance).
    pub displacement: Vec2,
    pub mode: MovementMode,
    pub flags: AnimationFlags,
    pub events: Vec<MotorEvent>,
}

impl MotorOutput {
    pub fn emitted(&self, event: MotorEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Message carrying a motor event out of the ECS motor system.
#[derive(Debug)]
pub struct MotorEventMessage {
    pub entity: Entity,
    pub event: MotorEvent,
}

impl Message for MotorEventMessage {}

/// Message sent whenever the movement mode changes.
#[derive(Debug)]
pub struct ModeChangedEvent {
    pub entity: Entity,
    pub from: MovementMode,
    pub to: MovementMode,
}

impl Message for ModeChangedEvent {}

/// Full record of one motor tick, for tooling that replays or inspects frames.
#[derive(Debug)]
pub struct MotorTicked {
    pub entity: Entity,
    pub report: TickReport<Entity>,
}

impl Message for MotorTicked {}
