//! Debug domain: motor tick recording, JSON export and replay.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::Vec2Def;
use crate::movement::{
    AnimationFlags, CollisionProbe, ContactKind, InputFrame, MotorEvent, MotorOutput,
    MovementMode, MovementTuning, PlayerState, PushableTarget, Side, TickReport, step,
};

/// Ticks kept before recording stops (about two minutes at 60 Hz).
pub const DEFAULT_CAPACITY: usize = 7200;

/// A body beside the player as it was seen entering a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedContact {
    pub side: Side,
    pub kind: ContactKind,
    pub velocity: Vec2Def,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedOutput {
    pub velocity: Vec2Def,
    pub displacement: Vec2Def,
    pub mode: MovementMode,
    pub flags: AnimationFlags,
    pub events: Vec<MotorEvent>,
}

impl From<&MotorOutput> for RecordedOutput {
    fn from(output: &MotorOutput) -> Self {
        Self {
            velocity: output.velocity.into(),
            displacement: output.displacement.into(),
            mode: output.mode,
            flags: output.flags,
            events: output.events.clone(),
        }
    }
}

/// Everything needed to re-run one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedTick {
    pub position: Vec2Def,
    pub velocity: Vec2Def,
    pub input: InputFrame,
    pub probe: CollisionProbe,
    pub dt: f32,
    pub contacts: Vec<RecordedContact>,
    pub output: RecordedOutput,
}

impl<H> From<&TickReport<H>> for RecordedTick {
    fn from(report: &TickReport<H>) -> Self {
        Self {
            position: report.position.into(),
            velocity: report.velocity.into(),
            input: report.input,
            probe: report.probe,
            dt: report.dt,
            contacts: report
                .sighted
                .iter()
                .map(|t| RecordedContact {
                    side: t.side,
                    kind: t.kind,
                    velocity: t.velocity.into(),
                })
                .collect(),
            output: RecordedOutput::from(&report.output),
        }
    }
}

/// A recording that starts from a freshly spawned motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorTrace {
    pub spawn: Vec2Def,
    pub ticks: Vec<RecordedTick>,
}

/// First tick whose replayed output differs from the recording.
#[derive(Debug, PartialEq)]
pub struct ReplayMismatch {
    pub tick: usize,
    pub recorded: RecordedOutput,
    pub replayed: RecordedOutput,
}

impl std::fmt::Display for ReplayMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tick {} diverged: recorded {:?}, replayed {:?}",
            self.tick, self.recorded, self.replayed
        )
    }
}

impl MotorTrace {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            spawn: spawn.into(),
            ticks: Vec::new(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Re-run every tick against a fresh motor and return the outputs.
    ///
    /// Position and velocity are re-synced from the recording before each
    /// tick, the same way the host syncs them from the physics body.
    pub fn replay(&self, tuning: &MovementTuning) -> Vec<RecordedOutput> {
        let mut state = PlayerState::spawn_at(self.spawn.into());
        self.ticks
            .iter()
            .map(|tick| {
                state.position = tick.position.into();
                state.velocity = tick.velocity.into();
                let mut contacts: Vec<PushableTarget<usize>> = tick
                    .contacts
                    .iter()
                    .enumerate()
                    .map(|(handle, c)| PushableTarget {
                        handle,
                        side: c.side,
                        kind: c.kind,
                        velocity: c.velocity.into(),
                    })
                    .collect();
                let output = step(
                    &mut state,
                    tuning,
                    &tick.input,
                    &tick.probe,
                    &mut contacts,
                    tick.dt,
                );
                RecordedOutput::from(&output)
            })
            .collect()
    }

    /// Replay and compare against the recorded outputs.
    pub fn verify(&self, tuning: &MovementTuning) -> Result<(), ReplayMismatch> {
        let replayed = self.replay(tuning);
        for (tick, (recorded, replayed)) in self
            .ticks
            .iter()
            .map(|t| &t.output)
            .zip(replayed)
            .enumerate()
        {
            if *recorded != replayed {
                return Err(ReplayMismatch {
                    tick,
                    recorded: recorded.clone(),
                    replayed,
                });
            }
        }
        Ok(())
    }
}

/// Resource collecting the player's ticks since the last reset.
#[derive(Resource, Debug)]
pub struct TickRecorder {
    pub trace: Option<MotorTrace>,
    pub capacity: usize,
}

impl Default for TickRecorder {
    fn default() -> Self {
        Self {
            trace: None,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl TickRecorder {
    /// Begin a new trace from a freshly spawned motor.
    pub fn restart(&mut self, spawn: Vec2) {
        self.trace = Some(MotorTrace::new(spawn));
    }

    /// Append a tick. Returns false once the trace is full or not started.
    pub fn record<H>(&mut self, report: &TickReport<H>) -> bool {
        let capacity = self.capacity;
        match &mut self.trace {
            Some(trace) if trace.ticks.len() < capacity => {
                trace.ticks.push(RecordedTick::from(report));
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.trace.as_ref().map_or(0, |t| t.ticks.len())
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }
}
