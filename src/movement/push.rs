//! Movement domain: pushing and pulling adjacent crates.

use crate::movement::input::InputFrame;
use crate::movement::probe::{PushableTarget, Side};
use crate::movement::resources::MovementTuning;
use crate::movement::state::PlayerState;

/// What the push resolver decided for this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PushOutcome {
    pub pushing: bool,
    pub pulling: bool,
    /// The player is actually moving the object this tick.
    pub moving: bool,
    /// Side of the gripped object, which the player faces.
    pub gripped: Option<Side>,
}

/// Index of the object to interact with. Left side is scanned first and the
/// first pushable found wins, so at most one object is touched per tick.
pub(crate) fn select_target<H>(targets: &[PushableTarget<H>]) -> Option<usize> {
    [Side::Left, Side::Right].into_iter().find_map(|side| {
        targets
            .iter()
            .position(|t| t.side == side && t.is_pushable())
    })
}

/// Resolve push/pull while interact is held. Overrides `state.velocity.x`
/// and writes the chosen target's horizontal velocity.
pub(crate) fn resolve<H>(
    state: &mut PlayerState,
    input: &InputFrame,
    targets: &mut [PushableTarget<H>],
    tuning: &MovementTuning,
) -> PushOutcome {
    if !input.interact_held {
        return PushOutcome::default();
    }
    let Some(index) = select_target(targets) else {
        return PushOutcome::default();
    };
    let target = &mut targets[index];
    let side = target.side;

    if !(state.can_push && input.has_direction()) {
        state.velocity.x = 0.0;
        return PushOutcome {
            pushing: true,
            pulling: true,
            moving: false,
            gripped: Some(side),
        };
    }

    state.velocity.x = tuning.push_speed * input.horizontal;

    if state.last_push_direction != input.horizontal {
        state.cancel_all_timers();
    }
    state.last_push_direction = input.horizontal;

    let direction = input.horizontal.signum();
    target.velocity.x += tuning.pull_boost * direction;
    let toward_object = direction == side.sign();

    if !state.push_running {
        start_cycle(state, tuning);
    }

    PushOutcome {
        pushing: toward_object,
        pulling: !toward_object,
        moving: true,
        gripped: Some(side),
    }
}

fn start_cycle(state: &mut PlayerState, tuning: &MovementTuning) {
    state
        .timers
        .start_push_cycle(tuning.push_cooldown, tuning.push_window);
    state.can_push = !state.timers.push_cooldown.is_active();
    state.push_running = state.timers.push_cycle_active();
}
