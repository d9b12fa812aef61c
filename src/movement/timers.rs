//! Movement domain: countdown timers that replace suspended waits.

use serde::{Deserialize, Serialize};

/// A one-shot countdown.
///
/// `active` drops to false on the tick where `remaining` reaches zero, and
/// that tick is the only one on which [`Countdown::tick`] reports expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: f32,
    pub active: bool,
}

impl Countdown {
    /// Arm the countdown. A non-positive duration leaves it inactive.
    pub fn start(&mut self, duration: f32) {
        if duration > 0.0 {
            self.remaining = duration;
            self.active = true;
        } else {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `dt` seconds. Returns true if the countdown expired during this call.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.active = false;
            return true;
        }
        false
    }
}

/// Which countdowns finished during a [`TimerBank::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expired {
    pub landing_recovery: bool,
    pub wall_jump_lockout: bool,
    pub push_cooldown: bool,
    pub push_window: bool,
}

/// Every countdown the motor owns.
///
/// `push_cooldown` and `push_window` are the two phases of one push cycle;
/// the window is only armed once the cooldown has expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerBank {
    pub landing_recovery: Countdown,
    pub wall_jump_lockout: Countdown,
    pub push_cooldown: Countdown,
    pub push_window: Countdown,
}

impl TimerBank {
    /// Advance every active countdown.
    ///
    /// When the cooldown phase expires the window phase is armed with
    /// `push_window` seconds; it starts counting on the next tick.
    pub fn tick(&mut self, dt: f32, push_window: f32) -> Expired {
        let expired = Expired {
            landing_recovery: self.landing_recovery.tick(dt),
            wall_jump_lockout: self.wall_jump_lockout.tick(dt),
            push_cooldown: self.push_cooldown.tick(dt),
            push_window: self.push_window.tick(dt),
        };
        if expired.push_cooldown {
            self.push_window.start(push_window);
        }
        expired
    }

    /// Start a push cycle at its cooldown phase, or straight at the window
    /// phase when there is no cooldown.
    pub fn start_push_cycle(&mut self, cooldown: f32, window: f32) {
        self.push_window.cancel();
        self.push_cooldown.start(cooldown);
        if !self.push_cooldown.is_active() {
            self.push_window.start(window);
        }
    }

    pub fn push_cycle_active(&self) -> bool {
        self.push_cooldown.is_active() || self.push_window.is_active()
    }

    /// Force-deactivate every countdown.
    pub fn cancel_all(&mut self) {
        self.landing_recovery.cancel();
        self.wall_jump_lockout.cancel();
        self.push_cooldown.cancel();
        self.push_window.cancel();
    }

    pub fn any_active(&self) -> bool {
        self.landing_recovery.is_active()
            || self.wall_jump_lockout.is_active()
            || self.push_cycle_active()
    }
}
