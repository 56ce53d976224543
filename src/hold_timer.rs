//! Hold timer: "keep running until HH:MM, then switch everything off".
//!
//! Two states, driven by discrete panel events and a periodic tick:
//!
//! ```text
//!                 adjust(Δ ≠ 0)              adjust(Δ ≠ 0)
//!        ┌──────┐ ───────────────▶ ┌──────┐ ◀──────────┐
//!  new ─▶│ IDLE │                  │ HELD │ ───────────┘
//!        └──────┘ ◀─────────────── └──────┘
//!                  adjust(0)  or  tick() with remaining ≤ 0
//!                                 (fires ExpiryDelegate first)
//! ```
//!
//! The deadline is only meaningful while HELD.  Starting a hold from IDLE
//! always rebases the deadline on the current instant.  Adjusting an
//! active hold moves the deadline by exactly the delta, even into the
//! past; the next tick then treats it as expired.
//!
//! The timer owns no actuators and never blocks.  Expiry is reported
//! through an [`ExpiryDelegate`], so the caller decides what "shut down"
//! means.

use chrono::TimeDelta;
use log::{debug, info};

use crate::app::ports::{Clock, ExpiryDelegate, Timestamp};

/// Clock format used for the time label (24 h, minutes resolution).
pub const LABEL_TIME_FORMAT: &str = "%H:%M";

const HOLD_PREFIX: &str = "Hold until: ";
const IDLE_PREFIX: &str = "Current time: ";

// ═══════════════════════════════════════════════════════════════
//  Outputs
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Held,
}

/// Payload for the "time remaining" label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldDisplay {
    pub label: String,
    pub state: HoldState,
}

impl HoldDisplay {
    /// The label is highlighted while a hold is pending.
    pub fn emphasized(&self) -> bool {
        self.state == HoldState::Held
    }

    /// Cancel and subtract only make sense while a hold is pending.
    pub fn hold_controls_available(&self) -> bool {
        self.state == HoldState::Held
    }
}

/// Result of one periodic [`HoldTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldTick {
    /// No hold pending; nothing was evaluated.
    Inactive,
    /// Hold still pending.
    Running {
        remaining: TimeDelta,
        /// Whether one more step can be subtracted without the deadline
        /// preceding "now".
        subtract_enabled: bool,
    },
    /// The deadline passed on this tick.  The delegate has already run
    /// and the timer is back to IDLE.
    Expired,
}

// ═══════════════════════════════════════════════════════════════
//  Timer
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct HoldTimer {
    active: bool,
    /// Stale whenever `active` is false; never read in that case.
    deadline: Timestamp,
    step: TimeDelta,
}

impl HoldTimer {
    /// Create an idle timer.  `step` is fixed for the life of the timer.
    pub fn new(step: TimeDelta, clock: &dyn Clock) -> Self {
        Self {
            active: false,
            deadline: clock.now(),
            step,
        }
    }

    pub fn step(&self) -> TimeDelta {
        self.step
    }

    pub fn state(&self) -> HoldState {
        if self.active {
            HoldState::Held
        } else {
            HoldState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deadline of the pending hold, `None` when idle.
    pub fn deadline(&self) -> Option<Timestamp> {
        self.active.then_some(self.deadline)
    }

    /// Time left until the deadline (negative once it has passed).
    pub fn remaining(&self, clock: &dyn Clock) -> Option<TimeDelta> {
        self.deadline().map(|deadline| deadline - clock.now())
    }

    /// Move the deadline by `delta`, or cancel the hold when `delta` is zero.
    ///
    /// From IDLE the deadline is first reset to "now", so a fresh hold ends
    /// exactly `delta` after the call.  While HELD the existing deadline is
    /// shifted without clamping.
    pub fn adjust(&mut self, delta: TimeDelta, clock: &dyn Clock) -> HoldState {
        if delta.is_zero() {
            self.cancel();
            return HoldState::Idle;
        }

        if !self.active {
            self.deadline = clock.now();
        }
        self.deadline += delta;
        self.active = true;
        info!(
            "Hold until: {} ({:+} min)",
            self.deadline.format(LABEL_TIME_FORMAT),
            delta.num_minutes()
        );
        HoldState::Held
    }

    /// Drop the pending hold.  Equivalent to `adjust(0)`.
    pub fn cancel(&mut self) {
        if self.active {
            info!("Canceling hold");
        }
        self.active = false;
    }

    /// True iff a hold is pending and at least one full step remains.
    pub fn subtract_allowed(&self, clock: &dyn Clock) -> bool {
        self.remaining(clock)
            .is_some_and(|remaining| remaining >= self.step)
    }

    /// Build the time label.  Pure query.
    pub fn refresh(&self, clock: &dyn Clock) -> HoldDisplay {
        if self.active {
            HoldDisplay {
                label: format!("{HOLD_PREFIX}{}", self.deadline.format(LABEL_TIME_FORMAT)),
                state: HoldState::Held,
            }
        } else {
            HoldDisplay {
                label: format!("{IDLE_PREFIX}{}", clock.now().format(LABEL_TIME_FORMAT)),
                state: HoldState::Idle,
            }
        }
    }

    /// Remaining time as `HH:MM`, or `--:--` when idle or already past.
    pub fn remaining_text(&self, clock: &dyn Clock) -> String {
        match self.remaining(clock) {
            Some(r) if r > TimeDelta::zero() => {
                format!("{:02}:{:02}", r.num_hours(), r.num_minutes() % 60)
            }
            _ => "--:--".to_string(),
        }
    }

    /// Periodic check.  Call once per tick interval.
    ///
    /// Expires when `deadline - now <= 0`: the delegate runs first, then
    /// the hold is cancelled.  A second tick after expiry is a no-op.
    pub fn tick(&mut self, clock: &dyn Clock, delegate: &mut dyn ExpiryDelegate) -> HoldTick {
        if !self.active {
            return HoldTick::Inactive;
        }

        let remaining = self.deadline - clock.now();
        if remaining <= TimeDelta::zero() {
            info!("Time's up");
            delegate.on_hold_expired();
            self.adjust(TimeDelta::zero(), clock);
            return HoldTick::Expired;
        }

        debug!("Remaining time: {}s", remaining.num_seconds());
        HoldTick::Running {
            remaining,
            subtract_enabled: remaining >= self.step,
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
