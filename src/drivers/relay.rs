//! Single relay channel on a digital output.
//!
//! Relay boards come in both polarities; the cheap opto-isolated ones
//! used on this cooler pull in on LOW.  The driver hides that so callers
//! only ever say "on" or "off".
//!
//! A pin write error is logged and otherwise ignored: the actuator port
//! has no error channel, and the commanded state is still recorded so the
//! next write retries the same level.

use embedded_hal::digital::{OutputPin, PinState};
use log::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low {
            Self::ActiveLow
        } else {
            Self::ActiveHigh
        }
    }

    /// Pin level that corresponds to the requested coil state.
    pub fn level(self, on: bool) -> PinState {
        match (self, on) {
            (Self::ActiveHigh, true) | (Self::ActiveLow, false) => PinState::High,
            (Self::ActiveHigh, false) | (Self::ActiveLow, true) => PinState::Low,
        }
    }
}

pub struct Relay<P> {
    name: &'static str,
    pin: P,
    polarity: Polarity,
    on: bool,
}

impl<P: OutputPin> Relay<P> {
    /// Take ownership of `pin` and drive the relay off immediately.
    pub fn new(name: &'static str, pin: P, polarity: Polarity) -> Self {
        let mut relay = Self {
            name,
            pin,
            polarity,
            on: false,
        };
        relay.set(false);
        relay
    }

    pub fn set(&mut self, on: bool) {
        let level = self.polarity.level(on);
        if let Err(e) = self.pin.set_state(level) {
            warn!("Relay {}: pin write failed: {:?}", self.name, e);
        }
        trace!("Relay {} -> {}", self.name, if on { "ON" } else { "OFF" });
        self.on = on;
    }

    pub fn on(&mut self) {
        self.set(true);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
