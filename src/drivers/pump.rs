//! Water pump on a single relay.
//!
//! The pump wets the evaporative pads; it has no speed control and no
//! sequencing constraint relative to the motor.

use embedded_hal::digital::OutputPin;

use crate::cooler::PumpState;
use crate::drivers::relay::Relay;

pub struct PumpDriver<P> {
    relay: Relay<P>,
}

impl<P: OutputPin> PumpDriver<P> {
    pub fn new(relay: Relay<P>) -> Self {
        Self { relay }
    }

    pub fn set(&mut self, state: PumpState) {
        self.relay.set(state.is_on());
    }

    pub fn state(&self) -> PumpState {
        if self.relay.is_on() {
            PumpState::On
        } else {
            PumpState::Off
        }
    }
}
