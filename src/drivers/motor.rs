//! Two-speed fan motor on a pair of relays (one per winding).
//!
//! ## Safety contract
//!
//! The LOW and HIGH windings must never be energised together, and the
//! motor must coast briefly between them.  Every speed change therefore
//! runs as two explicit steps:
//!
//! 1. release both windings,
//! 2. wait the dead time, then energise the selected winding.
//!
//! Turning the motor off stops after step 1.  The wait goes through an
//! injected [`DelayNs`] so tests and dry runs can skip it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::cooler::MotorSpeed;
use crate::drivers::relay::Relay;

pub struct MotorDriver<P, D> {
    low: Relay<P>,
    high: Relay<P>,
    delay: D,
    dead_time_ms: u32,
    speed: MotorSpeed,
}

impl<P: OutputPin, D: DelayNs> MotorDriver<P, D> {
    pub fn new(low: Relay<P>, high: Relay<P>, delay: D, dead_time_ms: u32) -> Self {
        let mut motor = Self {
            low,
            high,
            delay,
            dead_time_ms,
            speed: MotorSpeed::Off,
        };
        motor.release();
        motor
    }

    pub fn set_speed(&mut self, speed: MotorSpeed) {
        self.release();

        if speed.is_running() {
            self.delay.delay_ms(self.dead_time_ms);
            match speed {
                MotorSpeed::Low => self.low.on(),
                MotorSpeed::High => self.high.on(),
                MotorSpeed::Off => {}
            }
        }

        debug!("Motor windings: low={} high={}", self.low.is_on(), self.high.is_on());
        self.speed = speed;
    }

    pub fn speed(&self) -> MotorSpeed {
        self.speed
    }

    fn release(&mut self) {
        self.low.off();
        self.high.off();
    }
}
