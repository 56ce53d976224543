//! Actuator levels for the cooler: two-speed motor and water pump.

use core::fmt;

use log::info;

use crate::app::ports::ActuatorPort;

/// Highest accepted motor level on the command line.
pub const MOTOR_SPEED_MAX: u8 = 2;
/// Highest accepted pump level on the command line.
pub const PUMP_STATE_MAX: u8 = 1;

// ---------------------------------------------------------------------------
// Motor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum MotorSpeed {
    #[default]
    Off = 0,
    Low = 1,
    High = 2,
}

impl MotorSpeed {
    /// Next level for the "motor speed" button: Off → Low → High → Off.
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Low,
            Self::Low => Self::High,
            Self::High => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Low => "Low",
            Self::High => "High",
        }
    }

    pub fn is_running(self) -> bool {
        self != Self::Off
    }
}

impl TryFrom<u8> for MotorSpeed {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Low),
            2 => Ok(Self::High),
            other => Err(other),
        }
    }
}

impl From<MotorSpeed> for u8 {
    fn from(speed: MotorSpeed) -> u8 {
        speed as u8
    }
}

impl fmt::Display for MotorSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Pump
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum PumpState {
    #[default]
    Off = 0,
    On = 1,
}

impl PumpState {
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::On => "On",
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl TryFrom<u8> for PumpState {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(other),
        }
    }
}

impl From<PumpState> for u8 {
    fn from(state: PumpState) -> u8 {
        state as u8
    }
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Commanded outputs
// ---------------------------------------------------------------------------

/// Last commanded level of every actuator.
///
/// The relays cannot be read back, so this is the only record of what the
/// board is doing.  Every change goes through here so the record and the
/// hardware never diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoolerOutputs {
    motor: MotorSpeed,
    pump: PumpState,
}

impl CoolerOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn motor(&self) -> MotorSpeed {
        self.motor
    }

    pub fn pump(&self) -> PumpState {
        self.pump
    }

    pub fn set_motor(&mut self, speed: MotorSpeed, hw: &mut impl ActuatorPort) {
        hw.set_motor_speed(speed);
        self.motor = speed;
        info!("Motor: {}", speed);
    }

    pub fn set_pump(&mut self, state: PumpState, hw: &mut impl ActuatorPort) {
        hw.set_pump(state);
        self.pump = state;
        info!("Pump: {}", state);
    }

    /// Motor off first, then the pump.
    pub fn all_off(&mut self, hw: &mut impl ActuatorPort) {
        hw.all_off();
        self.motor = MotorSpeed::Off;
        self.pump = PumpState::Off;
        info!("System Off");
    }
}
