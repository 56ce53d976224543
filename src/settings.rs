//! Persisted actuator levels and the config tool's value parsing.
//!
//! The state file records what the relays were last set to, so the
//! command-line tool and the panel agree on it.  It never records a
//! pending hold.

use core::fmt;
use std::io::Write;

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::{ActuatorPort, ConfigError, StatePort};
use crate::cooler::{CoolerOutputs, MotorSpeed, PumpState};

/// Default state file name, resolved against the working directory.
pub const STATE_FILE_NAME: &str = "airConf.json";

// ---------------------------------------------------------------------------
// Persisted state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    pub motor: u8,
    pub pump: u8,
    /// Hold preference set from the command line.
    pub time_hold: bool,
    pub hold_until_time: DateTime<Local>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            motor: MotorSpeed::Off.into(),
            pump: PumpState::Off.into(),
            time_hold: false,
            hold_until_time: Local::now(),
        }
    }
}

impl ControllerState {
    /// Stored motor level; out-of-range values read as `Off`.
    pub fn motor_speed(&self) -> MotorSpeed {
        MotorSpeed::try_from(self.motor).unwrap_or_else(|raw| {
            warn!("State file motor level {} out of range, using Off", raw);
            MotorSpeed::Off
        })
    }

    /// Stored pump state; out-of-range values read as `Off`.
    pub fn pump_state(&self) -> PumpState {
        PumpState::try_from(self.pump).unwrap_or_else(|raw| {
            warn!("State file pump level {} out of range, using Off", raw);
            PumpState::Off
        })
    }

    /// Copy the live outputs into the record.
    pub fn record(&mut self, outputs: &CoolerOutputs) {
        self.motor = outputs.motor().into();
        self.pump = outputs.pump().into();
    }
}

// ---------------------------------------------------------------------------
// Command-line values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    InvalidMotor(String),
    InvalidPump(String),
    InvalidHold(String),
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMotor(raw) => write!(f, "wrong motor speed {raw}"),
            Self::InvalidPump(raw) => write!(f, "wrong pump state {raw}"),
            Self::InvalidHold(raw) => write!(f, "wrong hold {raw}"),
        }
    }
}

impl std::error::Error for SettingError {}

pub fn parse_motor(raw: &str) -> Result<MotorSpeed, SettingError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|v| MotorSpeed::try_from(v).ok())
        .ok_or_else(|| SettingError::InvalidMotor(raw.to_string()))
}

pub fn parse_pump(raw: &str) -> Result<PumpState, SettingError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(|v| PumpState::try_from(v).ok())
        .ok_or_else(|| SettingError::InvalidPump(raw.to_string()))
}

/// `true`/`false`, case-insensitive.
pub fn parse_hold(raw: &str) -> Result<bool, SettingError> {
    let v = raw.trim();
    if v.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if v.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SettingError::InvalidHold(raw.to_string()))
    }
}

/// Values requested on one config tool invocation.
///
/// Everything is parsed before anything is applied, so a bad value never
/// leaves the relays half-updated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsRequest {
    pub motor: Option<MotorSpeed>,
    pub pump: Option<PumpState>,
    pub hold: Option<bool>,
}

impl SettingsRequest {
    pub fn parse(
        motor: Option<&str>,
        pump: Option<&str>,
        hold: Option<&str>,
    ) -> Result<Self, SettingError> {
        Ok(Self {
            motor: motor.map(parse_motor).transpose()?,
            pump: pump.map(parse_pump).transpose()?,
            hold: hold.map(parse_hold).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.motor.is_none() && self.pump.is_none() && self.hold.is_none()
    }

    /// Drive the requested outputs and record them.
    pub fn apply(&self, state: &mut ControllerState, hw: &mut impl ActuatorPort) {
        if let Some(speed) = self.motor {
            hw.set_motor_speed(speed);
            state.motor = speed.into();
        }
        if let Some(pump) = self.pump {
            hw.set_pump(pump);
            state.pump = pump.into();
        }
        if let Some(hold) = self.hold {
            state.time_hold = hold;
        }
    }
}

// ---------------------------------------------------------------------------
// Config tool
// ---------------------------------------------------------------------------

/// One `set` invocation: load (or create) the state file, apply the
/// request to the relays, save.  User-facing lines go to `out`.
pub fn run_config_tool(
    store: &impl StatePort,
    request: &SettingsRequest,
    hw: &mut impl ActuatorPort,
    verbose: bool,
    out: &mut impl Write,
) -> crate::error::Result<ControllerState> {
    let mut state = match store.load() {
        Ok(state) => state,
        Err(e) => {
            debug!("State file unusable ({}), starting from defaults", e);
            writeln!(out, "Creating default configuration file").map_err(ConfigError::from)?;
            let state = ControllerState::default();
            store.save(&state)?;
            state
        }
    };

    // Relays come up released; outputs the request leaves alone go back
    // to their stored level.
    if request.motor.is_none() {
        hw.set_motor_speed(state.motor_speed());
    }
    if request.pump.is_none() {
        hw.set_pump(state.pump_state());
    }
    request.apply(&mut state, hw);
    if request.motor.is_some() {
        writeln!(out, "New motor speed: {}", state.motor).map_err(ConfigError::from)?;
    }
    if request.pump.is_some() {
        writeln!(out, "New pump state: {}", state.pump).map_err(ConfigError::from)?;
    }
    if request.hold.is_some() {
        writeln!(out, "New hold: {}", state.time_hold).map_err(ConfigError::from)?;
    }

    if verbose {
        writeln!(
            out,
            "Configuration:\nmotor_speed: {}\npump_state: {}\ntime_hold: {}\nhold_until_time: {}",
            state.motor,
            state.pump,
            state.time_hold,
            state.hold_until_time.to_rfc3339()
        )
        .map_err(ConfigError::from)?;
    }

    store.save(&state)?;
    writeln!(out, "Saved configuration file").map_err(ConfigError::from)?;
    Ok(state)
}
