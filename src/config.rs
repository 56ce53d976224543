//! Runtime configuration parameters
//!
//! All tunable parameters for the cooler controller.  Defaults match the
//! stock relay board wiring; a JSON file passed with `--config` overrides
//! any subset of them.

use std::path::Path;

use chrono::TimeDelta;
use log::info;
use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Physical panel buttons (BCM pins, active-low with pull-ups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPins {
    pub motor: u8,
    pub pump: u8,
    /// Click adds a step, long press cancels the hold.
    pub hold: u8,
}

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolerConfig {
    // --- Hold timer ---
    /// Minutes added or removed per "+"/"-" press
    pub hold_step_minutes: u32,
    /// Longest hold the "+" control will build up to
    pub max_hold_minutes: u32,

    // --- Timing ---
    /// Hold timer check interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Event-queue wait / button poll interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Both motor windings released for this long before switching
    pub motor_dead_time_ms: u32,

    // --- Relays ---
    pub relays_active_low: bool,
    pub motor_low_pin: u8,
    pub motor_high_pin: u8,
    pub pump_pin: u8,

    // --- Inputs ---
    pub buttons: Option<ButtonPins>,
}

impl Default for CoolerConfig {
    fn default() -> Self {
        Self {
            // Hold timer
            hold_step_minutes: 30,
            max_hold_minutes: 24 * 60,

            // Timing
            tick_interval_ms: 1000, // 1 Hz
            poll_interval_ms: 25,
            motor_dead_time_ms: pins::MOTOR_DEAD_TIME_MS,

            // Relays
            relays_active_low: pins::RELAYS_ACTIVE_LOW,
            motor_low_pin: pins::MOTOR_LOW_GPIO,
            motor_high_pin: pins::MOTOR_HIGH_GPIO,
            pump_pin: pins::PUMP_GPIO,

            // Inputs
            buttons: None,
        }
    }
}

impl CoolerConfig {
    /// Load and validate a config file.  Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Corrupted(e.to_string()))?;
        config.validate()?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_step_minutes == 0 {
            return Err(ConfigError::ValidationFailed(
                "hold_step_minutes must be > 0",
            ));
        }
        if self.max_hold_minutes < self.hold_step_minutes {
            return Err(ConfigError::ValidationFailed(
                "max_hold_minutes must be >= hold_step_minutes",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= self.tick_interval_ms {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be > 0 and below tick_interval_ms",
            ));
        }
        if self.motor_dead_time_ms > pins::MOTOR_DEAD_TIME_MAX_MS {
            return Err(ConfigError::ValidationFailed(
                "motor_dead_time_ms must be <= 5000",
            ));
        }
        let relays = [self.motor_low_pin, self.motor_high_pin, self.pump_pin];
        if relays[0] == relays[1] || relays[0] == relays[2] || relays[1] == relays[2] {
            return Err(ConfigError::ValidationFailed("relay pins must be distinct"));
        }
        if let Some(b) = self.buttons {
            let inputs = [b.motor, b.pump, b.hold];
            if inputs.iter().any(|p| relays.contains(p)) {
                return Err(ConfigError::ValidationFailed(
                    "button pins must not reuse relay pins",
                ));
            }
            if b.motor == b.pump || b.motor == b.hold || b.pump == b.hold {
                return Err(ConfigError::ValidationFailed("button pins must be distinct"));
            }
        }
        Ok(())
    }

    pub fn hold_step(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.hold_step_minutes))
    }

    pub fn max_hold(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.max_hold_minutes))
    }
}
