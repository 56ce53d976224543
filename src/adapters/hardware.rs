//! Hardware adapter: bridges the relay board to the [`ActuatorPort`].
//!
//! Owns the motor and pump drivers.  This is the only module that touches
//! GPIO.  Pins come in two flavours:
//!
//! - **`feature = "rpi"`**: rppal GPIO lines on the Raspberry Pi header.
//! - **dry run**: every write is logged and remembered, nothing is driven.
//!   Always used when the `rpi` feature is off.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::{debug, info};

use crate::app::ports::ActuatorPort;
use crate::config::CoolerConfig;
use crate::cooler::{MotorSpeed, PumpState};
use crate::drivers::button::PanelButtons;
use crate::drivers::delay::StdDelay;
use crate::drivers::motor::MotorDriver;
use crate::drivers::pump::PumpDriver;
use crate::drivers::relay::{Polarity, Relay};
use crate::error::Result;

// ── Output pin ────────────────────────────────────────────────

pub enum RelayPin {
    #[cfg(feature = "rpi")]
    Gpio(rppal::gpio::OutputPin),
    DryRun { gpio: u8, high: bool },
}

impl RelayPin {
    /// Current output level (`true` = HIGH).
    pub fn is_set_high(&self) -> bool {
        match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(pin) => rppal::gpio::OutputPin::is_set_high(pin),
            Self::DryRun { high, .. } => *high,
        }
    }
}

impl ErrorType for RelayPin {
    type Error = Infallible;
}

impl OutputPin for RelayPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(pin) => rppal::gpio::OutputPin::set_low(pin),
            Self::DryRun { gpio, high } => {
                *high = false;
                debug!("GPIO{} -> LOW (dry run)", gpio);
            }
        }
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(pin) => rppal::gpio::OutputPin::set_high(pin),
            Self::DryRun { gpio, high } => {
                *high = true;
                debug!("GPIO{} -> HIGH (dry run)", gpio);
            }
        }
        Ok(())
    }
}

// ── Input pin ─────────────────────────────────────────────────

pub enum ButtonPin {
    #[cfg(feature = "rpi")]
    Gpio(rppal::gpio::InputPin),
    /// Reads as released forever.
    DryRun,
}

impl ErrorType for ButtonPin {
    type Error = Infallible;
}

impl InputPin for ButtonPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(pin) => rppal::gpio::InputPin::is_high(pin),
            Self::DryRun => true,
        })
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ── Pin factory ───────────────────────────────────────────────

enum PinSource {
    #[cfg(feature = "rpi")]
    Gpio(rppal::gpio::Gpio),
    DryRun,
}

impl PinSource {
    fn open(dry_run: bool) -> Result<Self> {
        #[cfg(feature = "rpi")]
        if !dry_run {
            let gpio = rppal::gpio::Gpio::new()
                .map_err(|e| crate::error::Error::Init(format!("GPIO: {e}")))?;
            info!("GPIO opened");
            return Ok(Self::Gpio(gpio));
        }

        #[cfg(not(feature = "rpi"))]
        if !dry_run {
            log::warn!("Built without the `rpi` feature, relays run dry");
        }

        info!("GPIO dry run: no pins will be driven");
        Ok(Self::DryRun)
    }

    /// Claim an output already at its released level, so the relay never
    /// chatters during bring-up.
    fn output(&self, gpio: u8, polarity: Polarity) -> Result<RelayPin> {
        let released_high = polarity.level(false) == embedded_hal::digital::PinState::High;
        match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(chip) => {
                let pin = chip
                    .get(gpio)
                    .map_err(|e| crate::error::Error::Init(format!("GPIO{gpio}: {e}")))?;
                let mut pin = if released_high {
                    pin.into_output_high()
                } else {
                    pin.into_output_low()
                };
                // Relays stay latched after exit; `set` relies on it.
                pin.set_reset_on_drop(false);
                Ok(RelayPin::Gpio(pin))
            }
            Self::DryRun => Ok(RelayPin::DryRun {
                gpio,
                high: released_high,
            }),
        }
    }

    #[cfg_attr(not(feature = "rpi"), allow(unused_variables))]
    fn input(&self, gpio: u8) -> Result<ButtonPin> {
        match self {
            #[cfg(feature = "rpi")]
            Self::Gpio(chip) => {
                let pin = chip
                    .get(gpio)
                    .map_err(|e| crate::error::Error::Init(format!("GPIO{gpio}: {e}")))?;
                Ok(ButtonPin::Gpio(pin.into_input_pullup()))
            }
            Self::DryRun => Ok(ButtonPin::DryRun),
        }
    }
}

// ── Relay board ───────────────────────────────────────────────

/// Concrete adapter that puts the relay board behind [`ActuatorPort`].
pub struct RelayBoard {
    motor: MotorDriver<RelayPin, StdDelay>,
    pump: PumpDriver<RelayPin>,
}

/// Everything [`open`] brings up.
pub struct Board {
    pub relays: RelayBoard,
    pub buttons: Option<PanelButtons<ButtonPin>>,
}

/// Claim the relay outputs (released) and, if configured, the buttons.
pub fn open(config: &CoolerConfig, dry_run: bool) -> Result<Board> {
    let source = PinSource::open(dry_run)?;
    let polarity = Polarity::from_active_low(config.relays_active_low);

    let motor = MotorDriver::new(
        Relay::new("motor-low", source.output(config.motor_low_pin, polarity)?, polarity),
        Relay::new("motor-high", source.output(config.motor_high_pin, polarity)?, polarity),
        StdDelay,
        config.motor_dead_time_ms,
    );
    let pump = PumpDriver::new(Relay::new(
        "pump",
        source.output(config.pump_pin, polarity)?,
        polarity,
    ));
    info!(
        "Relays: motor low=GPIO{} high=GPIO{} pump=GPIO{} ({:?})",
        config.motor_low_pin, config.motor_high_pin, config.pump_pin, polarity
    );

    let buttons = match config.buttons {
        Some(b) => {
            info!(
                "Buttons: motor=GPIO{} pump=GPIO{} hold=GPIO{}",
                b.motor, b.pump, b.hold
            );
            Some(PanelButtons::new(
                source.input(b.motor)?,
                source.input(b.pump)?,
                source.input(b.hold)?,
            ))
        }
        None => None,
    };

    Ok(Board {
        relays: RelayBoard { motor, pump },
        buttons,
    })
}

impl RelayBoard {
    pub fn motor_speed(&self) -> MotorSpeed {
        self.motor.speed()
    }

    pub fn pump_state(&self) -> PumpState {
        self.pump.state()
    }
}

impl ActuatorPort for RelayBoard {
    fn set_motor_speed(&mut self, speed: MotorSpeed) {
        self.motor.set_speed(speed);
    }

    fn set_pump(&mut self, state: PumpState) {
        self.pump.set(state);
    }
}
