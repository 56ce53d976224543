//! Port traits — the hexagonal boundary between controller logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CoolerService (domain)
//! ```
//!
//! Driven adapters (relays, clock, display, state file, log) implement
//! these traits.  The [`CoolerService`](super::service::CoolerService)
//! consumes them via generics, so the domain core never touches GPIO,
//! the wall clock, or the filesystem directly.

use chrono::{DateTime, Local};

use crate::cooler::{MotorSpeed, PumpState};
use crate::settings::ControllerState;

/// Wall-clock instant used for hold deadlines and the time label.
pub type Timestamp = DateTime<Local>;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the relays.
///
/// Implementations may drive real outputs or be a dry run; nothing above
/// this trait can tell the difference.
pub trait ActuatorPort {
    /// Select a motor level.  The implementation owns winding dead time.
    fn set_motor_speed(&mut self, speed: MotorSpeed);

    /// Switch the water pump.
    fn set_pump(&mut self, state: PumpState);

    /// Motor off first, then the pump.
    fn all_off(&mut self) {
        self.set_motor_speed(MotorSpeed::Off);
        self.set_pump(PumpState::Off);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Read-only source of "now".
pub trait Clock {
    fn now(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Presentation port (driven adapter: domain → display)
// ───────────────────────────────────────────────────────────────

/// Controls on the panel whose enablement the domain decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Cancels an active hold.
    CancelHold,
    /// Removes one step from the hold.
    SubtractStep,
    /// Adds one step to the hold.
    AddStep,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [Self::CancelHold, Self::SubtractStep, Self::AddStep];

    pub fn label(self) -> &'static str {
        match self {
            Self::CancelHold => "cancel",
            Self::SubtractStep => "-",
            Self::AddStep => "+",
        }
    }
}

/// Notifications for whatever renders the panel.  No return values: the
/// domain never waits on the display.
pub trait PresentationSink {
    /// Time label; `emphasized` is set while a hold is active.
    fn show_time(&mut self, label: &str, emphasized: bool);

    /// Time left on the hold as `HH:MM`, `--:--` when idle.
    fn show_remaining(&mut self, text: &str);

    fn show_motor(&mut self, speed: MotorSpeed);

    fn show_pump(&mut self, state: PumpState);

    fn set_control_enabled(&mut self, control: ControlId, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// State port (driven adapter: domain ↔ persisted levels)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the last-set actuator levels.
///
/// The hold timer is deliberately absent: a restart always comes up
/// without a pending hold.
pub trait StatePort {
    /// Returns [`ConfigError::NotFound`] when nothing has been saved yet.
    fn load(&self) -> Result<ControllerState, ConfigError>;

    fn save(&self, state: &ControllerState) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Expiry delegate (decouples the hold timer from actuators)
// ───────────────────────────────────────────────────────────────

/// Callback the [`HoldTimer`](crate::hold_timer::HoldTimer) invokes when
/// a hold runs out.
///
/// The timer knows nothing about relays; the service implements this by
/// turning every output off.  Must tolerate being called when everything
/// is already off.
pub trait ExpiryDelegate {
    fn on_hold_expired(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StatePort`] operations and config loading.
#[derive(Debug)]
pub enum ConfigError {
    /// No file at the expected path.
    NotFound,
    /// The file exists but is not valid JSON for the expected shape.
    Corrupted(String),
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the filesystem.
    Io(std::io::Error),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted(detail) => write!(f, "config corrupted: {}", detail),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound
        } else {
            Self::Io(e)
        }
    }
}
