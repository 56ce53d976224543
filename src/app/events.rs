//! Outbound application events.
//!
//! The [`CoolerService`](super::service::CoolerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (log to the console, forward to a
//! journal, etc.).

use crate::cooler::{MotorSpeed, PumpState};

use super::ports::Timestamp;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started with every output off.
    Started,

    /// The motor was commanded to a new level.
    MotorChanged(MotorSpeed),

    /// The pump was switched.
    PumpChanged(PumpState),

    /// A hold was started or moved.
    HoldChanged { deadline: Timestamp },

    /// The hold was cancelled by the user.
    HoldCancelled,

    /// The hold deadline passed; outputs have been switched off.
    HoldExpired,

    /// Every actuator has been switched off.
    SystemOff,
}
