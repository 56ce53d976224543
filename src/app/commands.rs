//! Inbound commands to the controller service.
//!
//! These represent actions requested by the outside world (console keys,
//! physical buttons, the config tool) that the
//! [`CoolerService`](super::service::CoolerService) interprets and acts upon.

use crate::cooler::{MotorSpeed, PumpState};

/// Commands that input adapters can send into the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// "Motor speed" button: Off → Low → High → Off.
    CycleMotor,

    /// "Pump" button: toggle.
    CyclePump,

    /// "+" button: extend (or start) the hold by one step.
    AddStep,

    /// "-" button: shorten the hold by one step.
    SubtractStep,

    /// "cancel" button: drop the hold without touching the outputs.
    CancelHold,

    /// Set an explicit motor level (config tool, state restore).
    SetMotor(MotorSpeed),

    /// Set an explicit pump state (config tool, state restore).
    SetPump(PumpState),

    /// "X" button: everything off and leave the panel.
    Exit,
}
