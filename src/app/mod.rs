//! Application core — pure controller logic, zero I/O.
//!
//! This module contains the rules for the cooler panel: which command
//! drives which actuator, how the hold timer is adjusted, and which
//! controls are available.  All interaction with hardware, the clock and
//! the display happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
