//! GPIO pin assignments for the relay board (BCM numbering).
//!
//! Single source of truth for the defaults in
//! [`CoolerConfig`](crate::config::CoolerConfig).  A deployment with a
//! different wiring overrides them in the JSON config rather than here.

// ---------------------------------------------------------------------------
// Motor (two-winding fan motor, one relay per winding)
// ---------------------------------------------------------------------------

/// Relay for the low-speed winding.
pub const MOTOR_LOW_GPIO: u8 = 5;
/// Relay for the high-speed winding.  Never energised together with LOW.
pub const MOTOR_HIGH_GPIO: u8 = 6;

// ---------------------------------------------------------------------------
// Water pump
// ---------------------------------------------------------------------------

/// Relay for the pad-wetting pump.
pub const PUMP_GPIO: u8 = 13;

// ---------------------------------------------------------------------------
// Relay polarity
// ---------------------------------------------------------------------------

/// Opto-isolated relay boards pull the coil in when the input is LOW.
pub const RELAYS_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Both motor windings are released for this long before one is energised.
pub const MOTOR_DEAD_TIME_MS: u32 = 500;
/// Upper bound accepted for the dead time in a user config.
pub const MOTOR_DEAD_TIME_MAX_MS: u32 = 5_000;
