//! Relay and button drivers over `embedded-hal` 1.0 traits.
//!
//! Dual-target design: the drivers are generic over the pin and delay
//! traits, so the same code runs on Raspberry Pi GPIO (via the hardware
//! adapter) and on mock pins in host tests.

pub mod button;
pub mod delay;
pub mod motor;
pub mod pump;
pub mod relay;
