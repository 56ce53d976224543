//! SwampCooler controller library.
//!
//! Exposes the pure-logic modules for integration testing.  Raspberry Pi
//! GPIO is guarded by the `rpi` feature inside the hardware adapter;
//! everything else runs on any host.

#![deny(unused_must_use)]

pub mod app;
pub mod cli;
pub mod config;
pub mod cooler;
pub mod events;
pub mod hold_timer;
pub mod panel;
pub mod settings;

pub mod error;
pub mod pins;

pub mod adapters;
pub mod drivers;
